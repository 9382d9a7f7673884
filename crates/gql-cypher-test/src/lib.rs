// Dweve GQL-Cypher - GraphQL to Cypher translation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared test fixtures and utilities for gql-cypher.
//!
//! # Quick Start
//!
//! ```rust
//! use gql_cypher::translate::TranslationContext;
//! use gql_cypher::TranslateConfig;
//! use gql_cypher_test::fixtures::{self, requests};
//! use serde_json::json;
//!
//! let schema = fixtures::movies_schema();
//! let config = TranslateConfig::default();
//! let ctx = TranslationContext::new(&schema, &config);
//!
//! let request = requests::read("Movie", requests::movies_where(json!({"title": "Up"})));
//! let statement = request.translate(&ctx).unwrap();
//! gql_cypher_test::assert_cypher_eq(
//!     &statement.cypher,
//!     "MATCH (this:Movie) WHERE this.title = $this_title RETURN this { .title } AS this",
//! );
//! ```

/// Canonical fixtures.
pub mod fixtures;

/// Collapse every whitespace run to one space and trim, so multi-line and
/// single-line renderings compare equal.
pub fn normalize_cypher(cypher: &str) -> String {
    cypher.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Assert two Cypher texts are equal up to whitespace.
#[track_caller]
pub fn assert_cypher_eq(actual: &str, expected: &str) {
    let actual = normalize_cypher(actual);
    let expected = normalize_cypher(expected);
    assert_eq!(actual, expected, "\n  actual: {}\nexpected: {}", actual, expected);
}

/// Every `$name` referenced by `cypher`, in order of first appearance.
pub fn referenced_parameters(cypher: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = cypher;
    while let Some(start) = rest.find('$') {
        let tail = &rest[start + 1..];
        let end = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(tail.len());
        let name = &tail[..end];
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        rest = &tail[end..];
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use gql_cypher::schema::GraphElement;

    #[test]
    fn test_normalize_cypher() {
        assert_eq!(normalize_cypher("MATCH (n)\n  WHERE  n.x = 1\n"), "MATCH (n) WHERE n.x = 1");
    }

    #[test]
    fn test_referenced_parameters() {
        assert_eq!(
            referenced_parameters("WHERE a = $a_1 AND b IN $b AND c = $a_1"),
            vec!["a_1".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_movies_schema_builds() {
        let schema = fixtures::movies_schema();
        let movie = schema.node("Movie").unwrap();
        assert_eq!(movie.relation_fields().len(), 3);
        assert!(schema.is_abstract("Person"));
        assert_eq!(schema.node("Genre").unwrap().labels, vec!["Category"]);
        let actor = schema.node("Actor").unwrap();
        assert_eq!(actor.attribute("nickname").unwrap().db_property_name, "stageName");
        assert_eq!(actor.relation_field("movies").unwrap().meta.rel_type, "ACTED_IN");
    }

    #[test]
    fn test_invalid_schemas_fail() {
        for (name, json, category) in fixtures::errors::invalid_schemas() {
            let definitions = gql_cypher::schema::TypeDefinitions::from_json(json).unwrap();
            let err = gql_cypher::Schema::from_type_definitions(&definitions).unwrap_err();
            assert_eq!(err.category(), category, "{}", name);
        }
    }
}
