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

//! Inputs that must be rejected.

use gql_cypher::ErrorCategory;
use serde_json::{json, Value};

/// Movie filters that fail, with the category of the failure.
///
/// Each tuple is (name, filter, expected_category).
pub fn invalid_movie_filters() -> Vec<(&'static str, Value, ErrorCategory)> {
    vec![
        ("unknown_operator", json!({"title_FOO": "x"}), ErrorCategory::FilterGrammar),
        ("ordering_on_enum", json!({"certificate_GT": "PG"}), ErrorCategory::FilterGrammar),
        ("string_op_on_int", json!({"released_CONTAINS": "19"}), ErrorCategory::FilterGrammar),
        ("includes_on_scalar", json!({"title_INCLUDES": "x"}), ErrorCategory::FilterGrammar),
        ("in_on_list", json!({"tags_IN": ["a"]}), ErrorCategory::FilterGrammar),
        ("abstract_target", json!({"director": {"name": "x"}}), ErrorCategory::SchemaContract),
        ("unknown_field", json!({"budget": 10}), ErrorCategory::Input),
        ("in_needs_list", json!({"title_IN": "x"}), ErrorCategory::Input),
        ("bad_duration", json!({"runtime": "PT"}), ErrorCategory::Input),
        ("bad_point", json!({"location": {"latitude": 1.0}}), ErrorCategory::Input),
        ("or_needs_objects", json!({"OR": [1, 2]}), ErrorCategory::Input),
        ("edge_without_properties", json!({"genresConnection": {"edge": {"x": 1}}}), ErrorCategory::Input),
    ]
}

/// Schema JSON documents that fail to build, with the category of the
/// failure.
pub fn invalid_schemas() -> Vec<(&'static str, &'static str, ErrorCategory)> {
    vec![
        (
            "missing_direction",
            r#"{"types": [
                {"name": "A", "fields": [{"name": "b", "type": "B", "directives": [
                    {"name": "relationship", "arguments": [{"name": "type", "value": {"kind": "String", "value": "R"}}]}
                ]}]},
                {"name": "B"}
            ]}"#,
            ErrorCategory::SchemaContract,
        ),
        (
            "direction_not_enum",
            r#"{"types": [
                {"name": "A", "fields": [{"name": "b", "type": "B", "directives": [
                    {"name": "relationship", "arguments": [
                        {"name": "type", "value": {"kind": "String", "value": "R"}},
                        {"name": "direction", "value": {"kind": "String", "value": "IN"}}
                    ]}
                ]}]},
                {"name": "B"}
            ]}"#,
            ErrorCategory::SchemaContract,
        ),
        (
            "unknown_scalar",
            r#"{"types": [{"name": "A", "fields": [{"name": "x", "type": "Money"}]}]}"#,
            ErrorCategory::SchemaContract,
        ),
        (
            "missing_relationship_directive",
            r#"{"types": [{"name": "A", "fields": [{"name": "b", "type": "B"}]}, {"name": "B"}]}"#,
            ErrorCategory::SchemaContract,
        ),
    ]
}
