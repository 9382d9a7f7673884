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

//! Check-schema command - directive validation and descriptor listing

use super::load_schema;
use crate::error::CliError;
use colored::Colorize;
use gql_cypher::schema::{RelationField, RelationshipDirection};
use gql_cypher::Schema;

fn relation_arrow(relation: &RelationField) -> String {
    let rel_type = &relation.meta.rel_type;
    match relation.meta.direction {
        RelationshipDirection::In => format!("<-[:{}]-", rel_type),
        RelationshipDirection::Out => format!("-[:{}]->", rel_type),
    }
}

/// One block per node: labels, attributes, then relationships.
pub fn summarize_schema(schema: &Schema) -> String {
    let mut out = String::new();
    for node in schema.nodes() {
        out.push_str(&format!("  {} (:{})\n", node.name.as_str().bold(), node.labels.join(":")));
        for attribute in &node.attributes {
            let property = if attribute.db_property_name != attribute.field_name {
                format!(" -> {}", attribute.db_property_name)
            } else {
                String::new()
            };
            out.push_str(&format!("    {}: {}{}\n", attribute.field_name, attribute.kind_label(), property));
        }
        for relation in &node.relation_fields {
            let properties = relation
                .meta
                .properties
                .as_deref()
                .map(|p| format!(" {{{}}}", p))
                .unwrap_or_default();
            out.push_str(&format!(
                "    {} {} {}{}\n",
                relation.field_name,
                relation_arrow(relation),
                relation.target,
                properties
            ));
        }
    }
    out
}

/// Build the schema in `file` and print its descriptors.
pub fn check_schema(file: &str) -> Result<(), CliError> {
    match load_schema(file) {
        Ok(schema) => {
            println!("{} {}", "✓".green().bold(), file);
            println!("  Nodes: {}", schema.nodes().count());
            println!(
                "  Relationship properties: {}",
                schema.all_relationship_properties().count()
            );
            print!("{}", summarize_schema(&schema));
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gql_cypher::schema::{AttributeField, Node, RelationshipMeta, ScalarKind};

    #[test]
    fn test_summary_lists_alias_and_relationship() {
        colored::control::set_override(false);
        let schema = Schema::new().with_node(
            Node::new("Actor")
                .with_attribute(AttributeField::primitive("nickname", ScalarKind::String).with_alias("stageName"))
                .with_relation(RelationField::new(
                    "movies",
                    "Movie",
                    RelationshipMeta {
                        direction: RelationshipDirection::Out,
                        rel_type: "ACTED_IN".into(),
                        properties: Some("ActedIn".into()),
                        allow_multiple: None,
                    },
                    true,
                )),
        );
        let summary = summarize_schema(&schema);
        assert!(summary.contains("Actor (:Actor)"));
        assert!(summary.contains("nickname: String -> stageName"));
        assert!(summary.contains("movies -[:ACTED_IN]-> Movie {ActedIn}"));
    }
}
