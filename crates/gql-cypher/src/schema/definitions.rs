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

//! Type definitions as handed over by the schema parser.
//!
//! These mirror the parts of a GraphQL document the translator needs:
//! object types, interfaces, relationship properties types and enum names,
//! each field with its type name, list flag and directives.

use super::directive::{find_directive, DirectiveNode, DirectiveValue};
use super::node::{AttributeField, AttributeKind, Node, RelationField, RelationshipProperties};
use super::relationship::RelationshipMeta;
use super::Schema;
use crate::error::{Result, TranslateError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name.
    pub name: String,
    /// Named type, with list and non-null wrappers removed.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the type is a list.
    #[serde(default)]
    pub list: bool,
    /// Whether the outer type is non-null (`T!`).
    #[serde(default)]
    pub required: bool,
    /// Directives applied to the field.
    #[serde(default)]
    pub directives: Vec<DirectiveNode>,
}

impl FieldDefinition {
    /// A scalar field with no directives.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            list: false,
            required: false,
            directives: Vec::new(),
        }
    }

    /// Mark as a list.
    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    /// Mark as non-null.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Add a directive.
    pub fn with_directive(mut self, directive: DirectiveNode) -> Self {
        self.directives.push(directive);
        self
    }
}

/// An object type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTypeDefinition {
    /// Type name.
    pub name: String,
    /// Type-level directives (`@node`).
    #[serde(default)]
    pub directives: Vec<DirectiveNode>,
    /// Implemented interfaces.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Fields.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// An interface or relationship properties type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceTypeDefinition {
    /// Type name.
    pub name: String,
    /// Fields.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// Everything the schema builder reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinitions {
    /// Object types; each becomes a [`Node`].
    #[serde(default)]
    pub types: Vec<ObjectTypeDefinition>,
    /// Interfaces; abstract relationship targets and sources of inherited
    /// field directives.
    #[serde(default)]
    pub interfaces: Vec<InterfaceTypeDefinition>,
    /// Relationship properties types.
    #[serde(default)]
    pub relationship_properties: Vec<InterfaceTypeDefinition>,
    /// Union type names; abstract relationship targets.
    #[serde(default)]
    pub unions: Vec<String>,
    /// Enum type names.
    #[serde(default)]
    pub enums: Vec<String>,
}

impl TypeDefinitions {
    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn string_argument(directive: &DirectiveNode, argument: &str) -> Result<Option<String>> {
    match directive.argument(argument) {
        None => Ok(None),
        Some(DirectiveValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(TranslateError::invalid_argument(&directive.name, argument, "string")),
    }
}

fn node_labels(definition: &ObjectTypeDefinition) -> Result<Vec<String>> {
    let directive = match find_directive(&definition.directives, "node") {
        Some(d) => d,
        None => return Ok(vec![definition.name.clone()]),
    };

    let mut labels = vec![string_argument(directive, "label")?.unwrap_or_else(|| definition.name.clone())];
    match directive.argument("additionalLabels") {
        None => {}
        Some(DirectiveValue::List(items)) => {
            for item in items {
                match item {
                    DirectiveValue::String(s) => labels.push(s.clone()),
                    _ => return Err(TranslateError::invalid_argument("node", "additionalLabels", "list of strings")),
                }
            }
        }
        Some(_) => return Err(TranslateError::invalid_argument("node", "additionalLabels", "list of strings")),
    }
    Ok(labels)
}

fn attribute_field(
    owner: &str,
    field: &FieldDefinition,
    definitions: &TypeDefinitions,
) -> Result<AttributeField> {
    let kind = match AttributeKind::from_type_name(&field.type_name, &definitions.enums) {
        Some(kind) => kind,
        None => {
            let is_graph_type = definitions.types.iter().any(|t| t.name == field.type_name)
                || definitions.interfaces.iter().any(|i| i.name == field.type_name)
                || definitions.unions.iter().any(|u| *u == field.type_name);
            if is_graph_type {
                return Err(TranslateError::MissingRelationshipDirective {
                    field: format!("{}.{}", owner, field.name),
                    target: field.type_name.clone(),
                });
            }
            return Err(TranslateError::UnknownType {
                type_name: field.type_name.clone(),
                context: format!("{}.{}", owner, field.name),
            });
        }
    };

    let mut attribute = AttributeField::new(&field.name, kind);
    attribute.list = field.list;
    attribute.required = field.required;

    for directive in &field.directives {
        match directive.name.as_str() {
            "alias" => {
                let property = string_argument(directive, "property")?
                    .ok_or_else(|| TranslateError::missing_argument("alias", "property"))?;
                attribute.db_property_name = property;
            }
            "coalesce" => {
                let value = directive
                    .argument("value")
                    .ok_or_else(|| TranslateError::missing_argument("coalesce", "value"))?;
                attribute.coalesce_value = Some(value.to_cypher_value());
            }
            "unique" | "id" => attribute.unique = true,
            _ => {}
        }
    }
    Ok(attribute)
}

impl Schema {
    /// Build every descriptor eagerly; any malformed directive or dangling
    /// type reference fails the whole build.
    pub fn from_type_definitions(definitions: &TypeDefinitions) -> Result<Self> {
        let mut schema = Schema::new();

        for abstract_name in definitions
            .interfaces
            .iter()
            .map(|i| i.name.as_str())
            .chain(definitions.unions.iter().map(String::as_str))
        {
            schema.abstract_types.insert(abstract_name.to_string());
        }

        for properties in &definitions.relationship_properties {
            let mut descriptor = RelationshipProperties::new(&properties.name);
            for field in &properties.fields {
                descriptor.attributes.push(attribute_field(&properties.name, field, definitions)?);
            }
            schema.relationship_properties.insert(properties.name.clone(), descriptor);
        }

        for definition in &definitions.types {
            let mut node = Node::new(&definition.name).with_labels(node_labels(definition)?);

            for field in &definition.fields {
                let interface_field = definitions
                    .interfaces
                    .iter()
                    .filter(|i| definition.interfaces.contains(&i.name))
                    .find_map(|i| i.fields.iter().find(|f| f.name == field.name));

                let meta = RelationshipMeta::from_directives(
                    &field.directives,
                    interface_field.map(|f| f.directives.as_slice()),
                )?;

                match meta {
                    Some(meta) => {
                        let context = format!("{}.{}", definition.name, field.name);
                        let target_known = definitions.types.iter().any(|t| t.name == field.type_name)
                            || schema.abstract_types.contains(&field.type_name);
                        if !target_known {
                            return Err(TranslateError::UnknownType {
                                type_name: field.type_name.clone(),
                                context,
                            });
                        }
                        if let Some(properties) = &meta.properties {
                            if !schema.relationship_properties.contains_key(properties) {
                                return Err(TranslateError::UnknownType {
                                    type_name: properties.clone(),
                                    context,
                                });
                            }
                        }
                        node.relation_fields
                            .push(RelationField::new(&field.name, &field.type_name, meta, field.list));
                    }
                    None => node.attributes.push(attribute_field(&definition.name, field, definitions)?),
                }
            }

            debug!(
                node = %node.name,
                attributes = node.attributes.len(),
                relationships = node.relation_fields.len(),
                "built node descriptor"
            );
            schema.nodes.insert(node.name.clone(), node);
        }

        Ok(schema)
    }
}
