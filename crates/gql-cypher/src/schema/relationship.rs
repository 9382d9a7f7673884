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

//! `@relationship` metadata.

use super::directive::{find_directive, DirectiveNode, DirectiveValue};
use crate::error::{Result, TranslateError};
use serde::Serialize;
use std::fmt;

const DIRECTIVE: &str = "relationship";

/// Direction of a relationship as seen from the declaring type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationshipDirection {
    /// `(declaring)<-[]-(target)`
    In,
    /// `(declaring)-[]->(target)`
    Out,
}

impl fmt::Display for RelationshipDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipDirection::In => f.write_str("IN"),
            RelationshipDirection::Out => f.write_str("OUT"),
        }
    }
}

/// Parsed `@relationship(direction:, type:, properties:, allowMultiple:)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipMeta {
    /// Direction from the declaring type.
    pub direction: RelationshipDirection,
    /// Relationship type on the wire, e.g. `ACTED_IN`.
    pub rel_type: String,
    /// Name of the relationship properties type.
    pub properties: Option<String>,
    /// Whether connecting twice creates parallel relationships.
    pub allow_multiple: Option<bool>,
}

impl RelationshipMeta {
    /// Read `@relationship` from a field, falling back to the matching
    /// interface field. Returns `Ok(None)` when neither carries it.
    ///
    /// ```
    /// # use gql_cypher::schema::{DirectiveNode, DirectiveValue, RelationshipMeta, RelationshipDirection};
    /// let field = vec![DirectiveNode::new("relationship")
    ///     .with_argument("type", DirectiveValue::String("ACTED_IN".into()))
    ///     .with_argument("direction", DirectiveValue::Enum("IN".into()))];
    /// let meta = RelationshipMeta::from_directives(&field, None).unwrap().unwrap();
    /// assert_eq!(meta.direction, RelationshipDirection::In);
    /// assert_eq!(meta.rel_type, "ACTED_IN");
    /// ```
    pub fn from_directives(
        field: &[DirectiveNode],
        interface_field: Option<&[DirectiveNode]>,
    ) -> Result<Option<Self>> {
        let directive = match find_directive(field, DIRECTIVE)
            .or_else(|| interface_field.and_then(|d| find_directive(d, DIRECTIVE)))
        {
            Some(d) => d,
            None => return Ok(None),
        };

        let direction = match directive.argument("direction") {
            None => return Err(TranslateError::missing_argument(DIRECTIVE, "direction")),
            Some(DirectiveValue::Enum(value)) => match value.as_str() {
                "IN" => RelationshipDirection::In,
                "OUT" => RelationshipDirection::Out,
                other => {
                    return Err(TranslateError::InvalidDirectiveValue {
                        directive: DIRECTIVE.to_string(),
                        argument: "direction".to_string(),
                        value: other.to_string(),
                    })
                }
            },
            Some(_) => return Err(TranslateError::invalid_argument(DIRECTIVE, "direction", "enum")),
        };

        let rel_type = match directive.argument("type") {
            None => return Err(TranslateError::missing_argument(DIRECTIVE, "type")),
            Some(DirectiveValue::String(value)) => value.clone(),
            Some(_) => return Err(TranslateError::invalid_argument(DIRECTIVE, "type", "string")),
        };

        let properties = match directive.argument("properties") {
            None => None,
            Some(DirectiveValue::String(value)) => Some(value.clone()),
            Some(_) => return Err(TranslateError::invalid_argument(DIRECTIVE, "properties", "string")),
        };

        let allow_multiple = match directive.argument("allowMultiple") {
            None => None,
            Some(DirectiveValue::Boolean(value)) => Some(*value),
            Some(_) => {
                return Err(TranslateError::invalid_argument(
                    DIRECTIVE,
                    "allowMultiple",
                    "boolean",
                ))
            }
        };

        Ok(Some(RelationshipMeta {
            direction,
            rel_type,
            properties,
            allow_multiple,
        }))
    }
}
