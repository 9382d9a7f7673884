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

//! Pre-parsed GraphQL directive nodes.

use crate::cypher::CypherValue;
use serde::{Deserialize, Serialize};

/// A directive argument literal, tagged with its GraphQL value kind.
///
/// In JSON: `{"kind": "Enum", "value": "IN"}`, `{"kind": "Null"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum DirectiveValue {
    /// Enum literal (`IN`).
    Enum(String),
    /// String literal (`"ACTED_IN"`).
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// List literal.
    List(Vec<DirectiveValue>),
    /// `null`.
    Null,
}

impl DirectiveValue {
    /// Literal kind as GraphQL names it.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DirectiveValue::Enum(_) => "EnumValue",
            DirectiveValue::String(_) => "StringValue",
            DirectiveValue::Boolean(_) => "BooleanValue",
            DirectiveValue::Int(_) => "IntValue",
            DirectiveValue::Float(_) => "FloatValue",
            DirectiveValue::List(_) => "ListValue",
            DirectiveValue::Null => "NullValue",
        }
    }

    /// Convert to a parameter value; enum literals become strings.
    pub fn to_cypher_value(&self) -> CypherValue {
        match self {
            DirectiveValue::Enum(s) | DirectiveValue::String(s) => CypherValue::String(s.clone()),
            DirectiveValue::Boolean(b) => CypherValue::Bool(*b),
            DirectiveValue::Int(i) => CypherValue::Int(*i),
            DirectiveValue::Float(f) => CypherValue::Float(*f),
            DirectiveValue::List(items) => CypherValue::List(items.iter().map(|v| v.to_cypher_value()).collect()),
            DirectiveValue::Null => CypherValue::Null,
        }
    }
}

/// One `name: value` argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveArgument {
    /// Argument name.
    pub name: String,
    /// Argument literal.
    pub value: DirectiveValue,
}

/// A directive application such as `@relationship(type: "ACTED_IN", direction: IN)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveNode {
    /// Directive name without `@`.
    pub name: String,
    /// Arguments in source order.
    #[serde(default)]
    pub arguments: Vec<DirectiveArgument>,
}

impl DirectiveNode {
    /// A directive with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn with_argument(mut self, name: impl Into<String>, value: DirectiveValue) -> Self {
        self.arguments.push(DirectiveArgument {
            name: name.into(),
            value,
        });
        self
    }

    /// The first argument with this name.
    pub fn argument(&self, name: &str) -> Option<&DirectiveValue> {
        self.arguments.iter().find(|a| a.name == name).map(|a| &a.value)
    }
}

/// The first directive with this name.
pub fn find_directive<'a>(directives: &'a [DirectiveNode], name: &str) -> Option<&'a DirectiveNode> {
    directives.iter().find(|d| d.name == name)
}
