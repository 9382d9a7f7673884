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

//! Schema descriptors.
//!
//! A [`Schema`] is built once, from [`TypeDefinitions`] or by hand, and is
//! read-only afterwards. It is passed explicitly to every translation.

pub mod definitions;
pub mod directive;
pub mod node;
pub mod relationship;

pub use definitions::{FieldDefinition, InterfaceTypeDefinition, ObjectTypeDefinition, TypeDefinitions};
pub use directive::{find_directive, DirectiveArgument, DirectiveNode, DirectiveValue};
pub use node::{
    AttributeField, AttributeKind, GraphElement, Node, RelationField, RelationshipProperties, ScalarKind,
};
pub use relationship::{RelationshipDirection, RelationshipMeta};

use crate::error::{Result, TranslateError};
use std::collections::{BTreeMap, BTreeSet};

/// All node and relationship-properties descriptors of one GraphQL schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    nodes: BTreeMap<String, Node>,
    relationship_properties: BTreeMap<String, RelationshipProperties>,
    abstract_types: BTreeSet<String>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node descriptor.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.insert(node.name.clone(), node);
        self
    }

    /// Add a relationship properties descriptor.
    pub fn with_relationship_properties(mut self, properties: RelationshipProperties) -> Self {
        self.relationship_properties.insert(properties.name.clone(), properties);
        self
    }

    /// Declare an interface or union name.
    pub fn with_abstract_type(mut self, name: impl Into<String>) -> Self {
        self.abstract_types.insert(name.into());
        self
    }

    /// Node descriptor by type name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Node descriptor by type name, or [`TranslateError::UnknownNode`].
    pub fn require_node(&self, name: &str) -> Result<&Node> {
        self.node(name)
            .ok_or_else(|| TranslateError::UnknownNode(name.to_string()))
    }

    /// Relationship properties descriptor by type name.
    pub fn relationship_properties(&self, name: &str) -> Option<&RelationshipProperties> {
        self.relationship_properties.get(name)
    }

    /// Whether `name` is an interface or union.
    pub fn is_abstract(&self, name: &str) -> bool {
        self.abstract_types.contains(name)
    }

    /// All nodes, by name.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All relationship properties types, by name.
    pub fn all_relationship_properties(&self) -> impl Iterator<Item = &RelationshipProperties> {
        self.relationship_properties.values()
    }
}
