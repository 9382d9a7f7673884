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

//! Node and relationship-properties descriptors.

use super::relationship::RelationshipMeta;
use crate::cypher::{CypherValue, PointKind, TemporalKind};
use std::fmt;

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `ID`
    Id,
    /// `String`
    String,
    /// `Int`
    Int,
    /// `Float`
    Float,
    /// `Boolean`
    Boolean,
    /// `BigInt`
    BigInt,
}

impl ScalarKind {
    /// Resolve a GraphQL scalar name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "ID" => Some(ScalarKind::Id),
            "String" => Some(ScalarKind::String),
            "Int" => Some(ScalarKind::Int),
            "Float" => Some(ScalarKind::Float),
            "Boolean" => Some(ScalarKind::Boolean),
            "BigInt" => Some(ScalarKind::BigInt),
            _ => None,
        }
    }

    /// The GraphQL scalar name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Id => "ID",
            ScalarKind::String => "String",
            ScalarKind::Int => "Int",
            ScalarKind::Float => "Float",
            ScalarKind::Boolean => "Boolean",
            ScalarKind::BigInt => "BigInt",
        }
    }
}

/// Kind of a non-relationship field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Built-in scalar.
    Primitive(ScalarKind),
    /// Date/time/duration.
    Temporal(TemporalKind),
    /// Spatial point.
    Point(PointKind),
    /// Declared enum, by name.
    Enum(String),
}

impl AttributeKind {
    /// Resolve a field type name; enums must be listed in `enums`.
    pub fn from_type_name(name: &str, enums: &[String]) -> Option<Self> {
        if let Some(kind) = ScalarKind::from_type_name(name) {
            return Some(AttributeKind::Primitive(kind));
        }
        if let Some(kind) = TemporalKind::from_type_name(name) {
            return Some(AttributeKind::Temporal(kind));
        }
        if let Some(kind) = PointKind::from_type_name(name) {
            return Some(AttributeKind::Point(kind));
        }
        if enums.iter().any(|e| e == name) {
            return Some(AttributeKind::Enum(name.to_string()));
        }
        None
    }

    /// Whether string operators (`CONTAINS`, `STARTS_WITH`, ...) apply.
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            AttributeKind::Primitive(ScalarKind::String | ScalarKind::Id) | AttributeKind::Enum(_)
        )
    }

    /// Whether ordering operators (`LT`, `GTE`, ...) apply.
    pub fn is_ordered(&self) -> bool {
        !matches!(
            self,
            AttributeKind::Primitive(ScalarKind::Boolean) | AttributeKind::Enum(_)
        )
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Primitive(k) => f.write_str(k.as_str()),
            AttributeKind::Temporal(k) => f.write_str(k.as_str()),
            AttributeKind::Point(k) => f.write_str(k.as_str()),
            AttributeKind::Enum(name) => write!(f, "enum {}", name),
        }
    }
}

/// A stored property of a node or relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeField {
    /// GraphQL field name.
    pub field_name: String,
    /// Property name in the database (`@alias`), defaults to the field name.
    pub db_property_name: String,
    /// Value kind.
    pub kind: AttributeKind,
    /// `[T]` field.
    pub list: bool,
    /// Non-null (`T!`); mutations may not set it to null.
    pub required: bool,
    /// `@unique` or `@id`.
    pub unique: bool,
    /// `@coalesce` default for filters.
    pub coalesce_value: Option<CypherValue>,
}

impl AttributeField {
    /// A field stored under its own name.
    pub fn new(field_name: impl Into<String>, kind: AttributeKind) -> Self {
        let field_name = field_name.into();
        Self {
            db_property_name: field_name.clone(),
            field_name,
            kind,
            list: false,
            required: false,
            unique: false,
            coalesce_value: None,
        }
    }

    /// Shorthand for a primitive field.
    pub fn primitive(field_name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(field_name, AttributeKind::Primitive(kind))
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

    /// Store under a different property name.
    pub fn with_alias(mut self, property: impl Into<String>) -> Self {
        self.db_property_name = property.into();
        self
    }

    /// Mark as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Default used when the property is absent.
    pub fn with_coalesce(mut self, value: impl Into<CypherValue>) -> Self {
        self.coalesce_value = Some(value.into());
        self
    }

    /// Human-readable kind for error messages, e.g. `[String]`.
    pub fn kind_label(&self) -> String {
        if self.list {
            format!("[{}]", self.kind)
        } else {
            self.kind.to_string()
        }
    }
}

/// A `@relationship` field.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationField {
    /// GraphQL field name.
    pub field_name: String,
    /// Target type name.
    pub target: String,
    /// Parsed directive.
    pub meta: RelationshipMeta,
    /// `[T]` field.
    pub list: bool,
}

impl RelationField {
    /// Build a relation field.
    pub fn new(field_name: impl Into<String>, target: impl Into<String>, meta: RelationshipMeta, list: bool) -> Self {
        Self {
            field_name: field_name.into(),
            target: target.into(),
            meta,
            list,
        }
    }

    /// `{field}Connection`
    pub fn connection_field_name(&self) -> String {
        format!("{}Connection", self.field_name)
    }
}

/// Anything with attribute fields that a where filter can target.
pub trait GraphElement {
    /// Type name.
    fn name(&self) -> &str;

    /// Attribute fields in declaration order.
    fn attributes(&self) -> &[AttributeField];

    /// Relationship fields; relationship properties have none.
    fn relation_fields(&self) -> &[RelationField] {
        &[]
    }

    /// Attribute by GraphQL field name.
    fn attribute(&self, field_name: &str) -> Option<&AttributeField> {
        self.attributes().iter().find(|a| a.field_name == field_name)
    }

    /// Relation field by GraphQL field name.
    fn relation_field(&self, field_name: &str) -> Option<&RelationField> {
        self.relation_fields().iter().find(|r| r.field_name == field_name)
    }

    /// Built-in scalar fields.
    fn primitive_fields(&self) -> Vec<&AttributeField> {
        self.attributes()
            .iter()
            .filter(|a| matches!(a.kind, AttributeKind::Primitive(_)))
            .collect()
    }

    /// Temporal fields.
    fn temporal_fields(&self) -> Vec<&AttributeField> {
        self.attributes()
            .iter()
            .filter(|a| matches!(a.kind, AttributeKind::Temporal(_)))
            .collect()
    }

    /// Point fields.
    fn point_fields(&self) -> Vec<&AttributeField> {
        self.attributes()
            .iter()
            .filter(|a| matches!(a.kind, AttributeKind::Point(_)))
            .collect()
    }

    /// Enum fields.
    fn enum_fields(&self) -> Vec<&AttributeField> {
        self.attributes()
            .iter()
            .filter(|a| matches!(a.kind, AttributeKind::Enum(_)))
            .collect()
    }

    /// Unique fields.
    fn unique_fields(&self) -> Vec<&AttributeField> {
        self.attributes().iter().filter(|a| a.unique).collect()
    }
}

/// Descriptor of a GraphQL object type stored as nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// GraphQL type name.
    pub name: String,
    /// Labels; the first is the main label.
    pub labels: Vec<String>,
    /// Attribute fields.
    pub attributes: Vec<AttributeField>,
    /// Relationship fields.
    pub relation_fields: Vec<RelationField>,
}

impl Node {
    /// A node labelled with its own name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            labels: vec![name.clone()],
            name,
            attributes: Vec::new(),
            relation_fields: Vec::new(),
        }
    }

    /// Replace the labels.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: AttributeField) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a relation field.
    pub fn with_relation(mut self, relation: RelationField) -> Self {
        self.relation_fields.push(relation);
        self
    }

    /// Relation field whose connection field is `connection_field`.
    pub fn connection_field(&self, connection_field: &str) -> Option<&RelationField> {
        let field_name = connection_field.strip_suffix("Connection")?;
        self.relation_field(field_name)
    }
}

impl GraphElement for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &[AttributeField] {
        &self.attributes
    }

    fn relation_fields(&self) -> &[RelationField] {
        &self.relation_fields
    }
}

/// Descriptor of a relationship properties type.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipProperties {
    /// GraphQL type name.
    pub name: String,
    /// Attribute fields.
    pub attributes: Vec<AttributeField>,
}

impl RelationshipProperties {
    /// An empty properties type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: AttributeField) -> Self {
        self.attributes.push(attribute);
        self
    }
}

impl GraphElement for RelationshipProperties {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &[AttributeField] {
        &self.attributes
    }
}
