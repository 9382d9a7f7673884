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

//! Traversal patterns.
//!
//! Two builders live here. [`Pattern`] is the IR form used inside
//! expressions and clauses and renders against an environment.
//! [`build_relationship_statement`] produces a standalone text fragment for
//! callers that already know their variable names.

use super::environment::CypherEnvironment;
use super::escape::{escape_identifier, escape_label, escape_relationship_type, to_identifier};
use super::expr::{render_map, Expr};
use super::statements::{join_statements, CypherStatement};
use super::value::CypherValue;
use super::variable::Variable;
use crate::error::Result;
use crate::schema::{RelationshipDirection, RelationshipMeta};
use std::collections::BTreeMap;

/// Arrow glyphs around a relationship segment, read left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `<-[]-`
    Left,
    /// `-[]->`
    Right,
    /// `-[]-`
    Undirected,
}

impl Direction {
    /// Glyphs for a relationship read from its declaring node.
    pub fn from_relationship(direction: RelationshipDirection, directed: bool) -> Self {
        if !directed {
            return Direction::Undirected;
        }
        match direction {
            RelationshipDirection::In => Direction::Left,
            RelationshipDirection::Out => Direction::Right,
        }
    }

    fn glyphs(&self) -> (&'static str, &'static str) {
        match self {
            Direction::Left => ("<-", "-"),
            Direction::Right => ("-", "->"),
            Direction::Undirected => ("-", "-"),
        }
    }
}

/// A node segment.
#[derive(Debug, Clone, Default)]
pub struct NodePattern {
    variable: Option<Variable>,
    labels: Vec<String>,
    properties: Vec<(String, Expr)>,
}

impl NodePattern {
    /// A node bound to `variable`.
    pub fn new(variable: &Variable) -> Self {
        Self {
            variable: Some(variable.clone()),
            ..Self::default()
        }
    }

    /// A node with no variable.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add labels.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Add an inline property map.
    pub fn with_properties(mut self, properties: Vec<(String, Expr)>) -> Self {
        self.properties = properties;
        self
    }

    fn render(&self, env: &mut CypherEnvironment) -> String {
        let mut out = String::from("(");
        if let Some(v) = &self.variable {
            out.push_str(&env.variable_name(v));
        }
        for label in &self.labels {
            out.push_str(&escape_label(label));
        }
        if !self.properties.is_empty() {
            out.push(' ');
            out.push_str(&render_map(&self.properties, env));
        }
        out.push(')');
        out
    }
}

/// A relationship segment.
#[derive(Debug, Clone)]
pub struct RelationshipPattern {
    variable: Option<Variable>,
    rel_type: Option<String>,
    direction: Direction,
    properties: Vec<(String, Expr)>,
}

impl RelationshipPattern {
    /// An untyped relationship with no variable.
    pub fn new(direction: Direction) -> Self {
        Self {
            variable: None,
            rel_type: None,
            direction,
            properties: Vec::new(),
        }
    }

    /// Type and direction taken from relationship metadata.
    pub fn from_meta(meta: &RelationshipMeta, directed: bool) -> Self {
        Self::new(Direction::from_relationship(meta.direction, directed)).with_type(&meta.rel_type)
    }

    /// Bind a variable.
    pub fn with_variable(mut self, variable: &Variable) -> Self {
        self.variable = Some(variable.clone());
        self
    }

    /// Restrict the type.
    pub fn with_type(mut self, rel_type: impl Into<String>) -> Self {
        self.rel_type = Some(rel_type.into());
        self
    }

    /// Add an inline property map.
    pub fn with_properties(mut self, properties: Vec<(String, Expr)>) -> Self {
        self.properties = properties;
        self
    }

    fn render(&self, env: &mut CypherEnvironment) -> String {
        let (left, right) = self.direction.glyphs();
        let mut body = String::new();
        if let Some(v) = &self.variable {
            body.push_str(&env.variable_name(v));
        }
        if let Some(t) = &self.rel_type {
            body.push_str(&escape_relationship_type(t));
        }
        if !self.properties.is_empty() {
            body.push(' ');
            body.push_str(&render_map(&self.properties, env));
        }
        format!("{}[{}]{}", left, body, right)
    }
}

/// A traversal: a start node followed by zero or more hops.
#[derive(Debug, Clone)]
pub struct Pattern {
    start: NodePattern,
    hops: Vec<(RelationshipPattern, NodePattern)>,
}

impl Pattern {
    /// A pattern of a single node.
    pub fn new(start: NodePattern) -> Self {
        Self {
            start,
            hops: Vec::new(),
        }
    }

    /// Append a hop.
    pub fn related(mut self, relationship: RelationshipPattern, node: NodePattern) -> Self {
        self.hops.push((relationship, node));
        self
    }

    /// Render to Cypher text.
    pub fn render(&self, env: &mut CypherEnvironment) -> String {
        let mut out = self.start.render(env);
        for (rel, node) in &self.hops {
            out.push_str(&rel.render(env));
            out.push_str(&node.render(env));
        }
        out
    }
}

/// A node for [`build_relationship_statement`].
#[derive(Debug, Clone, Default)]
pub struct NodeRef<'a> {
    /// Variable name, if any.
    pub variable: Option<&'a str>,
    /// Labels to match.
    pub labels: &'a [String],
    /// Inline properties.
    pub parameters: BTreeMap<String, CypherValue>,
}

/// A relationship for [`build_relationship_statement`].
#[derive(Debug, Clone)]
pub struct RelationshipRef<'a> {
    /// Variable name, if any.
    pub variable: Option<&'a str>,
    /// Relationship type; `None` matches any type.
    pub rel_type: Option<&'a str>,
    /// Direction relative to the source node.
    pub direction: RelationshipDirection,
    /// Inline properties.
    pub parameters: BTreeMap<String, CypherValue>,
}

impl<'a> RelationshipRef<'a> {
    /// Type and direction from metadata; no variable, no properties.
    pub fn from_meta(meta: &'a RelationshipMeta) -> Self {
        Self {
            variable: None,
            rel_type: Some(&meta.rel_type),
            direction: meta.direction,
            parameters: BTreeMap::new(),
        }
    }
}

fn inline_properties(
    variable: Option<&str>,
    role: &str,
    parameters: &BTreeMap<String, CypherValue>,
) -> (String, BTreeMap<String, CypherValue>) {
    if parameters.is_empty() {
        return (String::new(), BTreeMap::new());
    }
    // An anonymous element keeps the separator: `_node_key`.
    let prefix = format!("{}_{}", variable.map(to_identifier).unwrap_or_default(), role);
    let mut entries = Vec::with_capacity(parameters.len());
    let mut params = BTreeMap::new();
    for (key, value) in parameters {
        let name = format!("{}_{}", prefix, to_identifier(key));
        entries.push(format!("{}: ${}", escape_identifier(key), name));
        params.insert(name, value.clone());
    }
    (format!(" {{ {} }}", entries.join(", ")), params)
}

/// Render `(variable:Label { key: $variable_node_key })`.
pub fn build_node_statement(node: &NodeRef<'_>) -> CypherStatement {
    let mut query = String::from("(");
    if let Some(v) = node.variable {
        query.push_str(&escape_identifier(v));
    }
    for label in node.labels {
        query.push_str(&escape_label(label));
    }
    let (props, params) = inline_properties(node.variable, "node", &node.parameters);
    query.push_str(&props);
    query.push(')');
    CypherStatement::new(query).with_params(params)
}

/// Render `source-[relationship]-target` as a standalone fragment.
///
/// `IN` puts the arrow on the source side, `OUT` on the target side;
/// `directed = false` drops both arrows. Inline properties use parameters
/// prefixed `{variable}_node` and `{variable}_relationship`.
///
/// ```
/// # use gql_cypher::cypher::{build_relationship_statement, NodeRef, RelationshipRef};
/// # use gql_cypher::schema::RelationshipDirection;
/// # use std::collections::BTreeMap;
/// let movie = vec!["Movie".to_string()];
/// let source = NodeRef { variable: Some("this"), labels: &movie, parameters: BTreeMap::new() };
/// let target = NodeRef { variable: Some("a"), ..Default::default() };
/// let rel = RelationshipRef {
///     variable: None,
///     rel_type: Some("ACTED_IN"),
///     direction: RelationshipDirection::In,
///     parameters: BTreeMap::new(),
/// };
/// let stmt = build_relationship_statement(&source, &rel, &target, true).unwrap();
/// assert_eq!(stmt.query, "(this:Movie)<-[:ACTED_IN]-(a)");
/// ```
pub fn build_relationship_statement(
    source: &NodeRef<'_>,
    relationship: &RelationshipRef<'_>,
    target: &NodeRef<'_>,
    directed: bool,
) -> Result<CypherStatement> {
    let (left, right) = Direction::from_relationship(relationship.direction, directed).glyphs();

    let mut body = String::new();
    if let Some(v) = relationship.variable {
        body.push_str(&escape_identifier(v));
    }
    if let Some(t) = relationship.rel_type {
        body.push_str(&escape_relationship_type(t));
    }
    let (props, params) = inline_properties(relationship.variable, "relationship", &relationship.parameters);
    body.push_str(&props);

    let rel = CypherStatement::new(format!("{}[{}]{}", left, body, right)).with_params(params);
    join_statements(
        vec![build_node_statement(source), rel, build_node_statement(target)],
        "",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::variable::Param;
    use crate::error::TranslateError;

    fn rel(direction: RelationshipDirection) -> RelationshipRef<'static> {
        RelationshipRef {
            variable: None,
            rel_type: Some("ACTED_IN"),
            direction,
            parameters: BTreeMap::new(),
        }
    }

    fn node(variable: &'static str) -> NodeRef<'static> {
        NodeRef {
            variable: Some(variable),
            ..Default::default()
        }
    }

    #[test]
    fn test_direction_in_renders_left_arrow() {
        let stmt = build_relationship_statement(&node("a"), &rel(RelationshipDirection::In), &node("b"), true).unwrap();
        assert_eq!(stmt.query, "(a)<-[:ACTED_IN]-(b)");
    }

    #[test]
    fn test_direction_out_renders_right_arrow() {
        let stmt = build_relationship_statement(&node("a"), &rel(RelationshipDirection::Out), &node("b"), true).unwrap();
        assert_eq!(stmt.query, "(a)-[:ACTED_IN]->(b)");
    }

    #[test]
    fn test_undirected_overrides_metadata() {
        for direction in [RelationshipDirection::In, RelationshipDirection::Out] {
            let stmt = build_relationship_statement(&node("a"), &rel(direction), &node("b"), false).unwrap();
            assert_eq!(stmt.query, "(a)-[:ACTED_IN]-(b)");
        }
    }

    #[test]
    fn test_absent_type_matches_any() {
        let mut r = rel(RelationshipDirection::Out);
        r.rel_type = None;
        let stmt = build_relationship_statement(&node("a"), &r, &node("b"), true).unwrap();
        assert_eq!(stmt.query, "(a)-[]->(b)");
    }

    #[test]
    fn test_inline_properties_are_prefixed() {
        let labels = vec!["Actor".to_string()];
        let mut target = NodeRef {
            variable: Some("actor"),
            labels: &labels,
            parameters: BTreeMap::new(),
        };
        target.parameters.insert("name".into(), "Keanu".into());

        let mut r = rel(RelationshipDirection::In);
        r.variable = Some("edge");
        r.parameters.insert("screenTime".into(), 60i64.into());

        let stmt = build_relationship_statement(&node("this"), &r, &target, true).unwrap();
        assert_eq!(
            stmt.query,
            "(this)<-[edge:ACTED_IN { screenTime: $edge_relationship_screenTime }]-(actor:Actor { name: $actor_node_name })"
        );
        assert_eq!(stmt.parameters["edge_relationship_screenTime"], CypherValue::Int(60));
        assert_eq!(stmt.parameters["actor_node_name"], CypherValue::from("Keanu"));
    }

    #[test]
    fn test_inline_properties_without_variable() {
        let labels = vec!["Movie".to_string()];
        let mut source = NodeRef {
            labels: &labels,
            ..Default::default()
        };
        source.parameters.insert("id".into(), 1i64.into());
        let mut r = rel(RelationshipDirection::Out);
        r.parameters.insert("since".into(), 2020i64.into());

        let stmt = build_relationship_statement(&source, &r, &node("b"), true).unwrap();
        assert_eq!(
            stmt.query,
            "(:Movie { id: $_node_id })-[:ACTED_IN { since: $_relationship_since }]->(b)"
        );
        assert_eq!(stmt.parameters["_node_id"], CypherValue::Int(1));
        assert_eq!(stmt.parameters["_relationship_since"], CypherValue::Int(2020));
    }

    #[test]
    fn test_same_variable_different_values_collide() {
        let mut source = node("n");
        source.parameters.insert("id".into(), 1i64.into());
        let mut target = node("n");
        target.parameters.insert("id".into(), 2i64.into());
        let err = build_relationship_statement(&source, &rel(RelationshipDirection::Out), &target, true).unwrap_err();
        assert!(matches!(err, TranslateError::ParameterCollision { .. }));
    }

    #[test]
    fn test_ir_pattern_render() {
        let this = Variable::named("this");
        let actor = this.child("actors");
        let meta = RelationshipMeta {
            direction: RelationshipDirection::In,
            rel_type: "ACTED_IN".into(),
            properties: None,
            allow_multiple: None,
        };
        let pattern = Pattern::new(NodePattern::new(&this)).related(
            RelationshipPattern::from_meta(&meta, true),
            NodePattern::new(&actor).with_labels(["Actor"]),
        );
        let mut env = CypherEnvironment::new();
        assert_eq!(pattern.render(&mut env), "(this)<-[:ACTED_IN]-(this_actors:Actor)");

        let anonymous = Pattern::new(NodePattern::anonymous().with_labels(["Movie"]));
        assert_eq!(anonymous.render(&mut env), "(:Movie)");
    }

    #[test]
    fn test_ir_pattern_inline_params() {
        let this = Variable::named("this");
        let pattern = Pattern::new(NodePattern::new(&this).with_labels(["Movie"]).with_properties(vec![(
            "title".to_string(),
            Expr::param(Param::derived(&this, "title", "Up")),
        )]));
        let mut env = CypherEnvironment::new();
        assert_eq!(pattern.render(&mut env), "(this:Movie { title: $this_title })");
    }
}
