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

//! Map projections for selections.
//!
//! Attributes project as `.field`, relation fields as pattern
//! comprehensions, and connection fields as `CALL` subqueries whose result
//! variable is projected. Subqueries can only be emitted at the top level.

use super::context::TranslationContext;
use super::relationship::{create_connection_where, related_node, related_properties, traversal};
use super::resolve_tree::ResolveTree;
use super::where_predicate::compile_where;
use crate::cypher::{Clause, Expr, NodePattern, ProjectionItem, ReturnItem, Variable, WithItems};
use crate::error::{Result, TranslateError};
use crate::schema::{GraphElement, Node, RelationField, RelationshipProperties};

/// `variable { ... }` for `fields` of `node`. Connection subqueries are
/// pushed onto `subqueries`; `None` rejects connection fields.
pub(crate) fn project_node(
    ctx: &TranslationContext<'_>,
    variable: &Variable,
    node: &Node,
    fields: &[ResolveTree],
    mut subqueries: Option<&mut Vec<Clause>>,
) -> Result<Expr> {
    let mut items = Vec::with_capacity(fields.len());
    for field in fields {
        let key = field.response_key().to_string();

        if field.name == "__typename" {
            items.push(ProjectionItem::Entry(key, Expr::literal(node.name.as_str())));
            continue;
        }
        if let Some(attribute) = node.attribute(&field.name) {
            if field.alias.is_none() && attribute.db_property_name == attribute.field_name {
                items.push(ProjectionItem::Property(attribute.field_name.clone()));
            } else {
                items.push(ProjectionItem::Entry(key, Expr::property(variable, &attribute.db_property_name)));
            }
            continue;
        }
        if let Some(relation) = node.relation_field(&field.name) {
            let expr = project_relation(ctx, variable, relation, field)?;
            items.push(ProjectionItem::Entry(key, expr));
            continue;
        }
        if let Some(relation) = node.connection_field(&field.name) {
            let subqueries = subqueries.as_deref_mut().ok_or_else(|| {
                TranslateError::Unsupported(format!("connection field '{}' below the top level", field.name))
            })?;
            let result = project_connection(ctx, variable, relation, field, subqueries)?;
            items.push(ProjectionItem::Entry(key, Expr::var(&result)));
            continue;
        }
        return Err(TranslateError::UnknownField {
            type_name: node.name.clone(),
            field: field.name.clone(),
        });
    }
    Ok(Expr::MapProjection {
        variable: variable.clone(),
        items,
    })
}

/// `[(this)<-[:ACTED_IN]-(this_actors:Actor) WHERE ... | this_actors { .name }]`
fn project_relation(
    ctx: &TranslationContext<'_>,
    variable: &Variable,
    relation: &RelationField,
    field: &ResolveTree,
) -> Result<Expr> {
    let node = related_node(ctx, relation)?;
    let child = variable.child(field.response_key());
    let predicate = match field.where_object()? {
        Some(filter) => compile_where(ctx, &child, node, filter, 1, None)?.non_empty(),
        None => None,
    };
    let projection = project_node(ctx, &child, node, &field.fields, None)?;

    let comprehension = Expr::PatternComprehension {
        pattern: traversal(
            variable,
            relation,
            None,
            NodePattern::new(&child).with_labels(node.labels.iter().cloned()),
        ),
        predicate: predicate.map(Box::new),
        projection: Box::new(projection),
    };
    Ok(if relation.list {
        comprehension
    } else {
        Expr::function("head", vec![comprehension])
    })
}

/// ```text
/// CALL {
/// WITH this
/// MATCH (this)<-[this_actorsConnection_relationship:ACTED_IN]-(this_actorsConnection_node:Actor)
/// WHERE ...
/// WITH collect({ screenTime: ..., node: this_actorsConnection_node { .name } }) AS edges
/// RETURN { edges: edges, totalCount: size(edges) } AS this_actorsConnection
/// }
/// ```
fn project_connection(
    ctx: &TranslationContext<'_>,
    variable: &Variable,
    relation: &RelationField,
    field: &ResolveTree,
    subqueries: &mut Vec<Clause>,
) -> Result<Variable> {
    let node = related_node(ctx, relation)?;
    let properties = related_properties(ctx, relation)?;
    let key = field.response_key();
    let node_var = variable.child(&format!("{}_node", key));
    let rel_var = variable.child_relationship(&format!("{}_relationship", key));
    let edges = Variable::value("edges");
    let result = variable.child(key);

    let predicate = match field.where_object()? {
        Some(filter) => create_connection_where(ctx, &node_var, node, &rel_var, properties, filter)?.non_empty(),
        None => None,
    };

    let mut edge_entries = Vec::new();
    for selection in &field.fields {
        match selection.name.as_str() {
            "edges" => {
                for edge_field in &selection.fields {
                    edge_entries.push(edge_entry(ctx, &node_var, node, &rel_var, properties, edge_field)?);
                }
            }
            "totalCount" | "__typename" => {}
            other => {
                return Err(TranslateError::UnknownField {
                    type_name: format!("{}Connection", relation.field_name),
                    field: other.to_string(),
                })
            }
        }
    }

    subqueries.push(Clause::Call {
        imports: vec![variable.clone()],
        body: vec![
            Clause::matching(
                traversal(
                    variable,
                    relation,
                    Some(&rel_var),
                    NodePattern::new(&node_var).with_labels(node.labels.iter().cloned()),
                ),
                predicate,
            ),
            Clause::With {
                items: WithItems::Items(vec![ReturnItem::aliased(
                    Expr::function("collect", vec![Expr::Map(edge_entries)]),
                    &edges,
                )]),
                distinct: false,
                order_by: Vec::new(),
                skip: None,
                limit: None,
                predicate: None,
            },
            Clause::returning(ReturnItem::aliased(
                Expr::Map(vec![
                    ("edges".to_string(), Expr::var(&edges)),
                    ("totalCount".to_string(), Expr::function("size", vec![Expr::var(&edges)])),
                ]),
                &result,
            )),
        ],
    });
    Ok(result)
}

fn edge_entry(
    ctx: &TranslationContext<'_>,
    node_var: &Variable,
    node: &Node,
    rel_var: &Variable,
    properties: Option<&RelationshipProperties>,
    field: &ResolveTree,
) -> Result<(String, Expr)> {
    let key = field.response_key().to_string();
    if field.name == "node" {
        return Ok((key, project_node(ctx, node_var, node, &field.fields, None)?));
    }
    let attribute = properties
        .and_then(|p| p.attribute(&field.name))
        .ok_or_else(|| TranslateError::UnknownField {
            type_name: properties.map(|p| p.name.clone()).unwrap_or_else(|| "edge".to_string()),
            field: field.name.clone(),
        })?;
    Ok((key, Expr::property(rel_var, &attribute.db_property_name)))
}
