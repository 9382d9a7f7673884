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

//! Read queries.

use super::context::TranslationContext;
use super::projection::project_node;
use super::resolve_tree::ResolveTree;
use super::where_predicate::create_where_predicate;
use crate::auth::AuthOperation;
use crate::cypher::{Clause, CompiledStatement, Expr, NodePattern, Param, Pattern, Query, ReturnItem, Variable, WithItems};
use crate::error::{Result, TranslateError};
use crate::schema::{GraphElement, Node};
use serde_json::{Map, Value};
use tracing::debug;

/// `MATCH (this:Label)` plus the filter and authorization predicate.
///
/// Without aggregate filters the predicate sits on the `MATCH`. With them
/// the counting subqueries follow the `MATCH` and the predicate moves to
/// a `WITH * WHERE`.
pub(crate) fn match_root(
    ctx: &TranslationContext<'_>,
    node: &Node,
    this: &Variable,
    filter: Option<&Map<String, Value>>,
    operation: AuthOperation,
) -> Result<Vec<Clause>> {
    let compiled = match filter {
        Some(filter) => create_where_predicate(ctx, this, node, filter)?,
        None => Default::default(),
    };
    let auth = ctx.auth_predicate(node, this, operation)?;
    let predicate = Expr::and(compiled.predicate.into_iter().chain(auth).collect()).non_empty();

    let pattern = Pattern::new(NodePattern::new(this).with_labels(node.labels.iter().cloned()));
    if compiled.subqueries.is_empty() {
        return Ok(vec![Clause::matching(pattern, predicate)]);
    }

    let mut clauses = Vec::with_capacity(compiled.subqueries.len() + 2);
    clauses.push(Clause::matching(pattern, None));
    clauses.extend(compiled.subqueries);
    if let Some(predicate) = predicate {
        clauses.push(Clause::with_filter(predicate));
    }
    Ok(clauses)
}

/// Translate a top-level read of `type_name`.
///
/// ```
/// # use gql_cypher::{Schema, TranslateConfig};
/// # use gql_cypher::schema::{AttributeField, Node, ScalarKind};
/// # use gql_cypher::translate::{translate_read, ResolveTree, TranslationContext};
/// # use serde_json::json;
/// let schema = Schema::new()
///     .with_node(Node::new("Movie").with_attribute(AttributeField::primitive("title", ScalarKind::String)));
/// let config = TranslateConfig::default();
/// let ctx = TranslationContext::new(&schema, &config);
///
/// let tree = ResolveTree::new("movies")
///     .with_where(json!({"title": "Matrix"}))
///     .with_fields(["title"]);
/// let statement = translate_read(&ctx, "Movie", &tree).unwrap();
/// assert_eq!(
///     statement.cypher,
///     "MATCH (this:Movie)\nWHERE this.title = $this_title\nRETURN this { .title } AS this"
/// );
/// assert_eq!(statement.params_json(), json!({"this_title": "Matrix"}));
/// ```
pub fn translate_read(ctx: &TranslationContext<'_>, type_name: &str, tree: &ResolveTree) -> Result<CompiledStatement> {
    debug!(type_name, field = %tree.name, "translating read");
    let node = ctx.schema.require_node(type_name)?;
    let this = ctx.root_variable();

    let mut query = Query::new();
    query.extend(match_root(ctx, node, &this, tree.where_object()?, AuthOperation::Read)?);
    if let Some(page) = pagination(ctx, node, &this, tree)? {
        query.push(page);
    }

    let mut calls = Vec::new();
    let projection = project_node(ctx, &this, node, &tree.fields, Some(&mut calls))?;
    query.extend(calls);
    query.push(Clause::returning(ReturnItem::aliased(projection, &this)));

    query.build(ctx.config)
}

/// `WITH this ORDER BY ... SKIP ... LIMIT ...`, if any of them is requested.
fn pagination(ctx: &TranslationContext<'_>, node: &Node, this: &Variable, tree: &ResolveTree) -> Result<Option<Clause>> {
    let args = &tree.args;
    if args.sort.is_empty() && args.limit.is_none() && args.offset.is_none() {
        return Ok(None);
    }

    let mut order_by = Vec::new();
    for entry in &args.sort {
        for (field, direction) in entry {
            let attribute = node.attribute(field).ok_or_else(|| TranslateError::UnknownField {
                type_name: node.name.clone(),
                field: field.clone(),
            })?;
            order_by.push((Expr::property(this, &attribute.db_property_name), *direction));
        }
    }

    let count_param = |name: &str, value: Option<i64>| -> Result<Option<Expr>> {
        match value {
            None => Ok(None),
            Some(v) if v < 0 => Err(TranslateError::invalid_value(name, "a non-negative integer")),
            Some(v) => Ok(Some(Expr::param(Param::derived(this, name, ctx.encode_integer(v))))),
        }
    };

    Ok(Some(Clause::With {
        items: WithItems::Items(vec![ReturnItem::variable(this)]),
        distinct: false,
        order_by,
        skip: count_param("offset", args.offset)?,
        limit: count_param("limit", args.limit)?,
        predicate: None,
    }))
}
