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

//! `<rel>Aggregate` filters.

use super::context::TranslationContext;
use super::relationship::{related_node, traversal};
use super::where_predicate::filter_list;
use crate::cypher::{Clause, ComparisonOp, Expr, NodePattern, Param, ReturnItem, Variable};
use crate::error::{Result, TranslateError};
use crate::schema::RelationField;
use serde_json::{Map, Value};

/// Push a counting subquery onto `subqueries` and return the predicate on
/// its result.
///
/// ```text
/// CALL {
/// WITH this
/// MATCH (this)<-[:ACTED_IN]-(this_actorsAggregate_node:Actor)
/// RETURN count(this_actorsAggregate_node) AS this_actorsAggregate_count
/// }
/// ```
pub(crate) fn aggregate_predicate(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    field: &RelationField,
    value: &Value,
    key: &str,
    depth: usize,
    subqueries: &mut Vec<Clause>,
) -> Result<Expr> {
    let node = related_node(ctx, field)?;
    let filter = value
        .as_object()
        .ok_or_else(|| TranslateError::invalid_value(key, "an aggregate filter object"))?;

    let counted = target.child(&format!("{}_node", key));
    let count = Variable::value(format!("{}_{}_count", target.hint(), key));
    let predicate = count_predicate(ctx, target, &count, field, filter, key, depth + 1)?;

    subqueries.push(Clause::Call {
        imports: vec![target.clone()],
        body: vec![
            Clause::matching(
                traversal(
                    target,
                    field,
                    None,
                    NodePattern::new(&counted).with_labels(node.labels.iter().cloned()),
                ),
                None,
            ),
            Clause::returning(ReturnItem::aliased(
                Expr::function("count", vec![Expr::var(&counted)]),
                &count,
            )),
        ],
    });
    Ok(predicate)
}

fn count_predicate(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    count: &Variable,
    field: &RelationField,
    input: &Map<String, Value>,
    key: &str,
    depth: usize,
) -> Result<Expr> {
    ctx.check_depth(depth)?;

    let mut predicates = Vec::with_capacity(input.len());
    for (name, value) in input {
        let predicate = match name.as_str() {
            "AND" | "OR" => {
                let mut children = Vec::new();
                for filter in filter_list(name, value)? {
                    children.push(count_predicate(ctx, target, count, field, filter, key, depth + 1)?);
                }
                if name == "AND" {
                    Expr::and(children)
                } else {
                    Expr::or(children)
                }
            }
            _ => {
                let op = match name.as_str() {
                    "count" => ComparisonOp::Eq,
                    "count_LT" => ComparisonOp::Lt,
                    "count_LTE" => ComparisonOp::Lte,
                    "count_GT" => ComparisonOp::Gt,
                    "count_GTE" => ComparisonOp::Gte,
                    _ => {
                        return Err(TranslateError::UnknownField {
                            type_name: format!("{}Aggregate", field.field_name),
                            field: name.clone(),
                        })
                    }
                };
                let n = value
                    .as_i64()
                    .ok_or_else(|| TranslateError::invalid_value(name, "an integer"))?;
                let param = Param::derived(target, format!("{}_{}", key, name), ctx.encode_integer(n));
                Expr::compare(op, Expr::var(count), Expr::param(param))
            }
        };
        predicates.push(predicate);
    }
    Ok(Expr::and(predicates))
}
