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

//! Relationship and connection filters.
//!
//! Both compile to an existence check over the relationship pattern,
//! ANDed with a quantified condition over the related nodes. A `null`
//! value compiles to the existence check alone: `{actors: null}` is
//! "no actor", `{actors_NOT: null}` is "some actor".

use super::context::TranslationContext;
use super::where_key::WhereOperator;
use super::where_predicate::{compile_where, filter_list};
use crate::cypher::{ComparisonOp, Expr, NodePattern, Pattern, Quantifier, RelationshipPattern, Variable};
use crate::error::{Result, TranslateError};
use crate::schema::{Node, RelationField, RelationshipProperties};
use serde_json::{Map, Value};

/// The node type a relation field points at.
pub(crate) fn related_node<'a>(ctx: &TranslationContext<'a>, field: &RelationField) -> Result<&'a Node> {
    ctx.schema
        .node(&field.target)
        .ok_or_else(|| TranslateError::RelationshipTargetNotNode {
            field: field.field_name.clone(),
            target: field.target.clone(),
        })
}

/// The relationship properties type of a relation field, if declared.
pub(crate) fn related_properties<'a>(
    ctx: &TranslationContext<'a>,
    field: &RelationField,
) -> Result<Option<&'a RelationshipProperties>> {
    match &field.meta.properties {
        None => Ok(None),
        Some(name) => ctx
            .schema
            .relationship_properties(name)
            .map(Some)
            .ok_or_else(|| TranslateError::UnknownType {
                type_name: name.clone(),
                context: field.field_name.clone(),
            }),
    }
}

/// `(target)-[variable:TYPE]-(node:Label)`, following the declared direction.
pub(crate) fn traversal(
    target: &Variable,
    field: &RelationField,
    relationship: Option<&Variable>,
    node: NodePattern,
) -> Pattern {
    let mut rel = RelationshipPattern::from_meta(&field.meta, true);
    if let Some(variable) = relationship {
        rel = rel.with_variable(variable);
    }
    Pattern::new(NodePattern::new(target)).related(rel, node)
}

fn quantifier(field: &RelationField, operator: Option<WhereOperator>, kind: &str) -> Result<Quantifier> {
    match operator {
        None | Some(WhereOperator::Some) => Ok(Quantifier::Any),
        Some(WhereOperator::Not) | Some(WhereOperator::None) => Ok(Quantifier::None),
        Some(WhereOperator::All) => Ok(Quantifier::All),
        Some(WhereOperator::Single) => Ok(Quantifier::Single),
        Some(other) => Err(TranslateError::OperatorNotApplicable {
            operator: other.to_string(),
            field: field.field_name.clone(),
            kind: kind.to_string(),
        }),
    }
}

/// Only `NOT` flips a null check; every quantifier reads `null` as "none".
fn null_check(operator: Option<WhereOperator>, exists: Expr) -> Expr {
    match operator {
        Some(WhereOperator::Not) => exists,
        _ => Expr::not(exists),
    }
}

fn existence(target: &Variable, field: &RelationField, node: &Node) -> Expr {
    Expr::exists(traversal(
        target,
        field,
        None,
        NodePattern::anonymous().with_labels(node.labels.iter().cloned()),
    ))
}

/// `{actors_SOME: {...}}` and friends.
pub(crate) fn relationship_predicate(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    field: &RelationField,
    operator: Option<WhereOperator>,
    value: &Value,
    key: &str,
    depth: usize,
) -> Result<Expr> {
    let node = related_node(ctx, field)?;
    let quantifier = quantifier(field, operator, "relationship")?;
    let exists = existence(target, field, node);

    if value.is_null() {
        return Ok(null_check(operator, exists));
    }
    let filter = value
        .as_object()
        .ok_or_else(|| TranslateError::invalid_value(key, "a filter object or null"))?;

    let child = target.child(key);
    let inner = compile_where(ctx, &child, node, filter, depth + 1, None)?;
    let related = Expr::PatternComprehension {
        pattern: traversal(
            target,
            field,
            None,
            NodePattern::new(&child).with_labels(node.labels.iter().cloned()),
        ),
        predicate: None,
        projection: Box::new(Expr::var(&child)),
    };

    Ok(Expr::and(vec![
        exists,
        Expr::Quantified {
            quantifier,
            variable: child,
            list: Box::new(related),
            predicate: inner.non_empty().map(Box::new),
        },
    ]))
}

/// `{actorsConnection_SOME: {node: {...}, edge: {...}}}` and friends.
///
/// Matches are counted with a pattern comprehension so the node and the
/// relationship stay addressable inside the condition.
pub(crate) fn connection_predicate(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    field: &RelationField,
    operator: Option<WhereOperator>,
    value: &Value,
    key: &str,
    depth: usize,
) -> Result<Expr> {
    let node = related_node(ctx, field)?;
    let quantifier = quantifier(field, operator, "connection")?;
    let exists = existence(target, field, node);

    if value.is_null() {
        return Ok(null_check(operator, exists));
    }
    let filter = value
        .as_object()
        .ok_or_else(|| TranslateError::invalid_value(key, "a filter object or null"))?;

    let properties = related_properties(ctx, field)?;
    let node_var = target.child(key);
    let rel_var = target.child_relationship(&format!("{}_relationship", key));
    let condition = connection_where(ctx, &node_var, node, &rel_var, properties, filter, depth + 1)?;

    if condition.is_empty() && quantifier == Quantifier::All {
        return Ok(exists);
    }
    let (predicate, op, count) = match quantifier {
        Quantifier::All => (Expr::not(condition), ComparisonOp::Eq, 0i64),
        Quantifier::None => (condition, ComparisonOp::Eq, 0),
        Quantifier::Single => (condition, ComparisonOp::Eq, 1),
        Quantifier::Any => (condition, ComparisonOp::Gt, 0),
    };
    let matches = Expr::PatternComprehension {
        pattern: traversal(
            target,
            field,
            Some(&rel_var),
            NodePattern::new(&node_var).with_labels(node.labels.iter().cloned()),
        ),
        predicate: predicate.non_empty().map(Box::new),
        projection: Box::new(Expr::literal(1i64)),
    };

    Ok(Expr::and(vec![
        exists,
        Expr::compare(op, Expr::function("size", vec![matches]), Expr::literal(count)),
    ]))
}

/// Compile a connection where (`node`, `node_NOT`, `edge`, `edge_NOT`,
/// `AND`, `OR`) over a related node and the relationship reaching it.
///
/// `properties` is the relationship properties type; `edge` filters fail
/// without one.
pub fn create_connection_where(
    ctx: &TranslationContext<'_>,
    node_var: &Variable,
    node: &Node,
    rel_var: &Variable,
    properties: Option<&RelationshipProperties>,
    input: &Map<String, Value>,
) -> Result<Expr> {
    connection_where(ctx, node_var, node, rel_var, properties, input, 1)
}

fn connection_where(
    ctx: &TranslationContext<'_>,
    node_var: &Variable,
    node: &Node,
    rel_var: &Variable,
    properties: Option<&RelationshipProperties>,
    input: &Map<String, Value>,
    depth: usize,
) -> Result<Expr> {
    ctx.check_depth(depth)?;

    let mut predicates = Vec::with_capacity(input.len());
    for (key, value) in input {
        let predicate = match key.as_str() {
            "AND" | "OR" => {
                let mut children = Vec::new();
                for filter in filter_list(key, value)? {
                    children.push(connection_where(ctx, node_var, node, rel_var, properties, filter, depth + 1)?);
                }
                if key == "AND" {
                    Expr::and(children)
                } else {
                    Expr::or(children)
                }
            }
            "node" | "node_NOT" => {
                let filter = value
                    .as_object()
                    .ok_or_else(|| TranslateError::invalid_value(key, "a filter object"))?;
                let inner = compile_where(ctx, node_var, node, filter, depth + 1, None)?;
                negate_if(key.ends_with("_NOT"), inner)
            }
            "edge" | "edge_NOT" => {
                let properties = properties.ok_or_else(|| {
                    TranslateError::Unsupported(format!("'{}' filter on a relationship without properties", key))
                })?;
                let filter = value
                    .as_object()
                    .ok_or_else(|| TranslateError::invalid_value(key, "a filter object"))?;
                let inner = compile_where(ctx, rel_var, properties, filter, depth + 1, None)?;
                negate_if(key.ends_with("_NOT"), inner)
            }
            _ => {
                return Err(TranslateError::UnknownField {
                    type_name: format!("{}ConnectionWhere", node.name),
                    field: key.clone(),
                })
            }
        };
        predicates.push(predicate);
    }
    Ok(Expr::and(predicates))
}

fn negate_if(negate: bool, expr: Expr) -> Expr {
    if negate && !expr.is_empty() {
        Expr::not(expr)
    } else {
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::cypher::CypherEnvironment;
    use crate::schema::{AttributeField, RelationshipDirection, RelationshipMeta, ScalarKind, Schema};
    use crate::translate::create_where_predicate;
    use serde_json::json;

    fn schema() -> Schema {
        let acted_in = RelationshipMeta {
            direction: RelationshipDirection::In,
            rel_type: "ACTED_IN".into(),
            properties: Some("ActedIn".into()),
            allow_multiple: None,
        };
        let directed = RelationshipMeta {
            direction: RelationshipDirection::In,
            rel_type: "DIRECTED".into(),
            properties: None,
            allow_multiple: None,
        };
        Schema::new()
            .with_node(
                Node::new("Movie")
                    .with_attribute(AttributeField::primitive("title", ScalarKind::String))
                    .with_relation(RelationField::new("actors", "Actor", acted_in, true))
                    .with_relation(RelationField::new("director", "Person", directed, false)),
            )
            .with_node(Node::new("Actor").with_attribute(AttributeField::primitive("name", ScalarKind::String)))
            .with_relationship_properties(
                RelationshipProperties::new("ActedIn")
                    .with_attribute(AttributeField::primitive("screenTime", ScalarKind::Int)),
            )
            .with_abstract_type("Person")
    }

    fn compile(filter: Value) -> Result<String> {
        let schema = schema();
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let movie = schema.require_node("Movie")?;
        let this = Variable::named("this");
        let compiled = create_where_predicate(&ctx, &this, movie, filter.as_object().expect("object"))?;
        let mut env = CypherEnvironment::new();
        Ok(compiled.predicate.map(|p| p.render(&mut env)).unwrap_or_default())
    }

    #[test]
    fn test_null_checks_are_negations_of_each_other() {
        assert_eq!(
            compile(json!({"actors": null})).unwrap(),
            "NOT (exists((this)<-[:ACTED_IN]-(:Actor)))"
        );
        assert_eq!(
            compile(json!({"actors_NOT": null})).unwrap(),
            "exists((this)<-[:ACTED_IN]-(:Actor))"
        );
    }

    #[test]
    fn test_null_with_quantifier_means_no_relationship() {
        for key in ["actors_SOME", "actors_NONE", "actors_ALL", "actors_SINGLE"] {
            let mut filter = Map::new();
            filter.insert(key.to_string(), Value::Null);
            assert_eq!(
                compile(Value::Object(filter)).unwrap(),
                "NOT (exists((this)<-[:ACTED_IN]-(:Actor)))",
                "{}",
                key
            );
        }
    }

    #[test]
    fn test_connection_null_checks() {
        assert_eq!(
            compile(json!({"actorsConnection_SOME": null})).unwrap(),
            "NOT (exists((this)<-[:ACTED_IN]-(:Actor)))"
        );
        assert_eq!(
            compile(json!({"actorsConnection_NOT": null})).unwrap(),
            "exists((this)<-[:ACTED_IN]-(:Actor))"
        );
    }

    #[test]
    fn test_quantifiers() {
        let cases = [
            ("actors", "ANY"),
            ("actors_SOME", "ANY"),
            ("actors_NOT", "NONE"),
            ("actors_NONE", "NONE"),
            ("actors_ALL", "ALL"),
            ("actors_SINGLE", "SINGLE"),
        ];
        for (key, quantifier) in cases {
            let mut filter = Map::new();
            filter.insert(key.to_string(), json!({"name": "Keanu"}));
            let text = compile(Value::Object(filter)).unwrap();
            let child = format!("this_{}", key);
            assert_eq!(
                text,
                format!(
                    "(exists((this)<-[:ACTED_IN]-(:Actor)) AND {q}({c} IN [(this)<-[:ACTED_IN]-({c}:Actor) | {c}] WHERE {c}.name = ${c}_name))",
                    q = quantifier,
                    c = child
                )
            );
        }
    }

    #[test]
    fn test_non_node_target() {
        let err = compile(json!({"director": {"name": "x"}})).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Relationship filters must reference nodes"));
    }

    #[test]
    fn test_operator_not_applicable_to_relationship() {
        let err = compile(json!({"actors_GT": {}})).unwrap_err();
        assert!(matches!(err, TranslateError::OperatorNotApplicable { ref kind, .. } if kind == "relationship"));
    }

    #[test]
    fn test_connection_edge_filter() {
        let text = compile(json!({"actorsConnection": {"edge": {"screenTime_IN": [60, 70]}}})).unwrap();
        assert_eq!(
            text,
            "(exists((this)<-[:ACTED_IN]-(:Actor)) AND size([(this)<-[this_actorsConnection_relationship:ACTED_IN]-(this_actorsConnection:Actor) WHERE this_actorsConnection_relationship.screenTime IN $this_actorsConnection_relationship_screenTime_IN | 1]) > 0)"
        );
    }

    #[test]
    fn test_connection_all_and_node_not() {
        let text = compile(json!({"actorsConnection_ALL": {"node_NOT": {"name": "x"}}})).unwrap();
        assert_eq!(
            text,
            "(exists((this)<-[:ACTED_IN]-(:Actor)) AND size([(this)<-[this_actorsConnection_ALL_relationship:ACTED_IN]-(this_actorsConnection_ALL:Actor) WHERE NOT (NOT (this_actorsConnection_ALL.name = $this_actorsConnection_ALL_name)) | 1]) = 0)"
        );
    }

    #[test]
    fn test_connection_unknown_key() {
        let err = compile(json!({"actorsConnection": {"relationship": {}}})).unwrap_err();
        assert!(matches!(err, TranslateError::UnknownField { ref type_name, .. } if type_name == "ActorConnectionWhere"));
    }

    #[test]
    fn test_create_connection_where_directly() {
        let schema = schema();
        let config = TranslateConfig::default().with_native_integers();
        let ctx = TranslationContext::new(&schema, &config);
        let actor = schema.require_node("Actor").unwrap();
        let props = schema.relationship_properties("ActedIn");
        let node = Variable::node("this_actor");
        let rel = Variable::relationship("this_acted_in");

        let filter = json!({"OR": [{"node": {"name": "a"}}, {"edge": {"screenTime_GT": 10}}]});
        let expr = create_connection_where(&ctx, &node, actor, &rel, props, filter.as_object().unwrap()).unwrap();
        let mut env = CypherEnvironment::new();
        assert_eq!(
            expr.render(&mut env),
            "(this_actor.name = $this_actor_name OR this_acted_in.screenTime > $this_acted_in_screenTime_GT)"
        );
        let params = env.into_parameters();
        assert_eq!(params["this_acted_in_screenTime_GT"].as_int(), Some(10));

        let err = create_connection_where(&ctx, &node, actor, &rel, None, json!({"edge": {}}).as_object().unwrap())
            .unwrap_err();
        assert!(matches!(err, TranslateError::Unsupported(_)));
    }
}
