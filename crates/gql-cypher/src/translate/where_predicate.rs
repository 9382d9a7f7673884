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

//! Recursive where-filter compilation.
//!
//! A filter object is compiled key by key, in encounter order. `AND` and
//! `OR` recurse into their operand list against the same element; every
//! other key is a leaf resolved against the element's fields. The
//! results at one level are conjoined.

use super::aggregate::aggregate_predicate;
use super::context::TranslationContext;
use super::property::attribute_predicate;
use super::relationship::{connection_predicate, relationship_predicate};
use super::where_key::parse_where_key;
use crate::cypher::{Clause, Expr, Variable};
use crate::error::{Result, TranslateError};
use crate::schema::GraphElement;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// A compiled filter.
#[derive(Debug, Clone, Default)]
pub struct WherePredicate {
    /// The predicate, `None` when the filter is empty.
    pub predicate: Option<Expr>,
    /// `CALL` subqueries the predicate reads from; they must precede the
    /// `WHERE` that uses it.
    pub subqueries: Vec<Clause>,
}

/// Compile a where filter over `element`, bound to `target`.
///
/// ```
/// # use gql_cypher::{Schema, TranslateConfig};
/// # use gql_cypher::cypher::{CypherEnvironment, Variable};
/// # use gql_cypher::schema::{AttributeField, Node, ScalarKind};
/// # use gql_cypher::translate::{create_where_predicate, TranslationContext};
/// # use serde_json::json;
/// let movie = Node::new("Movie").with_attribute(AttributeField::primitive("title", ScalarKind::String));
/// let schema = Schema::new().with_node(movie.clone());
/// let config = TranslateConfig::default();
/// let ctx = TranslationContext::new(&schema, &config);
///
/// let filter = json!({"OR": [{"title": "Matrix"}, {"title_STARTS_WITH": "The"}]});
/// let this = Variable::named("this");
/// let compiled = create_where_predicate(&ctx, &this, &movie, filter.as_object().unwrap()).unwrap();
///
/// let mut env = CypherEnvironment::new();
/// assert_eq!(
///     compiled.predicate.unwrap().render(&mut env),
///     "(this.title = $this_title OR this.title STARTS WITH $this_title_STARTS_WITH)"
/// );
/// ```
pub fn create_where_predicate(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    element: &dyn GraphElement,
    input: &Map<String, Value>,
) -> Result<WherePredicate> {
    debug!(element = element.name(), keys = input.len(), "compiling where filter");
    let mut subqueries = Vec::new();
    let predicate = compile_where(ctx, target, element, input, 1, Some(&mut subqueries))?;
    Ok(WherePredicate {
        predicate: predicate.non_empty(),
        subqueries,
    })
}

/// Compile one filter level. `subqueries` is `None` where `CALL` cannot
/// be emitted (inside list predicates).
pub(crate) fn compile_where(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    element: &dyn GraphElement,
    input: &Map<String, Value>,
    depth: usize,
    mut subqueries: Option<&mut Vec<Clause>>,
) -> Result<Expr> {
    ctx.check_depth(depth)?;

    let mut predicates = Vec::with_capacity(input.len());
    for (key, value) in input {
        let predicate = match key.as_str() {
            "AND" | "OR" => {
                let mut children = Vec::new();
                for filter in filter_list(key, value)? {
                    children.push(compile_where(
                        ctx,
                        target,
                        element,
                        filter,
                        depth + 1,
                        subqueries.as_deref_mut(),
                    )?);
                }
                if key == "AND" {
                    Expr::and(children)
                } else {
                    Expr::or(children)
                }
            }
            _ => compile_leaf(ctx, target, element, key, value, depth, subqueries.as_deref_mut())?,
        };
        predicates.push(predicate);
    }
    Ok(Expr::and(predicates))
}

fn compile_leaf(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    element: &dyn GraphElement,
    key: &str,
    value: &Value,
    depth: usize,
    subqueries: Option<&mut Vec<Clause>>,
) -> Result<Expr> {
    if let Some(attribute) = element.attribute(key) {
        return attribute_predicate(ctx, target, attribute, None, value, key);
    }
    if let Some(relation) = element.relation_field(key) {
        return relationship_predicate(ctx, target, relation, None, value, key, depth);
    }

    let parsed = parse_where_key(key)?;
    trace!(key, field = %parsed.field, operator = ?parsed.operator, "where key");

    if parsed.aggregate {
        let relation = element
            .relation_field(&parsed.field)
            .ok_or_else(|| unknown_field(element, key))?;
        if let Some(op) = parsed.operator {
            return Err(TranslateError::OperatorNotApplicable {
                operator: op.to_string(),
                field: parsed.field,
                kind: "aggregate".to_string(),
            });
        }
        let subqueries = subqueries.ok_or_else(|| {
            TranslateError::Unsupported(format!("aggregate filter '{}' inside a relationship filter", key))
        })?;
        return aggregate_predicate(ctx, target, relation, value, key, depth, subqueries);
    }

    if let Some(relation) = element.relation_field(&parsed.field) {
        return relationship_predicate(ctx, target, relation, parsed.operator, value, key, depth);
    }
    if let Some(relation) = element
        .relation_fields()
        .iter()
        .find(|r| r.connection_field_name() == parsed.field)
    {
        return connection_predicate(ctx, target, relation, parsed.operator, value, key, depth);
    }
    if let Some(attribute) = element.attribute(&parsed.field) {
        return attribute_predicate(ctx, target, attribute, parsed.operator, value, key);
    }
    Err(unknown_field(element, key))
}

/// Operands of `AND`/`OR`: a list of filter objects, or a single object.
pub(crate) fn filter_list<'v>(key: &str, value: &'v Value) -> Result<Vec<&'v Map<String, Value>>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_object()
                    .ok_or_else(|| TranslateError::invalid_value(key, "a list of filter objects"))
            })
            .collect(),
        Value::Object(map) => Ok(vec![map]),
        _ => Err(TranslateError::invalid_value(key, "a list of filter objects")),
    }
}

fn unknown_field(element: &dyn GraphElement, key: &str) -> TranslateError {
    TranslateError::UnknownField {
        type_name: element.name().to_string(),
        field: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::cypher::CypherEnvironment;
    use crate::schema::{
        AttributeField, Node, RelationField, RelationshipDirection, RelationshipMeta, ScalarKind, Schema,
    };
    use serde_json::json;

    fn schema() -> Schema {
        let acted_in = RelationshipMeta {
            direction: RelationshipDirection::In,
            rel_type: "ACTED_IN".into(),
            properties: None,
            allow_multiple: None,
        };
        Schema::new()
            .with_node(
                Node::new("Movie")
                    .with_attribute(AttributeField::primitive("title", ScalarKind::String))
                    .with_attribute(AttributeField::primitive("year", ScalarKind::Int))
                    .with_relation(RelationField::new("actors", "Actor", acted_in, true)),
            )
            .with_node(Node::new("Actor").with_attribute(AttributeField::primitive("name", ScalarKind::String)))
    }

    fn compile(schema: &Schema, config: &TranslateConfig, filter: Value) -> Result<String> {
        let ctx = TranslationContext::new(schema, config);
        let movie = schema.require_node("Movie")?;
        let this = Variable::named("this");
        let compiled = create_where_predicate(&ctx, &this, movie, filter.as_object().expect("object"))?;
        let mut env = CypherEnvironment::new();
        Ok(compiled.predicate.map(|p| p.render(&mut env)).unwrap_or_default())
    }

    #[test]
    fn test_leaves_conjoin_in_encounter_order() {
        let schema = schema();
        let config = TranslateConfig::default();
        let text = compile(&schema, &config, json!({"year_GT": 1999, "title": "Matrix"})).unwrap();
        assert_eq!(text, "(this.year > $this_year_GT AND this.title = $this_title)");
    }

    #[test]
    fn test_nested_logical() {
        let schema = schema();
        let config = TranslateConfig::default();
        let text = compile(
            &schema,
            &config,
            json!({"AND": [{"OR": [{"title": "a"}, {"title": "b"}]}, {"year": 1}]}),
        )
        .unwrap();
        assert_eq!(
            text,
            "((this.title = $this_title OR this.title = $this_title_1) AND this.year = $this_year)"
        );
    }

    #[test]
    fn test_empty_filters() {
        let schema = schema();
        let config = TranslateConfig::default();
        assert_eq!(compile(&schema, &config, json!({})).unwrap(), "");
        assert_eq!(compile(&schema, &config, json!({"AND": []})).unwrap(), "");
        assert_eq!(compile(&schema, &config, json!({"OR": [{}, {}]})).unwrap(), "");
    }

    #[test]
    fn test_unknown_field_and_operator() {
        let schema = schema();
        let config = TranslateConfig::default();
        let err = compile(&schema, &config, json!({"rating": 5})).unwrap_err();
        assert!(matches!(err, TranslateError::UnknownField { ref field, .. } if field == "rating"));

        let err = compile(&schema, &config, json!({"title_FOO": "x"})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid operator FOO");
    }

    #[test]
    fn test_logical_operands_must_be_objects() {
        let schema = schema();
        let config = TranslateConfig::default();
        assert!(compile(&schema, &config, json!({"OR": [1, 2]})).is_err());
        assert!(compile(&schema, &config, json!({"AND": {"title": "x"}})).is_ok());
    }

    #[test]
    fn test_depth_limit() {
        let schema = schema();
        let config = TranslateConfig::default().with_max_filter_depth(3);
        let shallow = json!({"AND": [{"AND": [{"title": "x"}]}]});
        assert!(compile(&schema, &config, shallow).is_ok());
        let deep = json!({"AND": [{"AND": [{"AND": [{"title": "x"}]}]}]});
        assert!(matches!(
            compile(&schema, &config, deep),
            Err(TranslateError::FilterDepthExceeded { .. })
        ));
    }

    #[test]
    fn test_aggregate_rejected_inside_relationship_filter() {
        let schema = schema();
        let config = TranslateConfig::default();
        let actor_with_movies = schema
            .require_node("Actor")
            .cloned()
            .expect("actor")
            .with_relation(RelationField::new(
                "movies",
                "Movie",
                RelationshipMeta {
                    direction: RelationshipDirection::Out,
                    rel_type: "ACTED_IN".into(),
                    properties: None,
                    allow_multiple: None,
                },
                true,
            ));
        let schema = schema.with_node(actor_with_movies);
        let err = compile(
            &schema,
            &config,
            json!({"actors_SOME": {"moviesAggregate": {"count_GT": 1}}}),
        )
        .unwrap_err();
        assert!(matches!(err, TranslateError::Unsupported(_)));
    }
}
