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

//! Create, update, delete and connect mutations.

use super::context::TranslationContext;
use super::projection::project_node;
use super::read::match_root;
use super::relationship::{related_node, related_properties, traversal};
use super::resolve_tree::{filter_object, ResolveTree};
use super::values::serialize_value;
use crate::auth::AuthOperation;
use crate::cypher::{
    build_relationship_statement, join_statements, Clause, ComparisonOp, CompiledStatement, CypherEnvironment,
    CypherStatement, CypherValue, Expr, NodePattern, NodeRef, Param, Pattern, Query, RelationshipRef, ReturnItem,
    Variable, WithItems,
};
use crate::error::{Result, TranslateError};
use crate::schema::{GraphElement, Node, RelationField, RelationshipProperties};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// `SET variable.f = $param, ...` for every key of `input`.
fn assignments(
    ctx: &TranslationContext<'_>,
    variable: &Variable,
    node: &Node,
    input: &Map<String, Value>,
    param_prefix: &str,
) -> Result<Vec<(Expr, Expr)>> {
    let mut set = Vec::with_capacity(input.len());
    for (key, value) in input {
        let attribute = match node.attribute(key) {
            Some(attribute) => attribute,
            None if node.relation_field(key).is_some() => {
                return Err(TranslateError::Unsupported(format!(
                    "nested relationship input '{}' on {}",
                    key, node.name
                )))
            }
            None => {
                return Err(TranslateError::UnknownField {
                    type_name: node.name.clone(),
                    field: key.clone(),
                })
            }
        };
        if value.is_null() && attribute.required {
            return Err(TranslateError::NonNullableField {
                type_name: node.name.clone(),
                field: key.clone(),
            });
        }
        let serialized = serialize_value(ctx, &attribute.kind, value, key)?;
        let param = Param::derived(variable, format!("{}{}", param_prefix, key), serialized);
        set.push((Expr::property(variable, &attribute.db_property_name), Expr::param(param)));
    }
    Ok(set)
}

/// One `CALL { CREATE ... SET ... RETURN thisN }` per input, then
/// `RETURN [this0 { ... }, ...] AS data`.
///
/// ```
/// # use gql_cypher::{Schema, TranslateConfig};
/// # use gql_cypher::schema::{AttributeField, Node, ScalarKind};
/// # use gql_cypher::translate::{translate_create, ResolveTree, TranslationContext};
/// # use serde_json::json;
/// let schema = Schema::new()
///     .with_node(Node::new("Movie").with_attribute(AttributeField::primitive("title", ScalarKind::String)));
/// let config = TranslateConfig::default();
/// let ctx = TranslationContext::new(&schema, &config);
///
/// let input = json!({"title": "Up"});
/// let statement = translate_create(&ctx, "Movie", &[input.as_object().unwrap().clone()], &[ResolveTree::new("title")]).unwrap();
/// assert_eq!(
///     statement.cypher,
///     "CALL {\nCREATE (this0:Movie)\nSET this0.title = $this0_title\nRETURN this0\n}\nRETURN [this0 { .title }] AS data"
/// );
/// ```
pub fn translate_create(
    ctx: &TranslationContext<'_>,
    type_name: &str,
    inputs: &[Map<String, Value>],
    selection: &[ResolveTree],
) -> Result<CompiledStatement> {
    debug!(type_name, count = inputs.len(), "translating create");
    let node = ctx.schema.require_node(type_name)?;

    let mut query = Query::new();
    let mut created = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let variable = Variable::named(format!("{}{}", ctx.config.root_variable, index));
        let set = assignments(ctx, &variable, node, input, "")?;
        query.push(Clause::Call {
            imports: Vec::new(),
            body: vec![
                Clause::Create(Pattern::new(
                    NodePattern::new(&variable).with_labels(node.labels.iter().cloned()),
                )),
                Clause::Set(set),
                Clause::returning(ReturnItem::variable(&variable)),
            ],
        });
        created.push(project_node(ctx, &variable, node, selection, None)?);
    }
    query.push(Clause::returning(ReturnItem::aliased(
        Expr::List(created),
        &Variable::named_value("data"),
    )));
    query.build(ctx.config)
}

/// `MATCH ... SET this.f = $this_update_f ... RETURN collect(DISTINCT this { ... }) AS data`
pub fn translate_update(
    ctx: &TranslationContext<'_>,
    type_name: &str,
    where_input: Option<&Value>,
    update: &Map<String, Value>,
    selection: &[ResolveTree],
) -> Result<CompiledStatement> {
    debug!(type_name, fields = update.len(), "translating update");
    let node = ctx.schema.require_node(type_name)?;
    let this = ctx.root_variable();

    let mut query = Query::new();
    query.extend(match_root(
        ctx,
        node,
        &this,
        filter_object(where_input, "where")?,
        AuthOperation::Update,
    )?);
    query.push(Clause::Set(assignments(ctx, &this, node, update, "update_")?));
    let projection = project_node(ctx, &this, node, selection, None)?;
    query.push(Clause::returning(ReturnItem::aliased(
        Expr::distinct_function("collect", vec![projection]),
        &Variable::named_value("data"),
    )));
    query.build(ctx.config)
}

/// `MATCH ... DETACH DELETE this`
pub fn translate_delete(
    ctx: &TranslationContext<'_>,
    type_name: &str,
    where_input: Option<&Value>,
) -> Result<CompiledStatement> {
    debug!(type_name, "translating delete");
    let node = ctx.schema.require_node(type_name)?;
    let this = ctx.root_variable();

    let mut query = Query::new();
    query.extend(match_root(
        ctx,
        node,
        &this,
        filter_object(where_input, "where")?,
        AuthOperation::Delete,
    )?);
    query.push(Clause::DetachDelete(vec![this]));
    query.build(ctx.config)
}

/// A connect mutation: which relation of the matched nodes to extend, and
/// to what.
#[derive(Debug, Clone, Copy)]
pub struct ConnectInput<'r> {
    /// Filter over the source nodes.
    pub where_input: Option<&'r Value>,
    /// Relation field on the source type.
    pub field: &'r str,
    /// Filter over the target nodes.
    pub target_where: Option<&'r Value>,
    /// Relationship properties to set.
    pub edge: Option<&'r Map<String, Value>>,
}

/// Match source and target nodes, then `MERGE` the relationship, or
/// `CREATE` it when the relation allows multiple relationships. A singular
/// relation also gets a cardinality guard.
///
/// ```text
/// MATCH (this:Movie)
/// WHERE this.title = $this_title
/// MATCH (this_connect_actors:Actor)
/// WHERE this_connect_actors.name = $this_connect_actors_name
/// MERGE (this)<-[this_connect_actors_edge:ACTED_IN { screenTime: $this_connect_actors_edge_relationship_screenTime }]-(this_connect_actors)
/// RETURN collect(DISTINCT this { .title }) AS data
/// ```
pub fn translate_connect(
    ctx: &TranslationContext<'_>,
    type_name: &str,
    input: ConnectInput<'_>,
    selection: &[ResolveTree],
) -> Result<CompiledStatement> {
    debug!(type_name, field = input.field, "translating connect");
    let node = ctx.schema.require_node(type_name)?;
    let relation = node
        .relation_field(input.field)
        .ok_or_else(|| TranslateError::UnknownField {
            type_name: node.name.clone(),
            field: input.field.to_string(),
        })?;
    let related = related_node(ctx, relation)?;
    let this = ctx.root_variable();
    let target = this.child(&format!("connect_{}", relation.field_name));

    let mut query = Query::new();
    query.extend(match_root(
        ctx,
        node,
        &this,
        filter_object(input.where_input, "where")?,
        AuthOperation::Connect,
    )?);
    query.extend(match_root(
        ctx,
        related,
        &target,
        filter_object(input.target_where, "to")?,
        AuthOperation::Connect,
    )?);

    let mut env = CypherEnvironment::new();
    let separator = ctx.config.clause_separator.as_str();
    let mut fragments = query.render_fragments(&mut env, separator);

    let source_name = env.variable_name(&this);
    let target_name = env.variable_name(&target);
    let edge_name = format!("{}_edge", target_name);
    let relationship = RelationshipRef {
        variable: Some(&edge_name),
        parameters: edge_parameters(ctx, related_properties(ctx, relation)?, input.edge)?,
        ..RelationshipRef::from_meta(&relation.meta)
    };
    let pattern = build_relationship_statement(
        &NodeRef {
            variable: Some(&source_name),
            ..NodeRef::default()
        },
        &relationship,
        &NodeRef {
            variable: Some(&target_name),
            ..NodeRef::default()
        },
        true,
    )?;
    let keyword = if relation.meta.allow_multiple.unwrap_or(false) {
        "CREATE"
    } else {
        "MERGE"
    };
    fragments.push(join_statements(vec![CypherStatement::new(keyword), pattern], " ")?);

    let mut tail = Query::new();
    if !relation.list {
        tail.push(cardinality_guard(node, relation, related, &this));
    }
    let projection = project_node(ctx, &this, node, selection, None)?;
    tail.push(Clause::returning(ReturnItem::aliased(
        Expr::distinct_function("collect", vec![projection]),
        &Variable::named_value("data"),
    )));
    fragments.extend(tail.render_fragments(&mut env, separator));

    Ok(join_statements(fragments, separator)?.into())
}

/// Fails the transaction when a singular relation links more than one node.
///
/// ```text
/// CALL {
/// WITH this
/// MATCH (this)-[this_studio_unique:MADE_BY]->(:Studio)
/// WITH count(this_studio_unique) AS c
/// CALL apoc.util.validate(NOT (c <= 1), '...', [0])
/// RETURN c AS this_studio_unique_ignored
/// }
/// ```
fn cardinality_guard(node: &Node, relation: &RelationField, related: &Node, this: &Variable) -> Clause {
    let edge = this.child_relationship(&format!("{}_unique", relation.field_name));
    let count = Variable::named_value("c");
    let message = TranslateError::RelationshipCardinality {
        type_name: node.name.clone(),
        field: relation.field_name.clone(),
    }
    .to_string();
    let linked = traversal(
        this,
        relation,
        Some(&edge),
        NodePattern::anonymous().with_labels(related.labels.iter().cloned()),
    );
    Clause::Call {
        imports: vec![this.clone()],
        body: vec![
            Clause::matching(linked, None),
            Clause::With {
                items: WithItems::Items(vec![ReturnItem::aliased(
                    Expr::function("count", vec![Expr::var(&edge)]),
                    &count,
                )]),
                distinct: false,
                order_by: Vec::new(),
                skip: None,
                limit: None,
                predicate: None,
            },
            Clause::Procedure(Expr::function(
                "apoc.util.validate",
                vec![
                    Expr::not(Expr::compare(ComparisonOp::Lte, Expr::var(&count), Expr::literal(1i64))),
                    Expr::literal(message),
                    Expr::List(vec![Expr::literal(0i64)]),
                ],
            )),
            Clause::returning(ReturnItem::aliased(
                Expr::var(&count),
                &Variable::value(format!("{}_ignored", edge.hint())),
            )),
        ],
    }
}

fn edge_parameters(
    ctx: &TranslationContext<'_>,
    properties: Option<&RelationshipProperties>,
    edge: Option<&Map<String, Value>>,
) -> Result<BTreeMap<String, CypherValue>> {
    let mut parameters = BTreeMap::new();
    let Some(edge) = edge else {
        return Ok(parameters);
    };
    let properties = match properties {
        Some(p) => p,
        None if edge.is_empty() => return Ok(parameters),
        None => {
            return Err(TranslateError::Unsupported(
                "edge properties on a relationship without properties".to_string(),
            ))
        }
    };
    for (key, value) in edge {
        let attribute = properties.attribute(key).ok_or_else(|| TranslateError::UnknownField {
            type_name: properties.name.clone(),
            field: key.clone(),
        })?;
        parameters.insert(
            attribute.db_property_name.clone(),
            serialize_value(ctx, &attribute.kind, value, key)?,
        );
    }
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::schema::{AttributeField, RelationField, RelationshipDirection, RelationshipMeta, ScalarKind, Schema};
    use serde_json::json;

    fn schema(allow_multiple: Option<bool>) -> Schema {
        Schema::new()
            .with_node(
                Node::new("Movie")
                    .with_attribute(AttributeField::primitive("id", ScalarKind::Id).unique())
                    .with_attribute(AttributeField::primitive("title", ScalarKind::String))
                    .with_attribute(AttributeField::primitive("released", ScalarKind::Int).required())
                    .with_relation(RelationField::new(
                        "studio",
                        "Studio",
                        RelationshipMeta {
                            direction: RelationshipDirection::Out,
                            rel_type: "MADE_BY".into(),
                            properties: None,
                            allow_multiple: None,
                        },
                        false,
                    ))
                    .with_relation(RelationField::new(
                        "actors",
                        "Actor",
                        RelationshipMeta {
                            direction: RelationshipDirection::In,
                            rel_type: "ACTED_IN".into(),
                            properties: Some("ActedIn".into()),
                            allow_multiple,
                        },
                        true,
                    )),
            )
            .with_node(Node::new("Actor").with_attribute(AttributeField::primitive("name", ScalarKind::String)))
            .with_node(Node::new("Studio").with_attribute(AttributeField::primitive("name", ScalarKind::String)))
            .with_relationship_properties(
                RelationshipProperties::new("ActedIn")
                    .with_attribute(AttributeField::primitive("screenTime", ScalarKind::Int)),
            )
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn test_create_many() {
        let schema = schema(None);
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let statement = translate_create(
            &ctx,
            "Movie",
            &[object(json!({"id": "1"})), object(json!({"id": "2"}))],
            &[ResolveTree::new("id")],
        )
        .unwrap();
        assert_eq!(
            statement.cypher,
            "CALL {\nCREATE (this0:Movie)\nSET this0.id = $this0_id\nRETURN this0\n}\nCALL {\nCREATE (this1:Movie)\nSET this1.id = $this1_id\nRETURN this1\n}\nRETURN [this0 { .id }, this1 { .id }] AS data"
        );
        assert_eq!(statement.params_json(), json!({"this0_id": "1", "this1_id": "2"}));
    }

    #[test]
    fn test_create_rejects_nested_relationships() {
        let schema = schema(None);
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let err = translate_create(&ctx, "Movie", &[object(json!({"actors": []}))], &[]).unwrap_err();
        assert!(matches!(err, TranslateError::Unsupported(_)));
    }

    #[test]
    fn test_update() {
        let schema = schema(None);
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let filter = json!({"id": "1"});
        let statement = translate_update(
            &ctx,
            "Movie",
            Some(&filter),
            &object(json!({"title": "New"})),
            &[ResolveTree::new("title")],
        )
        .unwrap();
        assert_eq!(
            statement.cypher,
            "MATCH (this:Movie)\nWHERE this.id = $this_id\nSET this.title = $this_update_title\nRETURN collect(DISTINCT this { .title }) AS data"
        );
        assert_eq!(statement.params_json(), json!({"this_id": "1", "this_update_title": "New"}));
    }

    #[test]
    fn test_delete() {
        let schema = schema(None);
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let filter = json!({"title_CONTAINS": "x"});
        let statement = translate_delete(&ctx, "Movie", Some(&filter)).unwrap();
        assert_eq!(
            statement.cypher,
            "MATCH (this:Movie)\nWHERE this.title CONTAINS $this_title_CONTAINS\nDETACH DELETE this"
        );
    }

    #[test]
    fn test_connect_merges_relationship() {
        let schema = schema(None);
        let config = TranslateConfig::default().with_native_integers();
        let ctx = TranslationContext::new(&schema, &config);
        let source = json!({"id": "1"});
        let target = json!({"name": "Keanu"});
        let edge = object(json!({"screenTime": 60}));
        let statement = translate_connect(
            &ctx,
            "Movie",
            ConnectInput {
                where_input: Some(&source),
                field: "actors",
                target_where: Some(&target),
                edge: Some(&edge),
            },
            &[ResolveTree::new("id")],
        )
        .unwrap();
        assert_eq!(
            statement.cypher,
            "MATCH (this:Movie)\nWHERE this.id = $this_id\nMATCH (this_connect_actors:Actor)\nWHERE this_connect_actors.name = $this_connect_actors_name\nMERGE (this)<-[this_connect_actors_edge:ACTED_IN { screenTime: $this_connect_actors_edge_relationship_screenTime }]-(this_connect_actors)\nRETURN collect(DISTINCT this { .id }) AS data"
        );
        assert_eq!(
            statement.params_json(),
            json!({
                "this_id": "1",
                "this_connect_actors_name": "Keanu",
                "this_connect_actors_edge_relationship_screenTime": 60
            })
        );
    }

    #[test]
    fn test_connect_creates_when_multiple_allowed() {
        let schema = schema(Some(true));
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let statement = translate_connect(
            &ctx,
            "Movie",
            ConnectInput {
                where_input: None,
                field: "actors",
                target_where: None,
                edge: None,
            },
            &[],
        )
        .unwrap();
        assert!(statement
            .cypher
            .contains("CREATE (this)<-[this_connect_actors_edge:ACTED_IN]-(this_connect_actors)"));
    }

    #[test]
    fn test_connect_unknown_edge_property() {
        let schema = schema(None);
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let edge = object(json!({"role": "Neo"}));
        let err = translate_connect(
            &ctx,
            "Movie",
            ConnectInput {
                where_input: None,
                field: "actors",
                target_where: None,
                edge: Some(&edge),
            },
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, TranslateError::UnknownField { ref field, .. } if field == "role"));
    }

    #[test]
    fn test_update_required_field_to_null() {
        let schema = schema(None);
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let err = translate_update(&ctx, "Movie", None, &object(json!({"released": null})), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Cannot set non-nullable field Movie.released to null");

        let err = translate_create(&ctx, "Movie", &[object(json!({"id": "1", "released": null}))], &[]).unwrap_err();
        assert!(matches!(err, TranslateError::NonNullableField { ref field, .. } if field == "released"));
    }

    #[test]
    fn test_update_optional_field_to_null() {
        let schema = schema(None);
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let statement = translate_update(&ctx, "Movie", None, &object(json!({"title": null})), &[]).unwrap();
        assert!(statement.cypher.contains("SET this.title = $this_update_title"));
        assert_eq!(statement.params_json(), json!({"this_update_title": null}));
    }

    #[test]
    fn test_connect_singular_relation_guards_cardinality() {
        let schema = schema(None);
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let target = json!({"name": "Pixar"});
        let statement = translate_connect(
            &ctx,
            "Movie",
            ConnectInput {
                where_input: None,
                field: "studio",
                target_where: Some(&target),
                edge: None,
            },
            &[ResolveTree::new("id")],
        )
        .unwrap();
        let message = TranslateError::RelationshipCardinality {
            type_name: "Movie".into(),
            field: "studio".into(),
        }
        .to_string();
        let guard = format!(
            "MERGE (this)-[this_connect_studio_edge:MADE_BY]->(this_connect_studio)\nCALL {{\nWITH this\nMATCH (this)-[this_studio_unique:MADE_BY]->(:Studio)\nWITH count(this_studio_unique) AS c\nCALL apoc.util.validate(NOT (c <= 1), {}, [0])\nRETURN c AS this_studio_unique_ignored\n}}\nRETURN collect(DISTINCT this {{ .id }}) AS data",
            crate::cypher::quote_string(&message)
        );
        assert!(statement.cypher.ends_with(&guard), "{}", statement.cypher);
    }

    #[test]
    fn test_connect_list_relation_has_no_cardinality_guard() {
        let schema = schema(None);
        let config = TranslateConfig::default();
        let ctx = TranslationContext::new(&schema, &config);
        let statement = translate_connect(
            &ctx,
            "Movie",
            ConnectInput {
                where_input: None,
                field: "actors",
                target_where: None,
                edge: None,
            },
            &[],
        )
        .unwrap();
        assert!(!statement.cypher.contains("apoc.util.validate"));
    }
}
