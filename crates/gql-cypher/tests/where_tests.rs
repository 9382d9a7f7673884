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

//! Where-filter compilation over the movies schema.

use gql_cypher::cypher::{CypherEnvironment, Variable};
use gql_cypher::translate::{compile_filter, create_where_predicate, TranslationContext};
use gql_cypher::{Schema, TranslateConfig, TranslateError};
use gql_cypher_test::fixtures::{self, errors};
use gql_cypher_test::referenced_parameters;
use serde_json::{json, Value};

fn compile_with(config: &TranslateConfig, type_name: &str, filter: Value) -> Result<(String, Value), TranslateError> {
    let schema = fixtures::movies_schema();
    let ctx = TranslationContext::new(&schema, config);
    let filter = filter.as_object().cloned().unwrap_or_default();
    let statement = compile_filter(&ctx, type_name, &filter)?;
    Ok((statement.cypher.clone(), statement.params_json()))
}

fn compile(filter: Value) -> (String, Value) {
    compile_with(&TranslateConfig::default().with_native_integers(), "Movie", filter).unwrap()
}

#[test]
fn test_scalar_leaves_in_encounter_order() {
    let (cypher, params) = compile(json!({
        "title_STARTS_WITH": "The",
        "released_GTE": 1999,
        "rating_LT": 8.5,
        "id_IN": ["1", "2"]
    }));
    assert_eq!(
        cypher,
        "(this.title STARTS WITH $this_title_STARTS_WITH AND this.released >= $this_released_GTE AND this.rating < $this_rating_LT AND this.id IN $this_id_IN)"
    );
    assert_eq!(
        params,
        json!({
            "this_title_STARTS_WITH": "The",
            "this_released_GTE": 1999,
            "this_rating_LT": 8.5,
            "this_id_IN": ["1", "2"]
        })
    );
}

#[test]
fn test_low_high_integers_by_default() {
    let (_, params) = compile_with(&TranslateConfig::default(), "Movie", json!({"released": 1999})).unwrap();
    assert_eq!(params, json!({"this_released": {"low": 1999, "high": 0}}));

    let (_, params) = compile_with(&TranslateConfig::default(), "Movie", json!({"released": -1})).unwrap();
    assert_eq!(params, json!({"this_released": {"low": -1, "high": -1}}));
}

#[test]
fn test_null_filters() {
    assert_eq!(compile(json!({"title": null})).0, "this.title IS NULL");
    assert_eq!(compile(json!({"title_NOT": null})).0, "this.title IS NOT NULL");
}

#[test]
fn test_list_attribute_filters() {
    let (cypher, params) = compile(json!({"tags_INCLUDES": "noir", "tags_NOT_INCLUDES": "comedy"}));
    assert_eq!(
        cypher,
        "($this_tags_INCLUDES IN this.tags AND NOT ($this_tags_NOT_INCLUDES IN this.tags))"
    );
    assert_eq!(params["this_tags_INCLUDES"], json!("noir"));

    let (cypher, _) = compile(json!({"tags": ["a", "b"]}));
    assert_eq!(cypher, "this.tags = $this_tags");
}

#[test]
fn test_enum_equality_and_in() {
    let (cypher, params) = compile(json!({"certificate_IN": ["PG", "R"]}));
    assert_eq!(cypher, "this.certificate IN $this_certificate_IN");
    assert_eq!(params, json!({"this_certificate_IN": ["PG", "R"]}));
}

#[test]
fn test_alias_and_coalesce_on_actor() {
    let (cypher, _) = compile_with(
        &TranslateConfig::default(),
        "Actor",
        json!({"nickname_CONTAINS": "Neo", "active": false}),
    )
    .unwrap();
    assert_eq!(
        cypher,
        "(this.stageName CONTAINS $this_nickname_CONTAINS AND coalesce(this.active, true) = $this_active)"
    );
}

#[test]
fn test_duration_ordering() {
    let (cypher, params) = compile(json!({"runtime_GT": "PT2H"}));
    assert_eq!(cypher, "datetime() + this.runtime > datetime() + $this_runtime_GT");
    assert_eq!(params["this_runtime_GT"]["months"], json!(0));
    assert_eq!(params["this_runtime_GT"]["days"], json!(0));
}

#[test]
fn test_point_filters() {
    let (cypher, _) = compile(json!({"location": {"longitude": 4.9, "latitude": 52.4}}));
    assert_eq!(cypher, "this.location = point($this_location)");

    let (cypher, _) = compile(json!({
        "location_LTE": {"point": {"longitude": 4.9, "latitude": 52.4}, "distance": 1000}
    }));
    assert_eq!(
        cypher,
        "distance(this.location, point($this_location_LTE.point)) <= $this_location_LTE.distance"
    );
}

#[test]
fn test_logical_nesting() {
    let (cypher, _) = compile(json!({
        "OR": [
            {"title_CONTAINS": "Matrix"},
            {"AND": [{"released_GT": 2000}, {"released_LT": 2010}]}
        ],
        "rating_GTE": 7
    }));
    assert_eq!(
        cypher,
        "((this.title CONTAINS $this_title_CONTAINS OR (this.released > $this_released_GT AND this.released < $this_released_LT)) AND this.rating >= $this_rating_GTE)"
    );
}

#[test]
fn test_relationship_filter_with_relabelled_target() {
    let (cypher, params) = compile(json!({"genres": {"name": "Drama"}}));
    assert_eq!(
        cypher,
        "(exists((this)-[:IN_GENRE]->(:Category)) AND ANY(this_genres IN [(this)-[:IN_GENRE]->(this_genres:Category) | this_genres] WHERE this_genres.name = $this_genres_name))"
    );
    assert_eq!(params, json!({"this_genres_name": "Drama"}));
}

#[test]
fn test_nested_relationship_filters() {
    let (cypher, _) = compile(json!({"actors_ALL": {"movies_SOME": {"title": "Up"}}}));
    assert_eq!(
        cypher,
        "(exists((this)<-[:ACTED_IN]-(:Actor)) AND ALL(this_actors_ALL IN [(this)<-[:ACTED_IN]-(this_actors_ALL:Actor) | this_actors_ALL] WHERE (exists((this_actors_ALL)-[:ACTED_IN]->(:Movie)) AND ANY(this_actors_ALL_movies_SOME IN [(this_actors_ALL)-[:ACTED_IN]->(this_actors_ALL_movies_SOME:Movie) | this_actors_ALL_movies_SOME] WHERE this_actors_ALL_movies_SOME.title = $this_actors_ALL_movies_SOME_title))))"
    );
}

#[test]
fn test_connection_filter_on_edge_properties() {
    let (cypher, params) = compile(json!({"actorsConnection": {"edge": {"screenTime_IN": [60, 70]}}}));
    assert_eq!(
        cypher,
        "(exists((this)<-[:ACTED_IN]-(:Actor)) AND size([(this)<-[this_actorsConnection_relationship:ACTED_IN]-(this_actorsConnection:Actor) WHERE this_actorsConnection_relationship.screenTime IN $this_actorsConnection_relationship_screenTime_IN | 1]) > 0)"
    );
    assert_eq!(params, json!({"this_actorsConnection_relationship_screenTime_IN": [60, 70]}));
}

#[test]
fn test_connection_edge_integers_use_low_high_by_default() {
    let (_, params) = compile_with(
        &TranslateConfig::default(),
        "Movie",
        json!({"actorsConnection": {"edge": {"screenTime_IN": [60, 70]}}}),
    )
    .unwrap();
    assert_eq!(
        params,
        json!({"this_actorsConnection_relationship_screenTime_IN": [{"low": 60, "high": 0}, {"low": 70, "high": 0}]})
    );
}

#[test]
fn test_connection_filter_node_and_edge() {
    let (cypher, _) = compile(json!({
        "actorsConnection_NONE": {"node": {"name": "Keanu"}, "edge_NOT": {"quotes_INCLUDES": "Whoa"}}
    }));
    assert_eq!(
        cypher,
        "(exists((this)<-[:ACTED_IN]-(:Actor)) AND size([(this)<-[this_actorsConnection_NONE_relationship:ACTED_IN]-(this_actorsConnection_NONE:Actor) WHERE (this_actorsConnection_NONE.name = $this_actorsConnection_NONE_name AND NOT ($this_actorsConnection_NONE_relationship_quotes_INCLUDES IN this_actorsConnection_NONE_relationship.quotes)) | 1]) = 0)"
    );
}

#[test]
fn test_aggregate_filter_emits_subquery() {
    let (cypher, params) = compile(json!({"title": "Up", "actorsAggregate": {"count_GTE": 2}}));
    assert_eq!(
        cypher,
        "CALL {\nWITH this\nMATCH (this)<-[:ACTED_IN]-(this_actorsAggregate_node:Actor)\nRETURN count(this_actorsAggregate_node) AS this_actorsAggregate_count\n}\n(this.title = $this_title AND this_actorsAggregate_count >= $this_actorsAggregate_count_GTE)"
    );
    assert_eq!(params, json!({"this_title": "Up", "this_actorsAggregate_count_GTE": 2}));
}

#[test]
fn test_every_parameter_is_bound() {
    let filters = [
        json!({"title": "a", "OR": [{"title": "b"}, {"title": "a"}]}),
        json!({"actors": {"name": "x"}, "actorsConnection": {"node": {"name": "y"}}}),
        json!({"genres_NONE": {"movies": {"released_LT": 1950}}}),
    ];
    for filter in filters {
        let (cypher, params) = compile(filter);
        let referenced = referenced_parameters(&cypher);
        let bound = params.as_object().unwrap();
        assert_eq!(referenced.len(), bound.len(), "{}", cypher);
        for name in referenced {
            assert!(bound.contains_key(&name), "${} unbound in {}", name, cypher);
        }
    }
}

#[test]
fn test_equal_values_share_a_parameter() {
    let (cypher, params) = compile(json!({"OR": [{"title": "a"}, {"title": "a"}, {"title": "b"}]}));
    assert_eq!(
        cypher,
        "(this.title = $this_title OR this.title = $this_title OR this.title = $this_title_1)"
    );
    assert_eq!(params, json!({"this_title": "a", "this_title_1": "b"}));
}

#[test]
fn test_invalid_filters_fail_with_category() {
    let config = TranslateConfig::default();
    for (name, filter, category) in errors::invalid_movie_filters() {
        let err = compile_with(&config, "Movie", filter).unwrap_err();
        assert_eq!(err.category(), category, "{}: {}", name, err);
    }
}

#[test]
fn test_where_predicate_on_custom_variable() {
    let schema: Schema = fixtures::movies_schema();
    let config = TranslateConfig::default();
    let ctx = TranslationContext::new(&schema, &config);
    let movie = schema.require_node("Movie").unwrap();
    let m = Variable::node("m");
    let filter = json!({"title": "Up"});

    let compiled = create_where_predicate(&ctx, &m, movie, filter.as_object().unwrap()).unwrap();
    let mut env = CypherEnvironment::new();
    env.reserve("m");
    let text = compiled.predicate.unwrap().render(&mut env);
    assert_eq!(text, "m_1.title = $m_1_title");
}
