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

use gql_cypher::schema::TypeDefinitions;
use gql_cypher::Schema;

/// The movies schema in the JSON form the CLI reads.
///
/// Movie, Actor and Genre nodes; `Movie.actors` is an incoming `ACTED_IN`
/// with `ActedIn { screenTime, quotes }` properties; `Movie.director`
/// targets the `Person` interface; `Actor.nickname` is stored as
/// `stageName`; `Actor.active` coalesces to `true`; Genre is labelled
/// `Category`.
pub const MOVIES_SCHEMA_JSON: &str = include_str!("movies.schema.json");

/// The movies type definitions.
pub fn movies_type_definitions() -> TypeDefinitions {
    TypeDefinitions::from_json(MOVIES_SCHEMA_JSON).expect("movies fixture parses")
}

/// The movies schema, built.
pub fn movies_schema() -> Schema {
    Schema::from_type_definitions(&movies_type_definitions()).expect("movies fixture builds")
}
