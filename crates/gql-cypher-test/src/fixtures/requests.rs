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

//! Selection and request builders.

use gql_cypher::translate::{ResolveTree, TranslateRequest};
use serde_json::{Map, Value};

/// `movies(where: filter) { title }`
pub fn movies_where(filter: Value) -> ResolveTree {
    ResolveTree::new("movies").with_where(filter).with_fields(["title"])
}

/// A read request for `type_name` selecting `fields`.
pub fn read(type_name: &str, selection: ResolveTree) -> TranslateRequest {
    TranslateRequest::Read {
        type_name: type_name.to_string(),
        selection,
    }
}

/// A create request with one input per object.
pub fn create(type_name: &str, inputs: Vec<Value>, fields: &[&str]) -> TranslateRequest {
    TranslateRequest::Create {
        type_name: type_name.to_string(),
        input: inputs.into_iter().map(object).collect(),
        selection: fields.iter().map(|f| ResolveTree::new(*f)).collect(),
    }
}

/// A delete request.
pub fn delete(type_name: &str, filter: Value) -> TranslateRequest {
    TranslateRequest::Delete {
        type_name: type_name.to_string(),
        where_input: Some(filter),
    }
}

/// The object inside `value`; panics on anything else.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
