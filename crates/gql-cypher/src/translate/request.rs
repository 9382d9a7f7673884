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

//! JSON request envelope for the translators.

use super::context::TranslationContext;
use super::mutation::{translate_connect, translate_create, translate_delete, translate_update, ConnectInput};
use super::read::translate_read;
use super::resolve_tree::ResolveTree;
use crate::cypher::CompiledStatement;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One translation request, tagged by `operation`.
///
/// ```
/// # use gql_cypher::translate::TranslateRequest;
/// # use serde_json::json;
/// let request: TranslateRequest = serde_json::from_value(json!({
///     "operation": "delete",
///     "type": "Movie",
///     "where": {"title": "Up"}
/// })).unwrap();
/// assert_eq!(request.type_name(), "Movie");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum TranslateRequest {
    /// A top-level read.
    Read {
        /// Node type to read.
        #[serde(rename = "type")]
        type_name: String,
        /// The selected field, with its arguments.
        selection: ResolveTree,
    },
    /// Create one node per input object.
    Create {
        /// Node type to create.
        #[serde(rename = "type")]
        type_name: String,
        /// Attribute values, one object per node.
        input: Vec<Map<String, Value>>,
        /// Fields to return.
        #[serde(default)]
        selection: Vec<ResolveTree>,
    },
    /// Set attributes on matching nodes.
    Update {
        /// Node type to update.
        #[serde(rename = "type")]
        type_name: String,
        /// Filter over the nodes.
        #[serde(rename = "where", default)]
        where_input: Option<Value>,
        /// Attribute values to set.
        update: Map<String, Value>,
        /// Fields to return.
        #[serde(default)]
        selection: Vec<ResolveTree>,
    },
    /// Detach and delete matching nodes.
    Delete {
        /// Node type to delete.
        #[serde(rename = "type")]
        type_name: String,
        /// Filter over the nodes.
        #[serde(rename = "where", default)]
        where_input: Option<Value>,
    },
    /// Relate matching nodes to matching targets.
    Connect {
        /// Source node type.
        #[serde(rename = "type")]
        type_name: String,
        /// Filter over the source nodes.
        #[serde(rename = "where", default)]
        where_input: Option<Value>,
        /// Relation field on the source type.
        field: String,
        /// Filter over the target nodes.
        #[serde(default)]
        to: Option<Value>,
        /// Relationship properties.
        #[serde(default)]
        edge: Option<Map<String, Value>>,
        /// Fields to return.
        #[serde(default)]
        selection: Vec<ResolveTree>,
    },
}

impl TranslateRequest {
    /// The node type the request targets.
    pub fn type_name(&self) -> &str {
        match self {
            TranslateRequest::Read { type_name, .. }
            | TranslateRequest::Create { type_name, .. }
            | TranslateRequest::Update { type_name, .. }
            | TranslateRequest::Delete { type_name, .. }
            | TranslateRequest::Connect { type_name, .. } => type_name,
        }
    }

    /// Run the matching translator.
    pub fn translate(&self, ctx: &TranslationContext<'_>) -> Result<CompiledStatement> {
        match self {
            TranslateRequest::Read { type_name, selection } => translate_read(ctx, type_name, selection),
            TranslateRequest::Create {
                type_name,
                input,
                selection,
            } => translate_create(ctx, type_name, input, selection),
            TranslateRequest::Update {
                type_name,
                where_input,
                update,
                selection,
            } => translate_update(ctx, type_name, where_input.as_ref(), update, selection),
            TranslateRequest::Delete { type_name, where_input } => {
                translate_delete(ctx, type_name, where_input.as_ref())
            }
            TranslateRequest::Connect {
                type_name,
                where_input,
                field,
                to,
                edge,
                selection,
            } => translate_connect(
                ctx,
                type_name,
                ConnectInput {
                    where_input: where_input.as_ref(),
                    field,
                    target_where: to.as_ref(),
                    edge: edge.as_ref(),
                },
                selection,
            ),
        }
    }
}
