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

//! Pre-resolved GraphQL selections.

use crate::cypher::SortDirection;
use crate::error::{Result, TranslateError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Arguments of a selected field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveArgs {
    /// The `where` filter.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_input: Option<Value>,
    /// Sort keys, one field per entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<BTreeMap<String, SortDirection>>,
    /// Maximum rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Rows to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// One selected field with its arguments and sub-selection.
///
/// ```
/// # use gql_cypher::translate::ResolveTree;
/// # use serde_json::json;
/// let tree: ResolveTree = serde_json::from_value(json!({
///     "name": "movies",
///     "args": {"where": {"title": "Matrix"}, "limit": 5},
///     "fields": [{"name": "title"}, {"name": "actors", "fields": [{"name": "name"}]}]
/// })).unwrap();
/// assert_eq!(tree.fields[1].fields[0].name, "name");
/// assert_eq!(tree.args.limit, Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveTree {
    /// Field name.
    pub name: String,
    /// Response key when aliased.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Field arguments.
    #[serde(default)]
    pub args: ResolveArgs,
    /// Sub-selection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ResolveTree>,
}

impl ResolveTree {
    /// A bare field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the response key.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the `where` filter.
    pub fn with_where(mut self, filter: Value) -> Self {
        self.args.where_input = Some(filter);
        self
    }

    /// Add a sort key.
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        let mut entry = BTreeMap::new();
        entry.insert(field.into(), direction);
        self.args.sort.push(entry);
        self
    }

    /// Set `limit`.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.args.limit = Some(limit);
        self
    }

    /// Set `offset`.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.args.offset = Some(offset);
        self
    }

    /// Add a sub-selection.
    pub fn with_field(mut self, field: ResolveTree) -> Self {
        self.fields.push(field);
        self
    }

    /// Add bare sub-selections by name.
    pub fn with_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(ResolveTree::new));
        self
    }

    /// The key this field appears under in the response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// The `where` argument as an object, if present and not null.
    pub fn where_object(&self) -> Result<Option<&Map<String, Value>>> {
        filter_object(self.args.where_input.as_ref(), "where")
    }
}

/// `None` for an absent or `null` filter, the object otherwise.
pub(crate) fn filter_object<'v>(value: Option<&'v Value>, key: &str) -> Result<Option<&'v Map<String, Value>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(TranslateError::invalid_value(key, "a filter object")),
    }
}
