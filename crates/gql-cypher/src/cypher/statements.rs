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

//! Statement fragments and the statement assembler.

use super::value::CypherValue;
use crate::error::{Result, TranslateError};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A piece of Cypher text with the parameters it references.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CypherStatement {
    /// The Cypher text.
    pub query: String,
    /// Parameters referenced by the text.
    pub parameters: BTreeMap<String, CypherValue>,
}

impl CypherStatement {
    /// Create a fragment with no parameters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter to this fragment.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add multiple parameters to this fragment.
    pub fn with_params(mut self, params: impl IntoIterator<Item = (String, CypherValue)>) -> Self {
        self.parameters.extend(params);
        self
    }

    /// Check if this fragment has parameters.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// True when the text is empty or whitespace.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Render with parameter values inlined as literals.
    ///
    /// Longer names are substituted first so `$this_title` never clobbers
    /// the prefix of `$this_title_1`.
    pub fn render_inline(&self) -> String {
        let mut names: Vec<&String> = self.parameters.keys().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut result = self.query.clone();
        for name in names {
            let placeholder = format!("${}", name);
            result = result.replace(&placeholder, &self.parameters[name].to_cypher_literal());
        }
        result
    }
}

fn is_match_fragment(query: &str) -> bool {
    query.starts_with("MATCH ") || query.starts_with("OPTIONAL MATCH ")
}

/// Concatenate fragments into one statement.
///
/// Empty fragments contribute no text. A MATCH fragment identical to one
/// already emitted is dropped. Parameter maps are merged; a name bound to
/// two different values fails with [`TranslateError::ParameterCollision`].
///
/// ```
/// # use gql_cypher::cypher::{join_statements, CypherStatement};
/// let joined = join_statements(
///     vec![
///         CypherStatement::new("MATCH (this:Movie)"),
///         CypherStatement::new(""),
///         CypherStatement::new("WHERE this.title = $t").with_param("t", "Up"),
///     ],
///     "\n",
/// )
/// .unwrap();
/// assert_eq!(joined.query, "MATCH (this:Movie)\nWHERE this.title = $t");
/// ```
pub fn join_statements(
    fragments: impl IntoIterator<Item = CypherStatement>,
    separator: &str,
) -> Result<CypherStatement> {
    let mut parts: Vec<String> = Vec::new();
    let mut seen_matches: HashSet<String> = HashSet::new();
    let mut parameters: BTreeMap<String, CypherValue> = BTreeMap::new();

    for fragment in fragments {
        for (name, value) in fragment.parameters {
            match parameters.get(&name) {
                Some(existing) if *existing != value => {
                    return Err(TranslateError::ParameterCollision { name });
                }
                Some(_) => {}
                None => {
                    parameters.insert(name, value);
                }
            }
        }

        let text = fragment.query.trim();
        if text.is_empty() {
            continue;
        }
        if is_match_fragment(text) && !seen_matches.insert(text.to_string()) {
            continue;
        }
        parts.push(text.to_string());
    }

    Ok(CypherStatement {
        query: parts.join(separator),
        parameters,
    })
}

/// The final output of a compilation: Cypher text plus its parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledStatement {
    /// The Cypher text.
    pub cypher: String,
    /// Every parameter referenced by `cypher`.
    pub params: BTreeMap<String, CypherValue>,
}

impl CompiledStatement {
    /// The parameter map as driver JSON.
    pub fn params_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.params
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Render with parameter values inlined, for debugging output.
    pub fn render_inline(&self) -> String {
        CypherStatement {
            query: self.cypher.clone(),
            parameters: self.params.clone(),
        }
        .render_inline()
    }
}

impl From<CypherStatement> for CompiledStatement {
    fn from(statement: CypherStatement) -> Self {
        Self {
            cypher: statement.query,
            params: statement.parameters,
        }
    }
}
