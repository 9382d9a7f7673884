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

//! Where command - a single filter object to a predicate

use super::{format_statement, load_schema, read_file};
use crate::cli::OutputFormat;
use crate::error::CliError;
use gql_cypher::translate::{compile_filter, TranslationContext};
use gql_cypher::TranslateConfig;
use serde_json::{Map, Value};

/// Where the filter JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSource {
    /// Passed on the command line.
    Inline(String),
    /// Read from a file.
    File(String),
}

impl FilterSource {
    fn load(&self) -> Result<Map<String, Value>, CliError> {
        let (name, content) = match self {
            FilterSource::Inline(json) => ("--filter".to_string(), json.clone()),
            FilterSource::File(path) => (path.clone(), read_file(path)?),
        };
        match serde_json::from_str(&content).map_err(|e| CliError::json(name, e))? {
            Value::Object(map) => Ok(map),
            other => Err(CliError::InvalidInput(format!("filter must be a JSON object, got {}", other))),
        }
    }
}

/// Compile one filter over `type_name`.
pub fn where_filter(
    schema: &str,
    type_name: &str,
    source: FilterSource,
    config: &TranslateConfig,
    format: OutputFormat,
) -> Result<(), CliError> {
    let schema = load_schema(schema)?;
    let filter = source.load()?;

    let ctx = TranslationContext::new(&schema, config);
    let statement = compile_filter(&ctx, type_name, &filter)?;
    println!("{}", format_statement(&statement, format)?);
    Ok(())
}
