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

//! Translate command - JSON request to Cypher

use super::{format_statement, load_schema, read_input};
use crate::cli::OutputFormat;
use crate::error::CliError;
use gql_cypher::translate::{TranslateRequest, TranslationContext};
use gql_cypher::TranslateConfig;
use tracing::info;

/// Translate the request in `request` (a path, or `-` for stdin) against
/// the schema in `schema` and print the statement.
///
/// # Errors
///
/// Fails when either file cannot be read, the request is not a valid
/// envelope, or translation rejects it.
pub fn translate(schema: &str, request: &str, config: &TranslateConfig, format: OutputFormat) -> Result<(), CliError> {
    let schema = load_schema(schema)?;
    let content = read_input(request)?;
    let request: TranslateRequest = serde_json::from_str(&content).map_err(|e| CliError::json("request", e))?;
    info!(type_name = request.type_name(), "translating request");

    let ctx = TranslationContext::new(&schema, config);
    let statement = request.translate(&ctx)?;
    println!("{}", format_statement(&statement, format)?);
    Ok(())
}
