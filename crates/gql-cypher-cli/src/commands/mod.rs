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

//! CLI command implementations

mod check_schema;
mod completion;
mod parse_key;
mod translate;
mod where_filter;

pub use check_schema::check_schema;
pub use completion::{generate_completion_for_command, print_installation_instructions, unsupported_shell};
pub use parse_key::parse_key;
pub use translate::translate;
pub use where_filter::{where_filter, FilterSource};

use crate::cli::OutputFormat;
use crate::error::CliError;
use gql_cypher::schema::TypeDefinitions;
use gql_cypher::{CompiledStatement, Schema};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Default maximum file size: 64 MB.
///
/// Override with the `GQL_CYPHER_MAX_FILE_SIZE` environment variable (bytes).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

fn get_max_file_size() -> u64 {
    std::env::var("GQL_CYPHER_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file, refusing anything over the size limit.
pub fn read_file(path: impl AsRef<Path>) -> Result<String, CliError> {
    let path = path.as_ref();
    // Check the size first so an oversized file is never loaded
    let metadata = fs::metadata(path).map_err(|e| CliError::io(path, e))?;

    let max = get_max_file_size();
    if metadata.len() > max {
        return Err(CliError::FileTooLarge {
            path: path.to_path_buf(),
            actual: metadata.len(),
            max,
        });
    }

    fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

/// Read `path`, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String, CliError> {
    if path != "-" {
        return read_file(path);
    }
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| CliError::io("<stdin>", e))?;
    Ok(content)
}

/// Load JSON type definitions and build every node descriptor.
pub fn load_schema(path: &str) -> Result<Schema, CliError> {
    let content = read_file(path)?;
    let definitions = TypeDefinitions::from_json(&content)?;
    let schema = Schema::from_type_definitions(&definitions)?;
    debug!(path, nodes = schema.nodes().count(), "loaded schema");
    Ok(schema)
}

/// Render a compiled statement in the requested format.
pub fn format_statement(statement: &CompiledStatement, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text if statement.params.is_empty() => Ok(statement.cypher.clone()),
        OutputFormat::Text => {
            let params = serde_json::to_string_pretty(&statement.params_json())
                .map_err(|e| CliError::json("parameters", e))?;
            Ok(format!("{}\n\n{}", statement.cypher, params))
        }
        OutputFormat::Json => serde_json::to_string_pretty(statement).map_err(|e| CliError::json("statement", e)),
        OutputFormat::Inline => Ok(statement.render_inline()),
    }
}
