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

//! Core commands for the gql-cypher CLI.

use crate::commands;
use crate::error::CliError;
use clap::{Subcommand, ValueEnum};
use gql_cypher::TranslateConfig;

/// How a compiled statement is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Cypher text, a blank line, then the parameters as JSON
    #[default]
    Text,
    /// `{"cypher": ..., "params": ...}`
    Json,
    /// Cypher with parameters substituted, for reading only
    Inline,
}

/// Core commands.
#[derive(Subcommand)]
pub enum CoreCommands {
    /// Translate a JSON request into Cypher
    ///
    /// The request names an operation (read, create, update, delete or
    /// connect), the node type, and its arguments.
    Translate {
        /// Schema file (JSON type definitions)
        #[arg(value_name = "SCHEMA")]
        schema: String,

        /// Request file, or '-' for stdin
        #[arg(value_name = "REQUEST")]
        request: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Compile a standalone where filter
    Where {
        /// Schema file (JSON type definitions)
        #[arg(value_name = "SCHEMA")]
        schema: String,

        /// Node type the filter applies to
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        type_name: String,

        /// Filter object as inline JSON
        #[arg(long, value_name = "JSON", conflicts_with = "filter_file", required_unless_present = "filter_file")]
        filter: Option<String>,

        /// Filter object from a file
        #[arg(long, value_name = "FILE")]
        filter_file: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show how a where key splits into field and operator
    ParseKey {
        /// Where key, e.g. title_NOT_CONTAINS
        #[arg(value_name = "KEY")]
        key: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate schema directives and list the node descriptors
    CheckSchema {
        /// Schema file (JSON type definitions)
        #[arg(value_name = "SCHEMA")]
        schema: String,
    },
}

impl CoreCommands {
    /// Execute the core command.
    pub fn execute(self, config: &TranslateConfig) -> Result<(), CliError> {
        match self {
            CoreCommands::Translate {
                schema,
                request,
                format,
            } => commands::translate(&schema, &request, config, format),
            CoreCommands::Where {
                schema,
                type_name,
                filter,
                filter_file,
                format,
            } => {
                let source = match (filter, filter_file) {
                    (Some(inline), _) => commands::FilterSource::Inline(inline),
                    (None, Some(path)) => commands::FilterSource::File(path),
                    (None, None) => return Err(CliError::InvalidInput("either --filter or --filter-file is required".into())),
                };
                commands::where_filter(&schema, &type_name, source, config, format)
            }
            CoreCommands::ParseKey { key, json } => commands::parse_key(&key, json),
            CoreCommands::CheckSchema { schema } => commands::check_schema(&schema),
        }
    }
}
