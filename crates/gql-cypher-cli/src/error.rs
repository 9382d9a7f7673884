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

//! Structured error types for the gql-cypher CLI.

use gql_cypher::TranslateError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure the CLI reports.
#[derive(Error, Debug)]
pub enum CliError {
    /// Reading a file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        message: String,
    },

    /// A file larger than the configured limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// The rejected file.
        path: PathBuf,
        /// Its size.
        actual: u64,
        /// The limit.
        max: u64,
    },

    /// Malformed JSON in a schema, request, filter or config.
    #[error("JSON error in {source_name}: {message}")]
    Json {
        /// Where the JSON came from.
        source_name: String,
        /// Parser message.
        message: String,
    },

    /// Translation failed.
    #[error("{0}")]
    Translate(#[from] TranslateError),

    /// Arguments that do not make sense together.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// An I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// A JSON error from `source_name`.
    pub fn json(source_name: impl Into<String>, err: serde_json::Error) -> Self {
        CliError::Json {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }
}
