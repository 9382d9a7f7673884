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

//! gql-cypher CLI library
//!
//! Command-line access to the GraphQL-to-Cypher translator: compile whole
//! requests or standalone `where` filters against a schema file, inspect
//! where keys, and validate schema directives.
//!
//! # Commands
//!
//! - **translate**: Compile a JSON request (read, create, update, delete, connect)
//! - **where**: Compile a single filter object into a predicate
//! - **parse-key**: Show how a where key splits into field and operator
//! - **check-schema**: Build every node descriptor and report directive errors
//! - **completion**: Generate shell completion scripts
//!
//! # Global Options
//!
//! - `--config <FILE>`: JSON translation config (partial configs are fine)
//! - `--untrusted`: Regex off, tight depth and string limits
//! - `--native-integers`: Bind integers as plain numbers instead of `{low, high}`
//! - `--verbose`: Debug logging to stderr (`RUST_LOG` also works)
//!
//! # Examples
//!
//! ```bash
//! gql-cypher check-schema movies.schema.json
//! gql-cypher where movies.schema.json --type Movie --filter '{"title_CONTAINS": "Matrix"}'
//! gql-cypher translate movies.schema.json request.json --json
//! ```

pub mod cli;
pub mod commands;
pub mod error;

pub use error::CliError;
