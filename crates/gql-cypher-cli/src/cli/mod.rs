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

//! CLI command definitions and argument parsing.
//!
//! - [`core`]: translate, where, parse-key, check-schema
//! - [`utility`]: completion

mod core;
mod utility;

use crate::commands::read_file;
use crate::error::CliError;
use clap::{Args, Parser, Subcommand};
use gql_cypher::TranslateConfig;
use std::path::PathBuf;
use tracing::debug;

pub use core::{CoreCommands, OutputFormat};
pub use utility::UtilityCommands;

/// gql-cypher - GraphQL to Cypher translation
#[derive(Parser)]
#[command(name = "gql-cypher")]
#[command(author, version, about = "gql-cypher - GraphQL to Cypher translation", long_about = None)]
pub struct Cli {
    /// Options shared by every command
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Run the parsed command.
    pub fn execute(self) -> Result<(), CliError> {
        let config = self.global.translate_config()?;
        self.command.execute(&config)
    }
}

/// Options that shape translation.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// JSON translation config file
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "untrusted")]
    pub config: Option<PathBuf>,

    /// Use the hardened config for untrusted filters
    #[arg(long, global = true)]
    pub untrusted: bool,

    /// Bind integers as native numbers
    #[arg(long, global = true)]
    pub native_integers: bool,

    /// Render the statement on one line
    #[arg(long, global = true)]
    pub single_line: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalOptions {
    /// Resolve the effective config: file or preset first, then flags.
    pub fn translate_config(&self) -> Result<TranslateConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let content = read_file(path)?;
                serde_json::from_str(&content).map_err(|e| CliError::json(path.display().to_string(), e))?
            }
            None if self.untrusted => TranslateConfig::for_untrusted_input(),
            None => TranslateConfig::default(),
        };
        if self.native_integers {
            config = config.with_native_integers();
        }
        if self.single_line {
            config = config.single_line();
        }
        debug!(?config, "resolved translate config");
        Ok(config)
    }
}

/// Top-level CLI commands.
///
/// ```text
/// Commands
/// ├── Core (translate, where, parse-key, check-schema)
/// └── Utility (completion)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Core commands - flattened to appear at top level
    #[command(flatten)]
    Core(CoreCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command with the resolved config.
    pub fn execute(self, config: &TranslateConfig) -> Result<(), CliError> {
        match self {
            Commands::Core(cmd) => cmd.execute(config),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
