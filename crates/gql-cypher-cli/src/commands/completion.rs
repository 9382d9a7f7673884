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

//! Shell completion generation

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

/// Write the completion script for `cmd` to stdout.
pub fn generate_completion_for_command<G: Generator>(generator: G, cmd: &mut Command) -> Result<(), CliError> {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
    Ok(())
}

/// Error for a shell clap_complete does not support.
pub fn unsupported_shell(shell: &str) -> CliError {
    CliError::InvalidInput(format!(
        "Unsupported shell: '{}'. Supported shells: bash, zsh, fish, powershell, elvish",
        shell
    ))
}

/// Installation instructions for shell completions.
///
/// Shell names are case-insensitive.
pub fn print_installation_instructions(shell: &str) -> Result<String, CliError> {
    let text = match shell.to_lowercase().as_str() {
        "bash" => {
            r#"# Bash completion installation:

# For current session only:
eval "$(gql-cypher completion bash)"

# For persistent installation, add to your ~/.bashrc:
echo 'eval "$(gql-cypher completion bash)"' >> ~/.bashrc
"#
        }
        "zsh" => {
            r#"# Zsh completion installation:

# For current session only:
eval "$(gql-cypher completion zsh)"

# Or save to completions directory (ensure directory is in $fpath):
gql-cypher completion zsh > ~/.zsh/completions/_gql-cypher
"#
        }
        "fish" => {
            r#"# Fish completion installation:

gql-cypher completion fish > ~/.config/fish/completions/gql-cypher.fish
"#
        }
        "powershell" | "pwsh" => {
            r#"# PowerShell completion installation:

# Add this line to the profile at $PROFILE:
gql-cypher completion powershell | Out-String | Invoke-Expression
"#
        }
        "elvish" => {
            r#"# Elvish completion installation:

# Add to your ~/.elvish/rc.elv:
eval (gql-cypher completion elvish)
"#
        }
        _ => return Err(unsupported_shell(shell)),
    };
    Ok(text.to_string())
}
