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

//! Configuration types for translation.

use serde::{Deserialize, Serialize};

/// Default maximum string length for parameter values: 100 MB.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 100 * 1024 * 1024;

/// Default maximum nesting depth of a where filter.
///
/// Nesting counts every `AND`/`OR` level and every relationship hop.
pub const DEFAULT_MAX_FILTER_DEPTH: usize = 100;

/// How `Int` and `BigInt` values are written into the parameter map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegerEncoding {
    /// Driver wire format: `{low, high}` 32-bit halves.
    #[default]
    LowHigh,
    /// Plain JSON numbers.
    Native,
}

/// Configuration for compiling GraphQL operations to Cypher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Name of the root node variable (default: "this").
    pub root_variable: String,

    /// Allow `_MATCHES` regex filters (default: true).
    pub enable_regex: bool,

    /// Encoding for integer parameters (default: `LowHigh`).
    pub integer_encoding: IntegerEncoding,

    /// Maximum filter nesting depth (default: 100, None = unlimited).
    pub max_filter_depth: Option<usize>,

    /// Maximum string length for parameter values (default: 100MB, None = unlimited).
    pub max_string_length: Option<usize>,

    /// Text placed between clauses of the rendered statement (default: newline).
    pub clause_separator: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            root_variable: "this".to_string(),
            enable_regex: true,
            integer_encoding: IntegerEncoding::LowHigh,
            max_filter_depth: Some(DEFAULT_MAX_FILTER_DEPTH),
            max_string_length: Some(DEFAULT_MAX_STRING_LENGTH),
            clause_separator: "\n".to_string(),
        }
    }
}

/// Builder for TranslateConfig.
///
/// # Examples
///
/// ```
/// # use gql_cypher::TranslateConfig;
/// let config = TranslateConfig::builder()
///     .root_variable("movie")
///     .enable_regex(false)
///     .build();
/// assert_eq!(config.root_variable, "movie");
/// ```
#[derive(Default)]
pub struct TranslateConfigBuilder {
    root_variable: Option<String>,
    enable_regex: Option<bool>,
    integer_encoding: Option<IntegerEncoding>,
    max_filter_depth: Option<Option<usize>>,
    max_string_length: Option<Option<usize>>,
    clause_separator: Option<String>,
}

impl TranslateConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root node variable name.
    pub fn root_variable(mut self, name: impl Into<String>) -> Self {
        self.root_variable = Some(name.into());
        self
    }

    /// Set whether `_MATCHES` filters are accepted.
    pub fn enable_regex(mut self, enable: bool) -> Self {
        self.enable_regex = Some(enable);
        self
    }

    /// Set the integer parameter encoding.
    pub fn integer_encoding(mut self, encoding: IntegerEncoding) -> Self {
        self.integer_encoding = Some(encoding);
        self
    }

    /// Set the maximum filter nesting depth.
    pub fn max_filter_depth(mut self, max: usize) -> Self {
        self.max_filter_depth = Some(Some(max));
        self
    }

    /// Remove the filter depth limit.
    pub fn no_filter_depth_limit(mut self) -> Self {
        self.max_filter_depth = Some(None);
        self
    }

    /// Set maximum string length for parameter values.
    pub fn max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(Some(max));
        self
    }

    /// Remove the string length limit.
    pub fn no_string_length_limit(mut self) -> Self {
        self.max_string_length = Some(None);
        self
    }

    /// Set the clause separator.
    pub fn clause_separator(mut self, separator: impl Into<String>) -> Self {
        self.clause_separator = Some(separator.into());
        self
    }

    /// Build the TranslateConfig instance.
    ///
    /// All unset fields will use their default values.
    pub fn build(self) -> TranslateConfig {
        let defaults = TranslateConfig::default();
        TranslateConfig {
            root_variable: self.root_variable.unwrap_or(defaults.root_variable),
            enable_regex: self.enable_regex.unwrap_or(defaults.enable_regex),
            integer_encoding: self.integer_encoding.unwrap_or(defaults.integer_encoding),
            max_filter_depth: self.max_filter_depth.unwrap_or(defaults.max_filter_depth),
            max_string_length: self.max_string_length.unwrap_or(defaults.max_string_length),
            clause_separator: self.clause_separator.unwrap_or(defaults.clause_separator),
        }
    }
}

impl TranslateConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for TranslateConfig.
    pub fn builder() -> TranslateConfigBuilder {
        TranslateConfigBuilder::default()
    }

    /// Set the root variable name.
    pub fn with_root_variable(mut self, name: impl Into<String>) -> Self {
        self.root_variable = name.into();
        self
    }

    /// Reject `_MATCHES` filters.
    pub fn without_regex(mut self) -> Self {
        self.enable_regex = false;
        self
    }

    /// Write integers as plain numbers.
    pub fn with_native_integers(mut self) -> Self {
        self.integer_encoding = IntegerEncoding::Native;
        self
    }

    /// Set the maximum filter nesting depth.
    pub fn with_max_filter_depth(mut self, max: usize) -> Self {
        self.max_filter_depth = Some(max);
        self
    }

    /// Set maximum string length for parameter values.
    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(max);
        self
    }

    /// Remove string length limit.
    pub fn without_string_length_limit(mut self) -> Self {
        self.max_string_length = None;
        self
    }

    /// Join clauses with a single space instead of newlines.
    pub fn single_line(mut self) -> Self {
        self.clause_separator = " ".to_string();
        self
    }

    /// Create a configuration suitable for operations from untrusted callers.
    ///
    /// - Regex filters disabled
    /// - Filter depth limited to 32
    /// - 1MB max string length
    pub fn for_untrusted_input() -> Self {
        Self {
            enable_regex: false,
            max_filter_depth: Some(32),
            max_string_length: Some(1_000_000),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_config_default() {
        let config = TranslateConfig::default();
        assert_eq!(config.root_variable, "this");
        assert!(config.enable_regex);
        assert_eq!(config.integer_encoding, IntegerEncoding::LowHigh);
        assert_eq!(config.max_filter_depth, Some(DEFAULT_MAX_FILTER_DEPTH));
        assert_eq!(config.max_string_length, Some(DEFAULT_MAX_STRING_LENGTH));
        assert_eq!(config.clause_separator, "\n");
    }

    #[test]
    fn test_fluent_methods() {
        let config = TranslateConfig::new()
            .with_root_variable("m")
            .without_regex()
            .with_native_integers()
            .with_max_filter_depth(4)
            .with_max_string_length(10)
            .single_line();

        assert_eq!(config.root_variable, "m");
        assert!(!config.enable_regex);
        assert_eq!(config.integer_encoding, IntegerEncoding::Native);
        assert_eq!(config.max_filter_depth, Some(4));
        assert_eq!(config.max_string_length, Some(10));
        assert_eq!(config.clause_separator, " ");

        let unlimited = config.without_string_length_limit();
        assert_eq!(unlimited.max_string_length, None);
    }

    #[test]
    fn test_builder_defaults_and_overrides() {
        let config = TranslateConfig::builder().build();
        assert_eq!(config.root_variable, "this");
        assert!(config.enable_regex);

        let config = TranslateConfig::builder()
            .root_variable("n")
            .enable_regex(false)
            .integer_encoding(IntegerEncoding::Native)
            .max_filter_depth(3)
            .max_string_length(99)
            .clause_separator(" ")
            .build();
        assert_eq!(config.root_variable, "n");
        assert!(!config.enable_regex);
        assert_eq!(config.integer_encoding, IntegerEncoding::Native);
        assert_eq!(config.max_filter_depth, Some(3));
        assert_eq!(config.max_string_length, Some(99));
        assert_eq!(config.clause_separator, " ");

        let config = TranslateConfig::builder()
            .no_filter_depth_limit()
            .no_string_length_limit()
            .build();
        assert_eq!(config.max_filter_depth, None);
        assert_eq!(config.max_string_length, None);
    }

    #[test]
    fn test_for_untrusted_input_config() {
        let config = TranslateConfig::for_untrusted_input();
        assert!(!config.enable_regex);
        assert_eq!(config.max_filter_depth, Some(32));
        assert_eq!(config.max_string_length, Some(1_000_000));
        assert_eq!(config.root_variable, "this");
    }

    #[test]
    fn test_config_serialization() {
        let config = TranslateConfig::default().with_native_integers();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TranslateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.integer_encoding, IntegerEncoding::Native);
        assert_eq!(parsed.root_variable, config.root_variable);
    }
}
