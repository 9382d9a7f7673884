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

//! Cypher string escaping and identifier validation utilities.
//!
//! Labels, relationship types, property keys and variable names come from
//! schema metadata; every one of them passes through this module before it
//! reaches query text. Filter values never do: they travel as parameters.

use crate::config::TranslateConfig;
use crate::error::{Result, TranslateError};
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Validate string length against configuration limits.
///
/// # Examples
///
/// ```
/// # use gql_cypher::cypher::validate_string_length;
/// # use gql_cypher::TranslateConfig;
/// let config = TranslateConfig::default().with_max_string_length(8);
/// assert!(validate_string_length("short", "title", &config).is_ok());
/// assert!(validate_string_length("much too long", "title", &config).is_err());
/// ```
pub fn validate_string_length(s: &str, property: &str, config: &TranslateConfig) -> Result<()> {
    if let Some(max_length) = config.max_string_length {
        let length = s.len();
        if length > max_length {
            return Err(TranslateError::StringLengthExceeded {
                length,
                max_length,
                property: property.to_string(),
            });
        }
    }
    Ok(())
}

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string value for use inside a single-quoted Cypher literal.
///
/// Returns `Cow::Borrowed` when nothing needs escaping.
///
/// ```
/// # use gql_cypher::cypher::escape_string;
/// assert_eq!(escape_string("plain"), "plain");
/// assert_eq!(escape_string("it's"), "it\\'s");
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string value for Cypher with single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Check if a string is a valid unquoted Cypher identifier.
///
/// Valid identifiers start with a letter or underscore, and contain only
/// letters, digits, and underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Normalize a string to NFC (Canonical Composition) form.
///
/// ```
/// # use gql_cypher::cypher::normalize_unicode;
/// let composed = "caf\u{e9}";
/// let decomposed = "cafe\u{301}";
/// assert_eq!(normalize_unicode(composed), normalize_unicode(decomposed));
/// ```
pub fn normalize_unicode(s: &str) -> String {
    s.nfc().collect()
}

/// Control, zero-width and bidirectional formatting characters.
fn is_dangerous_unicode(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}'
                | '\u{200C}'
                | '\u{200D}'
                | '\u{FEFF}'
                | '\u{202A}'
                | '\u{202B}'
                | '\u{202C}'
                | '\u{202D}'
                | '\u{202E}'
                | '\u{2066}'
                | '\u{2067}'
                | '\u{2068}'
                | '\u{2069}'
                | '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
        )
}

fn sanitize(s: &str) -> String {
    normalize_unicode(s)
        .chars()
        .filter(|c| !is_dangerous_unicode(*c))
        .collect()
}

fn backtick_if_needed(sanitized: String) -> String {
    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        format!("`{}`", sanitized.replace('`', "``"))
    }
}

/// Escape an identifier (variable name, property key, map key).
///
/// ```
/// # use gql_cypher::cypher::escape_identifier;
/// assert_eq!(escape_identifier("title"), "title");
/// assert_eq!(escape_identifier("release-date"), "`release-date`");
/// assert_eq!(escape_identifier("MATCH"), "`MATCH`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    backtick_if_needed(sanitize(s))
}

/// Escape a node label, including the leading `:`.
///
/// ```
/// # use gql_cypher::cypher::escape_label;
/// assert_eq!(escape_label("Movie"), ":Movie");
/// assert_eq!(escape_label("Sci-Fi"), ":`Sci-Fi`");
/// ```
pub fn escape_label(s: &str) -> String {
    format!(":{}", backtick_if_needed(sanitize(s)))
}

/// Escape a relationship type, including the leading `:`.
///
/// ```
/// # use gql_cypher::cypher::escape_relationship_type;
/// assert_eq!(escape_relationship_type("ACTED_IN"), ":ACTED_IN");
/// assert_eq!(escape_relationship_type("acted in"), ":`acted in`");
/// ```
pub fn escape_relationship_type(s: &str) -> String {
    format!(":{}", backtick_if_needed(sanitize(s)))
}

/// Convert an arbitrary string into a plain identifier fragment.
///
/// Used to derive variable and parameter names from field names; invalid
/// characters become underscores.
pub fn to_identifier(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 1);
    for (i, c) in s.chars().enumerate() {
        if i == 0 && c.is_ascii_digit() {
            result.push('_');
        }
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
        } else {
            result.push('_');
        }
    }
    if result.is_empty() {
        result.push('_');
    }
    result
}

/// Check if a string is a Cypher reserved keyword.
fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL"
            | "AND"
            | "ANY"
            | "AS"
            | "ASC"
            | "ASCENDING"
            | "BY"
            | "CALL"
            | "CASE"
            | "CONTAINS"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DESCENDING"
            | "DETACH"
            | "DISTINCT"
            | "DO"
            | "DROP"
            | "ELSE"
            | "END"
            | "ENDS"
            | "EXISTS"
            | "FALSE"
            | "FILTER"
            | "FOREACH"
            | "IN"
            | "IS"
            | "LIMIT"
            | "MANDATORY"
            | "MATCH"
            | "MERGE"
            | "NONE"
            | "NOT"
            | "NULL"
            | "OF"
            | "ON"
            | "OPTIONAL"
            | "OR"
            | "ORDER"
            | "REDUCE"
            | "REMOVE"
            | "RETURN"
            | "SET"
            | "SINGLE"
            | "SKIP"
            | "SOME"
            | "STARTS"
            | "THEN"
            | "TRUE"
            | "UNION"
            | "UNIQUE"
            | "UNWIND"
            | "USING"
            | "WHEN"
            | "WHERE"
            | "WITH"
            | "XOR"
            | "YIELD"
    )
}
