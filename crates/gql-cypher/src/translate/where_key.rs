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

//! Where-key grammar: `<field>[Aggregate][_<OPERATOR>]`.
//!
//! The grammar is a compatibility contract with the generated GraphQL
//! input types. Changing it changes which filter keys clients can send.

use crate::error::{Result, TranslateError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// The where-key grammar.
pub const WHERE_KEY_PATTERN: &str =
    r"^(?P<field>[_A-Za-z][_0-9A-Za-z]*?)(?P<aggregate>Aggregate)?(?:_(?P<operator>[A-Z]+(?:_[A-Z]+)*))?$";

static WHERE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(WHERE_KEY_PATTERN).expect("where key pattern is valid"));

/// Operator suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhereOperator {
    /// `_NOT`
    Not,
    /// `_LT`
    Lt,
    /// `_LTE`
    Lte,
    /// `_GT`
    Gt,
    /// `_GTE`
    Gte,
    /// `_IN`
    In,
    /// `_NOT_IN`
    NotIn,
    /// `_CONTAINS`
    Contains,
    /// `_NOT_CONTAINS`
    NotContains,
    /// `_STARTS_WITH`
    StartsWith,
    /// `_NOT_STARTS_WITH`
    NotStartsWith,
    /// `_ENDS_WITH`
    EndsWith,
    /// `_NOT_ENDS_WITH`
    NotEndsWith,
    /// `_MATCHES`
    Matches,
    /// `_INCLUDES`
    Includes,
    /// `_NOT_INCLUDES`
    NotIncludes,
    /// `_ALL`
    All,
    /// `_NONE`
    None,
    /// `_SINGLE`
    Single,
    /// `_SOME`
    Some,
}

impl WhereOperator {
    /// Every operator, in table order.
    pub const ALL: [WhereOperator; 20] = [
        WhereOperator::Not,
        WhereOperator::Lt,
        WhereOperator::Lte,
        WhereOperator::Gt,
        WhereOperator::Gte,
        WhereOperator::In,
        WhereOperator::NotIn,
        WhereOperator::Contains,
        WhereOperator::NotContains,
        WhereOperator::StartsWith,
        WhereOperator::NotStartsWith,
        WhereOperator::EndsWith,
        WhereOperator::NotEndsWith,
        WhereOperator::Matches,
        WhereOperator::Includes,
        WhereOperator::NotIncludes,
        WhereOperator::All,
        WhereOperator::None,
        WhereOperator::Single,
        WhereOperator::Some,
    ];

    /// The suffix text, without the leading underscore.
    pub fn as_str(&self) -> &'static str {
        match self {
            WhereOperator::Not => "NOT",
            WhereOperator::Lt => "LT",
            WhereOperator::Lte => "LTE",
            WhereOperator::Gt => "GT",
            WhereOperator::Gte => "GTE",
            WhereOperator::In => "IN",
            WhereOperator::NotIn => "NOT_IN",
            WhereOperator::Contains => "CONTAINS",
            WhereOperator::NotContains => "NOT_CONTAINS",
            WhereOperator::StartsWith => "STARTS_WITH",
            WhereOperator::NotStartsWith => "NOT_STARTS_WITH",
            WhereOperator::EndsWith => "ENDS_WITH",
            WhereOperator::NotEndsWith => "NOT_ENDS_WITH",
            WhereOperator::Matches => "MATCHES",
            WhereOperator::Includes => "INCLUDES",
            WhereOperator::NotIncludes => "NOT_INCLUDES",
            WhereOperator::All => "ALL",
            WhereOperator::None => "NONE",
            WhereOperator::Single => "SINGLE",
            WhereOperator::Some => "SOME",
        }
    }

    /// Split a `NOT_*` operator into its positive form.
    ///
    /// `NOT` itself maps to `None` (plain equality, negated).
    pub fn split_negation(self) -> (bool, Option<WhereOperator>) {
        match self {
            WhereOperator::Not => (true, None),
            WhereOperator::NotIn => (true, Some(WhereOperator::In)),
            WhereOperator::NotContains => (true, Some(WhereOperator::Contains)),
            WhereOperator::NotStartsWith => (true, Some(WhereOperator::StartsWith)),
            WhereOperator::NotEndsWith => (true, Some(WhereOperator::EndsWith)),
            WhereOperator::NotIncludes => (true, Some(WhereOperator::Includes)),
            other => (false, Some(other)),
        }
    }

    /// `ALL`, `NONE`, `SINGLE` or `SOME`.
    pub fn is_quantifier(&self) -> bool {
        matches!(
            self,
            WhereOperator::All | WhereOperator::None | WhereOperator::Single | WhereOperator::Some
        )
    }
}

impl FromStr for WhereOperator {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        WhereOperator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| TranslateError::InvalidOperator(s.to_string()))
    }
}

impl fmt::Display for WhereOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed where key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereKey {
    /// Field name.
    pub field: String,
    /// `Aggregate` marker present.
    pub aggregate: bool,
    /// Operator suffix, if any.
    pub operator: Option<WhereOperator>,
}

/// Split a where key into field, aggregate marker and operator.
///
/// Fails with [`TranslateError::InvalidWhereKey`] when the key does not
/// match the grammar and [`TranslateError::InvalidOperator`] when the
/// suffix is not a known operator.
///
/// ```
/// # use gql_cypher::translate::{parse_where_key, WhereOperator};
/// let key = parse_where_key("title_NOT_CONTAINS").unwrap();
/// assert_eq!(key.field, "title");
/// assert_eq!(key.operator, Some(WhereOperator::NotContains));
///
/// let err = parse_where_key("title_FOO").unwrap_err();
/// assert_eq!(err.to_string(), "Invalid operator FOO");
/// ```
pub fn parse_where_key(key: &str) -> Result<WhereKey> {
    let caps = WHERE_KEY_RE
        .captures(key)
        .ok_or_else(|| TranslateError::InvalidWhereKey(key.to_string()))?;

    let field = caps
        .name("field")
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| TranslateError::InvalidWhereKey(key.to_string()))?;
    let aggregate = caps.name("aggregate").is_some();
    let operator = caps
        .name("operator")
        .map(|m| m.as_str().parse::<WhereOperator>())
        .transpose()?;

    Ok(WhereKey {
        field,
        aggregate,
        operator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_field() {
        let key = parse_where_key("title").unwrap();
        assert_eq!(key.field, "title");
        assert!(!key.aggregate);
        assert_eq!(key.operator, None);
    }

    #[test]
    fn test_every_operator_round_trips() {
        for op in WhereOperator::ALL {
            let key = parse_where_key(&format!("field_{}", op)).unwrap();
            assert_eq!(key.field, "field");
            assert_eq!(key.operator, Some(op));
        }
    }

    #[test]
    fn test_snake_case_field_names() {
        let key = parse_where_key("release_date").unwrap();
        assert_eq!(key.field, "release_date");
        assert_eq!(key.operator, None);

        let key = parse_where_key("release_date_GTE").unwrap();
        assert_eq!(key.field, "release_date");
        assert_eq!(key.operator, Some(WhereOperator::Gte));
    }

    #[test]
    fn test_aggregate_marker() {
        let key = parse_where_key("actorsAggregate").unwrap();
        assert_eq!(key.field, "actors");
        assert!(key.aggregate);
    }

    #[test]
    fn test_connection_key() {
        let key = parse_where_key("actorsConnection_NONE").unwrap();
        assert_eq!(key.field, "actorsConnection");
        assert_eq!(key.operator, Some(WhereOperator::None));
    }

    #[test]
    fn test_invalid_operator() {
        let err = parse_where_key("title_NOT_FOO").unwrap_err();
        assert!(matches!(err, TranslateError::InvalidOperator(ref op) if op == "NOT_FOO"));
    }

    #[test]
    fn test_invalid_key() {
        for key in ["", "1title", "title-x", "two words"] {
            assert!(
                matches!(parse_where_key(key), Err(TranslateError::InvalidWhereKey(_))),
                "{key}"
            );
        }
        // A trailing underscore is part of the field name.
        assert_eq!(parse_where_key("title_").unwrap().field, "title_");
    }

    #[test]
    fn test_split_negation() {
        assert_eq!(WhereOperator::Not.split_negation(), (true, None));
        assert_eq!(
            WhereOperator::NotIn.split_negation(),
            (true, Some(WhereOperator::In))
        );
        assert_eq!(
            WhereOperator::Gt.split_negation(),
            (false, Some(WhereOperator::Gt))
        );
        assert!(WhereOperator::Single.is_quantifier());
        assert!(!WhereOperator::Includes.is_quantifier());
    }
}
