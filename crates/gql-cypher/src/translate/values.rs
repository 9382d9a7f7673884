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

//! GraphQL input values to driver parameter values.

use super::context::TranslationContext;
use crate::cypher::{validate_string_length, CypherValue, Point, Temporal};
use crate::error::{Result, TranslateError};
use crate::schema::{AttributeKind, ScalarKind};
use serde_json::Value;

/// Serialize an input value for a field of `kind`.
///
/// Arrays serialize element-wise in order and `null` stays null, so the
/// same call covers list fields and `IN` operands. `key` names the value
/// in error messages.
///
/// ```
/// # use gql_cypher::{Schema, TranslateConfig};
/// # use gql_cypher::cypher::TemporalKind;
/// # use gql_cypher::schema::AttributeKind;
/// # use gql_cypher::translate::{serialize_value, TranslationContext};
/// # use serde_json::json;
/// let schema = Schema::new();
/// let config = TranslateConfig::default();
/// let ctx = TranslationContext::new(&schema, &config);
///
/// let value = serialize_value(&ctx, &AttributeKind::Temporal(TemporalKind::Duration), &json!("P2Y"), "d").unwrap();
/// assert_eq!(
///     value.to_json(),
///     json!({"months": 24, "days": 0, "seconds": {"low": 0, "high": 0}, "nanoseconds": {"low": 0, "high": 0}})
/// );
/// ```
pub fn serialize_value(ctx: &TranslationContext<'_>, kind: &AttributeKind, value: &Value, key: &str) -> Result<CypherValue> {
    match value {
        Value::Null => Ok(CypherValue::Null),
        Value::Array(items) => items
            .iter()
            .map(|item| serialize_value(ctx, kind, item, key))
            .collect::<Result<Vec<_>>>()
            .map(CypherValue::List),
        _ => serialize_scalar(ctx, kind, value, key),
    }
}

fn serialize_scalar(ctx: &TranslationContext<'_>, kind: &AttributeKind, value: &Value, key: &str) -> Result<CypherValue> {
    match kind {
        AttributeKind::Primitive(scalar) => serialize_primitive(ctx, *scalar, value, key),
        AttributeKind::Enum(_) => string_value(ctx, value, key).map(CypherValue::String),
        AttributeKind::Temporal(temporal) => {
            let text = value
                .as_str()
                .ok_or_else(|| TranslateError::invalid_value(key, "a temporal string"))?;
            Temporal::parse(*temporal, text).map(CypherValue::Temporal)
        }
        AttributeKind::Point(point) => Point::from_json(*point, value).map(CypherValue::Point),
    }
}

fn serialize_primitive(ctx: &TranslationContext<'_>, scalar: ScalarKind, value: &Value, key: &str) -> Result<CypherValue> {
    match scalar {
        ScalarKind::String => string_value(ctx, value, key).map(CypherValue::String),
        ScalarKind::Id => match value {
            Value::Number(n) => Ok(CypherValue::String(n.to_string())),
            _ => string_value(ctx, value, key).map(CypherValue::String),
        },
        ScalarKind::Int => value
            .as_i64()
            .map(|i| ctx.encode_integer(i))
            .ok_or_else(|| TranslateError::invalid_value(key, "an integer")),
        ScalarKind::BigInt => {
            let parsed = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            parsed
                .map(|i| ctx.encode_integer(i))
                .ok_or_else(|| TranslateError::invalid_value(key, "a 64-bit integer"))
        }
        ScalarKind::Float => value
            .as_f64()
            .map(CypherValue::Float)
            .ok_or_else(|| TranslateError::invalid_value(key, "a number")),
        ScalarKind::Boolean => value
            .as_bool()
            .map(CypherValue::Bool)
            .ok_or_else(|| TranslateError::invalid_value(key, "a boolean")),
    }
}

fn string_value(ctx: &TranslationContext<'_>, value: &Value, key: &str) -> Result<String> {
    let s = value
        .as_str()
        .ok_or_else(|| TranslateError::invalid_value(key, "a string"))?;
    validate_string_length(s, key, ctx.config)?;
    Ok(s.to_string())
}
