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

//! Cypher parameter values.

use super::scalar::{Integer, Point, Temporal};
use serde::Serialize;
use std::collections::BTreeMap;

/// A Cypher parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CypherValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value written as a plain number.
    Int(i64),
    /// Integer value written as `{low, high}`.
    Integer(Integer),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// Temporal value in driver shape.
    Temporal(Temporal),
    /// Spatial point.
    Point(Point),
    /// List value.
    List(Vec<CypherValue>),
    /// Map/object value.
    Map(BTreeMap<String, CypherValue>),
}

impl From<bool> for CypherValue {
    fn from(v: bool) -> Self {
        CypherValue::Bool(v)
    }
}

impl From<i64> for CypherValue {
    fn from(v: i64) -> Self {
        CypherValue::Int(v)
    }
}

impl From<i32> for CypherValue {
    fn from(v: i32) -> Self {
        CypherValue::Int(v as i64)
    }
}

impl From<f64> for CypherValue {
    fn from(v: f64) -> Self {
        CypherValue::Float(v)
    }
}

impl From<String> for CypherValue {
    fn from(v: String) -> Self {
        CypherValue::String(v)
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_string())
    }
}

impl From<Integer> for CypherValue {
    fn from(v: Integer) -> Self {
        CypherValue::Integer(v)
    }
}

impl From<Temporal> for CypherValue {
    fn from(v: Temporal) -> Self {
        CypherValue::Temporal(v)
    }
}

impl From<Point> for CypherValue {
    fn from(v: Point) -> Self {
        CypherValue::Point(v)
    }
}

impl<T: Into<CypherValue>> From<Vec<T>> for CypherValue {
    fn from(v: Vec<T>) -> Self {
        CypherValue::List(v.into_iter().map(|x| x.into()).collect())
    }
}

impl<T: Into<CypherValue>> From<Option<T>> for CypherValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(x) => x.into(),
            None => CypherValue::Null,
        }
    }
}

/// Untyped conversion: integral numbers become `Int`, other numbers `Float`.
impl From<&serde_json::Value> for CypherValue {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => CypherValue::Null,
            serde_json::Value::Bool(b) => CypherValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CypherValue::Int(i),
                None => CypherValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => CypherValue::String(s.clone()),
            serde_json::Value::Array(items) => CypherValue::List(items.iter().map(CypherValue::from).collect()),
            serde_json::Value::Object(map) => CypherValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), CypherValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl CypherValue {
    /// Convert to Cypher literal syntax.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            CypherValue::Null => "null".to_string(),
            CypherValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            CypherValue::Int(i) => i.to_string(),
            CypherValue::Integer(i) => i.to_i64().to_string(),
            CypherValue::Float(f) => {
                if f.is_nan() {
                    "0.0/0.0".to_string()
                } else if f.is_infinite() {
                    if *f > 0.0 {
                        "1.0/0.0".to_string()
                    } else {
                        "-1.0/0.0".to_string()
                    }
                } else {
                    let s = f.to_string();
                    if s.contains('.') || s.contains('e') || s.contains('E') {
                        s
                    } else {
                        format!("{}.0", s)
                    }
                }
            }
            CypherValue::String(s) => super::escape::quote_string(s),
            CypherValue::Temporal(t) => t.to_cypher_literal(),
            CypherValue::Point(p) => p.to_cypher_literal(),
            CypherValue::List(items) => {
                let inner: Vec<String> = items.iter().map(|v| v.to_cypher_literal()).collect();
                format!("[{}]", inner.join(", "))
            }
            CypherValue::Map(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}: {}",
                            super::escape::escape_identifier(k),
                            v.to_cypher_literal()
                        )
                    })
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
        }
    }

    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CypherValue::Null)
    }

    /// Try to get as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CypherValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as an integer, whichever encoding it carries.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CypherValue::Int(i) => Some(*i),
            CypherValue::Integer(i) => Some(i.to_i64()),
            _ => None,
        }
    }

    /// The JSON form sent to the driver.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
