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

//! Parse-key command - where key grammar inspection

use crate::error::CliError;
use gql_cypher::translate::{parse_where_key, WhereKey};
use serde_json::json;

/// Describe a where key as `key: value` lines.
pub fn describe_where_key(key: &WhereKey) -> String {
    let mut lines = vec![format!("field: {}", key.field)];
    if key.aggregate {
        lines.push("aggregate: true".to_string());
    }
    match key.operator {
        None => lines.push("operator: (equality)".to_string()),
        Some(operator) => {
            lines.push(format!("operator: {}", operator));
            let (negated, positive) = operator.split_negation();
            if negated {
                let base = positive.map_or("equality".to_string(), |op| op.to_string());
                lines.push(format!("negates: {}", base));
            }
        }
    }
    lines.join("\n")
}

/// Parse `key` and print its parts.
pub fn parse_key(key: &str, as_json: bool) -> Result<(), CliError> {
    let parsed = parse_where_key(key)?;
    if as_json {
        let value = json!({
            "field": parsed.field,
            "aggregate": parsed.aggregate,
            "operator": parsed.operator.map(|op| op.to_string()),
        });
        let text = serde_json::to_string_pretty(&value).map_err(|e| CliError::json("key", e))?;
        println!("{}", text);
    } else {
        println!("{}", describe_where_key(&parsed));
    }
    Ok(())
}
