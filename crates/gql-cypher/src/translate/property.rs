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

//! Leaf predicates over attribute fields.

use super::context::TranslationContext;
use super::values::serialize_value;
use super::where_key::WhereOperator;
use crate::cypher::{ComparisonOp, CypherValue, Expr, Param, Point, TemporalKind, Variable};
use crate::error::{Result, TranslateError};
use crate::schema::{AttributeField, AttributeKind, ScalarKind};
use serde_json::Value;
use std::collections::BTreeMap;

/// `target.property`, or `coalesce(target.property, default)`.
pub(crate) fn property_expr(target: &Variable, field: &AttributeField) -> Expr {
    let property = Expr::property(target, &field.db_property_name);
    match &field.coalesce_value {
        Some(default) => Expr::function("coalesce", vec![property, Expr::literal(default.clone())]),
        None => property,
    }
}

/// Compile `{key: value}` where `key` resolved to `field` and `operator`.
pub(crate) fn attribute_predicate(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    field: &AttributeField,
    operator: Option<WhereOperator>,
    value: &Value,
    key: &str,
) -> Result<Expr> {
    let (negated, positive) = match operator {
        Some(op) => op.split_negation(),
        None => (false, None),
    };

    if value.is_null() {
        let property = Expr::property(target, &field.db_property_name);
        return match (negated, positive) {
            (false, None) => Ok(Expr::is_null(property)),
            (true, None) => Ok(Expr::is_not_null(property)),
            _ => Err(TranslateError::invalid_value(key, "a non-null value")),
        };
    }

    if let (Some(original), Some(op)) = (operator, positive) {
        check_applicable(ctx, field, original, op, key)?;
    }

    let predicate = positive_predicate(ctx, target, field, positive, value, key)?;
    Ok(if negated { Expr::not(predicate) } else { predicate })
}

fn check_applicable(
    ctx: &TranslationContext<'_>,
    field: &AttributeField,
    original: WhereOperator,
    op: WhereOperator,
    key: &str,
) -> Result<()> {
    let applicable = match op {
        WhereOperator::Contains | WhereOperator::StartsWith | WhereOperator::EndsWith => {
            field.kind.is_string_like() && !field.list
        }
        WhereOperator::Matches => {
            matches!(field.kind, AttributeKind::Primitive(ScalarKind::String | ScalarKind::Id)) && !field.list
        }
        WhereOperator::Lt | WhereOperator::Lte | WhereOperator::Gt | WhereOperator::Gte => {
            field.kind.is_ordered() && !field.list
        }
        WhereOperator::In => !field.list,
        WhereOperator::Includes => field.list,
        _ => false,
    };
    if !applicable {
        return Err(TranslateError::OperatorNotApplicable {
            operator: original.to_string(),
            field: field.field_name.clone(),
            kind: field.kind_label(),
        });
    }
    if op == WhereOperator::Matches && !ctx.config.enable_regex {
        return Err(TranslateError::RegexDisabled(key.to_string()));
    }
    Ok(())
}

fn positive_predicate(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    field: &AttributeField,
    op: Option<WhereOperator>,
    value: &Value,
    key: &str,
) -> Result<Expr> {
    let property = property_expr(target, field);
    let is_point = matches!(field.kind, AttributeKind::Point(_));
    let is_duration = field.kind == AttributeKind::Temporal(TemporalKind::Duration);

    let comparison = match op {
        None => {
            expect_shape(value, field.list, key)?;
            let param = param(ctx, target, field, value, key)?;
            let right = if is_point && !field.list {
                Expr::function("point", vec![param])
            } else {
                param
            };
            return Ok(Expr::eq(property, right));
        }
        Some(WhereOperator::In) => {
            expect_shape(value, true, key)?;
            let param = param(ctx, target, field, value, key)?;
            let right = if is_point {
                let item = Variable::value("p");
                Expr::ListComprehension {
                    variable: item.clone(),
                    list: Box::new(param),
                    predicate: None,
                    projection: Some(Box::new(Expr::function("point", vec![Expr::var(&item)]))),
                }
            } else {
                param
            };
            return Ok(Expr::compare(ComparisonOp::In, property, right));
        }
        Some(WhereOperator::Includes) => {
            expect_shape(value, false, key)?;
            let param = param(ctx, target, field, value, key)?;
            let left = if is_point {
                Expr::function("point", vec![param])
            } else {
                param
            };
            return Ok(Expr::compare(ComparisonOp::In, left, property));
        }
        Some(WhereOperator::Lt) => ComparisonOp::Lt,
        Some(WhereOperator::Lte) => ComparisonOp::Lte,
        Some(WhereOperator::Gt) => ComparisonOp::Gt,
        Some(WhereOperator::Gte) => ComparisonOp::Gte,
        Some(WhereOperator::Contains) => ComparisonOp::Contains,
        Some(WhereOperator::StartsWith) => ComparisonOp::StartsWith,
        Some(WhereOperator::EndsWith) => ComparisonOp::EndsWith,
        Some(WhereOperator::Matches) => ComparisonOp::Matches,
        Some(other) => return Err(TranslateError::InvalidOperator(other.to_string())),
    };

    if is_point {
        return distance_predicate(target, field, comparison, value, key);
    }

    expect_shape(value, false, key)?;
    let param = param(ctx, target, field, value, key)?;
    if is_duration {
        let now = || Expr::function("datetime", vec![]);
        return Ok(Expr::compare(
            comparison,
            Expr::plus(now(), property),
            Expr::plus(now(), param),
        ));
    }
    Ok(Expr::compare(comparison, property, param))
}

/// `distance(target.p, point($p.point)) < $p.distance`
fn distance_predicate(
    target: &Variable,
    field: &AttributeField,
    comparison: ComparisonOp,
    value: &Value,
    key: &str,
) -> Result<Expr> {
    let AttributeKind::Point(kind) = field.kind else {
        return Err(TranslateError::invalid_value(key, "a point"));
    };
    let obj = value
        .as_object()
        .ok_or_else(|| TranslateError::invalid_value(key, "an object with point and distance"))?;
    let point = obj
        .get("point")
        .ok_or_else(|| TranslateError::invalid_value(key, "an object with point and distance"))
        .and_then(|p| Point::from_json(kind, p))?;
    let distance = obj
        .get("distance")
        .and_then(Value::as_f64)
        .ok_or_else(|| TranslateError::invalid_value(key, "an object with point and distance"))?;

    let mut map = BTreeMap::new();
    map.insert("point".to_string(), CypherValue::Point(point));
    map.insert("distance".to_string(), CypherValue::Float(distance));
    let param = Param::derived(target, key, CypherValue::Map(map));

    Ok(Expr::compare(
        comparison,
        Expr::function(
            "distance",
            vec![
                Expr::property(target, &field.db_property_name),
                Expr::function("point", vec![Expr::param(param.clone()).property_of("point")]),
            ],
        ),
        Expr::param(param).property_of("distance"),
    ))
}

fn expect_shape(value: &Value, list: bool, key: &str) -> Result<()> {
    match (list, value.is_array()) {
        (true, false) => Err(TranslateError::invalid_value(key, "a list")),
        (false, true) => Err(TranslateError::invalid_value(key, "a single value")),
        _ => Ok(()),
    }
}

fn param(
    ctx: &TranslationContext<'_>,
    target: &Variable,
    field: &AttributeField,
    value: &Value,
    key: &str,
) -> Result<Expr> {
    let serialized = serialize_value(ctx, &field.kind, value, key)?;
    Ok(Expr::param(Param::derived(target, key, serialized)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::cypher::{CypherEnvironment, PointKind};
    use crate::schema::Schema;
    use serde_json::json;

    fn compile(
        config: &TranslateConfig,
        field: &AttributeField,
        op: Option<WhereOperator>,
        value: Value,
    ) -> Result<(String, BTreeMap<String, CypherValue>)> {
        let schema = Schema::new();
        let ctx = TranslationContext::new(&schema, config);
        let this = Variable::named("this");
        let key = match op {
            Some(op) => format!("{}_{}", field.field_name, op),
            None => field.field_name.clone(),
        };
        let expr = attribute_predicate(&ctx, &this, field, op, &value, &key)?;
        let mut env = CypherEnvironment::new();
        let text = expr.render(&mut env);
        Ok((text, env.into_parameters()))
    }

    fn title() -> AttributeField {
        AttributeField::primitive("title", ScalarKind::String)
    }

    #[test]
    fn test_operator_table() {
        let config = TranslateConfig::default();
        let cases = [
            (None, "this.title = $this_title"),
            (Some(WhereOperator::Not), "NOT (this.title = $this_title_NOT)"),
            (Some(WhereOperator::Lt), "this.title < $this_title_LT"),
            (Some(WhereOperator::Lte), "this.title <= $this_title_LTE"),
            (Some(WhereOperator::Gt), "this.title > $this_title_GT"),
            (Some(WhereOperator::Gte), "this.title >= $this_title_GTE"),
            (Some(WhereOperator::Contains), "this.title CONTAINS $this_title_CONTAINS"),
            (
                Some(WhereOperator::NotContains),
                "NOT (this.title CONTAINS $this_title_NOT_CONTAINS)",
            ),
            (Some(WhereOperator::StartsWith), "this.title STARTS WITH $this_title_STARTS_WITH"),
            (
                Some(WhereOperator::NotStartsWith),
                "NOT (this.title STARTS WITH $this_title_NOT_STARTS_WITH)",
            ),
            (Some(WhereOperator::EndsWith), "this.title ENDS WITH $this_title_ENDS_WITH"),
            (
                Some(WhereOperator::NotEndsWith),
                "NOT (this.title ENDS WITH $this_title_NOT_ENDS_WITH)",
            ),
            (Some(WhereOperator::Matches), "this.title =~ $this_title_MATCHES"),
        ];
        for (op, expected) in cases {
            let (text, params) = compile(&config, &title(), op, json!("x")).unwrap();
            assert_eq!(text, expected);
            assert_eq!(params.len(), 1);
        }

        let (text, params) = compile(&config, &title(), Some(WhereOperator::NotIn), json!(["a", "b"])).unwrap();
        assert_eq!(text, "NOT (this.title IN $this_title_NOT_IN)");
        assert_eq!(params["this_title_NOT_IN"].to_json(), json!(["a", "b"]));
    }

    #[test]
    fn test_null_values() {
        let config = TranslateConfig::default();
        assert_eq!(compile(&config, &title(), None, Value::Null).unwrap().0, "this.title IS NULL");
        assert_eq!(
            compile(&config, &title(), Some(WhereOperator::Not), Value::Null).unwrap().0,
            "this.title IS NOT NULL"
        );
        assert!(compile(&config, &title(), Some(WhereOperator::Contains), Value::Null).is_err());
    }

    #[test]
    fn test_applicability() {
        let config = TranslateConfig::default();
        let flag = AttributeField::primitive("active", ScalarKind::Boolean);
        let err = compile(&config, &flag, Some(WhereOperator::Gt), json!(true)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "operator GT cannot be applied to field 'active' of kind Boolean"
        );

        let count = AttributeField::primitive("count", ScalarKind::Int);
        assert!(compile(&config, &count, Some(WhereOperator::NotContains), json!(1)).is_err());
        assert!(compile(&config, &title(), Some(WhereOperator::Includes), json!("a")).is_err());
        assert!(compile(&config, &title(), Some(WhereOperator::All), json!("a")).is_err());
    }

    #[test]
    fn test_regex_can_be_disabled() {
        let config = TranslateConfig::default().without_regex();
        let err = compile(&config, &title(), Some(WhereOperator::Matches), json!(".*")).unwrap_err();
        assert!(matches!(err, TranslateError::RegexDisabled(ref k) if k == "title_MATCHES"));
    }

    #[test]
    fn test_list_includes() {
        let config = TranslateConfig::default();
        let tags = AttributeField::primitive("tags", ScalarKind::String).list();
        let (text, _) = compile(&config, &tags, Some(WhereOperator::Includes), json!("a")).unwrap();
        assert_eq!(text, "$this_tags_INCLUDES IN this.tags");
        let (text, _) = compile(&config, &tags, Some(WhereOperator::NotIncludes), json!("a")).unwrap();
        assert_eq!(text, "NOT ($this_tags_NOT_INCLUDES IN this.tags)");
        let (text, _) = compile(&config, &tags, None, json!(["a", "b"])).unwrap();
        assert_eq!(text, "this.tags = $this_tags");
        assert!(compile(&config, &tags, None, json!("a")).is_err());
    }

    #[test]
    fn test_alias_and_coalesce() {
        let config = TranslateConfig::default();
        let field = AttributeField::primitive("name", ScalarKind::String)
            .with_alias("fullName")
            .with_coalesce("");
        let (text, _) = compile(&config, &field, Some(WhereOperator::StartsWith), json!("A")).unwrap();
        assert_eq!(text, "coalesce(this.fullName, '') STARTS WITH $this_name_STARTS_WITH");
    }

    #[test]
    fn test_duration_ordering() {
        let config = TranslateConfig::default();
        let field = AttributeField::new("duration", AttributeKind::Temporal(TemporalKind::Duration));
        let (text, params) = compile(&config, &field, Some(WhereOperator::Gte), json!("P2Y")).unwrap();
        assert_eq!(text, "datetime() + this.duration >= datetime() + $this_duration_GTE");
        assert_eq!(
            params["this_duration_GTE"].to_json(),
            json!({"months": 24, "days": 0, "seconds": {"low": 0, "high": 0}, "nanoseconds": {"low": 0, "high": 0}})
        );
    }

    #[test]
    fn test_point_filters() {
        let config = TranslateConfig::default();
        let field = AttributeField::new("location", AttributeKind::Point(PointKind::Point));
        let point = json!({"longitude": 1.0, "latitude": 2.0});

        let (text, _) = compile(&config, &field, None, point.clone()).unwrap();
        assert_eq!(text, "this.location = point($this_location)");

        let (text, _) = compile(&config, &field, Some(WhereOperator::In), json!([point.clone()])).unwrap();
        assert_eq!(text, "this.location IN [p IN $this_location_IN | point(p)]");

        let (text, params) = compile(
            &config,
            &field,
            Some(WhereOperator::Lt),
            json!({"point": point, "distance": 5000}),
        )
        .unwrap();
        assert_eq!(
            text,
            "distance(this.location, point($this_location_LT.point)) < $this_location_LT.distance"
        );
        assert_eq!(
            params["this_location_LT"].to_json(),
            json!({"distance": 5000.0, "point": {"longitude": 1.0, "latitude": 2.0}})
        );
    }
}
