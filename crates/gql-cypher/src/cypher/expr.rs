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

//! Expression IR.
//!
//! Every expression renders to text against a [`CypherEnvironment`]. Empty
//! logical combinators render to the empty string; callers check
//! [`Expr::is_empty`] before emitting a `WHERE`.

use super::environment::CypherEnvironment;
use super::escape::escape_identifier;
use super::pattern::Pattern;
use super::value::CypherValue;
use super::variable::{Param, Variable};
use std::fmt;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `IS NULL`, unary.
    IsNull,
    /// `IS NOT NULL`, unary.
    IsNotNull,
    /// `IN`
    In,
    /// `CONTAINS`
    Contains,
    /// `STARTS WITH`
    StartsWith,
    /// `ENDS WITH`
    EndsWith,
    /// `=~`
    Matches,
}

impl ComparisonOp {
    /// Operator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::Lte => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Gte => ">=",
            ComparisonOp::IsNull => "IS NULL",
            ComparisonOp::IsNotNull => "IS NOT NULL",
            ComparisonOp::In => "IN",
            ComparisonOp::Contains => "CONTAINS",
            ComparisonOp::StartsWith => "STARTS WITH",
            ComparisonOp::EndsWith => "ENDS WITH",
            ComparisonOp::Matches => "=~",
        }
    }

    fn is_unary(&self) -> bool {
        matches!(self, ComparisonOp::IsNull | ComparisonOp::IsNotNull)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List predicate quantifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// Every element matches.
    All,
    /// At least one element matches.
    Any,
    /// No element matches.
    None,
    /// Exactly one element matches.
    Single,
}

impl Quantifier {
    /// Function name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantifier::All => "ALL",
            Quantifier::Any => "ANY",
            Quantifier::None => "NONE",
            Quantifier::Single => "SINGLE",
        }
    }
}

/// An entry of a map projection.
#[derive(Debug, Clone)]
pub enum ProjectionItem {
    /// `.key`
    Property(String),
    /// `key: expr`
    Entry(String, Expr),
}

/// An expression.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum Expr {
    Variable(Variable),
    /// `base.key`
    Property(Box<Expr>, String),
    Param(Param),
    /// Inline literal.
    Literal(CypherValue),
    /// `name([DISTINCT] args)`
    Function {
        name: String,
        args: Vec<Expr>,
        distinct: bool,
    },
    /// `left + right`
    Add(Box<Expr>, Box<Expr>),
    /// `[a, b]`
    List(Vec<Expr>),
    /// `{ key: value }`
    Map(Vec<(String, Expr)>),
    /// `variable { .key, key: value }`
    MapProjection {
        variable: Variable,
        items: Vec<ProjectionItem>,
    },
    /// `[pattern WHERE predicate | projection]`
    PatternComprehension {
        pattern: Pattern,
        predicate: Option<Box<Expr>>,
        projection: Box<Expr>,
    },
    /// `[variable IN list WHERE predicate | projection]`
    ListComprehension {
        variable: Variable,
        list: Box<Expr>,
        predicate: Option<Box<Expr>>,
        projection: Option<Box<Expr>>,
    },
    /// Binary or unary comparison; either operand may be absent.
    Comparison {
        op: ComparisonOp,
        left: Option<Box<Expr>>,
        right: Option<Box<Expr>>,
    },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    /// `exists(pattern)`
    Exists(Pattern),
    /// `ANY(variable IN list WHERE predicate)`
    Quantified {
        quantifier: Quantifier,
        variable: Variable,
        list: Box<Expr>,
        predicate: Option<Box<Expr>>,
    },
}

impl Expr {
    /// Reference a variable.
    pub fn var(variable: &Variable) -> Self {
        Expr::Variable(variable.clone())
    }

    /// `variable.key`
    pub fn property(variable: &Variable, key: impl Into<String>) -> Self {
        Expr::Property(Box::new(Expr::var(variable)), key.into())
    }

    /// `expr.key`
    pub fn property_of(self, key: impl Into<String>) -> Self {
        Expr::Property(Box::new(self), key.into())
    }

    /// Reference a parameter.
    pub fn param(param: Param) -> Self {
        Expr::Param(param)
    }

    /// Inline literal.
    pub fn literal(value: impl Into<CypherValue>) -> Self {
        Expr::Literal(value.into())
    }

    /// `name(args...)`
    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
            distinct: false,
        }
    }

    /// `name(DISTINCT args...)`
    pub fn distinct_function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
            distinct: true,
        }
    }

    /// `left + right`
    pub fn plus(left: Expr, right: Expr) -> Self {
        Expr::Add(Box::new(left), Box::new(right))
    }

    /// A comparison.
    pub fn compare(op: ComparisonOp, left: Expr, right: Expr) -> Self {
        Expr::Comparison {
            op,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// `left = right`
    pub fn eq(left: Expr, right: Expr) -> Self {
        Expr::compare(ComparisonOp::Eq, left, right)
    }

    /// `expr IS NULL`
    pub fn is_null(expr: Expr) -> Self {
        Expr::Comparison {
            op: ComparisonOp::IsNull,
            left: Some(Box::new(expr)),
            right: None,
        }
    }

    /// `expr IS NOT NULL`
    pub fn is_not_null(expr: Expr) -> Self {
        Expr::Comparison {
            op: ComparisonOp::IsNotNull,
            left: Some(Box::new(expr)),
            right: None,
        }
    }

    /// Conjunction; empty children are dropped and a single child is returned bare.
    pub fn and(children: Vec<Expr>) -> Self {
        Self::combine(children, Expr::And)
    }

    /// Disjunction; empty children are dropped and a single child is returned bare.
    pub fn or(children: Vec<Expr>) -> Self {
        Self::combine(children, Expr::Or)
    }

    fn combine(children: Vec<Expr>, wrap: fn(Vec<Expr>) -> Expr) -> Self {
        let mut children: Vec<Expr> = children.into_iter().filter(|c| !c.is_empty()).collect();
        if children.len() == 1 {
            children.remove(0)
        } else {
            wrap(children)
        }
    }

    /// Negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    /// `exists(pattern)`
    pub fn exists(pattern: Pattern) -> Self {
        Expr::Exists(pattern)
    }

    /// True if this renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::And(children) | Expr::Or(children) => children.iter().all(Expr::is_empty),
            Expr::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }

    /// `None` when empty.
    pub fn non_empty(self) -> Option<Expr> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Render to Cypher text.
    pub fn render(&self, env: &mut CypherEnvironment) -> String {
        match self {
            Expr::Variable(v) => env.variable_name(v),
            Expr::Property(base, key) => format!("{}.{}", base.render(env), escape_identifier(key)),
            Expr::Param(p) => format!("${}", env.param_name(p)),
            Expr::Literal(v) => v.to_cypher_literal(),
            Expr::Function { name, args, distinct } => {
                let args = render_list(args, env);
                if *distinct {
                    format!("{}(DISTINCT {})", name, args)
                } else {
                    format!("{}({})", name, args)
                }
            }
            Expr::Add(left, right) => format!("{} + {}", left.render(env), right.render(env)),
            Expr::List(items) => format!("[{}]", render_list(items, env)),
            Expr::Map(entries) => render_map(entries, env),
            Expr::MapProjection { variable, items } => {
                let name = env.variable_name(variable);
                if items.is_empty() {
                    return format!("{} {{}}", name);
                }
                let items: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        ProjectionItem::Property(key) => format!(".{}", escape_identifier(key)),
                        ProjectionItem::Entry(key, expr) => {
                            format!("{}: {}", escape_identifier(key), expr.render(env))
                        }
                    })
                    .collect();
                format!("{} {{ {} }}", name, items.join(", "))
            }
            Expr::PatternComprehension {
                pattern,
                predicate,
                projection,
            } => {
                let pattern = pattern.render(env);
                let predicate = render_where(predicate.as_deref(), env);
                format!("[{}{} | {}]", pattern, predicate, projection.render(env))
            }
            Expr::ListComprehension {
                variable,
                list,
                predicate,
                projection,
            } => {
                let name = env.variable_name(variable);
                let list = list.render(env);
                let predicate = render_where(predicate.as_deref(), env);
                let projection = match projection {
                    Some(p) => format!(" | {}", p.render(env)),
                    None => String::new(),
                };
                format!("[{} IN {}{}{}]", name, list, predicate, projection)
            }
            Expr::Comparison { op, left, right } => {
                let left = left.as_ref().map(|l| l.render(env));
                if op.is_unary() {
                    return match left {
                        Some(l) => format!("{} {}", l, op),
                        None => op.to_string(),
                    };
                }
                let right = right.as_ref().map(|r| r.render(env));
                let mut parts = Vec::with_capacity(3);
                parts.extend(left);
                parts.push(op.to_string());
                parts.extend(right);
                parts.join(" ")
            }
            Expr::And(children) => render_logical(children, "AND", env),
            Expr::Or(children) => render_logical(children, "OR", env),
            Expr::Not(inner) => {
                let rendered = inner.render(env);
                if rendered.is_empty() {
                    return rendered;
                }
                let wrapped = matches!(inner.as_ref(), Expr::And(_) | Expr::Or(_)) && rendered.starts_with('(');
                if wrapped {
                    format!("NOT {}", rendered)
                } else {
                    format!("NOT ({})", rendered)
                }
            }
            Expr::Exists(pattern) => format!("exists({})", pattern.render(env)),
            Expr::Quantified {
                quantifier,
                variable,
                list,
                predicate,
            } => {
                let name = env.variable_name(variable);
                let list = list.render(env);
                let predicate = match predicate.as_deref().map(|p| p.render(env)) {
                    Some(p) if !p.is_empty() => p,
                    _ => "true".to_string(),
                };
                format!("{}({} IN {} WHERE {})", quantifier.as_str(), name, list, predicate)
            }
        }
    }
}

fn render_list(items: &[Expr], env: &mut CypherEnvironment) -> String {
    items
        .iter()
        .map(|item| item.render(env))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn render_map(entries: &[(String, Expr)], env: &mut CypherEnvironment) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    let entries: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("{}: {}", escape_identifier(key), value.render(env)))
        .collect();
    format!("{{ {} }}", entries.join(", "))
}

fn render_where(predicate: Option<&Expr>, env: &mut CypherEnvironment) -> String {
    match predicate.map(|p| p.render(env)) {
        Some(p) if !p.is_empty() => format!(" WHERE {}", p),
        _ => String::new(),
    }
}

fn render_logical(children: &[Expr], keyword: &str, env: &mut CypherEnvironment) -> String {
    let rendered: Vec<String> = children
        .iter()
        .map(|c| c.render(env))
        .filter(|s| !s.is_empty())
        .collect();
    match rendered.len() {
        0 => String::new(),
        1 => rendered.into_iter().collect(),
        _ => format!("({})", rendered.join(&format!(" {} ", keyword))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::pattern::NodePattern;

    fn render(expr: &Expr) -> (String, CypherEnvironment) {
        let mut env = CypherEnvironment::new();
        let text = expr.render(&mut env);
        (text, env)
    }

    #[test]
    fn test_comparison_operators() {
        let this = Variable::named("this");
        let cases = [
            (ComparisonOp::Eq, "this.a = 1"),
            (ComparisonOp::Ne, "this.a <> 1"),
            (ComparisonOp::Lt, "this.a < 1"),
            (ComparisonOp::Lte, "this.a <= 1"),
            (ComparisonOp::Gt, "this.a > 1"),
            (ComparisonOp::Gte, "this.a >= 1"),
            (ComparisonOp::In, "this.a IN 1"),
            (ComparisonOp::Contains, "this.a CONTAINS 1"),
            (ComparisonOp::StartsWith, "this.a STARTS WITH 1"),
            (ComparisonOp::EndsWith, "this.a ENDS WITH 1"),
            (ComparisonOp::Matches, "this.a =~ 1"),
        ];
        for (op, expected) in cases {
            let expr = Expr::compare(op, Expr::property(&this, "a"), Expr::literal(1i64));
            assert_eq!(render(&expr).0, expected);
        }
    }

    #[test]
    fn test_null_checks_ignore_right_side() {
        let this = Variable::named("this");
        let expr = Expr::Comparison {
            op: ComparisonOp::IsNull,
            left: Some(Box::new(Expr::property(&this, "a"))),
            right: Some(Box::new(Expr::literal(1i64))),
        };
        assert_eq!(render(&expr).0, "this.a IS NULL");
        assert_eq!(render(&Expr::is_not_null(Expr::property(&this, "a"))).0, "this.a IS NOT NULL");
    }

    #[test]
    fn test_empty_logical_renders_nothing() {
        assert!(Expr::And(vec![]).is_empty());
        assert_eq!(render(&Expr::And(vec![])).0, "");
        assert_eq!(render(&Expr::Or(vec![Expr::And(vec![])])).0, "");
        assert_eq!(render(&Expr::not(Expr::Or(vec![]))).0, "");
        assert!(Expr::and(vec![]).non_empty().is_none());
    }

    #[test]
    fn test_logical_parenthesization() {
        let this = Variable::named("this");
        let a = Expr::eq(Expr::property(&this, "a"), Expr::literal(1i64));
        let b = Expr::eq(Expr::property(&this, "b"), Expr::literal(2i64));

        assert_eq!(render(&Expr::and(vec![a.clone()])).0, "this.a = 1");
        assert_eq!(
            render(&Expr::and(vec![a.clone(), b.clone()])).0,
            "(this.a = 1 AND this.b = 2)"
        );
        assert_eq!(
            render(&Expr::not(Expr::or(vec![a.clone(), b]))).0,
            "NOT (this.a = 1 OR this.b = 2)"
        );
        assert_eq!(render(&Expr::not(a)).0, "NOT (this.a = 1)");
    }

    #[test]
    fn test_params_get_names() {
        let this = Variable::named("this");
        let expr = Expr::eq(
            Expr::property(&this, "title"),
            Expr::param(Param::derived(&this, "title", "Matrix")),
        );
        let (text, env) = render(&expr);
        assert_eq!(text, "this.title = $this_title");
        assert_eq!(env.parameters().get("this_title"), Some(&CypherValue::from("Matrix")));
    }

    #[test]
    fn test_functions_and_maps() {
        let this = Variable::named("this");
        let expr = Expr::eq(
            Expr::plus(Expr::function("datetime", vec![]), Expr::property(&this, "d")),
            Expr::distinct_function("collect", vec![Expr::var(&this)]),
        );
        assert_eq!(render(&expr).0, "datetime() + this.d = collect(DISTINCT this)");

        let map = Expr::Map(vec![
            ("edges".to_string(), Expr::var(&Variable::named_value("edges"))),
            ("totalCount".to_string(), Expr::function("size", vec![Expr::var(&Variable::named_value("edges"))])),
        ]);
        assert_eq!(render(&map).0, "{ edges: edges, totalCount: size(edges) }");
        assert_eq!(render(&Expr::Map(vec![])).0, "{}");
    }

    #[test]
    fn test_map_projection() {
        let this = Variable::named("this");
        let expr = Expr::MapProjection {
            variable: this.clone(),
            items: vec![
                ProjectionItem::Property("title".into()),
                ProjectionItem::Entry("name".into(), Expr::property(&this, "title")),
            ],
        };
        assert_eq!(render(&expr).0, "this { .title, name: this.title }");
        let empty = Expr::MapProjection {
            variable: this,
            items: vec![],
        };
        assert_eq!(render(&empty).0, "this {}");
    }

    #[test]
    fn test_quantified_and_comprehensions() {
        let this = Variable::named("this");
        let item = Variable::value("p");
        let list = Expr::ListComprehension {
            variable: item.clone(),
            list: Box::new(Expr::param(Param::named("points", vec![1i64]))),
            predicate: None,
            projection: Some(Box::new(Expr::function("point", vec![Expr::var(&item)]))),
        };
        assert_eq!(render(&list).0, "[p IN $points | point(p)]");

        let quantified = Expr::Quantified {
            quantifier: Quantifier::None,
            variable: item.clone(),
            list: Box::new(Expr::property(&this, "tags")),
            predicate: None,
        };
        assert_eq!(render(&quantified).0, "NONE(p IN this.tags WHERE true)");
    }

    #[test]
    fn test_exists_pattern() {
        let this = Variable::named("this");
        let pattern = Pattern::new(NodePattern::new(&this));
        assert_eq!(render(&Expr::exists(pattern)).0, "exists((this))");
    }
}
