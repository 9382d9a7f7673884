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

//! Clause IR and query assembly.

use super::environment::CypherEnvironment;
use super::expr::Expr;
use super::pattern::Pattern;
use super::statements::{join_statements, CompiledStatement, CypherStatement};
use super::variable::Variable;
use crate::config::TranslateConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// `expr AS alias` in a WITH or RETURN.
#[derive(Debug, Clone)]
pub struct ReturnItem {
    /// The projected expression.
    pub expr: Expr,
    /// Optional `AS` name.
    pub alias: Option<Variable>,
}

impl ReturnItem {
    /// An item with no alias.
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// An item with an alias.
    pub fn aliased(expr: Expr, alias: &Variable) -> Self {
        Self {
            expr,
            alias: Some(alias.clone()),
        }
    }

    /// Just a variable.
    pub fn variable(variable: &Variable) -> Self {
        Self::new(Expr::var(variable))
    }

    fn render(&self, env: &mut CypherEnvironment) -> String {
        let expr = self.expr.render(env);
        match &self.alias {
            Some(alias) => {
                let alias = env.variable_name(alias);
                if alias == expr {
                    expr
                } else {
                    format!("{} AS {}", expr, alias)
                }
            }
            None => expr,
        }
    }
}

/// Projection of a WITH clause.
#[derive(Debug, Clone)]
pub enum WithItems {
    /// `WITH *`
    All,
    /// `WITH a, b AS c`
    Items(Vec<ReturnItem>),
}

/// A clause.
#[derive(Debug, Clone)]
pub enum Clause {
    /// `[OPTIONAL] MATCH pattern [WHERE predicate]`
    Match {
        /// Pattern to match.
        pattern: Pattern,
        /// Render as `OPTIONAL MATCH`.
        optional: bool,
        /// Filter; dropped when it renders empty.
        predicate: Option<Expr>,
    },
    /// `CALL { WITH imports ... }`
    Call {
        /// Outer variables imported into the subquery.
        imports: Vec<Variable>,
        /// Subquery clauses.
        body: Vec<Clause>,
    },
    /// `WITH [DISTINCT] items [ORDER BY ...] [SKIP n] [LIMIT n] [WHERE predicate]`
    With {
        /// Projection.
        items: WithItems,
        /// Render as `WITH DISTINCT`.
        distinct: bool,
        /// Sort keys, in priority order.
        order_by: Vec<(Expr, SortDirection)>,
        /// Rows to skip.
        skip: Option<Expr>,
        /// Row cap.
        limit: Option<Expr>,
        /// Filter applied after the projection.
        predicate: Option<Expr>,
    },
    /// `UNWIND expr AS alias`
    Unwind {
        /// List to unwind.
        expr: Expr,
        /// Per-element variable.
        alias: Variable,
    },
    /// `CREATE pattern`
    Create(Pattern),
    /// `MERGE pattern`
    Merge(Pattern),
    /// `SET target = value, ...`; renders empty with no assignments.
    Set(Vec<(Expr, Expr)>),
    /// `DETACH DELETE a, b`
    DetachDelete(Vec<Variable>),
    /// `CALL procedure(args...)`, a standalone procedure call.
    Procedure(Expr),
    /// `RETURN [DISTINCT] items`
    Return {
        /// Projection.
        items: Vec<ReturnItem>,
        /// Render as `RETURN DISTINCT`.
        distinct: bool,
    },
}

impl Clause {
    /// `MATCH pattern [WHERE predicate]`
    pub fn matching(pattern: Pattern, predicate: Option<Expr>) -> Self {
        Clause::Match {
            pattern,
            optional: false,
            predicate,
        }
    }

    /// `WITH * WHERE predicate`
    pub fn with_filter(predicate: Expr) -> Self {
        Clause::With {
            items: WithItems::All,
            distinct: false,
            order_by: Vec::new(),
            skip: None,
            limit: None,
            predicate: Some(predicate),
        }
    }

    /// `RETURN item`
    pub fn returning(item: ReturnItem) -> Self {
        Clause::Return {
            items: vec![item],
            distinct: false,
        }
    }

    /// Render to text; clauses with nothing to say render empty.
    pub fn render(&self, env: &mut CypherEnvironment, separator: &str) -> String {
        match self {
            Clause::Match {
                pattern,
                optional,
                predicate,
            } => {
                let keyword = if *optional { "OPTIONAL MATCH" } else { "MATCH" };
                let mut out = format!("{} {}", keyword, pattern.render(env));
                push_where(&mut out, predicate.as_ref(), env, separator);
                out
            }
            Clause::Call { imports, body } => {
                let mut lines = Vec::with_capacity(body.len() + 3);
                lines.push("CALL {".to_string());
                if !imports.is_empty() {
                    let names: Vec<String> = imports.iter().map(|v| env.variable_name(v)).collect();
                    lines.push(format!("WITH {}", names.join(", ")));
                }
                for clause in body {
                    let text = clause.render(env, separator);
                    if !text.is_empty() {
                        lines.push(text);
                    }
                }
                lines.push("}".to_string());
                lines.join(separator)
            }
            Clause::With {
                items,
                distinct,
                order_by,
                skip,
                limit,
                predicate,
            } => {
                let projection = match items {
                    WithItems::All => "*".to_string(),
                    WithItems::Items(items) => render_items(items, env),
                };
                let mut out = if *distinct {
                    format!("WITH DISTINCT {}", projection)
                } else {
                    format!("WITH {}", projection)
                };
                if !order_by.is_empty() {
                    let keys: Vec<String> = order_by
                        .iter()
                        .map(|(e, dir)| format!("{} {}", e.render(env), dir.as_str()))
                        .collect();
                    out.push_str(&format!("{}ORDER BY {}", separator, keys.join(", ")));
                }
                if let Some(skip) = skip {
                    out.push_str(&format!("{}SKIP {}", separator, skip.render(env)));
                }
                if let Some(limit) = limit {
                    out.push_str(&format!("{}LIMIT {}", separator, limit.render(env)));
                }
                push_where(&mut out, predicate.as_ref(), env, separator);
                out
            }
            Clause::Unwind { expr, alias } => {
                let expr = expr.render(env);
                format!("UNWIND {} AS {}", expr, env.variable_name(alias))
            }
            Clause::Create(pattern) => format!("CREATE {}", pattern.render(env)),
            Clause::Merge(pattern) => format!("MERGE {}", pattern.render(env)),
            Clause::Set(assignments) => {
                if assignments.is_empty() {
                    return String::new();
                }
                let parts: Vec<String> = assignments
                    .iter()
                    .map(|(target, value)| format!("{} = {}", target.render(env), value.render(env)))
                    .collect();
                format!("SET {}", parts.join(", "))
            }
            Clause::DetachDelete(variables) => {
                let names: Vec<String> = variables.iter().map(|v| env.variable_name(v)).collect();
                format!("DETACH DELETE {}", names.join(", "))
            }
            Clause::Procedure(call) => format!("CALL {}", call.render(env)),
            Clause::Return { items, distinct } => {
                let items = render_items(items, env);
                if *distinct {
                    format!("RETURN DISTINCT {}", items)
                } else {
                    format!("RETURN {}", items)
                }
            }
        }
    }
}

fn render_items(items: &[ReturnItem], env: &mut CypherEnvironment) -> String {
    items
        .iter()
        .map(|item| item.render(env))
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_where(out: &mut String, predicate: Option<&Expr>, env: &mut CypherEnvironment, separator: &str) {
    if let Some(predicate) = predicate {
        let text = predicate.render(env);
        if !text.is_empty() {
            out.push_str(separator);
            out.push_str("WHERE ");
            out.push_str(&text);
        }
    }
}

/// An ordered list of clauses compiled into one statement.
#[derive(Debug, Clone, Default)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause.
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// The clauses so far.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Render every clause into its own fragment, sharing one environment.
    pub fn render_fragments(&self, env: &mut CypherEnvironment, separator: &str) -> Vec<CypherStatement> {
        self.clauses
            .iter()
            .map(|clause| {
                let mark = env.parameters().len();
                let text = clause.render(env, separator);
                CypherStatement::new(text).with_params(env.parameters().since(mark))
            })
            .collect()
    }

    /// Render and assemble into a [`CompiledStatement`].
    pub fn build(&self, config: &TranslateConfig) -> Result<CompiledStatement> {
        let mut env = CypherEnvironment::new();
        let fragments = self.render_fragments(&mut env, &config.clause_separator);
        Ok(join_statements(fragments, &config.clause_separator)?.into())
    }
}

impl Extend<Clause> for Query {
    fn extend<T: IntoIterator<Item = Clause>>(&mut self, iter: T) {
        self.clauses.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::pattern::NodePattern;
    use crate::cypher::variable::Param;
    use crate::cypher::CypherValue;

    fn this() -> Variable {
        Variable::named("this")
    }

    #[test]
    fn test_match_where_return() {
        let this = this();
        let mut query = Query::new();
        query.push(Clause::matching(
            Pattern::new(NodePattern::new(&this).with_labels(["Movie"])),
            Some(Expr::eq(
                Expr::property(&this, "title"),
                Expr::param(Param::derived(&this, "title", "Up")),
            )),
        ));
        query.push(Clause::returning(ReturnItem::variable(&this)));

        let compiled = query.build(&TranslateConfig::default()).unwrap();
        assert_eq!(
            compiled.cypher,
            "MATCH (this:Movie)\nWHERE this.title = $this_title\nRETURN this"
        );
        assert_eq!(compiled.params["this_title"], CypherValue::from("Up"));
    }

    #[test]
    fn test_empty_predicate_omits_where() {
        let this = this();
        let mut query = Query::new();
        query.push(Clause::matching(
            Pattern::new(NodePattern::new(&this)),
            Some(Expr::and(vec![])),
        ));
        query.push(Clause::Set(vec![]));
        query.push(Clause::DetachDelete(vec![this.clone()]));
        let compiled = query.build(&TranslateConfig::default()).unwrap();
        assert_eq!(compiled.cypher, "MATCH (this)\nDETACH DELETE this");
    }

    #[test]
    fn test_call_subquery_and_with() {
        let this = this();
        let count = Variable::value("this_actorsAggregate_count");
        let mut query = Query::new();
        query.push(Clause::matching(Pattern::new(NodePattern::new(&this)), None));
        query.push(Clause::Call {
            imports: vec![this.clone()],
            body: vec![Clause::returning(ReturnItem::aliased(
                Expr::function("count", vec![Expr::var(&this)]),
                &count,
            ))],
        });
        query.push(Clause::with_filter(Expr::compare(
            crate::cypher::ComparisonOp::Gt,
            Expr::var(&count),
            Expr::literal(1i64),
        )));

        let compiled = query.build(&TranslateConfig::default().single_line()).unwrap();
        assert_eq!(
            compiled.cypher,
            "MATCH (this) CALL { WITH this RETURN count(this) AS this_actorsAggregate_count } WITH * WHERE this_actorsAggregate_count > 1"
        );
    }

    #[test]
    fn test_with_ordering() {
        let this = this();
        let clause = Clause::With {
            items: WithItems::Items(vec![ReturnItem::variable(&this)]),
            distinct: false,
            order_by: vec![(Expr::property(&this, "title"), SortDirection::Desc)],
            skip: Some(Expr::param(Param::derived(&this, "offset", 5i64))),
            limit: Some(Expr::param(Param::derived(&this, "limit", 10i64))),
            predicate: None,
        };
        let mut env = CypherEnvironment::new();
        assert_eq!(
            clause.render(&mut env, " "),
            "WITH this ORDER BY this.title DESC SKIP $this_offset LIMIT $this_limit"
        );
    }

    #[test]
    fn test_alias_equal_to_expression_is_dropped() {
        let this = this();
        let mut env = CypherEnvironment::new();
        let item = ReturnItem::aliased(Expr::var(&this), &this);
        assert_eq!(Clause::returning(item).render(&mut env, "\n"), "RETURN this");
    }

    #[test]
    fn test_fragments_carry_their_own_params() {
        let this = this();
        let mut query = Query::new();
        query.push(Clause::matching(
            Pattern::new(NodePattern::new(&this)),
            Some(Expr::eq(
                Expr::property(&this, "a"),
                Expr::param(Param::derived(&this, "a", 1i64)),
            )),
        ));
        query.push(Clause::Set(vec![(
            Expr::property(&this, "b"),
            Expr::param(Param::derived(&this, "b", 2i64)),
        )]));
        let mut env = CypherEnvironment::new();
        let fragments = query.render_fragments(&mut env, "\n");
        assert_eq!(fragments[0].parameters.len(), 1);
        assert!(fragments[0].parameters.contains_key("this_a"));
        assert!(fragments[1].parameters.contains_key("this_b"));
    }

    #[test]
    fn test_unwind_merge_create() {
        let this = this();
        let item = Variable::value("item");
        let mut env = CypherEnvironment::new();
        let unwind = Clause::Unwind {
            expr: Expr::literal(vec![1i64, 2]),
            alias: item,
        };
        assert_eq!(unwind.render(&mut env, "\n"), "UNWIND [1, 2] AS item");
        let create = Clause::Create(Pattern::new(NodePattern::new(&this).with_labels(["Movie"])));
        assert_eq!(create.render(&mut env, "\n"), "CREATE (this:Movie)");
        let merge = Clause::Merge(Pattern::new(NodePattern::new(&this)));
        assert_eq!(merge.render(&mut env, "\n"), "MERGE (this)");
    }

    #[test]
    fn test_procedure_call() {
        let count = Variable::named_value("c");
        let mut env = CypherEnvironment::new();
        let validate = Clause::Procedure(Expr::function(
            "apoc.util.validate",
            vec![
                Expr::not(Expr::compare(
                    crate::cypher::ComparisonOp::Lte,
                    Expr::var(&count),
                    Expr::literal(1i64),
                )),
                Expr::literal("too many"),
                Expr::List(vec![Expr::literal(0i64)]),
            ],
        ));
        assert_eq!(
            validate.render(&mut env, "\n"),
            "CALL apoc.util.validate(NOT (c <= 1), 'too many', [0])"
        );
    }
}
