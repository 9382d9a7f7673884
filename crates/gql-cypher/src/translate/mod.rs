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

//! GraphQL operations to Cypher.
//!
//! Filters compile through [`create_where_predicate`], selections through
//! map projections, and whole operations through [`translate_read`] and
//! the mutation translators. All of them take a [`TranslationContext`].

mod aggregate;
mod context;
mod mutation;
mod projection;
mod property;
mod read;
mod relationship;
mod request;
mod resolve_tree;
mod values;
mod where_key;
mod where_predicate;

pub use context::TranslationContext;
pub use mutation::{translate_connect, translate_create, translate_delete, translate_update, ConnectInput};
pub use read::translate_read;
pub use relationship::create_connection_where;
pub use request::TranslateRequest;
pub use resolve_tree::{ResolveArgs, ResolveTree};
pub use values::serialize_value;
pub use where_key::{parse_where_key, WhereKey, WhereOperator, WHERE_KEY_PATTERN};
pub use where_predicate::{create_where_predicate, WherePredicate};

use crate::cypher::{join_statements, CompiledStatement, CypherEnvironment, CypherStatement, Query};
use crate::error::Result;
use serde_json::{Map, Value};

/// Compile a standalone filter over `type_name`, rooted at the configured
/// root variable.
///
/// The output is the counting subqueries (if any) followed by the bare
/// predicate text, without a `WHERE` keyword.
///
/// ```
/// # use gql_cypher::{Schema, TranslateConfig};
/// # use gql_cypher::schema::{AttributeField, Node, ScalarKind};
/// # use gql_cypher::translate::{compile_filter, TranslationContext};
/// # use serde_json::json;
/// let schema = Schema::new()
///     .with_node(Node::new("Movie").with_attribute(AttributeField::primitive("title", ScalarKind::String)));
/// let config = TranslateConfig::default();
/// let ctx = TranslationContext::new(&schema, &config);
///
/// let filter = json!({"title_NOT": "Up"});
/// let statement = compile_filter(&ctx, "Movie", filter.as_object().unwrap()).unwrap();
/// assert_eq!(statement.cypher, "NOT (this.title = $this_title_NOT)");
/// ```
pub fn compile_filter(
    ctx: &TranslationContext<'_>,
    type_name: &str,
    input: &Map<String, Value>,
) -> Result<CompiledStatement> {
    let node = ctx.schema.require_node(type_name)?;
    let this = ctx.root_variable();
    let compiled = create_where_predicate(ctx, &this, node, input)?;

    let separator = ctx.config.clause_separator.as_str();
    let mut env = CypherEnvironment::new();
    let mut subqueries = Query::new();
    subqueries.extend(compiled.subqueries);
    let mut fragments = subqueries.render_fragments(&mut env, separator);
    if let Some(predicate) = compiled.predicate {
        let mark = env.parameters().len();
        let text = predicate.render(&mut env);
        fragments.push(CypherStatement::new(text).with_params(env.parameters().since(mark)));
    }
    Ok(join_statements(fragments, separator)?.into())
}
