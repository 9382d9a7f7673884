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

//! Compile GraphQL operations over an annotated schema into parameterized
//! Cypher.
//!
//! The pipeline has three layers:
//!
//! - [`schema`] turns pre-parsed type definitions and their directives
//!   (`@relationship`, `@alias`, `@coalesce`, `@node`) into immutable
//!   [`Node`](schema::Node) descriptors.
//! - [`cypher`] is an expression/clause IR rendered against one
//!   environment that names variables and parameters on first use.
//! - [`translate`] compiles `where` filters, selections and whole
//!   read/mutation operations into that IR.
//!
//! # Example
//!
//! ```
//! use gql_cypher::{Schema, TranslateConfig};
//! use gql_cypher::schema::{AttributeField, Node, ScalarKind};
//! use gql_cypher::translate::{translate_read, ResolveTree, TranslationContext};
//! use serde_json::json;
//!
//! let schema = Schema::new().with_node(
//!     Node::new("Movie")
//!         .with_attribute(AttributeField::primitive("title", ScalarKind::String))
//!         .with_attribute(AttributeField::primitive("released", ScalarKind::Int)),
//! );
//! let config = TranslateConfig::default().with_native_integers();
//! let ctx = TranslationContext::new(&schema, &config);
//!
//! let tree = ResolveTree::new("movies")
//!     .with_where(json!({"released_GTE": 1999, "title_NOT_CONTAINS": "II"}))
//!     .with_fields(["title"]);
//! let statement = translate_read(&ctx, "Movie", &tree).unwrap();
//!
//! assert_eq!(
//!     statement.cypher,
//!     "MATCH (this:Movie)\n\
//!      WHERE (this.released >= $this_released_GTE AND NOT (this.title CONTAINS $this_title_NOT_CONTAINS))\n\
//!      RETURN this { .title } AS this"
//! );
//! assert_eq!(
//!     statement.params_json(),
//!     json!({"this_released_GTE": 1999, "this_title_NOT_CONTAINS": "II"})
//! );
//! ```
//!
//! # Security
//!
//! Every filter value travels as a parameter; only identifiers, labels and
//! relationship types are written into the query text, and those are
//! escaped. [`TranslateConfig::for_untrusted_input`] additionally disables
//! regex filters and tightens the depth and string limits.

#![deny(missing_docs)]

pub mod auth;
pub mod config;
pub mod cypher;
pub mod error;
pub mod schema;
pub mod translate;

pub use auth::{AllowAll, AuthOperation, AuthorizationProvider};
pub use config::{IntegerEncoding, TranslateConfig, TranslateConfigBuilder};
pub use cypher::CompiledStatement;
pub use error::{ErrorCategory, Result, TranslateError};
pub use schema::Schema;
