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

//! Cypher query building.
//!
//! The IR ([`Expr`], [`Pattern`], [`Clause`]) is assembled by the
//! translators and rendered once, against a single [`CypherEnvironment`]
//! that allocates variable and parameter names in first-use order.

pub mod clause;
pub mod environment;
pub mod escape;
pub mod expr;
pub mod pattern;
pub mod scalar;
pub mod statements;
pub mod value;
pub mod variable;

pub use clause::{Clause, Query, ReturnItem, SortDirection, WithItems};
pub use environment::{CypherEnvironment, ParameterStore};
pub use escape::{
    escape_identifier, escape_label, escape_relationship_type, escape_string, is_valid_identifier,
    normalize_unicode, quote_string, to_identifier, validate_string_length,
};
pub use expr::{ComparisonOp, Expr, ProjectionItem, Quantifier};
pub use pattern::{
    build_node_statement, build_relationship_statement, Direction, NodePattern, NodeRef, Pattern,
    RelationshipPattern, RelationshipRef,
};
pub use scalar::{Integer, Point, PointKind, Temporal, TemporalKind};
pub use statements::{join_statements, CompiledStatement, CypherStatement};
pub use value::CypherValue;
pub use variable::{Param, Variable, VariableKind};
