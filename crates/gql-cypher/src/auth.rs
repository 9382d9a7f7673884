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

//! Authorization hook.
//!
//! Rule evaluation lives outside this crate. The translators only ask a
//! provider for an extra predicate and AND it into the root `WHERE`.

use crate::cypher::{Expr, Variable};
use crate::error::Result;
use crate::schema::Node;
use std::fmt;

/// The operation a predicate is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthOperation {
    /// Reading nodes.
    Read,
    /// Updating matched nodes.
    Update,
    /// Deleting matched nodes.
    Delete,
    /// Connecting matched nodes.
    Connect,
}

impl fmt::Display for AuthOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthOperation::Read => "READ",
            AuthOperation::Update => "UPDATE",
            AuthOperation::Delete => "DELETE",
            AuthOperation::Connect => "CONNECT",
        };
        f.write_str(name)
    }
}

/// Produces an extra filter for nodes an operation touches.
///
/// Returning `Ok(None)` adds nothing. Returning an error rejects the
/// whole operation.
pub trait AuthorizationProvider {
    /// Predicate over `variable`, which is bound to a `node`.
    fn predicate(&self, node: &Node, variable: &Variable, operation: AuthOperation) -> Result<Option<Expr>>;
}

/// Adds no predicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AuthorizationProvider for AllowAll {
    fn predicate(&self, _node: &Node, _variable: &Variable, _operation: AuthOperation) -> Result<Option<Expr>> {
        Ok(None)
    }
}

impl<F> AuthorizationProvider for F
where
    F: Fn(&Node, &Variable, AuthOperation) -> Result<Option<Expr>>,
{
    fn predicate(&self, node: &Node, variable: &Variable, operation: AuthOperation) -> Result<Option<Expr>> {
        self(node, variable, operation)
    }
}
