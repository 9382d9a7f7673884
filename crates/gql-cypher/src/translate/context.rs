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

//! Per-compilation context.

use crate::auth::{AllowAll, AuthOperation, AuthorizationProvider};
use crate::config::{IntegerEncoding, TranslateConfig};
use crate::cypher::{CypherValue, Expr, Integer, Variable};
use crate::error::{Result, TranslateError};
use crate::schema::{Node, Schema};

static ALLOW_ALL: AllowAll = AllowAll;

/// Everything a translation reads but never mutates.
///
/// Cheap to copy; one context can serve any number of compilations,
/// including concurrent ones on other threads with their own context.
#[derive(Clone, Copy)]
pub struct TranslationContext<'a> {
    /// Node lookup table.
    pub schema: &'a Schema,
    /// Translation options.
    pub config: &'a TranslateConfig,
    /// Authorization predicate source.
    pub auth: &'a dyn AuthorizationProvider,
}

impl<'a> TranslationContext<'a> {
    /// Context with no authorization predicates.
    pub fn new(schema: &'a Schema, config: &'a TranslateConfig) -> Self {
        Self {
            schema,
            config,
            auth: &ALLOW_ALL,
        }
    }

    /// Replace the authorization provider.
    pub fn with_auth(mut self, auth: &'a dyn AuthorizationProvider) -> Self {
        self.auth = auth;
        self
    }

    /// The root variable of a statement.
    pub fn root_variable(&self) -> Variable {
        Variable::named(self.config.root_variable.clone())
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<()> {
        match self.config.max_filter_depth {
            Some(max_depth) if depth > max_depth => Err(TranslateError::FilterDepthExceeded { depth, max_depth }),
            _ => Ok(()),
        }
    }

    pub(crate) fn encode_integer(&self, value: i64) -> CypherValue {
        match self.config.integer_encoding {
            IntegerEncoding::LowHigh => CypherValue::Integer(Integer::from_i64(value)),
            IntegerEncoding::Native => CypherValue::Int(value),
        }
    }

    pub(crate) fn auth_predicate(
        &self,
        node: &Node,
        variable: &Variable,
        operation: AuthOperation,
    ) -> Result<Option<Expr>> {
        let predicate = self.auth.predicate(node, variable, operation)?;
        if predicate.is_some() {
            tracing::trace!(node = %node.name, %operation, "authorization predicate added");
        }
        Ok(predicate)
    }
}

impl std::fmt::Debug for TranslationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationContext")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
