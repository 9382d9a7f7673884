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

//! Error types for GraphQL to Cypher translation.

use thiserror::Error;

/// Broad classification of a [`TranslateError`].
///
/// None of these are retried: every error is a deterministic function of the
/// schema and the operation being compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed directives or unresolvable type references in the schema.
    SchemaContract,
    /// A filter key or operator outside the recognized grammar.
    FilterGrammar,
    /// One parameter name bound to two different values in a statement.
    ParameterCollision,
    /// Any other rejected input (bad values, limits, unsupported selections).
    Input,
}

/// Error type for translation operations.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// A required directive argument is absent.
    #[error("@{directive} {argument} required")]
    MissingDirectiveArgument {
        /// Directive name, without the `@`.
        directive: String,
        /// Argument name.
        argument: String,
    },

    /// A directive argument has the wrong literal kind.
    #[error("@{directive} {argument} not a {expected}")]
    InvalidDirectiveArgument {
        /// Directive name, without the `@`.
        directive: String,
        /// Argument name.
        argument: String,
        /// Expected literal kind.
        expected: &'static str,
    },

    /// A directive enum argument has a value outside its allowed set.
    #[error("@{directive} {argument} invalid: '{value}'")]
    InvalidDirectiveValue {
        /// Directive name, without the `@`.
        directive: String,
        /// Argument name.
        argument: String,
        /// The rejected value.
        value: String,
    },

    /// A type definition references a type the schema does not declare.
    #[error("unknown type '{type_name}' referenced by {context}")]
    UnknownType {
        /// The unresolved type name.
        type_name: String,
        /// Where the reference appeared (e.g. `Movie.actors`).
        context: String,
    },

    /// A relationship filter points at a type that is not a node.
    #[error("Relationship filters must reference nodes (field '{field}' targets '{target}')")]
    RelationshipTargetNotNode {
        /// The relationship field name.
        field: String,
        /// The target type name.
        target: String,
    },

    /// A field typed as a node or interface without `@relationship`.
    #[error("field '{field}' references type '{target}' without @relationship")]
    MissingRelationshipDirective {
        /// The field, as `Type.field`.
        field: String,
        /// The referenced type.
        target: String,
    },

    /// No node descriptor exists with this name.
    #[error("unknown node type '{0}'")]
    UnknownNode(String),

    /// A filter or selection names a field the type does not have.
    #[error("unknown field '{field}' on type '{type_name}'")]
    UnknownField {
        /// The owning type.
        type_name: String,
        /// The missing field.
        field: String,
    },

    /// A where key does not match the key grammar at all.
    #[error("invalid where key '{0}'")]
    InvalidWhereKey(String),

    /// An operator suffix outside the recognized table.
    #[error("Invalid operator {0}")]
    InvalidOperator(String),

    /// A recognized operator used on a field kind that does not support it.
    #[error("operator {operator} cannot be applied to field '{field}' of kind {kind}")]
    OperatorNotApplicable {
        /// The operator suffix.
        operator: String,
        /// The field name.
        field: String,
        /// Human-readable field kind.
        kind: String,
    },

    /// A filter value has the wrong shape for its key.
    #[error("invalid filter value for '{key}': expected {expected}")]
    InvalidFilterValue {
        /// The filter key.
        key: String,
        /// What the compiler expected.
        expected: &'static str,
    },

    /// A `MATCHES` filter while regex filters are disabled.
    #[error("regex filters are disabled (key '{0}')")]
    RegexDisabled(String),

    /// Filter nesting deeper than the configured limit.
    #[error("filter depth {depth} exceeds maximum allowed depth {max_depth}")]
    FilterDepthExceeded {
        /// Depth reached.
        depth: usize,
        /// Configured maximum.
        max_depth: usize,
    },

    /// String length limit exceeded.
    #[error("String length {length} exceeds maximum allowed length {max_length} for property '{property}'")]
    StringLengthExceeded {
        /// Actual length of the string.
        length: usize,
        /// Maximum allowed length.
        max_length: usize,
        /// Property name where the violation occurred.
        property: String,
    },

    /// A temporal value that does not parse for its kind.
    #[error("invalid {kind} value '{value}'")]
    InvalidTemporal {
        /// Temporal kind (e.g. `Duration`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A point value with missing or non-numeric coordinates.
    #[error("invalid point value: {0}")]
    InvalidPoint(String),

    /// Two different values bound to the same parameter name.
    #[error("parameter '${name}' bound to two different values")]
    ParameterCollision {
        /// The contested parameter name.
        name: String,
    },

    /// A mutation sets a non-null (`T!`) field to null.
    #[error("Cannot set non-nullable field {type_name}.{field} to null")]
    NonNullableField {
        /// Owning type.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// A singular relationship field would link more than one node.
    ///
    /// Connect statements embed this message in a cardinality guard, so the
    /// database raises it when the guard fails.
    #[error("Relationship field \"{type_name}.{field}\" cannot have more than one node linked")]
    RelationshipCardinality {
        /// Owning type.
        type_name: String,
        /// Relationship field name.
        field: String,
    },

    /// Input the translator deliberately does not handle.
    #[error("unsupported input: {0}")]
    Unsupported(String),

    /// Serialization error from serde_json.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslateError {
    /// Map this error onto the coarse error taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslateError::MissingDirectiveArgument { .. }
            | TranslateError::InvalidDirectiveArgument { .. }
            | TranslateError::InvalidDirectiveValue { .. }
            | TranslateError::UnknownType { .. }
            | TranslateError::MissingRelationshipDirective { .. }
            | TranslateError::RelationshipTargetNotNode { .. } => ErrorCategory::SchemaContract,
            TranslateError::InvalidWhereKey(_)
            | TranslateError::InvalidOperator(_)
            | TranslateError::OperatorNotApplicable { .. } => ErrorCategory::FilterGrammar,
            TranslateError::ParameterCollision { .. } => ErrorCategory::ParameterCollision,
            _ => ErrorCategory::Input,
        }
    }

    pub(crate) fn missing_argument(directive: &str, argument: &str) -> Self {
        TranslateError::MissingDirectiveArgument {
            directive: directive.to_string(),
            argument: argument.to_string(),
        }
    }

    pub(crate) fn invalid_argument(directive: &str, argument: &str, expected: &'static str) -> Self {
        TranslateError::InvalidDirectiveArgument {
            directive: directive.to_string(),
            argument: argument.to_string(),
            expected,
        }
    }

    pub(crate) fn invalid_value(key: &str, expected: &'static str) -> Self {
        TranslateError::InvalidFilterValue {
            key: key.to_string(),
            expected,
        }
    }
}

/// Result type alias for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;
