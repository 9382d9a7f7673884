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

//! Variables and parameters.
//!
//! Both are handles: identity is the allocation, not the name. Concrete
//! names are assigned by a [`CypherEnvironment`](super::CypherEnvironment)
//! when the handle is first rendered, so two handles built from the same
//! hint still end up with distinct names.

use super::escape::to_identifier;
use super::value::CypherValue;
use std::fmt;
use std::rc::Rc;

/// What a variable is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// A node.
    Node,
    /// A relationship.
    Relationship,
    /// Any other value (counts, collected lists, map results).
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum VariableName {
    /// Rendered verbatim.
    Fixed(String),
    /// Rendered as the hint, or the hint with a numeric suffix if taken.
    Hinted(String),
}

#[derive(Debug)]
struct VariableData {
    name: VariableName,
    kind: VariableKind,
}

/// A Cypher variable handle.
#[derive(Clone)]
pub struct Variable(Rc<VariableData>);

impl Variable {
    /// A node variable rendered with exactly this name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(VariableName::Fixed(name.into()), VariableKind::Node)
    }

    /// A node variable named after `hint`, suffixed on conflict.
    pub fn node(hint: impl AsRef<str>) -> Self {
        Self::new(VariableName::Hinted(to_identifier(hint.as_ref())), VariableKind::Node)
    }

    /// A relationship variable named after `hint`.
    pub fn relationship(hint: impl AsRef<str>) -> Self {
        Self::new(
            VariableName::Hinted(to_identifier(hint.as_ref())),
            VariableKind::Relationship,
        )
    }

    /// A value variable named after `hint`.
    pub fn value(hint: impl AsRef<str>) -> Self {
        Self::new(VariableName::Hinted(to_identifier(hint.as_ref())), VariableKind::Value)
    }

    /// A value variable rendered with exactly this name.
    pub fn named_value(name: impl Into<String>) -> Self {
        Self::new(VariableName::Fixed(name.into()), VariableKind::Value)
    }

    fn new(name: VariableName, kind: VariableKind) -> Self {
        Variable(Rc::new(VariableData { name, kind }))
    }

    /// The requested name (the rendered name may carry a suffix).
    pub fn hint(&self) -> &str {
        match &self.0.name {
            VariableName::Fixed(name) | VariableName::Hinted(name) => name,
        }
    }

    pub(crate) fn name(&self) -> &VariableName {
        &self.0.name
    }

    /// What this variable is bound to.
    pub fn kind(&self) -> VariableKind {
        self.0.kind
    }

    /// A node variable hinted `{hint}_{suffix}`.
    pub fn child(&self, suffix: &str) -> Variable {
        Variable::node(format!("{}_{}", self.hint(), suffix))
    }

    /// A relationship variable hinted `{hint}_{suffix}`.
    pub fn child_relationship(&self, suffix: &str) -> Variable {
        Variable::relationship(format!("{}_{}", self.hint(), suffix))
    }

    /// True if both handles are the same variable.
    pub fn same(&self, other: &Variable) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({:?}, {:?})", self.0.name, self.0.kind)
    }
}

#[derive(Debug)]
pub(crate) enum ParamName {
    /// `{rendered variable name}_{suffix}`.
    Derived { variable: Variable, suffix: String },
    /// Used as the base name directly.
    Named(String),
}

#[derive(Debug)]
struct ParamData {
    name: ParamName,
    value: CypherValue,
}

/// A parameter handle carrying its value.
#[derive(Clone)]
pub struct Param(Rc<ParamData>);

impl Param {
    /// A parameter whose base name derives from a variable, e.g. `this_title`.
    pub fn derived(variable: &Variable, suffix: impl AsRef<str>, value: impl Into<CypherValue>) -> Self {
        Param(Rc::new(ParamData {
            name: ParamName::Derived {
                variable: variable.clone(),
                suffix: to_identifier(suffix.as_ref()),
            },
            value: value.into(),
        }))
    }

    /// A parameter with an explicit base name.
    pub fn named(name: impl AsRef<str>, value: impl Into<CypherValue>) -> Self {
        Param(Rc::new(ParamData {
            name: ParamName::Named(to_identifier(name.as_ref())),
            value: value.into(),
        }))
    }

    /// The bound value.
    pub fn value(&self) -> &CypherValue {
        &self.0.value
    }

    pub(crate) fn name(&self) -> &ParamName {
        &self.0.name
    }

    /// True if both handles are the same parameter.
    pub fn same(&self, other: &Param) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Param({:?} = {:?})", self.0.name, self.0.value)
    }
}
