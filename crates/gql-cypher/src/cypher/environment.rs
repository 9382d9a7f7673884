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

//! Name allocation for one compilation.

use super::escape::to_identifier;
use super::value::CypherValue;
use super::variable::{Param, ParamName, Variable, VariableName};
use std::collections::{BTreeMap, HashSet};

/// Parameter names and values of one statement.
///
/// A base name that is free is taken as-is. A base name already bound to an
/// equal value is reused. Otherwise `base_1`, `base_2`, ... are tried in
/// order, so `{OR: [{title: "a"}, {title: "b"}]}` yields `this_title` and
/// `this_title_1`.
#[derive(Debug, Default, Clone)]
pub struct ParameterStore {
    values: BTreeMap<String, CypherValue>,
    order: Vec<String>,
}

impl ParameterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` under a name derived from `base`; returns the name.
    pub fn add(&mut self, base: &str, value: CypherValue) -> String {
        let base = to_identifier(base);
        let mut candidate = base.clone();
        let mut suffix = 0usize;
        loop {
            match self.values.get(&candidate) {
                None => {
                    self.values.insert(candidate.clone(), value);
                    self.order.push(candidate.clone());
                    return candidate;
                }
                Some(existing) if *existing == value => return candidate,
                Some(_) => {
                    suffix += 1;
                    candidate = format!("{}_{}", base, suffix);
                }
            }
        }
    }

    /// Look up a bound value.
    pub fn get(&self, name: &str) -> Option<&CypherValue> {
        self.values.get(name)
    }

    /// Number of distinct names bound.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Names bound after the first `mark` names, with their values.
    pub fn since(&self, mark: usize) -> BTreeMap<String, CypherValue> {
        self.order
            .iter()
            .skip(mark)
            .filter_map(|name| self.values.get(name).map(|v| (name.clone(), v.clone())))
            .collect()
    }

    /// Every binding.
    pub fn into_map(self) -> BTreeMap<String, CypherValue> {
        self.values
    }
}

/// Assigns concrete names to variables and parameters during rendering.
///
/// One environment is shared by every clause of a statement; a variable
/// rendered twice gets the same name both times.
#[derive(Debug, Default)]
pub struct CypherEnvironment {
    variables: Vec<(Variable, String)>,
    taken: HashSet<String>,
    params: Vec<(Param, String)>,
    store: ParameterStore,
}

impl CypherEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// The name of `variable`, allocating one on first use.
    pub fn variable_name(&mut self, variable: &Variable) -> String {
        if let Some((_, name)) = self.variables.iter().find(|(v, _)| v.same(variable)) {
            return name.clone();
        }

        let name = match variable.name() {
            VariableName::Fixed(name) => name.clone(),
            VariableName::Hinted(hint) => {
                let mut candidate = hint.clone();
                let mut suffix = 0usize;
                while self.taken.contains(&candidate) {
                    suffix += 1;
                    candidate = format!("{}_{}", hint, suffix);
                }
                candidate
            }
        };

        self.taken.insert(name.clone());
        self.variables.push((variable.clone(), name.clone()));
        name
    }

    /// Keep `name` away from hinted variables.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    /// The name of `param`, binding its value on first use.
    pub fn param_name(&mut self, param: &Param) -> String {
        if let Some((_, name)) = self.params.iter().find(|(p, _)| p.same(param)) {
            return name.clone();
        }

        let base = match param.name() {
            ParamName::Derived { variable, suffix } => {
                format!("{}_{}", self.variable_name(variable), suffix)
            }
            ParamName::Named(name) => name.clone(),
        };
        let name = self.store.add(&base, param.value().clone());
        self.params.push((param.clone(), name.clone()));
        name
    }

    /// The parameters bound so far.
    pub fn parameters(&self) -> &ParameterStore {
        &self.store
    }

    /// Consume the environment, returning its parameter map.
    pub fn into_parameters(self) -> BTreeMap<String, CypherValue> {
        self.store.into_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_suffixes_distinct_values() {
        let mut store = ParameterStore::new();
        assert_eq!(store.add("this_title", "a".into()), "this_title");
        assert_eq!(store.add("this_title", "b".into()), "this_title_1");
        assert_eq!(store.add("this_title", "c".into()), "this_title_2");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_store_reuses_equal_values() {
        let mut store = ParameterStore::new();
        assert_eq!(store.add("p", 1i64.into()), "p");
        assert_eq!(store.add("p", 1i64.into()), "p");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_since_mark() {
        let mut store = ParameterStore::new();
        store.add("a", 1i64.into());
        let mark = store.len();
        store.add("b", 2i64.into());
        let recent = store.since(mark);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent["b"], CypherValue::Int(2));
    }

    #[test]
    fn test_variable_names_are_stable_and_unique() {
        let mut env = CypherEnvironment::new();
        let root = Variable::named("this");
        let a = root.child("actors");
        let b = root.child("actors");

        assert_eq!(env.variable_name(&root), "this");
        assert_eq!(env.variable_name(&a), "this_actors");
        assert_eq!(env.variable_name(&b), "this_actors_1");
        assert_eq!(env.variable_name(&a), "this_actors");
    }

    #[test]
    fn test_reserved_names_are_skipped() {
        let mut env = CypherEnvironment::new();
        env.reserve("edges");
        assert_eq!(env.variable_name(&Variable::value("edges")), "edges_1");
    }

    #[test]
    fn test_param_names_derive_from_variable() {
        let mut env = CypherEnvironment::new();
        let root = Variable::named("this");
        let p = Param::derived(&root, "duration_GTE", "P1D");
        assert_eq!(env.param_name(&p), "this_duration_GTE");
        assert_eq!(env.param_name(&p), "this_duration_GTE");

        let q = Param::derived(&root, "duration_GTE", "P2D");
        assert_eq!(env.param_name(&q), "this_duration_GTE_1");

        let params = env.into_parameters();
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_param_follows_suffixed_variable() {
        let mut env = CypherEnvironment::new();
        let root = Variable::named("this");
        let first = root.child("genres");
        let second = root.child("genres");
        env.variable_name(&first);
        let p = Param::derived(&second, "name", "Comedy");
        assert_eq!(env.param_name(&p), "this_genres_1_name");
    }
}
