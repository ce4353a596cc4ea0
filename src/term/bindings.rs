// SPDX-License-Identifier: PMPL-1.0-or-later

//! Binding environments threaded through unification and resolution.
//!
//! An environment is a finite map from variable name to term. Environments
//! are value-like: extension clones, and an environment already handed to
//! a caller is never mutated afterwards.

use crate::term::Term;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    map: HashMap<String, Term>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Bind a variable. The occurs check in the unifier keeps the map
    /// acyclic, so `walk` always terminates.
    pub fn bind(&mut self, name: impl Into<String>, term: Term) {
        self.map.insert(name.into(), term);
    }

    pub fn get(&self, name: &str) -> Option<&Term> {
        self.map.get(name)
    }

    /// Follow variable bindings chainwise to the first non-variable or
    /// unbound variable. This is one-step resolution, not substitution.
    pub fn walk<'a>(&'a self, mut term: &'a Term) -> &'a Term {
        while let Term::Var(name) = term {
            match self.map.get(name) {
                Some(next) => term = next,
                None => break,
            }
        }
        term
    }

    /// Apply every reachable binding, producing a fully substituted term.
    pub fn resolve(&self, term: &Term) -> Term {
        match self.walk(term) {
            Term::Var(name) => Term::Var(name.clone()),
            Term::Atom(name) => Term::Atom(name.clone()),
            Term::Number(text) => Term::Number(text.clone()),
            Term::Compound(functor, args) => Term::Compound(
                functor.clone(),
                args.iter().map(|arg| self.resolve(arg)).collect(),
            ),
            Term::Nil => Term::Nil,
            Term::Cons(head, tail) => Term::Cons(
                Box::new(self.resolve(head)),
                Box::new(self.resolve(tail)),
            ),
        }
    }
}
