// SPDX-License-Identifier: PMPL-1.0-or-later

//! Facts and Horn-clause rules.

use crate::term::{Bindings, Term};
use std::fmt;

/// A predicate applied to argument terms, asserted true or treated as a
/// goal to prove.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact {
    pub predicate: String,
    pub args: Vec<Term>,
}

impl Fact {
    pub fn new(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            predicate: predicate.into(),
            args,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    /// Variable names across all arguments, first-occurrence order.
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        for arg in &self.args {
            arg.collect_variables(&mut vars);
        }
        vars
    }

    /// A copy with every reachable binding applied.
    pub fn resolve(&self, env: &Bindings) -> Fact {
        Fact {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|arg| env.resolve(arg)).collect(),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.predicate)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// A Horn clause: `head :- body1, body2, ...`.
///
/// Bodiless clauses are stored as facts, never as rules, so a valid rule
/// always has at least one body goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub head: Fact,
    pub body: Vec<Fact>,
}

impl Rule {
    pub fn new(head: Fact, body: Vec<Fact>) -> Self {
        Self { head, body }
    }

    pub fn is_valid(&self) -> bool {
        !self.head.predicate.is_empty() && !self.body.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :- ", self.head)?;
        for (i, goal) in self.body.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", goal)?;
        }
        write!(f, ".")
    }
}
