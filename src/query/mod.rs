// SPDX-License-Identifier: PMPL-1.0-or-later

//! Query façade: parse query text, run the resolver, and project the
//! resulting environments onto the variables of the original query.

use crate::kb::KnowledgeBase;
use crate::parse::{self, ParseMode};
use crate::solve::Solver;
use crate::term::Term;
use anyhow::Result;
use std::fmt;

pub mod transport;

pub use transport::{OutputFormat, QueryResult};

/// One answer: the query's variables bound to fully resolved terms, in
/// the order the variables appear in the query text. A variable left
/// unbound by the proof is omitted; a ground provable query yields one
/// empty solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    bindings: Vec<(String, Term)>,
}

impl Solution {
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(name, _)| name == var)
            .map(|(_, term)| term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.bindings.iter().map(|(name, term)| (name.as_str(), term))
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, term)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "?{} = {}", name, term)?;
        }
        write!(f, "}}")
    }
}

/// Run a query against the knowledge base.
///
/// Ill-formed query text is an error; a well-formed but unprovable query
/// is the empty list.
pub fn query(kb: &KnowledgeBase, text: &str) -> Result<Vec<Solution>> {
    let goal = parse::parse_goal(text, ParseMode::Query)?;
    let query_vars = goal.variables();

    let mut solver = Solver::new(kb);
    let envs = solver.solve(&goal);

    let mut solutions = Vec::with_capacity(envs.len());
    for env in envs {
        let mut bindings = Vec::new();
        for var in &query_vars {
            let resolved = env.resolve(&Term::Var(var.clone()));
            let bound = match &resolved {
                Term::Var(name) => name != var,
                _ => true,
            };
            if bound {
                bindings.push((var.clone(), resolved));
            }
        }
        solutions.push(Solution { bindings });
    }
    Ok(solutions)
}

/// Run a query and package the outcome for transport; never fails.
pub fn query_result(kb: &KnowledgeBase, text: &str) -> QueryResult {
    match query(kb, text) {
        Ok(solutions) => QueryResult::from_solutions(&solutions),
        Err(err) => QueryResult::from_error(format!("{:#}", err)),
    }
}
