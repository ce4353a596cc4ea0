// SPDX-License-Identifier: PMPL-1.0-or-later

//! External fact providers.
//!
//! A provider extends the in-memory fact store: at fact-lookup time the
//! resolver asks each registered provider whether it handles the goal and,
//! if so, for its candidate facts. Candidates need not match the goal; the
//! resolver unifies them. Providers never see the binding environment.

use crate::clause::Fact;
use crate::parse::{self, ParseMode};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub trait StorageProvider {
    /// Whether this provider offers facts for the goal's predicate/shape.
    fn handles(&self, goal: &Fact) -> bool;

    /// Candidate facts for the goal, in a stable order.
    fn facts_for(&self, goal: &Fact) -> Vec<Fact>;
}

/// A provider backed by a fixed set of facts, keyed by predicate.
///
/// Useful for attaching a secondary fact file to a knowledge base without
/// merging it into the in-memory store.
#[derive(Debug, Default)]
pub struct FactSetProvider {
    facts: HashMap<String, Vec<Fact>>,
}

impl FactSetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a provider from a fact file: one `pred(args).` per line,
    /// `%` comments and blank lines skipped. Rules are not accepted here;
    /// providers serve facts only.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot open provider file {}", path.display()))?;
        let mut provider = Self::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('%') {
                continue;
            }
            anyhow::ensure!(
                !line.contains(":-"),
                "{}:{}: providers serve facts, not rules",
                path.display(),
                index + 1
            );
            let line = line.strip_suffix('.').unwrap_or(line);
            let fact = parse::parse_goal(line, ParseMode::Clause)
                .with_context(|| format!("{}:{}: '{}'", path.display(), index + 1, raw.trim()))?;
            provider.add(fact);
        }
        Ok(provider)
    }

    pub fn add(&mut self, fact: Fact) {
        self.facts.entry(fact.predicate.clone()).or_default().push(fact);
    }

    pub fn len(&self) -> usize {
        self.facts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl StorageProvider for FactSetProvider {
    fn handles(&self, goal: &Fact) -> bool {
        self.facts.contains_key(&goal.predicate)
    }

    fn facts_for(&self, goal: &Fact) -> Vec<Fact> {
        self.facts.get(&goal.predicate).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    #[test]
    fn test_handles_only_known_predicates() {
        let mut provider = FactSetProvider::new();
        provider.add(Fact::new("city", vec![Term::atom("oslo")]));
        assert!(provider.handles(&Fact::new("city", vec![Term::var("X")])));
        assert!(!provider.handles(&Fact::new("country", vec![Term::var("X")])));
    }

    #[test]
    fn test_facts_for_preserves_insertion_order() {
        let mut provider = FactSetProvider::new();
        provider.add(Fact::new("city", vec![Term::atom("oslo")]));
        provider.add(Fact::new("city", vec![Term::atom("bergen")]));
        let goal = Fact::new("city", vec![Term::var("X")]);
        let names: Vec<String> = provider
            .facts_for(&goal)
            .into_iter()
            .map(|f| f.args[0].to_string())
            .collect();
        assert_eq!(names, vec!["oslo", "bergen"]);
    }
}
