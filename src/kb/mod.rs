// SPDX-License-Identifier: PMPL-1.0-or-later

//! The knowledge base: per-predicate fact lists, a global rule list,
//! external providers, and the clause-file loader.
//!
//! Both stores are append-only; clauses are never modified or removed
//! once added. The store is read-only during a query — an outer wrapper
//! that mixes writes and reads must serialize them.

use crate::clause::{Fact, Rule};
use crate::parse::{self, ParseMode};
use crate::storage::StorageProvider;
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A parsed clause-file line.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Fact(Fact),
    Rule(Rule),
}

/// Counts reported by the loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub facts: usize,
    pub rules: usize,
}

#[derive(Default)]
pub struct KnowledgeBase {
    facts: HashMap<String, Vec<Fact>>,
    predicates: Vec<String>,
    rules: Vec<Rule>,
    providers: Vec<Box<dyn StorageProvider>>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fact. Declines a fact with an empty predicate; this is a
    /// reportable condition, not a fatal one.
    pub fn add_fact(&mut self, fact: Fact) -> Result<()> {
        if fact.predicate.is_empty() {
            bail!("declining fact with empty predicate");
        }
        if !self.facts.contains_key(&fact.predicate) {
            self.predicates.push(fact.predicate.clone());
        }
        self.facts.entry(fact.predicate.clone()).or_default().push(fact);
        Ok(())
    }

    /// Append a rule. Declines a rule with an empty head predicate or an
    /// empty body.
    pub fn add_rule(&mut self, rule: Rule) -> Result<()> {
        if !rule.is_valid() {
            bail!("declining invalid rule: {}", rule);
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn add_provider(&mut self, provider: Box<dyn StorageProvider>) {
        self.providers.push(provider);
    }

    /// In-memory facts for a predicate, insertion order.
    pub fn facts_for(&self, predicate: &str) -> &[Fact] {
        self.facts.get(predicate).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Candidate facts for a goal: in-memory facts first, then each
    /// handling provider's facts in registration order.
    pub fn candidate_facts(&self, goal: &Fact) -> Vec<Fact> {
        let mut candidates: Vec<Fact> = self.facts_for(&goal.predicate).to_vec();
        for provider in &self.providers {
            if provider.handles(goal) {
                candidates.extend(provider.facts_for(goal));
            }
        }
        candidates
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Predicates with in-memory facts, in first-assertion order.
    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn fact_count(&self) -> usize {
        self.facts.values().map(Vec::len).sum()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Load clauses from a text file, one per line.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadStats> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot open clause file {}", path.display()))?;
        self.load_str(&text)
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Load clauses from text. Lines whose first non-whitespace character
    /// is `%` are comments; blank lines are skipped; a trailing `.` is
    /// stripped before parsing.
    pub fn load_str(&mut self, text: &str) -> Result<LoadStats> {
        let mut stats = LoadStats::default();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('%') {
                continue;
            }
            let clause =
                parse_clause(line).with_context(|| format!("line {}: '{}'", index + 1, line))?;
            match clause {
                Clause::Fact(fact) => {
                    self.add_fact(fact)
                        .with_context(|| format!("line {}", index + 1))?;
                    stats.facts += 1;
                }
                Clause::Rule(rule) => {
                    self.add_rule(rule)
                        .with_context(|| format!("line {}", index + 1))?;
                    stats.rules += 1;
                }
            }
        }
        Ok(stats)
    }
}

/// Parse one clause line (trailing `.` optional) in clause mode. A line
/// containing `:-` is a rule; anything else is a fact.
pub fn parse_clause(line: &str) -> Result<Clause> {
    let line = line.trim();
    let line = line.strip_suffix('.').unwrap_or(line).trim_end();

    match line.split_once(":-") {
        Some((head, body)) => {
            let head = parse::parse_goal(head.trim(), ParseMode::Clause)
                .context("in rule head")?;
            let mut goals = Vec::new();
            for part in split_goals(body) {
                let goal = parse::parse_goal(part.trim(), ParseMode::Clause)
                    .with_context(|| format!("in body goal '{}'", part.trim()))?;
                goals.push(goal);
            }
            Ok(Clause::Rule(Rule::new(head, goals)))
        }
        None => {
            let fact = parse::parse_goal(line, ParseMode::Clause)?;
            Ok(Clause::Fact(fact))
        }
    }
}

/// Split a rule body on commas at paren/bracket depth zero.
fn split_goals(body: &str) -> Vec<String> {
    let mut goals = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for c in body.chars() {
        match c {
            '(' | '[' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                if !current.trim().is_empty() {
                    goals.push(current.trim().to_string());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        goals.push(current.trim().to_string());
    }
    goals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    #[test]
    fn test_split_goals_respects_nesting() {
        assert_eq!(
            split_goals("parent(X, Y), parent(Y, Z)"),
            vec!["parent(X, Y)", "parent(Y, Z)"]
        );
        assert_eq!(
            split_goals("append(T1, L, T2), member(X, [a, b])"),
            vec!["append(T1, L, T2)", "member(X, [a, b])"]
        );
        assert_eq!(split_goals("f(g(a, b), [c, d])"), vec!["f(g(a, b), [c, d])"]);
    }

    #[test]
    fn test_parse_clause_fact_and_rule() {
        let fact = parse_clause("parent(john, mary).").unwrap();
        assert_eq!(
            fact,
            Clause::Fact(Fact::new(
                "parent",
                vec![Term::atom("john"), Term::atom("mary")]
            ))
        );

        match parse_clause("grandparent(X, Z) :- parent(X, Y), parent(Y, Z).").unwrap() {
            Clause::Rule(rule) => {
                assert_eq!(rule.head.predicate, "grandparent");
                assert_eq!(rule.body.len(), 2);
            }
            other => panic!("expected rule, got {:?}", other),
        }
    }

    #[test]
    fn test_load_str_counts_and_skips_comments() {
        let mut kb = KnowledgeBase::new();
        let stats = kb
            .load_str(
                "% family data\n\
                 parent(john, bob).\n\
                 \n\
                 parent(bob, alice).\n\
                 grandparent(X, Z) :- parent(X, Y), parent(Y, Z).\n",
            )
            .unwrap();
        assert_eq!(stats, LoadStats { facts: 2, rules: 1 });
        assert_eq!(kb.facts_for("parent").len(), 2);
        assert_eq!(kb.rules().len(), 1);
    }

    #[test]
    fn test_load_str_reports_offending_line() {
        let mut kb = KnowledgeBase::new();
        let err = kb
            .load_str("parent(john, bob).\nparent(bob, .\n")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_rule_with_empty_body_is_declined() {
        let mut kb = KnowledgeBase::new();
        assert!(kb.load_str("p(X) :- .\n").is_err());
        assert_eq!(kb.rule_count(), 0);
    }

    #[test]
    fn test_add_fact_declines_empty_predicate() {
        let mut kb = KnowledgeBase::new();
        assert!(kb.add_fact(Fact::new("", vec![])).is_err());
        assert_eq!(kb.fact_count(), 0);
    }

    #[test]
    fn test_facts_preserve_insertion_order() {
        let mut kb = KnowledgeBase::new();
        kb.load_str("parent(john, bob).\nparent(john, mary).\n").unwrap();
        let children: Vec<String> = kb
            .facts_for("parent")
            .iter()
            .map(|f| f.args[1].to_string())
            .collect();
        assert_eq!(children, vec!["bob", "mary"]);
        assert_eq!(kb.predicates(), &["parent".to_string()]);
    }

    #[test]
    fn test_candidate_facts_append_provider_facts_last() {
        use crate::storage::FactSetProvider;

        let mut kb = KnowledgeBase::new();
        kb.load_str("parent(john, bob).\n").unwrap();
        let mut provider = FactSetProvider::new();
        provider.add(Fact::new(
            "parent",
            vec![Term::atom("ada"), Term::atom("eve")],
        ));
        kb.add_provider(Box::new(provider));

        let goal = Fact::new("parent", vec![Term::var("X"), Term::var("Y")]);
        let candidates: Vec<String> = kb
            .candidate_facts(&goal)
            .iter()
            .map(|f| f.args[0].to_string())
            .collect();
        assert_eq!(candidates, vec!["john", "ada"]);
    }
}
