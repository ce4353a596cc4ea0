// SPDX-License-Identifier: PMPL-1.0-or-later

//! Interactive line-based REPL.
//!
//! Commands: `assert <fact>`, `rule <head> :- <body>`, `?- <query>`,
//! `facts`, `rules`, `load <path>`, `help`, `quit`. Errors are reported
//! and the loop continues.

use crate::kb::{self, Clause, KnowledgeBase};
use crate::parse::{self, ParseMode};
use crate::query;
use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "hornlog> ";

const HELP: &str = "\
Commands:
  ?- query          Execute a query (e.g. ?- parent(?X, mary))
  assert fact       Add a fact (e.g. assert parent(john, bob))
  rule head :- body Add a rule (e.g. rule grandparent(X,Z) :- parent(X,Y), parent(Y,Z))
  facts             List all facts
  rules             List all rules
  load <file>       Load facts/rules from file
  help              Show this help
  quit              Exit

Variable conventions:
  queries use ?X, ?Name; rules and facts use X, Name, _X";

pub fn run(kb: &mut KnowledgeBase) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("hornlog interactive REPL (type 'help' for commands)");

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);

        match line {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "facts" => print_facts(kb),
            "rules" => print_rules(kb),
            _ => {
                if let Err(err) = dispatch(kb, line) {
                    eprintln!("{} {:#}", "error:".red(), err);
                }
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn dispatch(kb: &mut KnowledgeBase, line: &str) -> Result<()> {
    if let Some(query_text) = line.strip_prefix("?- ") {
        run_query(kb, query_text.trim())
    } else if let Some(fact_text) = line.strip_prefix("assert ") {
        let fact_text = fact_text.trim();
        let fact_text = fact_text.strip_suffix('.').unwrap_or(fact_text);
        let fact = parse::parse_goal(fact_text, ParseMode::Clause)?;
        kb.add_fact(fact.clone())?;
        println!("Asserted: {}", fact);
        Ok(())
    } else if let Some(rule_text) = line.strip_prefix("rule ") {
        match kb::parse_clause(rule_text)? {
            Clause::Rule(rule) => {
                kb.add_rule(rule.clone())?;
                println!("Added rule: {}", rule);
                Ok(())
            }
            Clause::Fact(_) => {
                anyhow::bail!("not a rule (missing ':-'); use 'assert' for facts")
            }
        }
    } else if let Some(path) = line.strip_prefix("load ") {
        let stats = kb.load_file(path.trim())?;
        println!("Loaded {} facts, {} rules.", stats.facts, stats.rules);
        Ok(())
    } else {
        anyhow::bail!("unknown command; type 'help' for the command list")
    }
}

fn run_query(kb: &KnowledgeBase, text: &str) -> Result<()> {
    let solutions = query::query(kb, text)?;
    if solutions.is_empty() {
        println!("{}", "false.".yellow());
        return Ok(());
    }
    for solution in &solutions {
        if solution.is_empty() {
            println!("{}", "true.".green());
        } else {
            let pairs: Vec<String> = solution
                .iter()
                .map(|(name, term)| format!("?{} = {}", name, term))
                .collect();
            println!("{}", pairs.join(", ").cyan());
        }
    }
    Ok(())
}

fn print_facts(kb: &KnowledgeBase) {
    if kb.fact_count() == 0 {
        println!("(no facts)");
        return;
    }
    for predicate in kb.predicates() {
        println!("{}:", predicate.bold());
        for fact in kb.facts_for(predicate) {
            println!("  {}.", fact);
        }
    }
}

fn print_rules(kb: &KnowledgeBase) {
    if kb.rules().is_empty() {
        println!("(no rules)");
        return;
    }
    for rule in kb.rules() {
        println!("  {}", rule);
    }
}
