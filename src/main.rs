// SPDX-License-Identifier: PMPL-1.0-or-later

//! hornlog: deductive database CLI.
//!
//! `repl` starts an interactive session, `query` runs a single query
//! against a clause file, `load` validates a clause file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use hornlog::kb::KnowledgeBase;
use hornlog::query::{self, OutputFormat};
use hornlog::repl;
use hornlog::storage::FactSetProvider;
use std::path::PathBuf;

macro_rules! qprintln {
    ($quiet:expr, $($arg:tt)+) => {
        if !$quiet {
            println!($($arg)+);
        }
    };
}

#[derive(Parser)]
#[command(name = "hornlog")]
#[command(version)]
#[command(about = "Deductive database: Horn-clause knowledge base with SLD resolution")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output
    #[arg(long, default_value_t = false, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive REPL
    Repl {
        /// Clause file loaded before the session starts
        #[arg(value_name = "FILE")]
        kb: Option<PathBuf>,

        /// Attach an external fact provider from a fact file
        #[arg(long, value_name = "FILE")]
        provider: Option<PathBuf>,
    },

    /// Run a single query against a clause file
    Query {
        /// Query text, e.g. 'grandparent(?X, ?Z)'
        #[arg(value_name = "QUERY")]
        query: String,

        /// Clause file with facts and rules
        #[arg(short, long, value_name = "FILE")]
        kb: Option<PathBuf>,

        /// Attach an external fact provider from a fact file
        #[arg(long, value_name = "FILE")]
        provider: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load a clause file and report what it contains
    Load {
        /// Clause file to validate
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn build_kb(
    file: Option<&PathBuf>,
    provider: Option<&PathBuf>,
    quiet: bool,
) -> Result<KnowledgeBase> {
    let mut kb = KnowledgeBase::new();
    if let Some(path) = file {
        let stats = kb.load_file(path)?;
        qprintln!(
            quiet,
            "Loaded {} facts, {} rules from {}",
            stats.facts,
            stats.rules,
            path.display()
        );
    }
    if let Some(path) = provider {
        let provider = FactSetProvider::from_file(path)?;
        qprintln!(
            quiet,
            "Attached provider with {} facts from {}",
            provider.len(),
            path.display()
        );
        kb.add_provider(Box::new(provider));
    }
    Ok(kb)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Repl { kb, provider } => {
            let mut kb = build_kb(kb.as_ref(), provider.as_ref(), cli.quiet)?;
            repl::run(&mut kb)?;
        }

        Commands::Query {
            query: query_text,
            kb,
            provider,
            format,
        } => {
            let kb = build_kb(kb.as_ref(), provider.as_ref(), cli.quiet)?;
            let result = query::query_result(&kb, &query_text);
            println!("{}", format.serialize(&result)?);
            if !result.success {
                std::process::exit(1);
            }
        }

        Commands::Load { file } => {
            let mut kb = KnowledgeBase::new();
            let stats = kb.load_file(&file)?;
            qprintln!(
                cli.quiet,
                "{}: {} facts, {} rules",
                file.display(),
                stats.facts,
                stats.rules
            );
        }
    }

    Ok(())
}
