// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization of query outcomes for transport.
//!
//! The wire shape is a success flag, a list of `{variable: printed-term}`
//! maps, and an optional error string, so an outer server or tool can
//! forward results without knowing the term representation.

use crate::query::Solution;
use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub success: bool,
    pub bindings: Vec<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl QueryResult {
    pub fn from_solutions(solutions: &[Solution]) -> Self {
        let bindings = solutions
            .iter()
            .map(|solution| {
                solution
                    .iter()
                    .map(|(name, term)| (name.to_string(), term.to_string()))
                    .collect()
            })
            .collect();
        Self {
            success: true,
            bindings,
            error: None,
        }
    }

    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            bindings: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        };
        f.write_str(name)
    }
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn serialize(&self, result: &QueryResult) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(result)?),
            OutputFormat::Text => Ok(format_text(result)),
        }
    }
}

fn format_text(result: &QueryResult) -> String {
    if let Some(error) = &result.error {
        return format!("error: {}", error);
    }
    if result.bindings.is_empty() {
        return "false.".to_string();
    }
    let mut lines = Vec::new();
    for binding in &result.bindings {
        if binding.is_empty() {
            lines.push("true.".to_string());
        } else {
            let pairs: Vec<String> = binding
                .iter()
                .map(|(name, value)| format!("?{} = {}", name, value))
                .collect();
            lines.push(pairs.join(", "));
        }
    }
    lines.join("\n")
}
