//! Operator-driven reply generator
//!
//! Stands in for a hosted model in the demo binary. For each reply the
//! operator types either plain text or a tool call:
//!
//! ```text
//! Good morning, what brings you in today?
//! /call update_symptom_form {"form": {"chief_complaint": "headache"}}
//! /call finish_symptom_collection
//! ```
//!
//! An empty line ends the reply.

use std::io::{self, Write};

use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use serde_json::Value;

use crate::llm::{GeneratedTurn, ReplyGenerator, ReplyRequest};
use crate::tools::ToolCall;

const CALL_PREFIX: &str = "/call";

/// Parse one operator line into a turn
pub fn parse_operator_line(line: &str) -> Result<GeneratedTurn> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(GeneratedTurn::default());
    }

    let rest = match line.strip_prefix(CALL_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest,
        _ => return Ok(GeneratedTurn::text(line)),
    };

    let rest = rest.trim();
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        anyhow::bail!("usage: {} <tool> [json]", CALL_PREFIX);
    }

    let arguments = if args.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(args).with_context(|| format!("Invalid JSON for {}", name))?
    };

    Ok(GeneratedTurn::tool(ToolCall::new(name, arguments)))
}

/// Generator that asks a human operator on the terminal
#[derive(Debug, Default)]
pub struct OperatorGenerator;

impl OperatorGenerator {
    pub fn new() -> Self {
        Self
    }

    fn prompt(request: &ReplyRequest) -> io::Result<String> {
        let tools: Vec<_> = request.tools.iter().map(|t| t.name.as_str()).collect();
        println!(
            "{} {} {}",
            format!("[{}]", request.agent).green().bold(),
            "reply as agent".bright_black(),
            format!("(tools: {})", tools.join(", ")).bright_black()
        );
        print!("{} ", "agent>".green().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input)
    }
}

#[async_trait]
impl ReplyGenerator for OperatorGenerator {
    async fn generate(&self, request: ReplyRequest) -> Result<GeneratedTurn> {
        loop {
            let request = request.clone();
            let line = tokio::task::spawn_blocking(move || Self::prompt(&request)).await??;

            match parse_operator_line(&line) {
                Ok(turn) => return Ok(turn),
                Err(e) => println!("{} {:#}", "Error:".red().bold(), e),
            }
        }
    }

    fn name(&self) -> &str {
        "operator"
    }
}
