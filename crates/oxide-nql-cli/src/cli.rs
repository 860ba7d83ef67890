//! Command-line interface definition and command handlers.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use oxide_nql_core::{Parser as QueryParser, Statement};

/// Parse, format and inspect NoSQL query statements.
#[derive(Debug, Parser)]
#[command(name = "oxide-nql")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse statements and print their syntax tree.
    Parse {
        #[command(flatten)]
        input: Input,

        /// Print the tree as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print statements in canonical form.
    Format {
        #[command(flatten)]
        input: Input,
    },

    /// List the parameters each statement references.
    Params {
        #[command(flatten)]
        input: Input,
    },
}

/// Where query text comes from.
#[derive(Debug, Args)]
pub struct Input {
    /// Query text. Read from `--file` or standard input when omitted.
    pub query: Option<String>,

    /// Read query text from a file.
    #[arg(short, long, env = "OXIDE_NQL_FILE", conflicts_with = "query")]
    pub file: Option<PathBuf>,
}

impl Input {
    /// Returns the query text.
    ///
    /// # Errors
    ///
    /// Fails if the file or `stdin` cannot be read.
    pub fn read(&self, mut stdin: impl Read) -> anyhow::Result<String> {
        if let Some(query) = &self.query {
            return Ok(query.clone());
        }
        if let Some(path) = &self.file {
            debug!(path = %path.display(), "reading query file");
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        Ok(text)
    }
}

fn parse_script(text: &str) -> anyhow::Result<Vec<Statement>> {
    let statements = QueryParser::new(text)
        .parse_statements()
        .map_err(|e| describe(text, e))?;
    debug!(count = statements.len(), "parsed script");
    Ok(statements)
}

/// Adds the line and column of a syntax error to its message.
fn describe(text: &str, error: oxide_nql_core::QueryError) -> anyhow::Error {
    if let oxide_nql_core::QueryError::Syntax(syntax) = &error {
        let (line, column) = syntax.span.line_col(text);
        return anyhow::anyhow!("{error} (line {line}, column {column})");
    }
    error.into()
}

/// Runs a command, writing its output to `out`.
///
/// # Errors
///
/// Fails on unreadable input, invalid statements or write errors.
pub fn run(cli: &Cli, stdin: impl Read, out: &mut impl Write) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Parse { input, json } => {
            for statement in parse_script(&input.read(stdin)?)? {
                if *json {
                    serde_json::to_writer_pretty(&mut *out, &statement)?;
                    writeln!(out)?;
                } else {
                    writeln!(out, "{statement:#?}")?;
                }
            }
        }
        Commands::Format { input } => {
            for statement in parse_script(&input.read(stdin)?)? {
                writeln!(out, "{statement}")?;
            }
        }
        Commands::Params { input } => {
            for statement in parse_script(&input.read(stdin)?)? {
                let names: Vec<String> = statement
                    .parameters()
                    .into_iter()
                    .map(|name| format!("@{name}"))
                    .collect();
                writeln!(out, "{}: {}", statement.kind(), names.join(", "))?;
            }
        }
    }
    Ok(())
}
