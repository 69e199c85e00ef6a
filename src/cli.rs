//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for tagq using the `clap` crate.
//!
//! # Commands
//!
//! - **parse**: Parse filter expressions and print display or wire form
//! - **search**: Apply filter expressions to a JSON record file
//! - **completions**: Generate shell completion scripts
//!
//! # Examples
//!
//! ```bash
//! tagq parse "foo or -bar" ".filesize > 10MiB"
//! tagq parse --json ".status = imported"
//! tagq search -f "rust or python" -f ".tagcount > 2" --records files.json --sort size:desc
//! tagq completions zsh > _tagq
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Filter query language tool for tag-based file search
#[derive(Parser, Debug)]
#[command(name = "tagq", version, about, long_about = None)]
pub struct Cli {
    /// Suppress informational output (only print results)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse filter expressions and print their canonical form
    #[command(alias = "p")]
    Parse {
        /// Filter expressions, e.g. "foo or -bar" ".filesize > 10MiB"
        #[arg(required = true)]
        expressions: Vec<String>,

        /// Emit wire-format JSON instead of display strings
        #[arg(short, long)]
        json: bool,
    },

    /// Apply filter expressions to a JSON record file and print matches
    #[command(alias = "s")]
    Search {
        /// Filter expressions; multiple filters are AND-combined
        #[arg(short = 'f', long = "filter", value_name = "EXPR")]
        filters: Vec<String>,

        /// JSON file holding an array of file records
        #[arg(short, long)]
        records: PathBuf,

        /// Sort keys applied in order, e.g. "size:desc" "imported"
        #[arg(short, long, value_name = "KEY")]
        sort: Vec<String>,

        /// Emit matching records as JSON instead of a listing
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Write completion script for `shell` to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_parse_command() {
        let cli = Cli::try_parse_from(["tagq", "parse", "foo or bar", "--json"]).unwrap();
        match cli.command {
            Commands::Parse { expressions, json } => {
                assert_eq!(expressions, ["foo or bar"]);
                assert!(json);
            }
            _ => panic!("Expected parse command"),
        }
    }

    #[test]
    fn test_cli_parse_requires_expression() {
        assert!(Cli::try_parse_from(["tagq", "parse"]).is_err());
    }

    #[test]
    fn test_cli_parses_search_command() {
        let cli = Cli::try_parse_from([
            "tagq", "search", "-f", "rust", "-f", ".tagcount > 1", "--records", "files.json",
            "--sort", "size:desc",
        ])
        .unwrap();
        match cli.command {
            Commands::Search {
                filters,
                records,
                sort,
                json,
            } => {
                assert_eq!(filters.len(), 2);
                assert_eq!(records, PathBuf::from("files.json"));
                assert_eq!(sort, ["size:desc"]);
                assert!(!json);
            }
            _ => panic!("Expected search command"),
        }
    }

    #[test]
    fn test_cli_command_alias() {
        let cli = Cli::try_parse_from(["tagq", "p", "foo"]).unwrap();
        assert!(matches!(cli.command, Commands::Parse { .. }));
    }
}
