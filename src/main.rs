//! Tagq CLI application entry point
//!
//! A thin driver over the filter query core: parse expressions from the
//! command line, or run them against a JSON record file with the in-memory
//! backend.
//!
//! # Usage
//!
//! ```bash
//! # Show the canonical form of an expression
//! tagq parse "foo or -bar"
//!
//! # Show the wire format the search executor consumes
//! tagq parse --json ".filesize > 10MiB"
//!
//! # Filter a record file, largest files first
//! tagq search -f "rust or python" --records files.json --sort size:desc
//! ```

use byte_unit::{Byte, UnitType};
use colored::Colorize;
use std::path::Path;
use tagq::cli::{Cli, Commands};
use tagq::query::{FilterExpression, parse_expression};
use tagq::search::{FileRecord, MemoryBackend, SearchBackend, SortKey};
use tagq::TagqError;

type Result<T> = std::result::Result<T, TagqError>;

fn main() {
    let cli = Cli::parse_args();

    if let Err(err) = run(cli) {
        eprintln!("{} {err}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse { expressions, json } => handle_parse(&expressions, json, cli.quiet),
        Commands::Search {
            filters,
            records,
            sort,
            json,
        } => handle_search(&filters, &records, &sort, json),
        Commands::Completions { shell } => {
            Cli::print_completions(shell);
            Ok(())
        }
    }
}

fn handle_parse(expressions: &[String], json: bool, quiet: bool) -> Result<()> {
    let mut parsed: Vec<FilterExpression> = Vec::new();

    for text in expressions {
        match parse_expression(text) {
            Some(expr) => parsed.push(expr),
            None => {
                if !quiet {
                    eprintln!("{} no valid filter in '{text}'", "Warning:".yellow());
                }
            }
        }
    }

    if parsed.is_empty() {
        return Err(TagqError::InvalidInput(
            "None of the given expressions parse".to_string(),
        ));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        for expr in &parsed {
            println!("{expr}");
        }
    }
    Ok(())
}

fn handle_search(filters: &[String], records: &Path, sort: &[String], json: bool) -> Result<()> {
    let mut expressions: Vec<FilterExpression> = Vec::with_capacity(filters.len());
    for text in filters {
        let expr = parse_expression(text).ok_or_else(|| {
            TagqError::InvalidInput(format!("Not a valid filter expression: '{text}'"))
        })?;
        expressions.push(expr);
    }

    let sort_keys: Vec<SortKey> = sort
        .iter()
        .map(|key| key.parse::<SortKey>())
        .collect::<std::result::Result<_, _>>()?;

    let backend = MemoryBackend::load(records)?;
    let results = backend.search(&expressions, &sort_keys)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for record in &results {
        println!("{}", format_record(record));
    }
    Ok(())
}

fn format_record(record: &FileRecord) -> String {
    let size = Byte::from_u64(record.size)
        .get_appropriate_unit(UnitType::Binary)
        .to_string();

    format!(
        "{:>8}  {:>10}  {:<8}  {}",
        record.id.to_string().cyan(),
        size,
        record.status.to_string().green(),
        record.tags.join(", ").dimmed()
    )
}
