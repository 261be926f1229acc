//! bible-reader: a small front end over argline.
//!
//! Looks nothing up; it only echoes the passage or search the user asked
//! for, so the parsing engine can be driven end to end.
//!
//! ```text
//! bible-reader -b John -c 3 -v 16
//! bible-reader search -q love -l 5
//! ```

use anyhow::{Context, Result};
use argline::{CliOption, Command, OptionType, Parser};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<i32> {
    let mut parser = Parser::new("bible-reader");
    parser.set_main_command(passage_command().context("building main command")?);
    parser
        .add_command(search_command().context("building search command")?)
        .context("registering search command")?;

    let args: Vec<String> = std::env::args().collect();
    Ok(parser.parse_and_execute(&args))
}

fn passage_command() -> Result<Command> {
    let mut cmd = Command::main("Print a passage reference");
    cmd.add_option(CliOption::new(Some("b"), Some("book"), "Book name", OptionType::String))?;
    cmd.add_option(CliOption::new(Some("c"), Some("chapter"), "Chapter number", OptionType::Int32))?;
    cmd.add_option(
        CliOption::new(Some("v"), Some("verse"), "Verse number (repeatable)", OptionType::UInt16)
            .multiple(),
    )?;
    cmd.add_option(CliOption::new(
        Some("r"),
        Some("red-letter"),
        "Highlight spoken words",
        OptionType::Bool,
    ))?;

    Ok(cmd.with_callback(|cmd| {
        let Some(book) = cmd.get_option("book").and_then(|o| o.get_first_string()) else {
            println!("Missing required option: --book");
            return false;
        };

        let mut reference = book.to_string();
        if let Some(chapter) = cmd.get_option("chapter").and_then(|o| o.get_first_i32()) {
            reference.push_str(&format!(" {}", chapter));
        }

        let verses: Vec<String> = cmd
            .get_option("verse")
            .map(|o| o.get_all_values().iter().map(|v| v.to_string()).collect())
            .unwrap_or_default();
        if !verses.is_empty() {
            reference.push_str(&format!(":{}", verses.join(",")));
        }

        let red = cmd
            .get_option("red-letter")
            .and_then(|o| o.get_first_bool())
            .unwrap_or(false);
        if red {
            reference.push_str(" (red letter)");
        }

        println!("{}", reference);
        true
    }))
}

fn search_command() -> Result<Command> {
    let mut cmd = Command::new("search", "Search the text for a phrase");
    cmd.add_option(CliOption::new(Some("q"), Some("query"), "Phrase to find", OptionType::String))?;
    cmd.add_option(CliOption::new(Some("l"), Some("limit"), "Maximum results", OptionType::UInt8))?;

    Ok(cmd.with_callback(|cmd| {
        let Some(query) = cmd.get_option("query").and_then(|o| o.get_first_string()) else {
            println!("Missing required option: --query");
            return false;
        };
        let limit = cmd
            .get_option("limit")
            .and_then(|o| o.get_first_u8())
            .unwrap_or(10);
        println!("Searching for '{}' (limit {})", query, limit);
        true
    }))
}
