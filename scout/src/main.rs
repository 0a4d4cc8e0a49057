//! # scout
//!
//! A CLI for getting oriented in an unfamiliar codebase.
//!
//! ## Overview
//!
//! scout is built on top of scoutlib and offers two commands:
//!
//! - **survey**: file counts by category and extension, project type,
//!   key files and a two-level directory skeleton
//! - **find**: every line mentioning a token, grouped into definitions,
//!   imports and usages
//!
//! ## Usage
//!
//! ```bash
//! # Survey the current directory
//! scout survey
//!
//! # Survey another tree as JSON
//! scout survey ../other-repo --output json
//!
//! # Find a symbol
//! scout find render
//!
//! # Only look at TypeScript files under web/
//! scout find render --type ts,tsx --path web
//!
//! # Skip generated code
//! scout find Client --exclude "gen/**"
//! ```
//!
//! Logging goes to stderr. Use `-v` for debug output, or set `RUST_LOG`.

mod render;

use std::process::ExitCode;

use anyhow::anyhow;
use clap::{Arg, ArgAction, ArgMatches, Command};
use scoutlib::{search, survey, FilterConfig, SearchOptions, SurveyOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use render::{render_search, render_survey, report_error, OutputMode};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("scout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Survey a codebase and find definitions, imports and usages")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Enable debug logging on stderr"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log errors"),
        )
        .subcommand(
            Command::new("survey")
                .about("Summarize the structure of a directory tree")
                .arg(
                    Arg::new("path")
                        .help("Path to survey (defaults to current directory)")
                        .default_value("."),
                )
                .arg(
                    Arg::new("exclude")
                        .short('e')
                        .long("exclude")
                        .action(ArgAction::Append)
                        .help("Exclude files matching glob pattern"),
                ),
        )
        .subcommand(
            Command::new("find")
                .about("Find definitions, imports and usages of a token")
                .arg(
                    Arg::new("pattern")
                        .required(true)
                        .help("Literal token to search for (case-insensitive)"),
                )
                .arg(
                    Arg::new("path")
                        .short('p')
                        .long("path")
                        .default_value(".")
                        .help("Directory or file to search"),
                )
                .arg(
                    Arg::new("type")
                        .short('t')
                        .long("type")
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .help("Only search these extensions (comma-separated: ts,py)"),
                )
                .arg(
                    Arg::new("exclude")
                        .short('e')
                        .long("exclude")
                        .action(ArgAction::Append)
                        .help("Exclude files matching glob pattern"),
                ),
        )
}

/// Install the tracing subscriber. `RUST_LOG` wins over the flags.
fn init_logging(matches: &ArgMatches) {
    let default_level = if matches.get_flag("quiet") {
        "error"
    } else if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Extract the output mode from matches
fn output_mode(matches: &ArgMatches) -> OutputMode {
    match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => OutputMode::Json,
        _ => OutputMode::Text,
    }
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Handler for survey command
fn survey_handler(matches: &ArgMatches, mode: OutputMode) -> Result<String, anyhow::Error> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let filter = build_filter(matches)?;

    let result = survey(path, SurveyOptions::new().filter(filter))?;
    debug!(
        files = result.stats.total_files,
        key_files = result.key_files.len(),
        "survey finished"
    );

    render_survey(&result, mode)
}

/// Handler for find command
fn find_handler(matches: &ArgMatches, mode: OutputMode) -> Result<String, anyhow::Error> {
    let pattern = matches
        .get_one::<String>("pattern")
        .ok_or_else(|| anyhow!("missing search pattern"))?;
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let extensions: Vec<String> = matches
        .get_many::<String>("type")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let filter = build_filter(matches)?.extensions(&extensions);

    let result = search(path, pattern, SearchOptions::new().filter(filter))?;
    debug!(matches = result.total(), "search finished");

    render_search(&result, pattern, mode)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(&matches);
    let mode = output_mode(&matches);

    let result = match matches.subcommand() {
        Some(("survey", sub)) => survey_handler(sub, mode),
        Some(("find", sub)) => find_handler(sub, mode),
        Some((name, _)) => Err(anyhow!("unknown command: {}", name)),
        None => Err(anyhow!("no command given")),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err, mode);
            ExitCode::FAILURE
        }
    }
}
