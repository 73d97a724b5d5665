//! mockroute stub matcher CLI
//!
//! Loads a stub file and reports which stub a request would be served by.
//!
//! Usage:
//!   mockroute --stubs stubs.yaml [--method GET] /users?page=1
//!   mockroute --stubs stubs.yaml --request-line "GET /users?page=1 HTTP/1.1"

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use mockroute::{Mismatch, RequestHead, StubDefinition, StubFile, StubTable, StubWarning};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Exit code when no stub matches
const EXIT_NO_MATCH: u8 = 1;
/// Exit code for unreadable or invalid input
const EXIT_CONFIG_ERROR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Check which stub serves a request
#[derive(Parser, Debug)]
#[command(name = "mockroute")]
#[command(author, version, about = "Check which stub in a stub file serves a request")]
struct Args {
    /// Stub file (YAML, or JSON with a .json extension)
    #[arg(short, long, env = "MOCKROUTE_STUBS")]
    stubs: PathBuf,

    /// Request URI, e.g. /users?page=1
    #[arg(required_unless_present = "request_line", conflicts_with = "request_line")]
    uri: Option<String>,

    /// Request method used with URI
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Full request line, e.g. "GET /users?page=1 HTTP/1.1"
    #[arg(short, long)]
    request_line: Option<String>,

    /// Show every stub's outcome
    #[arg(short, long)]
    explain: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    request: &'a RequestHead,
    matched: Option<MatchedStub<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    outcomes: Vec<Outcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<StubWarning>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchedStub<'a> {
    index: usize,
    label: String,
    stub: &'a StubDefinition,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Outcome {
    index: usize,
    label: String,
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_NO_MATCH),
        Err(e) => {
            eprintln!("{RED}{BOLD}error:{RESET} {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directives(verbose, rust_log.as_deref())))
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` wins when set; otherwise `-v` picks debug over warn.
fn filter_directives(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ if verbose => "debug".to_string(),
        _ => "warn".to_string(),
    }
}

/// Returns whether a stub matched.
fn run(args: &Args) -> anyhow::Result<bool> {
    let request = build_request(args)?;

    let file = StubFile::from_file(&args.stubs)
        .with_context(|| format!("Failed to load stubs from {}", args.stubs.display()))?;
    // Warnings are reported below rather than logged
    let (table, analysis) = file.into_table_with_analysis();
    let warnings = analysis.warnings;

    let matched = table
        .find_entry(&request)
        .map(|(index, entry)| MatchedStub {
            index,
            label: entry.payload.label(index),
            stub: &entry.payload,
        });

    let outcomes = if args.explain {
        collect_outcomes(&table, &request)
    } else {
        Vec::new()
    };

    let found = matched.is_some();
    let report = Report {
        request: &request,
        matched,
        outcomes,
        warnings,
    };

    match args.output {
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(&report)?;
            println!("{output}");
        }
        OutputFormat::Text => print_report(&report),
    }

    Ok(found)
}

fn build_request(args: &Args) -> anyhow::Result<RequestHead> {
    match (&args.request_line, &args.uri) {
        (Some(line), _) => RequestHead::parse_request_line(line)
            .ok_or_else(|| anyhow!("Malformed request line {line:?}; expected \"METHOD URI\"")),
        (None, Some(uri)) => Ok(RequestHead::new(args.method.clone(), uri.clone())),
        (None, None) => Err(anyhow!("Either a URI or --request-line is required")),
    }
}

fn collect_outcomes(table: &StubTable<StubDefinition>, request: &RequestHead) -> Vec<Outcome> {
    table
        .explain_all(request)
        .into_iter()
        .map(|(index, result)| {
            let label = table
                .get(index)
                .map(|entry| entry.payload.label(index))
                .unwrap_or_else(|| format!("#{index}"));
            Outcome {
                index,
                label,
                matched: result.is_ok(),
                reason: result.err().as_ref().map(Mismatch::to_string),
            }
        })
        .collect()
}

fn print_report(report: &Report<'_>) {
    println!(
        "{DIM}Request:{RESET} {BOLD}{}{RESET} {CYAN}{}{RESET}",
        report.request.method, report.request.uri
    );

    if !report.outcomes.is_empty() {
        println!();
        for outcome in &report.outcomes {
            match &outcome.reason {
                None => println!("  {GREEN}match{RESET}  {BOLD}{}{RESET}", outcome.label),
                Some(reason) => println!(
                    "  {DIM}skip{RESET}   {} {DIM}({reason}){RESET}",
                    outcome.label
                ),
            }
        }
    }

    println!();
    match &report.matched {
        Some(hit) => {
            println!(
                "{GREEN}{BOLD}Matched{RESET} {BOLD}{}{RESET} {DIM}(stub {}){RESET} -> status {}",
                hit.label, hit.index, hit.stub.response.status
            );
            if let Some(body) = &hit.stub.response.body {
                println!("{DIM}{body}{RESET}");
            }
        }
        None => println!("{RED}{BOLD}No stub matched{RESET}"),
    }

    if !report.warnings.is_empty() {
        println!();
        for warning in &report.warnings {
            println!("{YELLOW}warning:{RESET} {}", warning.message);
        }
    }
}
