//! Command-line argument parsing using clap.
//!
//! The start date is given as `YYYY-MM-DD`; months are 1-based.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, ValueHint};
use tracing::debug;

use crate::error::KusaError;
use crate::types::{CalendarDate, GraphContext, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "kusa")]
#[command(about = "Renders a one-year activity graph as SVG markup", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// First day of the graph (YYYY-MM-DD). Defaults to the day the last
    /// year began, so the graph ends today.
    #[arg(index = 1, value_name = "date", value_hint = ValueHint::Other)]
    pub date: Option<String>,

    /// Name written into the graph title.
    #[arg(short = 'n', long, help_heading = "Output options", value_name = "name")]
    pub name: Option<String>,

    /// Output format (html|svg).
    #[arg(
        short = 'f',
        long,
        default_value = "html",
        help_heading = "Output options",
        value_name = "format"
    )]
    pub format: OutputFormat,

    /// Write markup to a file instead of stdout.
    #[arg(
        short = 'o',
        long,
        help_heading = "Output options",
        value_name = "file",
        value_hint = ValueHint::FilePath
    )]
    pub output: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Render a one-year activity graph.

Without a date, the graph covers the year ending today.

Examples:
  kusa                       Graph for the last year
  kusa 2021-01-03            Graph starting on 3 January 2021
  kusa -n alice 2021-01-03   Put a name into the title
  kusa -f svg -o graph.svg   Standalone SVG written to graph.svg";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

impl GraphContext {
    pub fn new(args: &Args) -> Result<Self, KusaError> {
        let start = get_start_date(args)?;
        debug!(?start, format = ?args.format, "resolved context");

        Ok(GraphContext {
            start,
            owner: args.name.clone(),
            format: args.format,
            output: args.output.clone(),
        })
    }
}

/// Get today's date, respecting KUSA_TEST_TIME environment variable for testing.
pub fn get_today_date() -> NaiveDate {
    if let Ok(test_time) = std::env::var("KUSA_TEST_TIME")
        && let Ok(date) = NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date, rejecting anything outside years 1-9999.
pub fn parse_date(input: &str) -> Result<CalendarDate, KusaError> {
    let invalid = |reason: String| KusaError::InvalidDateInput {
        input: input.to_string(),
        reason,
    };

    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| invalid(e.to_string()))?;
    if !(1..=9999).contains(&date.year()) {
        return Err(invalid("year must be 1-9999".to_string()));
    }
    CalendarDate::new(date.year(), date.month(), date.day())
}

/// Start date from the positional argument, or the start of the year ending today.
pub fn get_start_date(args: &Args) -> Result<CalendarDate, KusaError> {
    match &args.date {
        Some(input) => parse_date(input),
        None => {
            let today = get_today_date();
            let today = CalendarDate::new(today.year(), today.month(), today.day())?;
            Ok(today.next_day().add_years(-1))
        }
    }
}
