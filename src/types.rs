//! Type definitions and constants for the activity graph.

use std::path::PathBuf;

use clap::ValueEnum;

/// A calendar date in the proleptic Gregorian calendar.
///
/// `month` is 1-based (1 = January) everywhere it crosses a public boundary.
/// Values are immutable: every arithmetic operation returns a new date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) day: u32,
}

/// One cell of a week column.
///
/// The empty sentinel (leading/trailing padding) has an empty key and no
/// day number or weekday class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// Normalized `YYYY-MM-DD` key, empty for padding.
    pub key: String,
    /// Day of the month.
    pub day: Option<u32>,
    /// Lowercase weekday abbreviation (`sun`..`sat`).
    pub weekday: Option<&'static str>,
}

/// Seven consecutive cells, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub cells: [DayCell; DAYS_PER_WEEK],
}

/// Month name placed above the week column where a new month begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLabel {
    /// Index into the flattened week-column sequence of the whole year.
    pub column: usize,
    /// Three-letter month abbreviation.
    pub text: &'static str,
}

/// The full year laid out as two bands of week columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Band 0 holds columns `0..27`, band 1 holds the rest.
    pub bands: Vec<Vec<Week>>,
    pub month_labels: Vec<MonthLabel>,
    /// Number of real days covered by the grid (365 or 366).
    pub total_days: u32,
    /// Days spilling past a clean 52-week grid, counted from the first
    /// week's Sunday.
    pub overflow_count: u32,
}

/// Output flavour written by the command-line front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Header block followed by the inline SVG drawing.
    Html,
    /// Standalone SVG document with the drawing only.
    Svg,
}

/// Render options resolved from the command line.
#[derive(Clone, Debug)]
pub struct GraphContext {
    /// First day shown in the graph.
    pub start: CalendarDate,
    /// Name written into the title placeholder.
    pub owner: Option<String>,
    pub format: OutputFormat,
    /// Destination file; stdout when `None`.
    pub output: Option<PathBuf>,
}

pub const DAYS_PER_WEEK: usize = 7;

/// Weeks that always fit the grid regardless of start weekday.
pub const FULL_WEEKS: u32 = 52;

/// Week columns drawn per band.
pub const COLUMNS_PER_BAND: usize = 27;

/// Weekday every month label is measured against (0 = Sunday).
pub const LABEL_ANCHOR_WEEKDAY: u32 = 5;

/// Minimum column gap between the first two month labels.
pub const MIN_LABEL_GAP: usize = 2;

// Drawing geometry, in logical units before scaling
pub const SCALE: f64 = 2.5;
pub const WEEKDAY_LABEL_WIDTH: u32 = 20;
pub const TEXT_OFFSET_Y: u32 = 8;
pub const FIELD_WIDTH: u32 = 405;
pub const FIELD_HEIGHT: u32 = 255;
pub const CELL_SIZE: u32 = 11;
pub const CELL_RADIUS: u32 = 2;
pub const CELL_PITCH: u32 = 15;
/// Vertical distance between the two bands.
pub const BAND_OFFSET: u32 = CELL_PITCH * 9;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

pub const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_ABBREVS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];
