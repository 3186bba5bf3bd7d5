//! Date arithmetic and the year-to-grid layout.
//!
//! All dates are built from explicit year/month/day components. Components
//! that run past the end of a month or year roll over into the next one, so
//! arithmetic never fails on a valid starting date.

use tracing::debug;

use crate::error::KusaError;
use crate::formatter::{month_abbrev, normalized_key};
use crate::types::{
    COLUMNS_PER_BAND, CalendarDate, DAYS_PER_WEEK, DayCell, FULL_WEEKS, Grid,
    LABEL_ANCHOR_WEEKDAY, MIN_LABEL_GAP, MonthLabel, WEEKDAY_ABBREVS, Week,
};

/// Check if a year is a leap year (Gregorian rules).
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

impl CalendarDate {
    /// Build a validated date. `month` is 1-based.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, KusaError> {
        let invalid = |reason: &str| KusaError::InvalidDateInput {
            input: format!("{:04}-{:02}-{:02}", year, month, day),
            reason: reason.to_string(),
        };

        if !(1..=9999).contains(&year) {
            return Err(invalid("year must be 1-9999"));
        }
        if !(1..=12).contains(&month) {
            return Err(invalid("month must be 1-12"));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(invalid("day is out of range for the month"));
        }
        Ok(CalendarDate { year, month, day })
    }

    /// Build a date from components that may overflow.
    ///
    /// `month_index` is 0-based and may fall outside `0..12`; `day` may be
    /// zero, negative or larger than the month. Both carry into the
    /// neighbouring months and years.
    fn from_parts(year: i32, month_index: i64, day: i64) -> Self {
        let mut year = year + month_index.div_euclid(12) as i32;
        let mut month = month_index.rem_euclid(12) as u32 + 1;
        let mut day = day;

        while day < 1 {
            if month == 1 {
                month = 12;
                year -= 1;
            } else {
                month -= 1;
            }
            day += i64::from(days_in_month(year, month));
        }

        loop {
            let len = i64::from(days_in_month(year, month));
            if day <= len {
                break;
            }
            day -= len;
            if month == 12 {
                month = 1;
                year += 1;
            } else {
                month += 1;
            }
        }

        CalendarDate {
            year,
            month,
            day: day as u32,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of the year, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Day of the week using Zeller's congruence, 0 = Sunday .. 6 = Saturday.
    pub fn weekday(&self) -> u32 {
        let month = if self.month < 3 {
            self.month + 12
        } else {
            self.month
        };
        let m = month as i32;
        let q = self.day as i32;
        let year_i = if self.month < 3 {
            self.year - 1
        } else {
            self.year
        };
        let k = year_i.rem_euclid(100);
        let j = year_i.div_euclid(100);

        let h = (q + (13 * (m + 1)) / 5 + k + k / 4 + j / 4 - 2 * j).rem_euclid(7);
        // h: 0=Sat, 1=Sun, ..., 6=Fri
        ((h + 6) % 7) as u32
    }

    pub fn add_days(self, n: i64) -> Self {
        Self::from_parts(
            self.year,
            i64::from(self.month) - 1,
            i64::from(self.day) + n,
        )
    }

    pub fn next_day(self) -> Self {
        self.add_days(1)
    }

    pub fn prev_day(self) -> Self {
        self.add_days(-1)
    }

    /// First day of the following month.
    pub fn start_of_next_month(self) -> Self {
        Self::from_parts(self.year, i64::from(self.month), 1)
    }

    /// Same month and day `n` years later; February 29 rolls over to March 1
    /// when the target year is not a leap year.
    pub fn add_years(self, n: i32) -> Self {
        Self::from_parts(
            self.year + n,
            i64::from(self.month) - 1,
            i64::from(self.day),
        )
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: CalendarDate) -> i64 {
        other.day_number() - self.day_number()
    }

    /// Days since 0000-03-01, after Howard Hinnant's `days_from_civil`.
    fn day_number(self) -> i64 {
        let y = i64::from(self.year) - i64::from(self.month <= 2);
        let era = y.div_euclid(400);
        let yoe = y - era * 400;
        let m = i64::from(self.month);
        let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i64::from(self.day) - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe
    }
}

/// Lowercase three-letter weekday name used as a cell class.
pub fn weekday_abbrev(date: CalendarDate) -> &'static str {
    WEEKDAY_ABBREVS[date.weekday() as usize]
}

impl DayCell {
    /// Padding cell outside the rendered span.
    pub fn empty() -> Self {
        DayCell {
            key: String::new(),
            day: None,
            weekday: None,
        }
    }

    pub fn from_date(date: CalendarDate) -> Self {
        DayCell {
            key: normalized_key(date),
            day: Some(date.day()),
            weekday: Some(weekday_abbrev(date)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.day.is_none()
    }
}

impl Week {
    /// Non-empty cells with their weekday row.
    pub fn days(&self) -> impl Iterator<Item = (usize, &DayCell)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
    }
}

/// Bucket the days of `[first, end)` into Sunday-first weeks.
fn bucket_span(first: CalendarDate, end: CalendarDate) -> Vec<Week> {
    let mut cells: Vec<DayCell> = (0..first.weekday()).map(|_| DayCell::empty()).collect();

    let mut date = first;
    while date < end {
        cells.push(DayCell::from_date(date));
        date = date.next_day();
    }

    while cells.len() % DAYS_PER_WEEK != 0 {
        cells.push(DayCell::empty());
    }

    cells
        .chunks_exact(DAYS_PER_WEEK)
        .map(|chunk| Week {
            cells: std::array::from_fn(|row| chunk[row].clone()),
        })
        .collect()
}

/// Weeks of the month containing `month_start`, from that day to the month end.
pub fn bucket_into_weeks(month_start: CalendarDate) -> Vec<Week> {
    bucket_span(month_start, month_start.start_of_next_month())
}

/// Number of days from `start` up to (not including) the same date a year later.
pub fn total_days_in_year(start: CalendarDate) -> u32 {
    start.days_until(start.add_years(1)) as u32
}

/// Days left over after 52 full weeks, counted from the Sunday of the first week.
///
/// Up to 7 of them fit column 52. Anything beyond spills into a 54th column
/// whose rows run `0..=overflow_count - 8`.
pub fn overflow_count(start: CalendarDate) -> u32 {
    total_days_in_year(start) - DAYS_PER_WEEK as u32 * FULL_WEEKS + start.weekday()
}

/// Week columns needed for the year starting at `start`.
pub fn column_count(start: CalendarDate) -> usize {
    if overflow_count(start) > DAYS_PER_WEEK as u32 {
        FULL_WEEKS as usize + 2
    } else {
        FULL_WEEKS as usize + 1
    }
}

/// Place a label on every column whose anchor weekday falls in a new month.
///
/// When the first two labels are closer than [`MIN_LABEL_GAP`] columns the
/// first one is dropped so it does not crowd the left edge.
pub fn month_label_positions(start: CalendarDate, columns: usize) -> Vec<MonthLabel> {
    let mut anchor =
        start.add_days(i64::from(LABEL_ANCHOR_WEEKDAY) - i64::from(start.weekday()));
    let mut labels: Vec<MonthLabel> = Vec::new();
    let mut prev_month = None;

    for column in 0..columns {
        if prev_month != Some(anchor.month()) {
            labels.push(MonthLabel {
                column,
                text: month_abbrev(anchor.month()),
            });
        }
        prev_month = Some(anchor.month());
        anchor = anchor.add_days(DAYS_PER_WEEK as i64);
    }

    if labels.len() >= 2 && labels[1].column - labels[0].column < MIN_LABEL_GAP {
        labels.remove(0);
    }

    labels
}

/// Lay out one year starting at `start`.
pub fn compute_grid(start: CalendarDate) -> Grid {
    let total_days = total_days_in_year(start);
    let overflow_count = overflow_count(start);
    let columns = column_count(start);

    let weeks = bucket_span(start, start.add_years(1));
    let bands: Vec<Vec<Week>> = weeks
        .chunks(COLUMNS_PER_BAND)
        .map(<[Week]>::to_vec)
        .collect();
    let month_labels = month_label_positions(start, columns);

    debug!(
        total_days,
        overflow_count,
        columns,
        labels = month_labels.len(),
        "computed grid"
    );

    Grid {
        bands,
        month_labels,
        total_days,
        overflow_count,
    }
}

impl Grid {
    /// All week columns as `(band, column within band, week)`.
    pub fn columns(&self) -> impl Iterator<Item = (usize, usize, &Week)> {
        self.bands.iter().enumerate().flat_map(|(band, weeks)| {
            weeks
                .iter()
                .enumerate()
                .map(move |(column, week)| (band, column, week))
        })
    }

    pub fn column_count(&self) -> usize {
        self.bands.iter().map(Vec::len).sum()
    }

    /// Week at a flattened column index.
    pub fn column(&self, index: usize) -> Option<&Week> {
        self.bands
            .get(index / COLUMNS_PER_BAND)?
            .get(index % COLUMNS_PER_BAND)
    }

    /// Real days in the order they are drawn.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.columns()
            .flat_map(|(_, _, week)| week.days().map(|(_, cell)| cell))
    }
}
