//! Unit tests for date arithmetic, grid layout and month labels.

use chrono::{Datelike, NaiveDate};

use kusa::calendar::{
    bucket_into_weeks, column_count, compute_grid, days_in_month, is_leap_year,
    month_label_positions, overflow_count, total_days_in_year, weekday_abbrev,
};
use kusa::error::KusaError;
use kusa::types::{CalendarDate, DAYS_PER_WEEK};

fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

fn to_naive(d: CalendarDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), d.day()).unwrap()
}

// ===========================================================================
// Calendar date construction
// ===========================================================================

mod construction {
    use super::*;

    #[test]
    fn accepts_valid_dates() {
        let d = date(2024, 2, 29);
        assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
    }

    #[test]
    fn rejects_february_29_in_common_year() {
        let err = CalendarDate::new(2023, 2, 29).unwrap_err();
        assert!(matches!(err, KusaError::InvalidDateInput { .. }));
        assert!(err.to_string().contains("2023-02-29"));
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(CalendarDate::new(2024, 0, 1).is_err());
        assert!(CalendarDate::new(2024, 13, 1).is_err());
        assert!(CalendarDate::new(2024, 4, 31).is_err());
        assert!(CalendarDate::new(2024, 1, 0).is_err());
        assert!(CalendarDate::new(0, 1, 1).is_err());
        assert!(CalendarDate::new(10000, 1, 1).is_err());
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
    }

    #[test]
    fn dates_order_chronologically() {
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
        assert!(date(2024, 1, 31) < date(2024, 2, 1));
    }
}

// ===========================================================================
// Date arithmetic
// ===========================================================================

mod arithmetic {
    use super::*;

    #[test]
    fn weekday_matches_chrono() {
        let mut d = date(1999, 1, 1);
        for _ in 0..3000 {
            assert_eq!(
                d.weekday(),
                to_naive(d).weekday().num_days_from_sunday(),
                "{d:?}"
            );
            d = d.next_day();
        }
    }

    #[test]
    fn add_days_matches_chrono() {
        let start = date(2023, 11, 15);
        for n in [-400_i64, -31, -1, 0, 1, 17, 46, 365, 366, 1000] {
            let expected = to_naive(start) + chrono::Duration::days(n);
            assert_eq!(to_naive(start.add_days(n)), expected, "n = {n}");
        }
    }

    #[test]
    fn next_and_prev_day_cross_boundaries() {
        assert_eq!(date(2023, 12, 31).next_day(), date(2024, 1, 1));
        assert_eq!(date(2024, 2, 28).next_day(), date(2024, 2, 29));
        assert_eq!(date(2023, 2, 28).next_day(), date(2023, 3, 1));
        assert_eq!(date(2024, 1, 1).prev_day(), date(2023, 12, 31));
        assert_eq!(date(2024, 3, 1).prev_day(), date(2024, 2, 29));
    }

    #[test]
    fn start_of_next_month() {
        assert_eq!(date(2024, 1, 31).start_of_next_month(), date(2024, 2, 1));
        assert_eq!(date(2024, 12, 5).start_of_next_month(), date(2025, 1, 1));
    }

    #[test]
    fn add_years_rolls_leap_day_forward() {
        assert_eq!(date(2023, 3, 1).add_years(1), date(2024, 3, 1));
        assert_eq!(date(2024, 2, 29).add_years(1), date(2025, 3, 1));
        assert_eq!(date(2024, 2, 29).add_years(-1), date(2023, 3, 1));
        assert_eq!(date(2024, 2, 29).add_years(4), date(2028, 2, 29));
    }

    #[test]
    fn days_until_is_signed() {
        assert_eq!(date(2024, 1, 1).days_until(date(2025, 1, 1)), 366);
        assert_eq!(date(2025, 1, 1).days_until(date(2024, 1, 1)), -366);
        assert_eq!(date(2024, 1, 1).days_until(date(2024, 1, 1)), 0);
    }

    #[test]
    fn weekday_abbreviations() {
        assert_eq!(weekday_abbrev(date(2021, 1, 3)), "sun");
        assert_eq!(weekday_abbrev(date(2021, 1, 6)), "wed");
        assert_eq!(weekday_abbrev(date(2021, 1, 9)), "sat");
    }
}

// ===========================================================================
// Year length and overflow
// ===========================================================================

mod year_span {
    use super::*;

    #[test]
    fn total_days_counts_leap_day_only_when_spanned() {
        assert_eq!(total_days_in_year(date(2024, 3, 1)), 365);
        assert_eq!(total_days_in_year(date(2023, 3, 1)), 366);
        assert_eq!(total_days_in_year(date(2024, 1, 1)), 366);
        assert_eq!(total_days_in_year(date(2024, 2, 29)), 366);
        assert_eq!(total_days_in_year(date(2021, 1, 3)), 365);
    }

    #[test]
    fn overflow_count_formula() {
        // Sunday start, common span
        assert_eq!(overflow_count(date(2021, 1, 3)), 1);
        // Saturday start, leap span
        assert_eq!(overflow_count(date(2023, 3, 4)), 8);
        assert_eq!(column_count(date(2021, 1, 3)), 53);
        assert_eq!(column_count(date(2023, 3, 4)), 54);
    }

    /// The 54th column only appears for a Saturday start over a leap span;
    /// its rows run `0..=overflow_count - 8`. Every start weekday is checked
    /// for both span lengths so a change of the threshold shows up here.
    #[test]
    fn overflow_threshold_for_every_weekday() {
        for (first, days) in [(date(2021, 3, 1), 365), (date(2023, 3, 1), 366)] {
            for offset in 0..7 {
                let start = first.add_days(offset);
                let grid = compute_grid(start);
                let overflow = overflow_count(start);

                assert_eq!(grid.total_days, days, "{start:?}");
                assert_eq!(overflow, days - 364 + start.weekday(), "{start:?}");
                assert_eq!(grid.column_count(), column_count(start), "{start:?}");

                let last_full = grid.column(52).unwrap();
                assert_eq!(last_full.days().count() as u32, overflow.min(7), "{start:?}");

                if overflow > 7 {
                    assert_eq!(start.weekday(), 6);
                    assert_eq!(days, 366);
                    let spill = grid.column(53).unwrap();
                    let rows: Vec<usize> = spill.days().map(|(row, _)| row).collect();
                    let expected: Vec<usize> = (0..=(overflow - 8) as usize).collect();
                    assert_eq!(rows, expected, "{start:?}");
                } else {
                    assert!(grid.column(53).is_none(), "{start:?}");
                }
            }
        }
    }

    #[test]
    fn overflow_column_holds_last_day() {
        let grid = compute_grid(date(2023, 3, 4));
        let spill = grid.column(53).unwrap();
        let (row, cell) = spill.days().next().unwrap();
        assert_eq!(row, 0);
        assert_eq!(cell.key, "2024-03-03");
        assert_eq!(spill.days().count(), 1);
    }
}

// ===========================================================================
// Week bucketing
// ===========================================================================

mod weeks {
    use super::*;

    #[test]
    fn month_weeks_are_padded_to_seven() {
        // February 2024 starts on Thursday
        let weeks = bucket_into_weeks(date(2024, 2, 1));
        assert_eq!(weeks.len(), 5);
        assert!(weeks[0].cells[..4].iter().all(|c| c.is_empty()));
        assert_eq!(weeks[0].cells[4].key, "2024-02-01");
        assert_eq!(weeks[0].cells[4].weekday, Some("thu"));
        assert_eq!(weeks[4].cells[4].key, "2024-02-29");
        assert!(weeks[4].cells[5..].iter().all(|c| c.is_empty()));

        let real: usize = weeks.iter().map(|w| w.days().count()).sum();
        assert_eq!(real, 29);
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_padding() {
        // August 2021 starts on Sunday
        let weeks = bucket_into_weeks(date(2021, 8, 1));
        assert_eq!(weeks[0].cells[0].day, Some(1));
        assert_eq!(weeks[0].cells[0].weekday, Some("sun"));
        assert_eq!(weeks.len(), 5);
    }

    #[test]
    fn empty_cells_are_blank() {
        let weeks = bucket_into_weeks(date(2024, 2, 1));
        let pad = &weeks[0].cells[0];
        assert_eq!(pad.key, "");
        assert_eq!(pad.day, None);
        assert_eq!(pad.weekday, None);
    }
}

// ===========================================================================
// Grid layout
// ===========================================================================

mod grid {
    use super::*;

    fn sample_starts() -> Vec<CalendarDate> {
        let mut starts = Vec::new();
        let mut d = date(2019, 12, 25);
        // Six years of start dates, every 5th day
        for _ in 0..440 {
            starts.push(d);
            d = d.add_days(5);
        }
        starts
    }

    #[test]
    fn real_cells_match_year_length() {
        for start in sample_starts() {
            let grid = compute_grid(start);
            assert_eq!(grid.days().count() as u32, total_days_in_year(start), "{start:?}");
        }
    }

    #[test]
    fn every_week_has_seven_cells() {
        for start in sample_starts() {
            let grid = compute_grid(start);
            for (_, _, week) in grid.columns() {
                assert_eq!(week.cells.len(), DAYS_PER_WEEK);
            }
        }
    }

    #[test]
    fn keys_are_consecutive_dates() {
        for start in sample_starts().into_iter().step_by(7) {
            let grid = compute_grid(start);
            let keys: Vec<&str> = grid.days().map(|c| c.key.as_str()).collect();
            let mut expected = to_naive(start);
            for key in &keys {
                assert_eq!(*key, expected.format("%Y-%m-%d").to_string());
                expected = expected.succ_opt().unwrap();
            }
            let last = start.add_days(i64::from(grid.total_days) - 1);
            assert_eq!(
                keys.last().map(|k| k.to_string()),
                Some(to_naive(last).format("%Y-%m-%d").to_string())
            );
        }
    }

    #[test]
    fn bands_split_at_27_columns() {
        let grid = compute_grid(date(2021, 1, 3));
        assert_eq!(grid.bands.len(), 2);
        assert_eq!(grid.bands[0].len(), 27);
        assert_eq!(grid.bands[1].len(), 26);

        let grid = compute_grid(date(2023, 3, 4));
        assert_eq!(grid.bands[1].len(), 27);
    }

    #[test]
    fn sunday_start() {
        let grid = compute_grid(date(2021, 1, 3));
        let first = &grid.bands[0][0];
        assert_eq!(first.cells.iter().filter(|c| c.is_empty()).count(), 0);
        assert_eq!(first.cells[0].key, "2021-01-03");
        assert_eq!(grid.month_labels[0].text, "Jan");
        assert_eq!(grid.month_labels[0].column, 0);
    }

    #[test]
    fn wednesday_start() {
        let grid = compute_grid(date(2021, 1, 6));
        let first = &grid.bands[0][0];
        assert!(first.cells[..3].iter().all(|c| c.is_empty()));
        assert_eq!(first.cells[3].key, "2021-01-06");
        assert_eq!(first.cells[3].weekday, Some("wed"));
    }
}

// ===========================================================================
// Month labels
// ===========================================================================

mod month_labels {
    use super::*;

    #[test]
    fn labels_for_sunday_start() {
        let labels = month_label_positions(date(2021, 1, 3), 53);
        let pairs: Vec<(usize, &str)> = labels.iter().map(|l| (l.column, l.text)).collect();
        assert_eq!(
            pairs,
            vec![
                (0, "Jan"),
                (4, "Feb"),
                (8, "Mar"),
                (12, "Apr"),
                (17, "May"),
                (21, "Jun"),
                (25, "Jul"),
                (30, "Aug"),
                (34, "Sep"),
                (38, "Oct"),
                (43, "Nov"),
                (47, "Dec"),
                (52, "Jan"),
            ]
        );
    }

    #[test]
    fn crowded_first_label_is_dropped() {
        // Friday of the first week is Jan 29, the next one Feb 5
        let labels = month_label_positions(date(2021, 1, 27), 53);
        assert_eq!(labels[0].text, "Feb");
        assert_eq!(labels[0].column, 1);
        assert_eq!(labels[1].text, "Mar");
    }

    #[test]
    fn labels_reach_overflow_column() {
        let labels = month_label_positions(date(2023, 3, 4), 54);
        assert_eq!(labels.first().map(|l| (l.column, l.text)), Some((0, "Mar")));
        assert_eq!(labels.last().map(|l| (l.column, l.text)), Some((52, "Mar")));
    }

    #[test]
    fn columns_increase_and_texts_alternate() {
        let mut start = date(2020, 1, 1);
        for _ in 0..120 {
            let grid = compute_grid(start);
            for pair in grid.month_labels.windows(2) {
                assert!(pair[0].column < pair[1].column, "{start:?}");
                assert_ne!(pair[0].text, pair[1].text, "{start:?}");
            }
            if grid.month_labels.len() >= 2 {
                assert!(grid.month_labels[1].column - grid.month_labels[0].column >= 2);
            }
            assert!(grid.month_labels.iter().all(|l| l.column < grid.column_count()));
            start = start.add_days(3);
        }
    }
}
