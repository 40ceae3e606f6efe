//! Date-window resolution
//!
//! All date math runs in UTC against a caller-supplied `now`, which
//! keeps the engine deterministic and testable.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};

/// Preset windows offered by the analytics screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Today,
    /// ISO week, Monday first
    Week,
    /// Calendar month
    Month,
    /// Caller-supplied bounds; each defaults to today's bound if omitted
    Custom,
}

/// Inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateFilter {
    /// Inclusive on both bounds
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }

    /// Resolve a preset against `now`
    pub fn resolve(
        preset: RangePreset,
        now: DateTime<Utc>,
        custom_start: Option<DateTime<Utc>>,
        custom_end: Option<DateTime<Utc>>,
    ) -> Self {
        let today = now.date_naive();
        match preset {
            RangePreset::Today => Self {
                start: day_start(today),
                end: day_end(today),
            },
            RangePreset::Week => {
                let week = today.week(Weekday::Mon);
                Self {
                    start: day_start(week.first_day()),
                    end: day_end(week.last_day()),
                }
            }
            RangePreset::Month => Self {
                start: day_start(month_first_day(today)),
                end: day_end(month_last_day(today)),
            },
            RangePreset::Custom => Self {
                start: custom_start.unwrap_or_else(|| day_start(today)),
                end: custom_end.unwrap_or_else(|| day_end(today)),
            },
        }
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("valid midnight"))
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(
        &date
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("valid end of day"),
    )
}

fn month_first_day(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 always valid")
}

fn month_last_day(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("valid first of next month")
        .pred_opt()
        .expect("valid last day of month")
}
