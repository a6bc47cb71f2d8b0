use crate::config::OrderingPeriod;
use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar month bucket, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// `date` shifted by `days`, saturating at `NaiveDate::MIN` / `NaiveDate::MAX`.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Monday of the ISO week containing `date`.
pub fn iso_week_start(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Inclusive day count of `start..=end`; zero when `end` precedes `start`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(0)
}

/// Fiscal year label for `date`. A year starting in April runs Apr 2025 - Mar 2026 as FY2026.
pub fn fiscal_year(date: NaiveDate, start_month: u32) -> i32 {
    if start_month > 1 && date.month() >= start_month {
        date.year() + 1
    } else {
        date.year()
    }
}

pub fn ordering_period(date: NaiveDate, periods: &[OrderingPeriod]) -> Option<&OrderingPeriod> {
    periods.iter().find(|p| p.contains(date))
}

/// Where a deployment stands relative to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentPhase {
    Planned,
    Started,
    Completed,
}

impl DeploymentPhase {
    pub fn at(start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        if today < start {
            return DeploymentPhase::Planned;
        }
        match end {
            Some(end) if today > end => DeploymentPhase::Completed,
            _ => DeploymentPhase::Started,
        }
    }
}
