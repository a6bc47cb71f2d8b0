use crate::billing::BillingPeriodCalculator;
use crate::calendar;
use crate::labor::LaborTimeAggregator;
use crate::schedule::DependencyScheduler;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

const MINUTES_PER_DAY: i64 = 24 * 60;
const DEFAULT_PERIOD_LENGTH_DAYS: u32 = 15;
const DEFAULT_FISCAL_YEAR_START_MONTH: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for every engine component. Defaults match the contract constants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scheduler: SchedulerConfig,
    pub billing: BillingConfig,
    pub labor: LaborConfig,
    pub calendar: CalendarConfig,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn dependency_scheduler(&self) -> DependencyScheduler {
        DependencyScheduler::new(self.scheduler)
    }

    pub fn billing_calculator(&self) -> BillingPeriodCalculator {
        BillingPeriodCalculator::new(self.billing)
    }

    pub fn labor_aggregator(&self) -> LaborTimeAggregator {
        LaborTimeAggregator::new(self.labor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LagUnit {
    #[default]
    Days,
    Minutes,
}

impl LagUnit {
    /// Whole days represented by `lag`; minute lags truncate toward zero.
    pub fn to_days(self, lag: i64) -> i64 {
        match self {
            LagUnit::Days => lag,
            LagUnit::Minutes => lag / MINUTES_PER_DAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub lag_unit: LagUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverAndAbovePolicy {
    /// One charge per completed period, Land deployments only.
    #[default]
    LandOnly,
    /// One charge per completed period for every deployment kind.
    AllKinds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub period_length_days: u32,
    pub over_and_above: OverAndAbovePolicy,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            period_length_days: DEFAULT_PERIOD_LENGTH_DAYS,
            over_and_above: OverAndAbovePolicy::default(),
        }
    }
}

impl BillingConfig {
    pub fn period_length(&self) -> u32 {
        if self.period_length_days == 0 {
            DEFAULT_PERIOD_LENGTH_DAYS
        } else {
            self.period_length_days
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaborConfig {
    pub weekly_threshold_hours: f64,
    /// Extra fraction of straight time owed per overtime hour.
    pub overtime_premium_factor: f64,
}

impl Default for LaborConfig {
    fn default() -> Self {
        Self {
            weekly_threshold_hours: 40.0,
            overtime_premium_factor: 0.5,
        }
    }
}

/// A contract ordering period, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingPeriod {
    pub id: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl OrderingPeriod {
    pub fn new(id: impl Into<String>, label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            start,
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub fiscal_year_start_month: u32,
    pub ordering_periods: Vec<OrderingPeriod>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            fiscal_year_start_month: DEFAULT_FISCAL_YEAR_START_MONTH,
            ordering_periods: default_ordering_periods(),
        }
    }
}

impl CalendarConfig {
    pub fn fiscal_start_month(&self) -> u32 {
        if (1..=12).contains(&self.fiscal_year_start_month) {
            self.fiscal_year_start_month
        } else {
            DEFAULT_FISCAL_YEAR_START_MONTH
        }
    }

    pub fn fiscal_year(&self, date: NaiveDate) -> i32 {
        calendar::fiscal_year(date, self.fiscal_start_month())
    }

    pub fn ordering_period(&self, date: NaiveDate) -> Option<&OrderingPeriod> {
        calendar::ordering_period(date, &self.ordering_periods)
    }
}

fn default_ordering_periods() -> Vec<OrderingPeriod> {
    // OP1 is a short base period; the options follow the Oct 1 - Sep 30 cycle.
    let mut periods = Vec::with_capacity(5);
    let bounds = [
        ((2024, 7, 14), (2025, 9, 30)),
        ((2025, 10, 1), (2026, 9, 30)),
        ((2026, 10, 1), (2027, 9, 30)),
        ((2027, 10, 1), (2028, 9, 30)),
        ((2028, 10, 1), (2029, 9, 30)),
    ];
    for (idx, ((sy, sm, sd), (ey, em, ed))) in bounds.into_iter().enumerate() {
        if let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(sy, sm, sd),
            NaiveDate::from_ymd_opt(ey, em, ed),
        ) {
            let number = idx + 1;
            periods.push(OrderingPeriod::new(
                number.to_string(),
                format!("OP{number}"),
                start,
                end,
            ));
        }
    }
    periods
}
