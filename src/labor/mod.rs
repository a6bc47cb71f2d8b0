//! Weekly overtime and monthly equivalent-hour rollups of labor entries.

use crate::calendar::YearMonth;
use crate::config::LaborConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub mod monthly;
pub mod overtime;

pub use monthly::monthly_equivalent_hours;
pub use overtime::weekly_overtime;

pub type CategoryId = String;

/// Equivalent hours per calendar month, then per category.
pub type MonthlyCategoryTotals = BTreeMap<YearMonth, BTreeMap<CategoryId, f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborEntry {
    pub date: NaiveDate,
    pub hours: f64,
    #[serde(alias = "laborCategoryId")]
    pub category_id: CategoryId,
}

impl LaborEntry {
    pub fn new(date: NaiveDate, hours: f64, category_id: impl Into<CategoryId>) -> Self {
        Self {
            date,
            hours,
            category_id: category_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborCategory {
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_overtime_eligible: bool,
}

impl LaborCategory {
    pub fn new(id: impl Into<CategoryId>, is_overtime_eligible: bool) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            is_overtime_eligible,
        }
    }
}

/// Hours for one ISO week (Monday start) split into straight time and overtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub week_start: NaiveDate,
    pub iso_year: i32,
    pub iso_week: u32,
    pub total_hours: f64,
    pub eligible_hours: f64,
    pub ineligible_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    /// Eligible hours paid at straight time.
    pub eligible_regular: f64,
    pub entries: Vec<LaborEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct LaborTimeAggregator {
    config: LaborConfig,
}

impl LaborTimeAggregator {
    pub fn new(config: LaborConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LaborConfig {
        &self.config
    }
}

/// Eligibility by category id. Unknown ids are absent and read as ineligible;
/// on duplicate ids the first definition wins.
fn eligibility(categories: &[LaborCategory]) -> HashMap<&str, bool> {
    let mut map = HashMap::with_capacity(categories.len());
    for category in categories {
        map.entry(category.id.as_str())
            .or_insert(category.is_overtime_eligible);
    }
    map
}
