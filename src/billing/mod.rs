//! Billing-period decomposition of deployments into priced line items.
//!
//! Line items are a pure view over a [`Deployment`]: they are recomputed on every
//! read and never stored. Their ids are derived from [`LineItemKey`], and other
//! records (status, invoice links) are keyed by those ids, so the key format is
//! part of the public contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod line_items;
pub mod periods;

pub use line_items::{generate_line_items, generate_portfolio_line_items};
pub use periods::{BillingPeriodCalculator, compute_periods, estimate_cost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentKind {
    Land,
    #[serde(alias = "Ship")]
    Shore,
}

/// CLIN prices applied to a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rates {
    pub period_15_day_rate: f64,
    pub daily_rate: f64,
    pub over_and_above_rate: f64,
}

impl Rates {
    pub fn new(period_15_day_rate: f64, daily_rate: f64, over_and_above_rate: f64) -> Self {
        Self {
            period_15_day_rate,
            daily_rate,
            over_and_above_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: DeploymentKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub rates: Rates,
}

impl Deployment {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: DeploymentKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rates: Rates,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            start_date,
            end_date,
            rates,
        }
    }
}

/// Decomposition of a date range into billable units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingPeriods {
    pub period_15_day_count: u32,
    pub remainder_days: u32,
    pub over_and_above_count: u32,
    pub total_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    pub deployment_id: String,
    pub periods: BillingPeriods,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineItemKind {
    FifteenDayPeriod,
    DailyRate,
    OverAndAbove,
}

impl LineItemKind {
    /// Segment used inside line-item ids. Changing it orphans stored associations.
    pub fn id_tag(&self) -> &'static str {
        match self {
            LineItemKind::FifteenDayPeriod => "15day",
            LineItemKind::DailyRate => "daily",
            LineItemKind::OverAndAbove => "oa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LineItemKind::FifteenDayPeriod => "15-Day CLIN",
            LineItemKind::DailyRate => "Daily Rate",
            LineItemKind::OverAndAbove => "Over & Above",
        }
    }
}

/// Composite key a line-item id is rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineItemKey {
    pub deployment_id: String,
    pub kind: LineItemKind,
    pub index: u32,
}

impl LineItemKey {
    pub fn new(deployment_id: impl Into<String>, kind: LineItemKind, index: u32) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            kind,
            index,
        }
    }
}

impl fmt::Display for LineItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.deployment_id, self.kind.id_tag(), self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineItemStatus {
    Pending,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingLineItem {
    pub id: String,
    pub deployment_id: String,
    pub deployment_name: String,
    #[serde(rename = "type")]
    pub kind: LineItemKind,
    pub index: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BillingLineItem {
    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(self.deployment_id.clone(), self.kind, self.index)
    }

    /// Status shown before anyone records one: items whose span has ended are complete.
    pub fn default_status(&self, today: NaiveDate) -> LineItemStatus {
        if self.end_date < today {
            LineItemStatus::Complete
        } else {
            LineItemStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_renders_stable_id() {
        let key = LineItemKey::new("dep-7", LineItemKind::OverAndAbove, 2);
        assert_eq!(key.to_string(), "dep-7_oa_2");
        assert_eq!(
            LineItemKey::new("dep-7", LineItemKind::FifteenDayPeriod, 0).to_string(),
            "dep-7_15day_0"
        );
        assert_eq!(
            LineItemKey::new("dep-7", LineItemKind::DailyRate, 4).to_string(),
            "dep-7_daily_4"
        );
    }

    #[test]
    fn rates_use_stored_field_names() {
        let json = r#"{"period15DayRate":1500.0,"dailyRate":120.5}"#;
        let rates: Rates = serde_json::from_str(json).unwrap();
        assert_eq!(rates, Rates::new(1500.0, 120.5, 0.0));
    }

    #[test]
    fn ship_is_read_as_shore() {
        let kind: DeploymentKind = serde_json::from_str("\"Ship\"").unwrap();
        assert_eq!(kind, DeploymentKind::Shore);
    }
}
