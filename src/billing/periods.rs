use super::{BillingPeriods, BillingSummary, Deployment, DeploymentKind, Rates};
use crate::calendar::inclusive_days;
use crate::config::{BillingConfig, OverAndAbovePolicy};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default)]
pub struct BillingPeriodCalculator {
    config: BillingConfig,
}

impl BillingPeriodCalculator {
    pub fn new(config: BillingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Splits `start..=end` into full periods and trailing days.
    /// An empty or inverted range yields all zeros.
    pub fn compute_periods(&self, start: NaiveDate, end: NaiveDate, kind: DeploymentKind) -> BillingPeriods {
        let total_days = inclusive_days(start, end);
        if total_days <= 0 {
            tracing::debug!(%start, %end, "non-positive billing range, nothing to bill");
            return BillingPeriods::default();
        }
        let total_days = u32::try_from(total_days).unwrap_or(u32::MAX);
        let period_length = self.config.period_length();

        let period_15_day_count = total_days / period_length;
        let over_and_above_count = match (self.config.over_and_above, kind) {
            (OverAndAbovePolicy::AllKinds, _) | (OverAndAbovePolicy::LandOnly, DeploymentKind::Land) => {
                period_15_day_count
            }
            (OverAndAbovePolicy::LandOnly, DeploymentKind::Shore) => 0,
        };

        BillingPeriods {
            period_15_day_count,
            remainder_days: total_days % period_length,
            over_and_above_count,
            total_days,
        }
    }

    pub fn summarize(&self, deployment: &Deployment, rates: &Rates) -> BillingSummary {
        let periods = self.compute_periods(deployment.start_date, deployment.end_date, deployment.kind);
        BillingSummary {
            deployment_id: deployment.id.clone(),
            periods,
            estimated_cost: estimate_cost(&periods, rates),
        }
    }
}

pub fn compute_periods(start: NaiveDate, end: NaiveDate, kind: DeploymentKind) -> BillingPeriods {
    BillingPeriodCalculator::default().compute_periods(start, end, kind)
}

pub fn estimate_cost(periods: &BillingPeriods, rates: &Rates) -> f64 {
    f64::from(periods.period_15_day_count) * rates.period_15_day_rate
        + f64::from(periods.remainder_days) * rates.daily_rate
        + f64::from(periods.over_and_above_count) * rates.over_and_above_rate
}
