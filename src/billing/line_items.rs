use super::{BillingLineItem, BillingPeriodCalculator, Deployment, LineItemKey, LineItemKind, Rates};
use chrono::{Duration, NaiveDate};
use rayon::prelude::*;

impl BillingPeriodCalculator {
    /// Billable items for one deployment, ascending by start date.
    ///
    /// Output is a pure function of its inputs: recomputing yields the same ids,
    /// amounts and order.
    pub fn generate_line_items(&self, deployment: &Deployment, rates: &Rates) -> Vec<BillingLineItem> {
        let periods = self.compute_periods(deployment.start_date, deployment.end_date, deployment.kind);
        let period_length = i64::from(self.config().period_length());
        let start = deployment.start_date;
        let mut items = Vec::with_capacity(
            (periods.period_15_day_count + periods.over_and_above_count + periods.remainder_days) as usize,
        );

        for i in 0..periods.period_15_day_count {
            let p_start = start + Duration::days(i64::from(i) * period_length);
            let p_end = p_start + Duration::days(period_length - 1);
            items.push(line_item(
                deployment,
                LineItemKind::FifteenDayPeriod,
                i,
                (p_start, p_end),
                rates.period_15_day_rate,
                None,
            ));
            if i < periods.over_and_above_count {
                items.push(line_item(
                    deployment,
                    LineItemKind::OverAndAbove,
                    i,
                    (p_start, p_end),
                    rates.over_and_above_rate,
                    None,
                ));
            }
        }

        let remainder_start = start + Duration::days(i64::from(periods.period_15_day_count) * period_length);
        for i in 0..periods.remainder_days {
            let day = remainder_start + Duration::days(i64::from(i));
            items.push(line_item(
                deployment,
                LineItemKind::DailyRate,
                i,
                (day, day),
                rates.daily_rate,
                Some(format!("Day {} of remainder", i + 1)),
            ));
        }

        items.sort_by_key(|item| item.start_date);
        items
    }

    /// Items for many deployments, each priced with its own rates. Deployments are
    /// processed in parallel; the result is concatenated in input order and then
    /// stably sorted by start date.
    pub fn generate_portfolio_line_items(&self, deployments: &[Deployment]) -> Vec<BillingLineItem> {
        let per_deployment: Vec<Vec<BillingLineItem>> = deployments
            .par_iter()
            .map(|deployment| self.generate_line_items(deployment, &deployment.rates))
            .collect();

        let mut items: Vec<BillingLineItem> = per_deployment.into_iter().flatten().collect();
        items.sort_by_key(|item| item.start_date);
        items
    }
}

fn line_item(
    deployment: &Deployment,
    kind: LineItemKind,
    index: u32,
    (start_date, end_date): (NaiveDate, NaiveDate),
    amount: f64,
    description: Option<String>,
) -> BillingLineItem {
    BillingLineItem {
        id: LineItemKey::new(deployment.id.clone(), kind, index).to_string(),
        deployment_id: deployment.id.clone(),
        deployment_name: deployment.name.clone(),
        kind,
        index,
        start_date,
        end_date,
        amount,
        description,
    }
}

pub fn generate_line_items(deployment: &Deployment, rates: &Rates) -> Vec<BillingLineItem> {
    BillingPeriodCalculator::default().generate_line_items(deployment, rates)
}

pub fn generate_portfolio_line_items(deployments: &[Deployment]) -> Vec<BillingLineItem> {
    BillingPeriodCalculator::default().generate_portfolio_line_items(deployments)
}
