//! Tabular views of engine output for dashboards and charts.

use crate::billing::BillingLineItem;
use crate::labor::{MonthlyCategoryTotals, WeekSummary};
use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;

/// One row per line item, in the order given.
pub fn line_items_frame(items: &[BillingLineItem]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    let deployment_ids: Vec<&str> = items.iter().map(|i| i.deployment_id.as_str()).collect();
    let names: Vec<&str> = items.iter().map(|i| i.deployment_name.as_str()).collect();
    let kinds: Vec<&str> = items.iter().map(|i| i.kind.label()).collect();
    let indexes: Vec<u32> = items.iter().map(|i| i.index).collect();
    let amounts: Vec<f64> = items.iter().map(|i| i.amount).collect();
    let descriptions: Vec<Option<&str>> = items.iter().map(|i| i.description.as_deref()).collect();

    let columns = vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("deployment_id"), deployment_ids).into_column(),
        Series::new(PlSmallStr::from_static("deployment_name"), names).into_column(),
        Series::new(PlSmallStr::from_static("kind"), kinds).into_column(),
        Series::new(PlSmallStr::from_static("index"), indexes).into_column(),
        date_series("start_date", items.iter().map(|i| i.start_date))?.into_column(),
        date_series("end_date", items.iter().map(|i| i.end_date))?.into_column(),
        Series::new(PlSmallStr::from_static("amount"), amounts).into_column(),
        Series::new(PlSmallStr::from_static("description"), descriptions).into_column(),
    ];
    DataFrame::new(columns)
}

pub fn week_summaries_frame(weeks: &[WeekSummary]) -> PolarsResult<DataFrame> {
    let hours = |name: &'static str, f: fn(&WeekSummary) -> f64| {
        let values: Vec<f64> = weeks.iter().map(f).collect();
        Series::new(PlSmallStr::from_static(name), values).into_column()
    };
    let iso_years: Vec<i32> = weeks.iter().map(|w| w.iso_year).collect();
    let iso_weeks: Vec<u32> = weeks.iter().map(|w| w.iso_week).collect();

    let columns = vec![
        date_series("week_start", weeks.iter().map(|w| w.week_start))?.into_column(),
        Series::new(PlSmallStr::from_static("iso_year"), iso_years).into_column(),
        Series::new(PlSmallStr::from_static("iso_week"), iso_weeks).into_column(),
        hours("total_hours", |w| w.total_hours),
        hours("eligible_hours", |w| w.eligible_hours),
        hours("ineligible_hours", |w| w.ineligible_hours),
        hours("regular_hours", |w| w.regular_hours),
        hours("overtime_hours", |w| w.overtime_hours),
        hours("eligible_regular", |w| w.eligible_regular),
    ];
    DataFrame::new(columns)
}

/// Long format: one row per (month, category), months ascending then category ids ascending.
pub fn monthly_totals_frame(totals: &MonthlyCategoryTotals) -> PolarsResult<DataFrame> {
    let mut months: Vec<String> = Vec::new();
    let mut categories: Vec<&str> = Vec::new();
    let mut values: Vec<f64> = Vec::new();

    for (month, per_category) in totals {
        for (category_id, hours) in per_category {
            months.push(month.to_string());
            categories.push(category_id.as_str());
            values.push(*hours);
        }
    }

    let columns = vec![
        Series::new(PlSmallStr::from_static("month"), months).into_column(),
        Series::new(PlSmallStr::from_static("category_id"), categories).into_column(),
        Series::new(PlSmallStr::from_static("equivalent_hours"), values).into_column(),
    ];
    DataFrame::new(columns)
}

fn date_series(name: &'static str, dates: impl Iterator<Item = NaiveDate>) -> PolarsResult<Series> {
    let days = dates.map(date_to_i32).collect::<PolarsResult<Vec<i32>>>()?;
    Series::new(PlSmallStr::from_static(name), days).cast(&DataType::Date)
}

/// Days since the Unix epoch (`NaiveDate::default()`), as stored in a `Date` column.
fn date_to_i32(date: NaiveDate) -> PolarsResult<i32> {
    let days = (date - NaiveDate::default()).num_days();
    i32::try_from(days)
        .map_err(|_| PolarsError::ComputeError(format!("date {date} is outside the Date column range").into()))
}
