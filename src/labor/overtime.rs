use super::{LaborCategory, LaborEntry, LaborTimeAggregator, WeekSummary, eligibility};
use crate::calendar::iso_week_start;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Default)]
struct WeekBucket {
    eligible_hours: f64,
    ineligible_hours: f64,
    entries: Vec<LaborEntry>,
}

impl LaborTimeAggregator {
    /// Per-week overtime split, ascending by week start.
    pub fn weekly_overtime(&self, entries: &[LaborEntry], categories: &[LaborCategory]) -> Vec<WeekSummary> {
        let eligible = eligibility(categories);
        let mut weeks: BTreeMap<NaiveDate, WeekBucket> = BTreeMap::new();

        for entry in entries {
            let bucket = weeks.entry(iso_week_start(entry.date)).or_default();
            match eligible.get(entry.category_id.as_str()).copied() {
                Some(true) => bucket.eligible_hours += entry.hours,
                Some(false) => bucket.ineligible_hours += entry.hours,
                None => {
                    tracing::debug!(
                        category = %entry.category_id,
                        date = %entry.date,
                        "labor entry references unknown category, counting as ineligible"
                    );
                    bucket.ineligible_hours += entry.hours;
                }
            }
            bucket.entries.push(entry.clone());
        }

        let threshold = self.config().weekly_threshold_hours;
        weeks
            .into_iter()
            .map(|(week_start, bucket)| {
                let eligible_regular = bucket.eligible_hours.min(threshold);
                let overtime_hours = (bucket.eligible_hours - threshold).max(0.0);
                let iso = week_start.iso_week();
                WeekSummary {
                    week_start,
                    iso_year: iso.year(),
                    iso_week: iso.week(),
                    total_hours: bucket.eligible_hours + bucket.ineligible_hours,
                    eligible_hours: bucket.eligible_hours,
                    ineligible_hours: bucket.ineligible_hours,
                    regular_hours: bucket.ineligible_hours + eligible_regular,
                    overtime_hours,
                    eligible_regular,
                    entries: bucket.entries,
                }
            })
            .collect()
    }
}

pub fn weekly_overtime(entries: &[LaborEntry], categories: &[LaborCategory]) -> Vec<WeekSummary> {
    LaborTimeAggregator::default().weekly_overtime(entries, categories)
}
