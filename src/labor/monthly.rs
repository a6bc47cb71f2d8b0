use super::{LaborCategory, LaborEntry, LaborTimeAggregator, MonthlyCategoryTotals, eligibility};
use crate::calendar::YearMonth;

impl LaborTimeAggregator {
    /// Straight hours plus overtime premium, bucketed by the month of each entry's date.
    ///
    /// A week's premium is shared among its eligible entries in proportion to their
    /// hours, so a week straddling two months splits its premium between them.
    pub fn monthly_equivalent_hours(
        &self,
        entries: &[LaborEntry],
        categories: &[LaborCategory],
    ) -> MonthlyCategoryTotals {
        let eligible = eligibility(categories);
        let factor = self.config().overtime_premium_factor;
        let mut months = MonthlyCategoryTotals::new();

        for week in self.weekly_overtime(entries, categories) {
            let premium = week.overtime_hours * factor;
            for entry in &week.entries {
                let mut hours = entry.hours;
                let is_eligible = eligible.get(entry.category_id.as_str()).copied().unwrap_or(false);
                // No eligible hours means no premium to share.
                if is_eligible && week.eligible_hours > 0.0 {
                    hours += premium * (entry.hours / week.eligible_hours);
                }
                *months
                    .entry(YearMonth::of(entry.date))
                    .or_default()
                    .entry(entry.category_id.clone())
                    .or_insert(0.0) += hours;
            }
        }

        months
    }
}

pub fn monthly_equivalent_hours(entries: &[LaborEntry], categories: &[LaborCategory]) -> MonthlyCategoryTotals {
    LaborTimeAggregator::default().monthly_equivalent_hours(entries, categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn premium_is_shared_by_eligible_categories() {
        let categories = vec![
            LaborCategory::new("senior", true),
            LaborCategory::new("junior", true),
            LaborCategory::new("pm", false),
        ];
        // 60 eligible hours -> 20 OT -> 10 premium hours, split 3:1
        let entries = vec![
            LaborEntry::new(d(2025, 1, 6), 45.0, "senior"),
            LaborEntry::new(d(2025, 1, 7), 15.0, "junior"),
            LaborEntry::new(d(2025, 1, 8), 10.0, "pm"),
        ];
        let months = monthly_equivalent_hours(&entries, &categories);
        let jan = &months[&YearMonth::new(2025, 1)];
        assert_eq!(jan["senior"], 45.0 + 7.5);
        assert_eq!(jan["junior"], 15.0 + 2.5);
        assert_eq!(jan["pm"], 10.0);
    }

    #[test]
    fn week_without_eligible_hours_adds_no_premium() {
        let categories = vec![LaborCategory::new("pm", false)];
        let entries = vec![LaborEntry::new(d(2025, 1, 6), 0.0, "pm")];
        let months = monthly_equivalent_hours(&entries, &categories);
        assert_eq!(months[&YearMonth::new(2025, 1)]["pm"], 0.0);
    }
}
