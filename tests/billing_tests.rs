use chrono::{Duration, NaiveDate};
use deploy_ledger::{
    BillingConfig, BillingPeriodCalculator, BillingPeriods, Deployment, DeploymentKind, LineItemKind,
    LineItemStatus, OverAndAbovePolicy, Rates, compute_periods, estimate_cost, generate_line_items,
    generate_portfolio_line_items,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rates() -> Rates {
    Rates::new(15_000.0, 1_100.0, 2_500.0)
}

fn land(id: &str, start: NaiveDate, end: NaiveDate) -> Deployment {
    Deployment::new(id, format!("Land {id}"), DeploymentKind::Land, start, end, rates())
}

#[test]
fn twenty_day_land_deployment() {
    let p = compute_periods(d(2025, 1, 1), d(2025, 1, 20), DeploymentKind::Land);
    assert_eq!(p.total_days, 20);
    assert_eq!(p.period_15_day_count, 1);
    assert_eq!(p.remainder_days, 5);
    // One over-and-above charge per completed Land period
    assert_eq!(p.over_and_above_count, 1);
}

#[test]
fn thirty_five_day_shore_deployment() {
    let p = compute_periods(d(2025, 1, 1), d(2025, 2, 4), DeploymentKind::Shore);
    assert_eq!(
        p,
        BillingPeriods {
            period_15_day_count: 2,
            remainder_days: 5,
            over_and_above_count: 0,
            total_days: 35,
        }
    );
}

#[test]
fn all_kinds_policy_charges_shore_too() {
    let calc = BillingPeriodCalculator::new(BillingConfig {
        over_and_above: OverAndAbovePolicy::AllKinds,
        ..BillingConfig::default()
    });
    let p = calc.compute_periods(d(2025, 1, 1), d(2025, 2, 4), DeploymentKind::Shore);
    assert_eq!(p.over_and_above_count, 2);
}

#[test]
fn periods_and_remainder_always_cover_the_range() {
    let start = d(2025, 1, 1);
    for len in 1..=120_i64 {
        let end = start + Duration::days(len - 1);
        for kind in [DeploymentKind::Land, DeploymentKind::Shore] {
            let p = compute_periods(start, end, kind);
            assert_eq!(i64::from(p.total_days), len);
            assert_eq!(p.period_15_day_count * 15 + p.remainder_days, p.total_days);
            assert!(p.remainder_days < 15);
        }
    }
}

#[test]
fn inverted_range_is_all_zero() {
    for back in 1..=10_i64 {
        let start = d(2025, 3, 1);
        let end = start - Duration::days(back);
        assert_eq!(compute_periods(start, end, DeploymentKind::Land), BillingPeriods::default());
    }
}

#[test]
fn estimated_cost_prices_every_unit() {
    let p = compute_periods(d(2025, 1, 1), d(2025, 1, 20), DeploymentKind::Land);
    assert_eq!(estimate_cost(&p, &rates()), 15_000.0 + 5.0 * 1_100.0 + 2_500.0);

    let shore = compute_periods(d(2025, 1, 1), d(2025, 2, 4), DeploymentKind::Shore);
    assert_eq!(estimate_cost(&shore, &rates()), 2.0 * 15_000.0 + 5.0 * 1_100.0);
}

#[test]
fn land_line_items_cover_periods_then_remainder() {
    let dep = land("dep1", d(2025, 1, 1), d(2025, 1, 20));
    let items = generate_line_items(&dep, &dep.rates);

    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "dep1_15day_0",
            "dep1_oa_0",
            "dep1_daily_0",
            "dep1_daily_1",
            "dep1_daily_2",
            "dep1_daily_3",
            "dep1_daily_4",
        ]
    );

    assert_eq!(items[0].kind, LineItemKind::FifteenDayPeriod);
    assert_eq!((items[0].start_date, items[0].end_date), (d(2025, 1, 1), d(2025, 1, 15)));
    assert_eq!(items[0].amount, 15_000.0);
    assert_eq!(items[1].kind, LineItemKind::OverAndAbove);
    assert_eq!((items[1].start_date, items[1].end_date), (d(2025, 1, 1), d(2025, 1, 15)));
    assert_eq!(items[1].amount, 2_500.0);

    let last = &items[6];
    assert_eq!(last.kind, LineItemKind::DailyRate);
    assert_eq!((last.start_date, last.end_date), (d(2025, 1, 20), d(2025, 1, 20)));
    assert_eq!(last.amount, 1_100.0);
    assert_eq!(last.description.as_deref(), Some("Day 5 of remainder"));
    assert_eq!(last.deployment_name, "Land dep1");

    let total: f64 = items.iter().map(|i| i.amount).sum();
    let periods = compute_periods(dep.start_date, dep.end_date, dep.kind);
    assert_eq!(total, estimate_cost(&periods, &dep.rates));
}

#[test]
fn second_period_span_is_offset_by_fifteen_days() {
    let dep = land("d", d(2025, 1, 1), d(2025, 1, 30));
    let items = generate_line_items(&dep, &dep.rates);
    assert_eq!(items.len(), 4);
    let second = items.iter().find(|i| i.id == "d_15day_1").unwrap();
    assert_eq!((second.start_date, second.end_date), (d(2025, 1, 16), d(2025, 1, 30)));
    assert!(items.windows(2).all(|w| w[0].start_date <= w[1].start_date));
}

#[test]
fn regenerating_line_items_is_identical() {
    let dep = land("stable", d(2025, 2, 10), d(2025, 4, 2));
    let first = generate_line_items(&dep, &dep.rates);
    let second = generate_line_items(&dep, &dep.rates);
    assert!(!first.is_empty());
    assert_eq!(first, second);
    for item in &first {
        assert_eq!(item.id, item.key().to_string());
    }
}

#[test]
fn line_items_use_the_rates_argument() {
    let dep = land("r", d(2025, 1, 1), d(2025, 1, 15));
    let items = generate_line_items(&dep, &Rates::new(10.0, 1.0, 3.0));
    let amounts: Vec<f64> = items.iter().map(|i| i.amount).collect();
    assert_eq!(amounts, vec![10.0, 3.0]);
}

#[test]
fn default_status_follows_item_end() {
    let dep = land("s", d(2025, 1, 1), d(2025, 1, 16));
    let items = generate_line_items(&dep, &dep.rates);
    let today = d(2025, 1, 16);
    assert_eq!(items[0].default_status(today), LineItemStatus::Complete);
    assert_eq!(items[2].default_status(today), LineItemStatus::Pending);
}

#[test]
fn portfolio_merges_deployments_by_start_date() {
    let later = land("later", d(2025, 3, 1), d(2025, 3, 2));
    let earlier = Deployment::new(
        "earlier",
        "Ship yard",
        DeploymentKind::Shore,
        d(2025, 2, 1),
        d(2025, 2, 16),
        Rates::new(9_000.0, 700.0, 0.0),
    );
    let items = generate_portfolio_line_items(&[later.clone(), earlier.clone()]);

    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["earlier_15day_0", "earlier_daily_0", "later_daily_0", "later_daily_1"]);
    assert_eq!(items[0].amount, 9_000.0);

    let again = generate_portfolio_line_items(&[later, earlier]);
    assert_eq!(items, again);
}

#[test]
fn summary_reports_periods_and_cost() {
    let dep = land("sum", d(2025, 1, 1), d(2025, 1, 20));
    let summary = BillingPeriodCalculator::default().summarize(&dep, &dep.rates);
    assert_eq!(summary.deployment_id, "sum");
    assert_eq!(summary.periods.remainder_days, 5);
    assert_eq!(summary.estimated_cost, 15_000.0 + 5_500.0 + 2_500.0);
}

#[test]
fn deployments_load_from_store_json() {
    let dep: Deployment = serde_json::from_str(
        r#"{"id":"d9","name":"Cutter","type":"Ship","startDate":"2025-01-01","endDate":"2025-01-15",
            "rates":{"period15DayRate":100.0,"dailyRate":10.0,"overAndAboveRate":5.0}}"#,
    )
    .unwrap();
    assert_eq!(dep.kind, DeploymentKind::Shore);
    let items = generate_line_items(&dep, &dep.rates);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "d9_15day_0");

    let json = serde_json::to_value(&items[0]).unwrap();
    assert_eq!(json["type"], "FifteenDayPeriod");
    assert_eq!(json["deploymentId"], "d9");
}
