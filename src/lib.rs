pub mod billing;
pub mod calculations;
pub mod calendar;
pub mod config;
pub mod graph;
pub mod labor;
#[cfg(feature = "report")]
pub mod report;
pub mod schedule;
pub mod task;

pub use billing::{
    BillingLineItem, BillingPeriodCalculator, BillingPeriods, BillingSummary, Deployment, DeploymentKind,
    LineItemKey, LineItemKind, LineItemStatus, Rates, compute_periods, estimate_cost, generate_line_items,
    generate_portfolio_line_items,
};
pub use calendar::{DeploymentPhase, YearMonth};
pub use config::{
    BillingConfig, CalendarConfig, ConfigError, EngineConfig, LaborConfig, LagUnit, OrderingPeriod,
    OverAndAbovePolicy, SchedulerConfig,
};
pub use labor::{
    LaborCategory, LaborEntry, LaborTimeAggregator, MonthlyCategoryTotals, WeekSummary, monthly_equivalent_hours,
    weekly_overtime,
};
pub use schedule::{DependencyScheduler, ScheduleError, ScheduleOutcome, schedule};
pub use task::{Dependency, DependencyType, Task, TaskId, TaskWindow};
