use crate::calendar::add_days;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TaskId = String;

/// A schedulable unit of work spanning whole calendar days, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(alias = "startAt")]
    pub start: NaiveDate,
    #[serde(alias = "endAt")]
    pub end: NaiveDate,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
        }
    }

    /// Inclusive length in days. A task ending before it starts still occupies one day.
    pub fn duration_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    pub fn window(&self) -> TaskWindow {
        TaskWindow::from_duration(self.start, self.duration_days())
    }
}

/// Precedence relationship between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DependencyType {
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    #[serde(rename = "SS")]
    StartToStart,
    #[serde(rename = "FF")]
    FinishToFinish,
    #[serde(rename = "SF")]
    StartToFinish,
}

impl DependencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::FinishToStart => "FS",
            DependencyType::StartToStart => "SS",
            DependencyType::FinishToFinish => "FF",
            DependencyType::StartToFinish => "SF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub predecessor_id: TaskId,
    pub successor_id: TaskId,
    #[serde(rename = "type", default)]
    pub kind: DependencyType,
    /// Signed offset; its unit is decided by `SchedulerConfig::lag_unit`.
    ///
    /// The `lagMinutes` field of stored records is read here unchanged. Under the
    /// default `LagUnit::Days` a stored 1440 means 1440 days, so schedule such
    /// records with `LagUnit::Minutes`.
    #[serde(default, alias = "lagMinutes")]
    pub lag: i64,
}

impl Dependency {
    pub fn new(
        predecessor_id: impl Into<TaskId>,
        successor_id: impl Into<TaskId>,
        kind: DependencyType,
        lag: i64,
    ) -> Self {
        Self {
            predecessor_id: predecessor_id.into(),
            successor_id: successor_id.into(),
            kind,
            lag,
        }
    }

    pub fn finish_to_start(predecessor_id: impl Into<TaskId>, successor_id: impl Into<TaskId>) -> Self {
        Self::new(predecessor_id, successor_id, DependencyType::FinishToStart, 0)
    }
}

/// Computed dates for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TaskWindow {
    pub fn from_duration(start: NaiveDate, duration_days: i64) -> Self {
        Self {
            start,
            end: add_days(start, duration_days.max(1) - 1),
        }
    }
}
