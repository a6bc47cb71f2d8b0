use crate::calculations::forward_pass::ForwardPass;
use crate::config::SchedulerConfig;
use crate::graph::TaskGraph;
use crate::task::{Dependency, Task, TaskId, TaskWindow};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("dependency cycle detected among tasks: {}", .task_ids.join(", "))]
    CycleDetected { task_ids: Vec<TaskId> },
    #[error("task id {task_id} appears more than once")]
    DuplicateTask { task_id: TaskId },
}

/// Result of a successful scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    order: Vec<TaskId>,
    windows: BTreeMap<TaskId, TaskWindow>,
    moved: Vec<TaskId>,
}

impl ScheduleOutcome {
    /// Task ids in the topological order the forward pass used.
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    pub fn windows(&self) -> &BTreeMap<TaskId, TaskWindow> {
        &self.windows
    }

    pub fn into_windows(self) -> BTreeMap<TaskId, TaskWindow> {
        self.windows
    }

    pub fn get(&self, task_id: &str) -> Option<TaskWindow> {
        self.windows.get(task_id).copied()
    }

    /// Ids whose dates differ from the input, in input order.
    pub fn moved(&self) -> &[TaskId] {
        &self.moved
    }

    pub fn is_unchanged(&self) -> bool {
        self.moved.is_empty()
    }

    /// Copies `tasks` with computed dates applied, keeping their order.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .map(|task| match self.windows.get(&task.id) {
                Some(window) => Task {
                    start: window.start,
                    end: window.end,
                    ..task.clone()
                },
                None => task.clone(),
            })
            .collect()
    }
}

/// Earliest-start scheduler over typed, lagged precedence constraints.
#[derive(Debug, Clone, Default)]
pub struct DependencyScheduler {
    config: SchedulerConfig,
}

impl DependencyScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// All-or-nothing: a cycle anywhere fails the whole request.
    pub fn schedule(&self, tasks: &[Task], edges: &[Dependency]) -> Result<ScheduleOutcome, ScheduleError> {
        let graph = TaskGraph::build(tasks, edges, self.config.lag_unit)?;
        let order = graph.topological_order().inspect_err(|err| {
            if let ScheduleError::CycleDetected { task_ids } = err {
                tracing::warn!(?task_ids, "scheduling aborted: dependency cycle");
            }
        })?;

        let computed = ForwardPass::new(tasks, &graph).execute(&order);

        let mut windows = BTreeMap::new();
        let mut moved = Vec::new();
        for (task, window) in tasks.iter().zip(computed) {
            if window.start != task.start || window.end != task.end {
                moved.push(task.id.clone());
            }
            windows.insert(task.id.clone(), window);
        }

        Ok(ScheduleOutcome {
            order: order.into_iter().map(|ix| graph.task_id(ix).clone()).collect(),
            windows,
            moved,
        })
    }
}

/// Schedules with the default configuration (lag in whole days).
pub fn schedule(tasks: &[Task], edges: &[Dependency]) -> Result<ScheduleOutcome, ScheduleError> {
    DependencyScheduler::default().schedule(tasks, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tracing_test::traced_test;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[traced_test]
    #[test]
    fn cycle_is_logged_as_warning() {
        let tasks = vec![Task::new("a", "A", d(2025, 1, 1), d(2025, 1, 1))];
        let edges = vec![Dependency::finish_to_start("a", "a")];
        assert!(schedule(&tasks, &edges).is_err());
        assert!(logs_contain("scheduling aborted: dependency cycle"));
    }

    #[traced_test]
    #[test]
    fn moved_tasks_are_logged() {
        let tasks = vec![
            Task::new("a", "A", d(2025, 1, 1), d(2025, 1, 10)),
            Task::new("b", "B", d(2025, 1, 2), d(2025, 1, 2)),
        ];
        let edges = vec![Dependency::finish_to_start("a", "b")];
        let outcome = schedule(&tasks, &edges).unwrap();
        assert_eq!(outcome.moved(), &["b".to_string()]);
        assert!(logs_contain("forward pass moved task"));
    }

    #[test]
    fn cycle_error_names_tasks() {
        let err = ScheduleError::CycleDetected {
            task_ids: vec!["x".to_string(), "y".to_string()],
        };
        assert_eq!(err.to_string(), "dependency cycle detected among tasks: x, y");
    }
}
