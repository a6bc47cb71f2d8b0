use crate::calendar::add_days;
use crate::graph::{EdgeConstraint, TaskGraph};
use crate::task::{DependencyType, Task, TaskWindow};
use chrono::NaiveDate;
use petgraph::graph::NodeIndex;

/// Lower bound on a successor's start imposed by one incoming edge.
/// Bounds past either end of the calendar clamp to `NaiveDate::MIN` / `NaiveDate::MAX`.
pub fn constrained_start(
    constraint: EdgeConstraint,
    predecessor: TaskWindow,
    successor_duration: i64,
) -> NaiveDate {
    let lag = constraint.lag_days;
    match constraint.kind {
        DependencyType::FinishToStart => finish_to_start(predecessor, lag),
        DependencyType::StartToStart => start_to_start(predecessor, lag),
        DependencyType::FinishToFinish => finish_to_finish(predecessor, lag, successor_duration),
        DependencyType::StartToFinish => start_to_finish(predecessor, lag, successor_duration),
    }
}

fn finish_to_start(predecessor: TaskWindow, lag: i64) -> NaiveDate {
    add_days(predecessor.end, lag.saturating_add(1))
}

fn start_to_start(predecessor: TaskWindow, lag: i64) -> NaiveDate {
    add_days(predecessor.start, lag)
}

// Finish constraints bound the successor's end; shift back by its duration.
fn finish_to_finish(predecessor: TaskWindow, lag: i64, duration: i64) -> NaiveDate {
    add_days(predecessor.end, lag.saturating_sub(duration).saturating_add(1))
}

fn start_to_finish(predecessor: TaskWindow, lag: i64, duration: i64) -> NaiveDate {
    add_days(predecessor.start, lag.saturating_sub(duration).saturating_add(1))
}

/// Earliest-start (ASAP) pass over a topologically ordered graph.
pub struct ForwardPass<'a> {
    tasks: &'a [Task],
    graph: &'a TaskGraph,
}

impl<'a> ForwardPass<'a> {
    pub fn new(tasks: &'a [Task], graph: &'a TaskGraph) -> Self {
        Self { tasks, graph }
    }

    /// Returns one window per task, indexed like the input slice.
    pub fn execute(&self, order: &[NodeIndex]) -> Vec<TaskWindow> {
        let mut windows: Vec<Option<TaskWindow>> = vec![None; self.tasks.len()];

        for &node_ix in order {
            let task = &self.tasks[node_ix.index()];
            let duration = task.duration_days();
            let mut early_start = task.start;

            for (pred_ix, constraint) in self.graph.incoming(node_ix) {
                // Predecessors precede this task in `order`.
                let Some(pred_window) = windows[pred_ix.index()] else {
                    continue;
                };
                let bound = constrained_start(constraint, pred_window, duration);
                tracing::trace!(
                    task = %task.id,
                    predecessor = %self.graph.task_id(pred_ix),
                    kind = constraint.kind.as_str(),
                    lag_days = constraint.lag_days,
                    %bound,
                    "evaluated precedence constraint"
                );
                if bound > early_start {
                    early_start = bound;
                }
            }

            if early_start != task.start {
                tracing::debug!(
                    task = %task.id,
                    from = %task.start,
                    to = %early_start,
                    "forward pass moved task"
                );
            }
            windows[node_ix.index()] = Some(TaskWindow::from_duration(early_start, duration));
        }

        windows
            .into_iter()
            .zip(self.tasks)
            .map(|(window, task)| window.unwrap_or_else(|| task.window()))
            .collect()
    }
}
