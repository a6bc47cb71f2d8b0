use crate::config::LagUnit;
use crate::schedule::ScheduleError;
use crate::task::{Dependency, DependencyType, Task, TaskId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, VecDeque};

/// Edge weight: the precedence type with its lag already converted to days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeConstraint {
    pub kind: DependencyType,
    pub lag_days: i64,
}

/// Dependency graph for a single scheduling run.
///
/// Node `i` holds the id of `tasks[i]`, so node indices double as positions in
/// the caller's task slice.
pub struct TaskGraph {
    graph: DiGraph<TaskId, EdgeConstraint>,
    id_to_index: HashMap<TaskId, NodeIndex>,
}

impl TaskGraph {
    pub fn build(tasks: &[Task], edges: &[Dependency], lag_unit: LagUnit) -> Result<Self, ScheduleError> {
        let mut graph: DiGraph<TaskId, EdgeConstraint> =
            DiGraph::with_capacity(tasks.len(), edges.len());
        let mut id_to_index: HashMap<TaskId, NodeIndex> = HashMap::with_capacity(tasks.len());

        // Add nodes first
        for task in tasks {
            if id_to_index.contains_key(&task.id) {
                return Err(ScheduleError::DuplicateTask {
                    task_id: task.id.clone(),
                });
            }
            let node_ix = graph.add_node(task.id.clone());
            id_to_index.insert(task.id.clone(), node_ix);
        }

        // Add edges: pred -> succ
        for edge in edges {
            match (
                id_to_index.get(&edge.predecessor_id),
                id_to_index.get(&edge.successor_id),
            ) {
                (Some(&u), Some(&v)) => {
                    graph.add_edge(
                        u,
                        v,
                        EdgeConstraint {
                            kind: edge.kind,
                            lag_days: lag_unit.to_days(edge.lag),
                        },
                    );
                }
                _ => tracing::debug!(
                    predecessor = %edge.predecessor_id,
                    successor = %edge.successor_id,
                    "ignoring dependency that references an unknown task"
                ),
            }
        }

        Ok(Self { graph, id_to_index })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn index_of(&self, task_id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(task_id).copied()
    }

    pub fn task_id(&self, node_ix: NodeIndex) -> &TaskId {
        &self.graph[node_ix]
    }

    /// Incoming constraints of `node_ix`, in edge insertion order.
    pub fn incoming(&self, node_ix: NodeIndex) -> Vec<(NodeIndex, EdgeConstraint)> {
        let mut edges: Vec<(EdgeIndex, NodeIndex, EdgeConstraint)> = self
            .graph
            .edges_directed(node_ix, Direction::Incoming)
            .map(|e| (e.id(), e.source(), *e.weight()))
            .collect();
        edges.sort_by_key(|(id, _, _)| *id);
        edges.into_iter().map(|(_, src, c)| (src, c)).collect()
    }

    fn outgoing_targets(&self, node_ix: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(node_ix, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Kahn's algorithm. Zero in-degree tasks are seeded in input order and
    /// successors are released in edge order, so the result is reproducible.
    pub fn topological_order(&self) -> Result<Vec<NodeIndex>, ScheduleError> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|ix| self.graph.edges_directed(ix, Direction::Incoming).count())
            .collect();

        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|ix| in_degree[ix.index()] == 0)
            .collect();
        let mut order: Vec<NodeIndex> = Vec::with_capacity(self.graph.node_count());

        while let Some(node_ix) = queue.pop_front() {
            order.push(node_ix);
            // Parallel edges decrement once each, matching how they were counted.
            for target in self.outgoing_targets(node_ix) {
                let degree = &mut in_degree[target.index()];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(target);
                }
            }
        }

        if order.len() < self.graph.node_count() {
            let task_ids: Vec<TaskId> = self
                .graph
                .node_indices()
                .filter(|ix| in_degree[ix.index()] > 0)
                .map(|ix| self.graph[ix].clone())
                .collect();
            return Err(ScheduleError::CycleDetected { task_ids });
        }

        Ok(order)
    }
}
