pub mod task_graph;

pub use task_graph::{EdgeConstraint, TaskGraph};
