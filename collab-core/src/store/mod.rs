mod graph;
pub mod incremental;

pub use graph::CollaborationGraph;
