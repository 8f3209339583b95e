//! collab core library: employee collaboration graph, queries, exporters,
//! and snapshot documents.
//!
//! The main entry point is [`store::CollaborationGraph`]: register employees
//! and chat identities, record interactions, then query neighbors, top
//! collaborators and shortest paths, build time- or type-windowed views with
//! [`query::filter`], export with [`render`], and persist with
//! [`CollaborationGraph::serialize`](store::CollaborationGraph::serialize).

pub mod analyze;
pub mod config;
pub mod document;
pub mod error;
pub mod query;
pub mod render;
pub mod sample;
pub mod store;
pub mod types;

pub use store::CollaborationGraph;
