pub mod network;

pub use network::{CollaborationNetwork, GraphStats};
