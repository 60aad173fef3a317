//! Search orchestrator: visibility short-circuits, concurrent backend
//! fan-out, weighted fusion, deduplication and pagination.

pub mod fusion;
pub mod paginate;
pub mod search;

pub use search::{Collaborators, SearchOrchestrator};
