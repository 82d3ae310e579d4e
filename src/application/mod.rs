//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod history;
mod prediction;
#[cfg(test)]
pub(crate) mod testing;

pub use history::{HistoryFilter, HistoryPage, HistoryService};
pub use prediction::PredictionService;
