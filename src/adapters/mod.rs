//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the remote prediction service
//! - `sanitize`: credential filtering for logs

pub mod http;
pub mod sanitize;

pub use http::HttpPredictionClient;
