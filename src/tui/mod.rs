//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Login
//! - Dashboard with the symptom intake form and latest result
//! - Prediction history with search and filters
//! - Lung health self-check questionnaire

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
pub use worker::{spawn_lookup, LookupHandle, PredictionProgress, PredictionWorker, PredictionWorkerHandle};
