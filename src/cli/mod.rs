//! CLI argument parsing and command handling.

mod args;
mod context;
mod dashboard;
mod health;
mod predictions;
mod species;
pub mod validators;

pub use args::{
    AnalyzeArgs, Cli, Command, ConfigAction, DashboardArgs, FeedbackArgs, GlobalArgs,
    PredictionsAction, SpeciesAction,
};
pub use context::Context;
pub use dashboard::{DashboardView, run_dashboard, run_sightings};
pub use health::{HealthReport, run_health};
pub use predictions::{FeedbackReceipt, run_analyze, run_feedback, run_predictions};
pub use species::{Deleted, run_species};
