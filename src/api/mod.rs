//! Transport layer for the identification service.

mod birds;
mod client;
mod dashboard;
mod predictions;
pub mod types;

pub use client::ApiClient;
pub use predictions::{AudioFormat, AudioUpload};
pub use types::{
    AlternativePrediction, AudioAnalysis, Bird, BirdPatch, DashboardBird, DashboardStats,
    Feedback, FeedbackRating, Prediction, PredictionMetadata, SpeciesStatus, UploadMetadata,
};
