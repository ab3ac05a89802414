//! Feedback submission.

use super::state::{Fetched, Resource, ResourceState};
use crate::api::{ApiClient, Feedback, FeedbackRating};
use crate::config::FallbackPolicy;
use crate::constants::feedback::{DEFAULT_CONFIDENCE, MAX_CONFIDENCE, MIN_CONFIDENCE};
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

/// Feedback as entered, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDraft {
    /// Verdict; required.
    pub rating: Option<FeedbackRating>,
    /// Self-assessed certainty, 1-10.
    pub confidence: u8,
    /// Free-text comments.
    pub comments: String,
    /// Species the user believes it actually was.
    pub actual_species: String,
    /// Where the recording was made.
    pub location: String,
}

impl Default for FeedbackDraft {
    fn default() -> Self {
        Self {
            rating: None,
            confidence: DEFAULT_CONFIDENCE,
            comments: String::new(),
            actual_species: String::new(),
            location: String::new(),
        }
    }
}

impl FeedbackDraft {
    /// Check the draft and build the wire record. Blank text fields are dropped.
    pub fn validate(&self) -> Result<Feedback> {
        let rating = self.rating.ok_or(Error::MissingRating)?;

        if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&self.confidence) {
            return Err(Error::InvalidFeedbackConfidence {
                value: self.confidence,
                min: MIN_CONFIDENCE,
                max: MAX_CONFIDENCE,
            });
        }

        Ok(Feedback {
            rating,
            confidence: self.confidence,
            comments: trimmed(&self.comments),
            actual_species: trimmed(&self.actual_species),
            location: trimmed(&self.location),
        })
    }
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Posts feedback for predictions. Never substitutes; failures reach the caller.
///
/// `data` holds `Some(())` once a submission has gone through.
#[derive(Debug)]
pub struct FeedbackSubmitter {
    client: Arc<ApiClient>,
    state: Resource<()>,
}

impl FeedbackSubmitter {
    /// Create the container.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: Resource::new(false),
        }
    }

    /// Validate `draft` and post it against `prediction_id`.
    ///
    /// An invalid draft is rejected before any request is made and leaves
    /// the state untouched.
    pub async fn submit(&self, prediction_id: &str, draft: &FeedbackDraft) -> Result<Fetched<()>> {
        let feedback = draft.validate()?;

        info!(
            "Submitting '{}' feedback for prediction {prediction_id}",
            feedback.rating
        );
        Ok(self
            .state
            .load(
                self.client.submit_feedback(prediction_id, &feedback),
                FallbackPolicy::Strict,
                || None,
            )
            .await)
    }

    /// Current state.
    pub fn state(&self) -> ResourceState<()> {
        self.state.snapshot()
    }

    /// Whether a submission has succeeded.
    pub fn submitted(&self) -> bool {
        self.state.snapshot().data.is_some()
    }
}
