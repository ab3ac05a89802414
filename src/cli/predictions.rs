//! Recording upload, prediction history and feedback commands.

use crate::api::{AudioUpload, FeedbackRating, Prediction, UploadMetadata};
use crate::cli::args::{AnalyzeArgs, FeedbackArgs, PredictionsAction};
use crate::cli::context::Context;
use crate::cli::species::Deleted;
use crate::data::{FeedbackDraft, FeedbackSubmitter, PredictionHistory, PredictionLookup, PredictionSubmitter};
use crate::error::Result;
use crate::output::{ResultType, finish_spinner, render_prediction, render_prediction_list};
use serde::Serialize;
use tracing::info;

/// Upload a recording and print the identification.
pub async fn run_analyze(ctx: &Context, args: AnalyzeArgs) -> Result<()> {
    let upload = AudioUpload::from_path(&args.file).await?;
    let metadata = upload_metadata(&args);

    info!(
        "Uploading {} ({} bytes, {})",
        upload.file_name(),
        upload.size(),
        upload.format().label()
    );

    let submitter = PredictionSubmitter::new(ctx.client.clone(), ctx.policy());
    let spinner = ctx.spinner(&format!("Analyzing {}", upload.file_name()));
    let fetched = submitter.predict(&upload, metadata.as_ref()).await;
    finish_spinner(spinner);

    ctx.emit(ResultType::Prediction, fetched, render_prediction)
}

fn upload_metadata(args: &AnalyzeArgs) -> Option<UploadMetadata> {
    let metadata = UploadMetadata {
        latitude: args.lat,
        longitude: args.lon,
        recorded_at: args.recorded_at.clone(),
        user_notes: args.notes.clone(),
    };
    (!metadata.is_empty()).then_some(metadata)
}

/// Run a predictions subcommand.
pub async fn run_predictions(ctx: &Context, action: PredictionsAction) -> Result<()> {
    match action {
        PredictionsAction::List => {
            let history = PredictionHistory::new(ctx.client.clone());
            let spinner = ctx.spinner("Loading predictions");
            let fetched = history.fetch().await;
            finish_spinner(spinner);
            ctx.emit(ResultType::PredictionList, fetched, |list: &Vec<Prediction>| {
                render_prediction_list(list)
            })
        }
        PredictionsAction::Show { id } => {
            let lookup = PredictionLookup::new(ctx.client.clone());
            let spinner = ctx.spinner(&format!("Loading prediction {id}"));
            let fetched = lookup.fetch(&id).await;
            finish_spinner(spinner);
            ctx.emit(ResultType::Prediction, fetched, render_prediction)
        }
        PredictionsAction::Delete { id } => {
            ctx.client.delete_prediction(&id).await?;
            ctx.emit_live(ResultType::PredictionDeleted, Deleted { id }, |d| {
                format!("Deleted prediction {}", d.id)
            })
        }
    }
}

/// Accepted feedback.
#[derive(Debug, Serialize)]
pub struct FeedbackReceipt {
    /// Rated prediction.
    pub prediction_id: String,
    /// Verdict.
    pub rating: FeedbackRating,
    /// Self-assessed certainty.
    pub confidence: u8,
}

/// Submit feedback for a prediction.
pub async fn run_feedback(ctx: &Context, args: FeedbackArgs) -> Result<()> {
    let draft = FeedbackDraft {
        rating: args.rating,
        confidence: args.confidence,
        comments: args.comments.unwrap_or_default(),
        actual_species: args.actual_species.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
    };

    let rating = draft.validate()?.rating;

    let submitter = FeedbackSubmitter::new(ctx.client.clone());
    let spinner = ctx.spinner("Sending feedback");
    let result = submitter.submit(&args.prediction_id, &draft).await;
    finish_spinner(spinner);
    let fetched = result?;

    let receipt = |()| FeedbackReceipt {
        prediction_id: args.prediction_id.clone(),
        rating,
        confidence: args.confidence,
    };
    ctx.emit(ResultType::Feedback, fetched.map(receipt), |r| {
        format!(
            "Thanks! Feedback '{}' recorded for prediction {}",
            r.rating, r.prediction_id
        )
    })
}
