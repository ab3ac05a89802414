//! CLI argument definitions.

use crate::api::FeedbackRating;
use crate::catalog::StatusFilter;
use crate::cli::validators::{parse_feedback_confidence, parse_latitude, parse_longitude};
use crate::config::BuildMode;
use crate::constants::feedback::DEFAULT_CONFIDENCE;
use crate::output::OutputMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bird sound identification client.
#[derive(Debug, Parser)]
#[command(name = "birdid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by all commands.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and errors; disables spinners.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format for command results.
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "BIRDID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Service base URL (overrides the mode-selected URL).
    #[arg(long, global = true, env = "BIRDID_API_URL")]
    pub api_url: Option<String>,

    /// Dashboard service base URL.
    #[arg(long, global = true, env = "BIRDID_DASHBOARD_URL")]
    pub dashboard_url: Option<String>,

    /// Build mode selecting the default base URL.
    #[arg(long, global = true, value_enum, env = "BIRDID_MODE")]
    pub mode: Option<BuildMode>,

    /// Never substitute offline sample data.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Map provider key for the sightings view.
    #[arg(long, global = true, env = "BIRDID_MAP_API_KEY", hide_env_values = true)]
    pub map_api_key: Option<String>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether the service is reachable.
    Health {
        /// Keep polling and report status changes until interrupted.
        #[arg(long)]
        watch: bool,
    },
    /// Browse and manage the species catalog.
    Species {
        /// Species action to perform.
        #[command(subcommand)]
        action: SpeciesAction,
    },
    /// Show the species dashboard.
    Dashboard(DashboardArgs),
    /// Show sighting hotspots by location.
    Sightings,
    /// Upload a recording for identification.
    Analyze(AnalyzeArgs),
    /// Browse stored predictions.
    Predictions {
        /// Predictions action to perform.
        #[command(subcommand)]
        action: PredictionsAction,
    },
    /// Rate a prediction.
    Feedback(FeedbackArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Species subcommand actions.
#[derive(Debug, Subcommand)]
pub enum SpeciesAction {
    /// List catalog species.
    List {
        /// Case-insensitive filter on common or localized name.
        #[arg(short, long)]
        search: Option<String>,
        /// Also export the listed species to a CSV file.
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },
    /// Show one species.
    Show {
        /// Species identifier.
        id: String,
    },
    /// Create a species from a JSON file.
    Create {
        /// JSON file with the species fields.
        #[arg(long = "from", value_name = "FILE")]
        from: PathBuf,
    },
    /// Update a species from a JSON file with the changed fields.
    Update {
        /// Species identifier.
        id: String,
        /// JSON file with the changed fields.
        #[arg(long = "from", value_name = "FILE")]
        from: PathBuf,
    },
    /// Delete a species.
    Delete {
        /// Species identifier.
        id: String,
    },
}

/// Arguments for the dashboard command.
#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Case-insensitive filter on common or localized name.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Status filter.
    #[arg(short, long, value_enum, default_value_t = StatusFilter::All)]
    pub filter: StatusFilter,

    /// Export the filtered rows to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Omit the UTF-8 byte order mark from the CSV export.
    #[arg(long, requires = "csv")]
    pub no_csv_bom: bool,
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Audio file (WAV, MP3, AAC or FLAC).
    pub file: PathBuf,

    /// Recording latitude (-90.0 to 90.0).
    #[arg(long, value_parser = parse_latitude, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Recording longitude (-180.0 to 180.0).
    #[arg(long, value_parser = parse_longitude, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// When the recording was made (free text, e.g. an ISO 8601 timestamp).
    #[arg(long)]
    pub recorded_at: Option<String>,

    /// Notes to store with the recording.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Predictions subcommand actions.
#[derive(Debug, Subcommand)]
pub enum PredictionsAction {
    /// List stored predictions.
    List,
    /// Show one prediction.
    Show {
        /// Prediction identifier.
        id: String,
    },
    /// Delete a prediction.
    Delete {
        /// Prediction identifier.
        id: String,
    },
}

/// Arguments for the feedback command.
#[derive(Debug, Args)]
pub struct FeedbackArgs {
    /// Prediction identifier.
    pub prediction_id: String,

    /// Whether the prediction was right.
    #[arg(short, long, value_enum)]
    pub rating: Option<FeedbackRating>,

    /// How sure you are of your rating (1-10).
    #[arg(short, long, value_parser = parse_feedback_confidence, default_value_t = DEFAULT_CONFIDENCE)]
    pub confidence: u8,

    /// Free-text comments.
    #[arg(long)]
    pub comments: Option<String>,

    /// The species you believe it actually was.
    #[arg(long)]
    pub actual_species: Option<String>,

    /// Where the recording was made.
    #[arg(long)]
    pub location: Option<String>,
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}
