//! Output rendering: human text, JSON envelopes and CSV export.

mod csv;
mod envelope;
mod progress;
mod text;

pub use self::csv::{CsvRecord, export_csv, write_csv};
pub use envelope::{DataSource, JsonEnvelope, ResultType, SPEC_VERSION};
pub use progress::{create_spinner, finish_spinner};
pub use text::{
    format_confidence, format_percent, number_or_placeholder, render_bird,
    render_dashboard_stats, render_dashboard_table, render_hotspots, render_prediction,
    render_prediction_list, render_species_table, text_or_placeholder,
};

/// How command results are printed on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    /// Human-readable text.
    #[default]
    Text,
    /// One JSON envelope per command.
    Json,
}
