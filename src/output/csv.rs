//! CSV export of species lists.

use crate::api::{Bird, DashboardBird};
use crate::constants::confidence::DECIMAL_PLACES;
use crate::constants::csv::UTF8_BOM;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// A record that can be exported as one CSV row.
pub trait CsvRecord {
    /// Column names, in row order.
    fn header() -> &'static [&'static str];

    /// Cell values, in header order.
    fn row(&self) -> Vec<String>;
}

impl CsvRecord for Bird {
    fn header() -> &'static [&'static str] {
        &[
            "ID",
            "Common name",
            "Localized name",
            "Scientific name",
            "Habitats",
            "Length (cm)",
            "Wingspan (cm)",
            "Weight (g)",
            "Diet",
            "Conservation status",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.thai_name.clone().unwrap_or_default(),
            self.scientific_name.clone(),
            self.habitats.clone(),
            self.physical_length_cm.clone(),
            self.physical_wingspan_cm.clone(),
            self.physical_weight_g.clone(),
            self.diet.clone(),
            self.conservation_status.clone(),
        ]
    }
}

impl CsvRecord for DashboardBird {
    fn header() -> &'static [&'static str] {
        &[
            "ID",
            "Common name",
            "Localized name",
            "Scientific name",
            "Location",
            "Confidence (%)",
            "Last seen",
            "Status",
            "Sightings",
            "Recordings",
            "First recorded",
            "Feedback count",
            "Needs feedback",
            "Accuracy (%)",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.bird.id.clone(),
            self.bird.name.clone(),
            self.bird.thai_name.clone().unwrap_or_default(),
            self.bird.scientific_name.clone(),
            self.found.clone().unwrap_or_default(),
            percent(self.confidence),
            self.last_seen.clone().unwrap_or_default(),
            self.status.map(|s| s.to_string()).unwrap_or_default(),
            count(self.sightings),
            count(self.recordings),
            self.first_recorded.clone().unwrap_or_default(),
            count(self.feedback_count),
            self.needs_feedback.to_string(),
            percent(self.accuracy_rate),
        ]
    }
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.prec$}", prec = DECIMAL_PLACES))
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

/// Write a header plus one row per record. Absent values become empty cells.
pub fn write_csv<W, T>(mut writer: W, records: &[T], bom: bool) -> csv::Result<()>
where
    W: Write,
    T: CsvRecord,
{
    if bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(T::header())?;
    for record in records {
        csv.write_record(record.row())?;
    }
    csv.flush()?;
    Ok(())
}

/// Export `records` to a file at `path`.
pub fn export_csv<T: CsvRecord>(path: &Path, records: &[T], bom: bool) -> Result<()> {
    let to_error = |source: csv::Error| Error::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| to_error(e.into()))?;
    write_csv(BufWriter::new(file), records, bom).map_err(to_error)?;

    info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
