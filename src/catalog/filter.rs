//! Client-side search and status filtering.

use crate::api::{Bird, DashboardBird, SpeciesStatus};
use std::str::FromStr;

/// Anything with a common and an optional localized name.
pub trait Named {
    /// Common name.
    fn common_name(&self) -> &str;
    /// Localized name.
    fn localized_name(&self) -> Option<&str>;
}

impl Named for Bird {
    fn common_name(&self) -> &str {
        &self.name
    }

    fn localized_name(&self) -> Option<&str> {
        self.thai_name.as_deref()
    }
}

impl Named for DashboardBird {
    fn common_name(&self) -> &str {
        &self.bird.name
    }

    fn localized_name(&self) -> Option<&str> {
        self.bird.thai_name.as_deref()
    }
}

/// Whether `record`'s common or localized name contains `query`,
/// ignoring case. A blank query matches everything.
pub fn matches_search<T: Named>(record: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    record.common_name().to_lowercase().contains(&query)
        || record
            .localized_name()
            .is_some_and(|name| name.to_lowercase().contains(&query))
}

/// Records matching `query`, in their original order.
pub fn search<'a, T: Named>(records: &'a [T], query: &str) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| matches_search(*record, query))
        .collect()
}

/// Dashboard status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusFilter {
    /// Every record.
    #[default]
    All,
    /// Active species only.
    Active,
    /// Inactive species only.
    Inactive,
    /// Species flagged as needing feedback.
    NeedsFeedback,
}

impl StatusFilter {
    /// Whether `record` passes the filter. Records without a status only
    /// pass `All` and `NeedsFeedback`.
    pub fn accepts(self, record: &DashboardBird) -> bool {
        match self {
            Self::All => true,
            Self::Active => record.status == Some(SpeciesStatus::Active),
            Self::Inactive => record.status == Some(SpeciesStatus::Inactive),
            Self::NeedsFeedback => record.needs_feedback,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "needs-feedback" | "feedback" => Ok(Self::NeedsFeedback),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}

/// Dashboard records matching both `query` and `status`.
pub fn filter_dashboard<'a>(
    records: &'a [DashboardBird],
    query: &str,
    status: StatusFilter,
) -> Vec<&'a DashboardBird> {
    records
        .iter()
        .filter(|record| status.accepts(record) && matches_search(*record, query))
        .collect()
}
