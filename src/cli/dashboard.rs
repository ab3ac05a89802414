//! Dashboard and sightings commands.

use crate::api::{DashboardBird, DashboardStats};
use crate::catalog::{Hotspot, filter_dashboard, hotspots};
use crate::cli::args::DashboardArgs;
use crate::cli::context::Context;
use crate::data::{Dashboard, Fetched};
use crate::error::Result;
use crate::output::{
    ResultType, export_csv, finish_spinner, render_dashboard_stats, render_dashboard_table,
    render_hotspots,
};
use serde::Serialize;

/// Dashboard payload: counters plus the filtered species rows.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    /// Headline counters, absent when they could not be loaded.
    pub stats: Option<DashboardStats>,
    /// Species rows after search and status filtering.
    pub species: Vec<DashboardBird>,
}

/// Show the dashboard.
pub async fn run_dashboard(ctx: &Context, args: DashboardArgs) -> Result<()> {
    let dashboard = Dashboard::new(ctx.client.clone(), ctx.policy());

    let spinner = ctx.spinner("Loading dashboard");
    let (species, stats) = dashboard.fetch().await;
    finish_spinner(spinner);

    let query = args.search.as_deref().unwrap_or_default();
    let species = species.map(|records| {
        filter_dashboard(&records, query, args.filter)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    });

    if let (Some(path), Some(records)) = (args.csv.as_deref(), species.data()) {
        let bom = ctx.config.export.csv_bom && !args.no_csv_bom;
        export_csv(path, records, bom)?;
    }

    ctx.emit(ResultType::Dashboard, combine(species, stats), render_view)
}

/// Show sighting hotspots.
pub async fn run_sightings(ctx: &Context) -> Result<()> {
    let dashboard = Dashboard::new(ctx.client.clone(), ctx.policy());

    let spinner = ctx.spinner("Loading sightings");
    let fetched = dashboard.fetch_species().await;
    finish_spinner(spinner);

    let map_enabled = ctx.config.map.api_key().is_some();
    ctx.emit(
        ResultType::Sightings,
        fetched.map(|records| hotspots(&records)),
        |spots: &Vec<Hotspot>| render_hotspots(spots, map_enabled),
    )
}

/// Merge the two independently loaded halves. The view fails only when the
/// species rows are unavailable.
fn combine(
    species: Fetched<Vec<DashboardBird>>,
    stats: Fetched<DashboardStats>,
) -> Fetched<DashboardView> {
    let errors: Vec<String> = [species.error(), stats.error()]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

    let stats = stats.data().copied();
    match species {
        Fetched::Failed(error) => Fetched::Failed(error),
        Fetched::Live(species) | Fetched::Fallback { data: species, .. } => {
            let view = DashboardView { stats, species };
            if errors.is_empty() {
                Fetched::Live(view)
            } else {
                Fetched::Fallback {
                    data: view,
                    error: errors.join("; "),
                }
            }
        }
    }
}

fn render_view(view: &DashboardView) -> String {
    let mut sections = Vec::new();
    if let Some(stats) = &view.stats {
        sections.push(render_dashboard_stats(stats));
    }
    let rows: Vec<_> = view.species.iter().collect();
    sections.push(render_dashboard_table(&rows));
    sections.join("\n\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::data::mock::{mock_dashboard_birds, mock_dashboard_stats};

    #[test]
    fn test_combine_live() {
        let view = combine(
            Fetched::Live(mock_dashboard_birds()),
            Fetched::Live(mock_dashboard_stats()),
        );
        assert!(view.is_live());
        assert_eq!(view.data().unwrap().species.len(), 5);
    }

    #[test]
    fn test_combine_keeps_species_when_stats_fail() {
        let view = combine(
            Fetched::Live(mock_dashboard_birds()),
            Fetched::Failed("API Error: 500 Internal Server Error".to_string()),
        );
        assert!(view.is_fallback());
        assert!(view.data().unwrap().stats.is_none());
        assert_eq!(view.error(), Some("API Error: 500 Internal Server Error"));
    }

    #[test]
    fn test_combine_fails_without_species() {
        let view = combine(
            Fetched::Failed("down".to_string()),
            Fetched::Live(mock_dashboard_stats()),
        );
        assert_eq!(view.error(), Some("down"));
        assert!(view.data().is_none());
    }

    #[test]
    fn test_render_view_includes_counters() {
        let text = render_view(&DashboardView {
            stats: Some(mock_dashboard_stats()),
            species: mock_dashboard_birds(),
        });
        assert!(text.contains("1247"));
        assert!(text.ends_with("5 species"));
    }
}
