//! Species catalog commands.

use crate::api::{Bird, BirdPatch};
use crate::catalog::search;
use crate::cli::args::SpeciesAction;
use crate::cli::context::Context;
use crate::data::{SpeciesCatalog, SpeciesDetail};
use crate::error::{Error, Result};
use crate::output::{ResultType, export_csv, finish_spinner, render_bird, render_species_table};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Run a species subcommand.
pub async fn run_species(ctx: &Context, action: SpeciesAction) -> Result<()> {
    match action {
        SpeciesAction::List { search, csv } => {
            list_species(ctx, search.as_deref(), csv.as_deref()).await
        }
        SpeciesAction::Show { id } => show_species(ctx, &id).await,
        SpeciesAction::Create { from } => {
            let patch = read_patch(&from).await?;
            let spinner = ctx.spinner("Creating species");
            let result = ctx.client.create_bird(&patch).await;
            finish_spinner(spinner);
            let bird = result?;
            info!("Created species {}", bird.id);
            ctx.emit_live(ResultType::Species, bird, render_bird)
        }
        SpeciesAction::Update { id, from } => {
            let patch = read_patch(&from).await?;
            let spinner = ctx.spinner(&format!("Updating species {id}"));
            let result = ctx.client.update_bird(&id, &patch).await;
            finish_spinner(spinner);
            let bird = result?;
            info!("Updated species {}", bird.id);
            ctx.emit_live(ResultType::Species, bird, render_bird)
        }
        SpeciesAction::Delete { id } => {
            ctx.client.delete_bird(&id).await?;
            ctx.emit_live(ResultType::SpeciesDeleted, Deleted { id }, |d| {
                format!("Deleted species {}", d.id)
            })
        }
    }
}

/// Identifier of a removed record.
#[derive(Debug, Serialize)]
pub struct Deleted {
    /// Identifier.
    pub id: String,
}

async fn list_species(ctx: &Context, query: Option<&str>, csv: Option<&Path>) -> Result<()> {
    let catalog = SpeciesCatalog::new(ctx.client.clone(), ctx.policy());

    let spinner = ctx.spinner("Loading species");
    let fetched = catalog.fetch().await;
    finish_spinner(spinner);

    let query = query.unwrap_or_default();
    let fetched = fetched.map(|birds| search(&birds, query).into_iter().cloned().collect::<Vec<_>>());

    if let (Some(path), Some(birds)) = (csv, fetched.data()) {
        export_csv(path, birds, ctx.config.export.csv_bom)?;
    }

    ctx.emit(ResultType::SpeciesList, fetched, |birds: &Vec<Bird>| {
        render_species_table(&birds.iter().collect::<Vec<_>>())
    })
}

async fn show_species(ctx: &Context, id: &str) -> Result<()> {
    let detail = SpeciesDetail::new(ctx.client.clone(), ctx.policy());

    let spinner = ctx.spinner(&format!("Loading species {id}"));
    let fetched = detail.fetch(id).await;
    finish_spinner(spinner);

    ctx.emit(ResultType::Species, fetched, render_bird)
}

async fn read_patch(path: &Path) -> Result<BirdPatch> {
    let content = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|e| Error::JsonRead {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_patch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bird.json");
        std::fs::write(&path, r#"{"name": "Asian Koel", "diet": "Fruit"}"#).unwrap();

        let patch = read_patch(&path).await.unwrap();
        assert_eq!(patch.name.as_deref(), Some("Asian Koel"));
        assert_eq!(patch.diet.as_deref(), Some("Fruit"));
        assert!(patch.habitats.is_none());
    }

    #[tokio::test]
    async fn test_read_patch_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bird.json");
        std::fs::write(&path, "{name:").unwrap();

        assert!(matches!(
            read_patch(&path).await,
            Err(Error::JsonRead { .. })
        ));
    }
}
