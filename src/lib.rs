//! Birdid - bird sound identification client.
//!
//! This crate talks to a bird-identification service: it uploads recordings
//! for classification, browses the species catalog and dashboard, and
//! records feedback on predictions. When the service is unreachable the
//! data-access layer can substitute built-in sample data.

#![warn(missing_docs)]

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod output;

use api::ApiClient;
use clap::Parser;
use cli::{Cli, Command, ConfigAction, Context, GlobalArgs};
use config::{
    BuildMode, Config, FallbackPolicy, config_file_path, load_default_config, save_default_config,
    validate_config,
};
use output::{JsonEnvelope, OutputMode, ResultType};
use std::sync::Arc;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for the birdid CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet);

    if let Command::Config { action } = &cli.command {
        return handle_config_command(*action, &cli.global);
    }

    let mut config = load_default_config(cli.global.config.as_deref())?;
    apply_overrides(&mut config, &cli.global);
    validate_config(&config)?;

    let client = Arc::new(ApiClient::from_config(&config.api)?);
    info!(
        "Using {} service at {} (fallback: {:?})",
        config.api.mode,
        client.base_url(),
        config.fallback.policy
    );

    let ctx = Context {
        client,
        config,
        output: cli.global.output,
        progress: !cli.global.quiet,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(dispatch(&ctx, cli.command, &cli.global))
}

async fn dispatch(ctx: &Context, command: Command, global: &GlobalArgs) -> Result<()> {
    match command {
        Command::Health { watch } => cli::run_health(ctx, watch).await,
        Command::Species { action } => cli::run_species(ctx, action).await,
        Command::Dashboard(args) => cli::run_dashboard(ctx, args).await,
        Command::Sightings => cli::run_sightings(ctx).await,
        Command::Analyze(args) => cli::run_analyze(ctx, args).await,
        Command::Predictions { action } => cli::run_predictions(ctx, action).await,
        Command::Feedback(args) => cli::run_feedback(ctx, args).await,
        Command::Config { action } => handle_config_command(action, global),
    }
}

/// Layer command-line and environment overrides on top of the file config.
fn apply_overrides(config: &mut Config, global: &GlobalArgs) {
    if let Some(mode) = global.mode {
        config.api.mode = mode;
    }

    if let Some(url) = &global.api_url {
        debug!("Base URL overridden: {url}");
        match config.api.mode {
            BuildMode::Development => config.api.development_url.clone_from(url),
            BuildMode::Production => config.api.production_url.clone_from(url),
        }
    }

    if let Some(url) = &global.dashboard_url {
        config.api.dashboard_url = Some(url.clone());
    }

    if let Some(key) = &global.map_api_key {
        config.map.api_key.clone_from(key);
    }

    if global.strict {
        config.fallback.policy = FallbackPolicy::Strict;
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Results go to stdout; keep logs off it.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, global: &GlobalArgs) -> Result<()> {
    let explicit = global.config.as_deref();

    match action {
        ConfigAction::Init => {
            let path = config_file_path(explicit)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default(), explicit)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  set [api] development_url or production_url to your service");
                println!("  birdid health");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let mut config = load_default_config(explicit)?;
            apply_overrides(&mut config, global);
            show_config(&config, global.output)
        }
        ConfigAction::Path => {
            println!("{}", config_file_path(explicit)?.display());
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn show_config(config: &Config, output: OutputMode) -> Result<()> {
    match output {
        OutputMode::Text => {
            let text = toml::to_string_pretty(config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{}", text.trim_end());
        }
        OutputMode::Json => {
            println!("{}", JsonEnvelope::local(ResultType::Config, config).to_json()?);
        }
    }
    Ok(())
}
