//! State shared by command handlers and the result printer.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use crate::api::ApiClient;
use crate::config::{Config, FallbackPolicy};
use crate::data::Fetched;
use crate::error::{Error, Result};
use crate::output::{JsonEnvelope, OutputMode, ResultType, create_spinner};
use indicatif::ProgressBar;
use serde::Serialize;
use std::sync::Arc;

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct Context {
    /// Shared transport.
    pub client: Arc<ApiClient>,
    /// Effective configuration, overrides applied.
    pub config: Config,
    /// Result format on stdout.
    pub output: OutputMode,
    /// Show spinners on stderr.
    pub progress: bool,
}

impl Context {
    /// Effective fallback policy.
    pub fn policy(&self) -> FallbackPolicy {
        self.config.fallback.policy
    }

    /// Spinner for a request, shown only for text output.
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        create_spinner(message, self.progress && self.output == OutputMode::Text)
    }

    /// Print a data-access outcome.
    ///
    /// Text mode prints the rendered data, preceded on stderr by a note when
    /// offline data was substituted. JSON mode prints one envelope. A result
    /// without data becomes [`Error::Unavailable`] in both modes.
    pub fn emit<T, F>(&self, result_type: ResultType, fetched: Fetched<T>, render: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        if self.output == OutputMode::Json {
            let failure = match &fetched {
                Fetched::Failed(message) => Some(message.clone()),
                _ => None,
            };
            println!("{}", JsonEnvelope::from_fetched(result_type, fetched).to_json()?);
            return failure.map_or(Ok(()), |message| Err(Error::Unavailable { message }));
        }

        let (data, degraded) = fetched.into_result()?;
        if let Some(error) = degraded {
            eprintln!("note: using offline data ({error})");
        }
        println!("{}", render(&data));
        Ok(())
    }

    /// Print a result produced without a service fallback.
    pub fn emit_live<T, F>(&self, result_type: ResultType, data: T, render: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        self.emit(result_type, Fetched::Live(data), render)
    }
}
