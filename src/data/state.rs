//! Observable request state shared by all data-access containers.

use crate::config::FallbackPolicy;
use crate::error::{Error, Result};
use std::future::Future;
use tokio::sync::watch;
use tracing::{debug, warn};

/// What a view renders: the last data, whether a request is in flight, and
/// the last error message.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    /// Last data received (live or fallback).
    pub data: Option<T>,
    /// A request is in flight.
    pub loading: bool,
    /// Message of the last failure, kept even when fallback data is shown.
    pub error: Option<String>,
}

impl<T> ResourceState<T> {
    fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Outcome of one data-access action.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// Data from the service.
    Live(T),
    /// The service failed and built-in sample data was substituted.
    Fallback {
        /// Substituted data.
        data: T,
        /// Why the service request failed.
        error: String,
    },
    /// The service failed and nothing could be substituted.
    Failed(String),
}

impl<T> Fetched<T> {
    /// The data, live or fallback.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Live(data) | Self::Fallback { data, .. } => Some(data),
            Self::Failed(_) => None,
        }
    }

    /// The error message, if the service request failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Live(_) => None,
            Self::Fallback { error, .. } | Self::Failed(error) => Some(error),
        }
    }

    /// Whether the data came from the service.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Whether sample data was substituted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Transform the data, keeping the variant.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Live(data) => Fetched::Live(f(data)),
            Self::Fallback { data, error } => Fetched::Fallback {
                data: f(data),
                error,
            },
            Self::Failed(error) => Fetched::Failed(error),
        }
    }

    /// Split into data plus an optional degradation note, failing when
    /// there is no data at all.
    pub fn into_result(self) -> Result<(T, Option<String>)> {
        match self {
            Self::Live(data) => Ok((data, None)),
            Self::Fallback { data, error } => Ok((data, Some(error))),
            Self::Failed(message) => Err(Error::Unavailable { message }),
        }
    }
}

/// Render an error with its source chain, e.g.
/// `request to '…' failed: error sending request: connection refused`.
pub fn error_message(error: &Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Apply the fallback policy to a finished request.
pub(crate) fn resolve<T>(
    result: Result<T>,
    policy: FallbackPolicy,
    fallback: impl FnOnce() -> Option<T>,
) -> Fetched<T> {
    match result {
        Ok(data) => Fetched::Live(data),
        Err(e) => {
            let message = error_message(&e);
            let substitute = match policy {
                FallbackPolicy::Permissive => fallback(),
                FallbackPolicy::Strict => None,
            };

            match substitute {
                Some(data) => {
                    warn!("Service unavailable, using offline data: {message}");
                    Fetched::Fallback {
                        data,
                        error: message,
                    }
                }
                None => Fetched::Failed(message),
            }
        }
    }
}

/// A `watch`-published [`ResourceState`].
///
/// Concurrent loads are not fenced: whichever finishes last determines the
/// published state.
#[derive(Debug)]
pub(crate) struct Resource<T> {
    tx: watch::Sender<ResourceState<T>>,
}

impl<T: Clone> Resource<T> {
    /// New resource; `loading` starts `true` for containers that fetch on
    /// creation.
    pub(crate) fn new(loading: bool) -> Self {
        let (tx, _rx) = watch::channel(ResourceState {
            loading,
            ..ResourceState::idle()
        });
        Self { tx }
    }

    /// Current state.
    pub(crate) fn snapshot(&self) -> ResourceState<T> {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub(crate) fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.tx.subscribe()
    }

    /// Run `request` and publish its outcome, replacing the previous state
    /// wholesale.
    pub(crate) async fn load<F, G>(
        &self,
        request: F,
        policy: FallbackPolicy,
        fallback: G,
    ) -> Fetched<T>
    where
        F: Future<Output = Result<T>>,
        G: FnOnce() -> Option<T>,
    {
        self.tx.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let fetched = resolve(request.await, policy, fallback);
        self.publish(&fetched);
        fetched
    }

    /// Publish a finished outcome.
    pub(crate) fn publish(&self, fetched: &Fetched<T>) {
        debug!(
            "Resource resolved (live: {}, fallback: {})",
            fetched.is_live(),
            fetched.is_fallback()
        );
        self.tx.send_replace(ResourceState {
            data: fetched.data().cloned(),
            loading: false,
            error: fetched.error().map(str::to_string),
        });
    }
}
