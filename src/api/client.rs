//! HTTP transport to the identification service.
//!
//! [`ApiClient`] owns the base URLs and the pooled `reqwest` client. Entity
//! operations live in `impl ApiClient` blocks in the sibling modules; this
//! file holds construction and the request helpers they share.

use crate::config::{ApiConfig, parse_base_url};
use crate::constants::{APP_NAME, endpoints};
use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Which of the two configured base URLs an endpoint lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Service {
    /// Catalog, predictions, feedback, health.
    Main,
    /// Dashboard aggregates.
    Dashboard,
}

/// Client for the identification service.
///
/// Build one at startup and share it (`Arc<ApiClient>`) with every
/// data-access container. Requests are independent: there is no retry,
/// caching or deduplication.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    dashboard_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for `base_url` with default settings.
    ///
    /// Dashboard endpoints are served from the same base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = build_http_client(None)?;
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            dashboard_url: base_url.clone(),
            base_url,
            http,
        })
    }

    /// Create a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let http = build_http_client(config.timeout())?;
        Ok(Self {
            base_url: parse_base_url(config.base_url())?,
            dashboard_url: parse_base_url(config.dashboard_base_url())?,
            http,
        })
    }

    /// Serve dashboard endpoints from a separate base URL.
    pub fn with_dashboard_url(mut self, dashboard_url: &str) -> Result<Self> {
        self.dashboard_url = parse_base_url(dashboard_url)?;
        Ok(self)
    }

    /// Base URL for catalog, prediction and health endpoints.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL for dashboard endpoints.
    pub fn dashboard_url(&self) -> &Url {
        &self.dashboard_url
    }

    /// Probe the liveness endpoint and return its body verbatim.
    ///
    /// Any error means the service should be treated as offline.
    pub async fn health_check(&self) -> Result<String> {
        let url = self.url(Service::Main, endpoints::HEALTH, &[])?;
        let response = self.execute(self.http.get(url.clone()), &url).await?;
        let response = check_status(response, &url)?;
        response.text().await.map_err(|e| Error::Decode {
            url: url.to_string(),
            source: e,
        })
    }

    /// Build an endpoint URL: `path` (slash-separated) plus extra segments,
    /// each percent-encoded.
    pub(crate) fn url(&self, service: Service, path: &str, extra: &[&str]) -> Result<Url> {
        let mut url = match service {
            Service::Main => self.base_url.clone(),
            Service::Dashboard => self.dashboard_url.clone(),
        };

        if url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: url.to_string(),
                reason: "cannot be a base URL".to_string(),
            });
        }

        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/'))
                .extend(extra);
        }

        Ok(url)
    }

    /// GET `url` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let request = self
            .http
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        let response = self.execute(request, &url).await?;
        decode_json(check_status(response, &url)?, &url).await
    }

    /// Send `body` as JSON with `method` and decode the JSON reply.
    pub(crate) async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .request(method, url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(body);
        let response = self.execute(request, &url).await?;
        decode_json(check_status(response, &url)?, &url).await
    }

    /// Send a request whose success reply carries nothing of interest.
    pub(crate) async fn send_unit<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.execute(request, &url).await?;
        check_status(response, &url)?;
        Ok(())
    }

    /// POST a multipart form. Non-2xx replies become [`Error::Upload`].
    pub(crate) async fn post_multipart<T: DeserializeOwned>(&self, url: Url, form: Form) -> Result<T> {
        let request = self
            .http
            .post(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .multipart(form);
        let response = self.execute(request, &url).await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upload to {url} answered {status}");
            return Err(Error::Upload {
                status: status.as_u16(),
                reason: reason_phrase(status),
            });
        }

        decode_json(response, &url).await
    }

    /// Send a prepared request, mapping transport failures.
    pub(crate) async fn execute(&self, request: RequestBuilder, url: &Url) -> Result<Response> {
        debug!("Request: {url}");
        request.send().await.map_err(|e| {
            warn!("Request to {url} failed: {e}");
            Error::Network {
                url: url.to_string(),
                source: e,
            }
        })
    }
}

/// Build the pooled HTTP client.
fn build_http_client(timeout: Option<std::time::Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("birdid/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(std::time::Duration::from_secs(10));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    debug!("Building HTTP client for {APP_NAME} (timeout: {timeout:?})");
    builder.build().map_err(|e| Error::ClientBuild { source: e })
}

/// Turn a non-2xx response into [`Error::Api`].
fn check_status(response: Response, url: &Url) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!("{url} answered {status}");
    Err(Error::Api {
        status: status.as_u16(),
        reason: reason_phrase(status),
        url: url.to_string(),
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        warn!("Could not decode response from {url}: {e}");
        Error::Decode {
            url: url.to_string(),
            source: e,
        }
    })
}

/// Canonical reason phrase, empty for non-standard codes.
pub(crate) fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}
