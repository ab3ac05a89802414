//! Species catalog endpoints.

use super::client::{ApiClient, Service};
use super::types::{Bird, BirdPatch};
use crate::constants::endpoints;
use crate::error::Result;
use reqwest::Method;

impl ApiClient {
    /// `GET /birds`.
    pub async fn get_all_birds(&self) -> Result<Vec<Bird>> {
        let url = self.url(Service::Main, endpoints::BIRDS, &[])?;
        self.get_json(url).await
    }

    /// `GET /birds/{id}`. A missing species surfaces as a plain 404 API error.
    pub async fn get_bird_by_id(&self, id: &str) -> Result<Bird> {
        let url = self.url(Service::Main, endpoints::BIRDS, &[id])?;
        self.get_json(url).await
    }

    /// `POST /birds`.
    pub async fn create_bird(&self, patch: &BirdPatch) -> Result<Bird> {
        let url = self.url(Service::Main, endpoints::BIRDS, &[])?;
        self.send_json(Method::POST, url, patch).await
    }

    /// `PUT /birds/{id}`.
    pub async fn update_bird(&self, id: &str, patch: &BirdPatch) -> Result<Bird> {
        let url = self.url(Service::Main, endpoints::BIRDS, &[id])?;
        self.send_json(Method::PUT, url, patch).await
    }

    /// `DELETE /birds/{id}`.
    pub async fn delete_bird(&self, id: &str) -> Result<()> {
        let url = self.url(Service::Main, endpoints::BIRDS, &[id])?;
        self.send_unit::<()>(Method::DELETE, url, None).await
    }
}
