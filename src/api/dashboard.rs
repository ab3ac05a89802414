//! Dashboard aggregate endpoints, served from the dashboard base URL.

use super::client::{ApiClient, Service};
use super::types::{DashboardBird, DashboardStats};
use crate::constants::endpoints;
use crate::error::Result;

impl ApiClient {
    /// `GET /birds/dashboard`.
    pub async fn get_dashboard_birds(&self) -> Result<Vec<DashboardBird>> {
        let url = self.url(Service::Dashboard, endpoints::DASHBOARD_BIRDS, &[])?;
        self.get_json(url).await
    }

    /// `GET /dashboard/stats`.
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        let url = self.url(Service::Dashboard, endpoints::DASHBOARD_STATS, &[])?;
        self.get_json(url).await
    }
}
