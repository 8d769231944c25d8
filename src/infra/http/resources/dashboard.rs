use gratiswag_api_types::{DashboardSummary, RevenueFilter, RevenueReport};

use crate::{
    application::error::ApiError,
    infra::http::{Auth, RestClient},
};

#[derive(Clone)]
pub struct DashboardApi {
    client: RestClient,
}

impl DashboardApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, ApiError> {
        self.client
            .get("dashboard/admin-summary", &[], Auth::Session)
            .await
    }

    pub async fn revenue_report(&self, filter: RevenueFilter) -> Result<RevenueReport, ApiError> {
        self.client
            .get(
                "dashboard/admin-revenue-report",
                &[("filterBy", filter.as_str().to_string())],
                Auth::Session,
            )
            .await
    }
}
