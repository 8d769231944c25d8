use async_trait::async_trait;
use gratiswag_api_types::{Shop, ShopStatus, StatusRequest};
use reqwest::Method;

use crate::{
    application::{
        error::ApiError,
        list_sync::{ListRow, ListSource},
    },
    domain::{
        mutation::{MutationKind, PendingMutation},
        pagination::{PageFetch, PageRequest},
    },
    infra::http::{Auth, RestClient},
};

use super::unsupported;

/// Company onboarding requests.
#[derive(Clone)]
pub struct ShopsApi {
    client: RestClient,
}

impl ShopsApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl ListRow for Shop {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn row_status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[async_trait]
impl ListSource for ShopsApi {
    type Item = Shop;

    fn label(&self) -> &'static str {
        "shop"
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<PageFetch<Shop>, ApiError> {
        self.client.fetch_page("shop", request, None).await
    }

    async fn apply(&self, mutation: &PendingMutation) -> Result<(), ApiError> {
        let status = match mutation.kind() {
            MutationKind::Approve => ShopStatus::Approved,
            MutationKind::Reject => ShopStatus::Rejected,
            other => return Err(unsupported(self.label(), other)),
        };
        self.client
            .send_json_unit(
                Method::PUT,
                &format!("shop/{}", mutation.target_id()),
                Auth::Session,
                &StatusRequest { status },
            )
            .await
    }

    fn permits(&self, row: &Shop, kind: &MutationKind) -> bool {
        match kind {
            MutationKind::Approve => row.status != ShopStatus::Approved,
            MutationKind::Reject => row.status != ShopStatus::Rejected,
            _ => false,
        }
    }
}
