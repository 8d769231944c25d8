use async_trait::async_trait;
use gratiswag_api_types::{AssignedProduct, StatusRequest};
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

const PENDING: &str = "pending";

/// Product requests raised by companies; the endpoint is unpaginated.
#[derive(Clone)]
pub struct ProductRequestsApi {
    client: RestClient,
}

impl ProductRequestsApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl ListRow for AssignedProduct {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn row_status(&self) -> Option<&str> {
        Some(&self.status)
    }
}

#[async_trait]
impl ListSource for ProductRequestsApi {
    type Item = AssignedProduct;

    fn label(&self) -> &'static str {
        "product request"
    }

    async fn fetch_page(
        &self,
        request: PageRequest,
    ) -> Result<PageFetch<AssignedProduct>, ApiError> {
        let all = self.client.fetch_all("assigned-product").await?;
        PageFetch::from_slice(all, request).map_err(|err| ApiError::malformed(err.to_string()))
    }

    async fn apply(&self, mutation: &PendingMutation) -> Result<(), ApiError> {
        let status = match mutation.kind() {
            MutationKind::Approve => "approved",
            MutationKind::Reject => "rejected",
            other => return Err(unsupported(self.label(), other)),
        };
        self.client
            .send_json_unit(
                Method::PUT,
                &format!("assigned-product/status/{}", mutation.target_id()),
                Auth::Session,
                &StatusRequest { status },
            )
            .await
    }

    fn permits(&self, row: &AssignedProduct, kind: &MutationKind) -> bool {
        matches!(kind, MutationKind::Approve | MutationKind::Reject) && row.status == PENDING
    }
}
