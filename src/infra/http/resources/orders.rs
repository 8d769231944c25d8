use async_trait::async_trait;
use gratiswag_api_types::{Order, OrderStatus, StatusRequest};
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

#[derive(Clone)]
pub struct OrdersApi {
    client: RestClient,
}

impl OrdersApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl ListRow for Order {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn row_status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[async_trait]
impl ListSource for OrdersApi {
    type Item = Order;

    fn label(&self) -> &'static str {
        "order"
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<PageFetch<Order>, ApiError> {
        self.client.fetch_page("order", request, Some("orders")).await
    }

    async fn apply(&self, mutation: &PendingMutation) -> Result<(), ApiError> {
        match mutation.kind() {
            MutationKind::StatusChange { to } => {
                let status: OrderStatus = to
                    .parse()
                    .map_err(|err: String| ApiError::rejected(Some(err)))?;
                self.client
                    .send_json_unit(
                        Method::PUT,
                        &format!("order/status/{}", mutation.target_id()),
                        Auth::Session,
                        &StatusRequest { status },
                    )
                    .await
            }
            other => Err(unsupported(self.label(), other)),
        }
    }

    fn permits(&self, row: &Order, kind: &MutationKind) -> bool {
        match kind {
            MutationKind::StatusChange { to } => to
                .parse::<OrderStatus>()
                .is_ok_and(|status| status != row.status),
            _ => false,
        }
    }
}
