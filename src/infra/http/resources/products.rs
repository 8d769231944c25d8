use async_trait::async_trait;
use gratiswag_api_types::Product;

use crate::{
    application::{
        error::ApiError,
        list_sync::{ListRow, ListSource},
        routes::AdminRoute,
    },
    domain::{
        ids::RecordId,
        mutation::{MutationKind, PendingMutation},
        pagination::{PageFetch, PageRequest},
    },
    infra::http::{Auth, FormTarget, RestClient},
};

use super::unsupported;

#[derive(Clone)]
pub struct ProductsApi {
    client: RestClient,
}

impl ProductsApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &RecordId) -> Result<Product, ApiError> {
        self.client
            .get(&format!("product/{id}"), &[], Auth::Session)
            .await
    }

    pub fn create_target(&self) -> FormTarget {
        FormTarget::create(
            self.client.clone(),
            "product",
            "product",
            AdminRoute::Products,
        )
    }

    pub fn update_target(&self, id: &RecordId) -> FormTarget {
        FormTarget::update(
            self.client.clone(),
            format!("product/{id}"),
            "product",
            AdminRoute::Products,
        )
    }
}

impl ListRow for Product {
    fn row_id(&self) -> &str {
        &self.id
    }
}

#[async_trait]
impl ListSource for ProductsApi {
    type Item = Product;

    fn label(&self) -> &'static str {
        "product"
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<PageFetch<Product>, ApiError> {
        self.client.fetch_page("product/get-all", request, None).await
    }

    async fn apply(&self, mutation: &PendingMutation) -> Result<(), ApiError> {
        match mutation.kind() {
            MutationKind::Delete => {
                self.client
                    .delete(&format!("product/{}", mutation.target_id()))
                    .await
            }
            other => Err(unsupported(self.label(), other)),
        }
    }

    fn permits(&self, _row: &Product, kind: &MutationKind) -> bool {
        matches!(kind, MutationKind::Delete)
    }
}
