use async_trait::async_trait;
use gratiswag_api_types::Category;

use crate::{
    application::{
        error::ApiError,
        list_sync::{ListRow, ListSource},
        routes::AdminRoute,
    },
    domain::{
        ids::RecordId,
        mutation::{MutationKind, PendingMutation},
        pagination::{MAX_PAGE_SIZE, PageFetch, PageRequest},
    },
    infra::http::{Auth, FormTarget, RestClient},
};

use super::unsupported;

#[derive(Clone)]
pub struct CategoriesApi {
    client: RestClient,
}

impl CategoriesApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &RecordId) -> Result<Category, ApiError> {
        self.client
            .get(&format!("category/{id}"), &[], Auth::Session)
            .await
    }

    /// Categories offered by the product form.
    pub async fn choices(&self) -> Result<Vec<Category>, ApiError> {
        let request = PageRequest::new(1, MAX_PAGE_SIZE)
            .map_err(|err| ApiError::rejected(Some(err.to_string())))?;
        Ok(self
            .fetch_page(request)
            .await?
            .into_page()
            .map(|page| page.into_items())
            .unwrap_or_default())
    }

    pub fn create_target(&self) -> FormTarget {
        FormTarget::create(
            self.client.clone(),
            "category",
            "category",
            AdminRoute::Categories,
        )
    }

    pub fn update_target(&self, id: &RecordId) -> FormTarget {
        FormTarget::update(
            self.client.clone(),
            format!("category/{id}"),
            "category",
            AdminRoute::Categories,
        )
    }
}

impl ListRow for Category {
    fn row_id(&self) -> &str {
        &self.id
    }
}

#[async_trait]
impl ListSource for CategoriesApi {
    type Item = Category;

    fn label(&self) -> &'static str {
        "category"
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<PageFetch<Category>, ApiError> {
        self.client.fetch_page("category", request, None).await
    }

    async fn apply(&self, mutation: &PendingMutation) -> Result<(), ApiError> {
        match mutation.kind() {
            MutationKind::Delete => {
                self.client
                    .delete(&format!("category/{}", mutation.target_id()))
                    .await
            }
            other => Err(unsupported(self.label(), other)),
        }
    }

    fn permits(&self, _row: &Category, kind: &MutationKind) -> bool {
        matches!(kind, MutationKind::Delete)
    }
}
