use async_trait::async_trait;
use gratiswag_api_types::Blog;

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
pub struct BlogsApi {
    client: RestClient,
}

impl BlogsApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &RecordId) -> Result<Blog, ApiError> {
        self.client.get(&format!("blog/{id}"), &[], Auth::Session).await
    }

    pub fn create_target(&self) -> FormTarget {
        FormTarget::create(self.client.clone(), "blog/create", "blog", AdminRoute::Blogs)
    }

    pub fn update_target(&self, id: &RecordId) -> FormTarget {
        FormTarget::update(
            self.client.clone(),
            format!("blog/{id}"),
            "blog",
            AdminRoute::Blogs,
        )
    }
}

impl ListRow for Blog {
    fn row_id(&self) -> &str {
        &self.id
    }
}

#[async_trait]
impl ListSource for BlogsApi {
    type Item = Blog;

    fn label(&self) -> &'static str {
        "blog"
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<PageFetch<Blog>, ApiError> {
        self.client.fetch_page("blog", request, None).await
    }

    async fn apply(&self, mutation: &PendingMutation) -> Result<(), ApiError> {
        match mutation.kind() {
            MutationKind::Delete => {
                self.client
                    .delete(&format!("blog/{}", mutation.target_id()))
                    .await
            }
            other => Err(unsupported(self.label(), other)),
        }
    }

    fn permits(&self, _row: &Blog, kind: &MutationKind) -> bool {
        matches!(kind, MutationKind::Delete)
    }
}
