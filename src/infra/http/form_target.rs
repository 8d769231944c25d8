use async_trait::async_trait;
use reqwest::Method;

use crate::application::{
    error::ApiError,
    forms::{FormSink, FormVerb, Submission},
    routes::AdminRoute,
};

use super::RestClient;

/// Create or update endpoint of one resource.
#[derive(Clone)]
pub struct FormTarget {
    client: RestClient,
    method: Method,
    path: String,
    label: &'static str,
    verb: FormVerb,
    route: AdminRoute,
}

impl FormTarget {
    pub fn create(
        client: RestClient,
        path: impl Into<String>,
        label: &'static str,
        route: AdminRoute,
    ) -> Self {
        Self {
            client,
            method: Method::POST,
            path: path.into(),
            label,
            verb: FormVerb::Create,
            route,
        }
    }

    pub fn update(
        client: RestClient,
        path: impl Into<String>,
        label: &'static str,
        route: AdminRoute,
    ) -> Self {
        Self {
            client,
            method: Method::PUT,
            path: path.into(),
            label,
            verb: FormVerb::Update,
            route,
        }
    }

    /// Same endpoint, different verb; change-password is a `POST` that updates.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl FormSink for FormTarget {
    fn label(&self) -> &'static str {
        self.label
    }

    fn verb(&self) -> FormVerb {
        self.verb
    }

    fn return_route(&self) -> AdminRoute {
        self.route
    }

    async fn submit(&self, submission: Submission) -> Result<serde_json::Value, ApiError> {
        self.client
            .submit(self.method.clone(), &self.path, submission)
            .await
    }
}
