use gratiswag_api_types::UserProfile;
use reqwest::Method;

use crate::{
    application::{error::ApiError, routes::AdminRoute},
    infra::http::{Auth, FormTarget, RestClient},
};

#[derive(Clone)]
pub struct ProfileApi {
    client: RestClient,
}

impl ProfileApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn show(&self) -> Result<UserProfile, ApiError> {
        self.client.get("user/profile", &[], Auth::Session).await
    }

    pub fn update_target(&self) -> FormTarget {
        FormTarget::update(
            self.client.clone(),
            "user/update-profile",
            "profile",
            AdminRoute::Settings,
        )
    }

    pub fn change_password_target(&self) -> FormTarget {
        FormTarget::update(
            self.client.clone(),
            "auth/change-password",
            "password",
            AdminRoute::Settings,
        )
        .with_method(Method::POST)
    }
}
