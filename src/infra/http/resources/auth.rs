use gratiswag_api_types::{
    AccessTokenData, ForgotPasswordRequest, LoginData, LoginRequest, ResetPasswordRequest,
    VerifyOtpRequest,
};
use reqwest::Method;

use crate::{
    application::error::ApiError,
    domain::session::BearerToken,
    infra::http::{Auth, RestClient},
};

/// Unauthenticated and reset-token endpoints under `/auth`.
#[derive(Clone)]
pub struct AuthApi {
    client: RestClient,
}

impl AuthApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginData, ApiError> {
        self.client
            .send_json(Method::POST, "auth/login", Auth::Anonymous, request)
            .await
    }

    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<AccessTokenData, ApiError> {
        self.client
            .send_json(Method::POST, "auth/forgot-password", Auth::Anonymous, request)
            .await
    }

    pub async fn verify_otp(
        &self,
        reset_token: &BearerToken,
        request: &VerifyOtpRequest,
    ) -> Result<AccessTokenData, ApiError> {
        self.client
            .send_json(
                Method::POST,
                "auth/verify-token",
                Auth::Bearer(reset_token),
                request,
            )
            .await
    }

    pub async fn reset_password(
        &self,
        reset_token: &BearerToken,
        request: &ResetPasswordRequest,
    ) -> Result<(), ApiError> {
        self.client
            .send_json_unit(
                Method::POST,
                "auth/reset-password",
                Auth::Bearer(reset_token),
                request,
            )
            .await
    }
}
