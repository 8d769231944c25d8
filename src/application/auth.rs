//! Sign-in, sign-out and the password-reset flow.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    application::{
        error::ApiError,
        forms::{
            FormModel, ForgotPasswordForm, LoginForm, ResetPasswordForm, ValidationErrors,
            VerifyOtpForm,
        },
        routes::post_login_target,
        session::SessionStore,
    },
    domain::{
        error::DomainError,
        session::{BearerToken, Session},
    },
    infra::http::resources::AuthApi,
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("form has invalid fields: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        Self::Api(ApiError::malformed(err.to_string()))
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub session: Session,
    /// Where the console should continue.
    pub location: String,
}

/// Identity provider facade over the auth endpoints and the session store.
#[derive(Clone)]
pub struct AuthService {
    api: AuthApi,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(api: AuthApi, sessions: Arc<dyn SessionStore>) -> Self {
        Self { api, sessions }
    }

    pub async fn login(
        &self,
        form: &LoginForm,
        callback: Option<&str>,
    ) -> Result<SignedIn, AuthError> {
        validated(form)?;
        let data = self.api.login(&form.payload()).await?;
        let session = Session::new(
            data.user.id,
            data.user.name,
            data.user.role,
            BearerToken::new(data.access_token)?,
        )?;
        self.sessions.set_session(session.clone());
        info!(
            target = "gratiswag_admin::auth",
            subject = session.subject_id(),
            "signed in"
        );
        Ok(SignedIn {
            session,
            location: post_login_target(callback),
        })
    }

    pub fn current_session(&self) -> Option<Session> {
        self.sessions.session()
    }

    pub fn logout(&self) {
        self.sessions.clear();
        info!(target = "gratiswag_admin::auth", "signed out");
    }

    /// Ask for a one-time code; returns the reset token for the next step.
    pub async fn request_password_reset(
        &self,
        form: &ForgotPasswordForm,
    ) -> Result<BearerToken, AuthError> {
        validated(form)?;
        let data = self.api.forgot_password(&form.payload()).await?;
        Ok(BearerToken::new(data.access_token)?)
    }

    /// Exchange the one-time code for a token allowed to set a new password.
    pub async fn verify_otp(
        &self,
        reset_token: &BearerToken,
        form: &VerifyOtpForm,
    ) -> Result<BearerToken, AuthError> {
        validated(form)?;
        let data = self.api.verify_otp(reset_token, &form.payload()).await?;
        Ok(BearerToken::new(data.access_token)?)
    }

    pub async fn reset_password(
        &self,
        reset_token: &BearerToken,
        form: &ResetPasswordForm,
    ) -> Result<(), AuthError> {
        validated(form)?;
        self.api
            .reset_password(reset_token, &form.payload())
            .await?;
        Ok(())
    }
}

fn validated<F: FormModel>(form: &F) -> Result<(), AuthError> {
    form.validate().into_result().map_err(AuthError::Invalid)
}
