#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use gratiswag_admin::{
    application::{
        auth::{AuthError, AuthService},
        error::ApiError,
        forms::FormError,
        list_sync::{ListSource, ListSyncController, ListSyncError},
        notify::{Notifier, RecordingNotifier},
        routes::{AdminRoute, GuardDecision, guard},
        session::SessionStore,
    },
    config::{LoadError, Settings},
    domain::{error::DomainError, session::Session},
    infra::{
        error::InfraError,
        http::{RestClient, resources::AuthApi},
        session_file::FileSessionStore,
    },
    presentation::views::{TemplateRenderError, render_toast},
};
use thiserror::Error;

use crate::args::OutputFormat;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("sign in first (`gratiswag-admin auth login`); requested page would redirect to {location}")]
    LoginRequired { location: String },
    #[error("no password reset in progress; start with `gratiswag-admin auth forgot-password`")]
    ResetNotStarted,
    #[error(transparent)]
    ListSync(#[from] ListSyncError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Render(#[from] TemplateRenderError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read from stdin: {0}")]
    Stdin(std::io::Error),
    #[error("failed to render output: {0}")]
    Output(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Everything a command handler needs: settings, the persisted session and an
/// API client bound to it.
pub struct Ctx {
    pub settings: Settings,
    pub output: OutputFormat,
    sessions: Arc<FileSessionStore>,
    client: RestClient,
    notifier: Arc<RecordingNotifier>,
}

impl Ctx {
    pub fn new(settings: Settings, output: OutputFormat) -> Result<Self, CliError> {
        let sessions = Arc::new(FileSessionStore::open(&settings.session.file)?);
        let store: Arc<dyn SessionStore> = sessions.clone();
        let client = RestClient::new(&settings.api.base_url, settings.api.timeout, store)?;
        Ok(Self {
            settings,
            output,
            sessions,
            client,
            notifier: Arc::new(RecordingNotifier::new()),
        })
    }

    pub fn client(&self) -> RestClient {
        self.client.clone()
    }

    pub fn sessions(&self) -> &FileSessionStore {
        &self.sessions
    }

    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(AuthApi::new(self.client()), self.session_store())
    }

    pub fn max_image_bytes(&self) -> u64 {
        self.settings.uploads.max_image_bytes.get()
    }

    /// Apply the admin route guard before a protected command runs.
    pub fn require_session(&self, route: AdminRoute) -> Result<Session, CliError> {
        let session = self.sessions.session();
        match guard(route.path(), session.as_ref()) {
            GuardDecision::Allow => session.ok_or_else(|| CliError::LoginRequired {
                location: route.path().to_string(),
            }),
            GuardDecision::RedirectToLogin { location } => {
                Err(CliError::LoginRequired { location })
            }
        }
    }

    pub fn list_controller<S: ListSource>(
        &self,
        source: S,
    ) -> Result<ListSyncController<S>, CliError> {
        let notifier: Arc<dyn Notifier> = self.notifier.clone();
        Ok(ListSyncController::new(
            source,
            self.session_store(),
            notifier,
            self.settings.api.page_size,
        )?)
    }

    /// Write pending toasts to stderr, keeping stdout for results.
    pub fn flush_toasts(&self) -> Result<(), CliError> {
        for toast in self.notifier.drain() {
            eprintln!("{}", render_toast(&toast)?.trim_end());
        }
        Ok(())
    }
}
