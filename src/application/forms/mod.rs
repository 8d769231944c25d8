//! Form-Sync view: create and edit forms submitted in a single request.
//!
//! Field rules run locally first; a form that fails them never reaches the
//! network. A form carrying a local image is sent as multipart with the other
//! fields serialized into a `data` part, otherwise as a JSON body.

pub mod image;
pub mod models;
pub mod validators;

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::application::{
    error::ApiError,
    notify::{Notifier, Toast, sentence_case},
    routes::AdminRoute,
};

pub use image::{ImageError, ImageField, LocalImage};
pub use models::*;
pub use validators::{FieldError, ValidationErrors};

pub trait FormModel {
    type Payload: Serialize;

    /// Multipart part name carrying the image file.
    const IMAGE_FIELD: &'static str = "image";

    fn validate(&self) -> ValidationErrors;

    /// Non-file fields as sent to the server; only called on a valid form.
    fn payload(&self) -> Self::Payload;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Json(serde_json::Value),
    Multipart {
        data: serde_json::Value,
        image_field: &'static str,
        image: LocalImage,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVerb {
    Create,
    Update,
}

impl FormVerb {
    pub fn past_tense(self) -> &'static str {
        match self {
            FormVerb::Create => "created",
            FormVerb::Update => "updated",
        }
    }

    pub fn infinitive(self) -> &'static str {
        match self {
            FormVerb::Create => "create",
            FormVerb::Update => "update",
        }
    }
}

/// Endpoint accepting a form submission.
#[async_trait]
pub trait FormSink: Send + Sync {
    fn label(&self) -> &'static str;

    fn verb(&self) -> FormVerb;

    /// Route shown once the server accepted the submission.
    fn return_route(&self) -> AdminRoute;

    async fn submit(&self, submission: Submission) -> Result<serde_json::Value, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Succeeded,
    Failed(ApiError),
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("form has invalid fields: {0}")]
    Invalid(ValidationErrors),
    #[error("a submission is already in progress")]
    Busy,
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("failed to encode form payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Api(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormOutcome {
    pub route: AdminRoute,
    pub response: serde_json::Value,
}

#[derive(Debug)]
pub struct FormSyncView<F> {
    form: F,
    image: ImageField,
    state: FormState,
    errors: ValidationErrors,
    max_image_bytes: u64,
}

impl<F: FormModel> FormSyncView<F> {
    pub fn new(form: F, max_image_bytes: u64) -> Self {
        Self {
            form,
            image: ImageField::Empty,
            state: FormState::Editing,
            errors: ValidationErrors::new(),
            max_image_bytes,
        }
    }

    /// Edit form for a record whose image is already stored remotely.
    pub fn editing(form: F, existing_image: Option<String>, max_image_bytes: u64) -> Self {
        let mut view = Self::new(form, max_image_bytes);
        if let Some(url) = existing_image.filter(|url| !url.is_empty()) {
            view.image = ImageField::Remote(url);
        }
        view
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn image(&self) -> &ImageField {
        &self.image
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub async fn select_image(&mut self, path: &Path) -> Result<(), FormError> {
        match LocalImage::load(path, self.max_image_bytes).await {
            Ok(image) => self.attach_image(image),
            Err(err) => {
                self.errors.push(F::IMAGE_FIELD, err.to_string());
                Err(err.into())
            }
        }
    }

    pub fn attach_image(&mut self, image: LocalImage) -> Result<(), FormError> {
        let size = image.len() as u64;
        if size > self.max_image_bytes {
            let err = ImageError::TooLarge {
                size,
                limit: self.max_image_bytes,
            };
            self.errors.push(F::IMAGE_FIELD, err.to_string());
            return Err(err.into());
        }
        self.image = ImageField::Local(image);
        Ok(())
    }

    /// Drop the image slot, releasing any local preview.
    pub fn remove_image(&mut self) {
        self.image = ImageField::Empty;
    }

    /// Abandon the form; the local preview is released with it.
    pub fn cancel(self) -> F {
        self.form
    }

    /// Validate and build the request body without sending it.
    pub fn prepare(&mut self) -> Result<Submission, FormError> {
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return Err(FormError::Invalid(self.errors.clone()));
        }
        let data = serde_json::to_value(self.form.payload())?;
        Ok(match &self.image {
            ImageField::Local(image) => Submission::Multipart {
                data,
                image_field: F::IMAGE_FIELD,
                image: image.clone(),
            },
            ImageField::Empty | ImageField::Remote(_) => Submission::Json(data),
        })
    }

    pub async fn submit(
        &mut self,
        sink: &dyn FormSink,
        notifier: &dyn Notifier,
    ) -> Result<FormOutcome, FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::Busy);
        }
        let submission = self.prepare()?;
        self.state = FormState::Submitting;
        debug!(
            target = "gratiswag_admin::forms",
            resource = sink.label(),
            multipart = matches!(submission, Submission::Multipart { .. }),
            "submitting form"
        );

        match sink.submit(submission).await {
            Ok(response) => {
                self.state = FormState::Succeeded;
                self.image = ImageField::Empty;
                notifier.notify(Toast::success(format!(
                    "{} {} successfully",
                    sentence_case(sink.label()),
                    sink.verb().past_tense()
                )));
                Ok(FormOutcome {
                    route: sink.return_route(),
                    response,
                })
            }
            Err(error) => {
                self.state = FormState::Failed(error.clone());
                notifier.notify(Toast::error(format!(
                    "Failed to {} {}: {}",
                    sink.verb().infinitive(),
                    sink.label(),
                    error.message()
                )));
                Err(FormError::Api(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::notify::{RecordingNotifier, ToastKind};

    struct StubSink {
        calls: Mutex<Vec<Submission>>,
        fail: bool,
    }

    impl StubSink {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl FormSink for StubSink {
        fn label(&self) -> &'static str {
            "blog"
        }

        fn verb(&self) -> FormVerb {
            FormVerb::Create
        }

        fn return_route(&self) -> AdminRoute {
            AdminRoute::Blogs
        }

        async fn submit(&self, submission: Submission) -> Result<serde_json::Value, ApiError> {
            self.calls.lock().expect("lock").push(submission);
            if self.fail {
                Err(ApiError::from_status(400, Some("Title taken".into())))
            } else {
                Ok(serde_json::json!({ "_id": "b1" }))
            }
        }
    }

    fn valid_blog() -> BlogForm {
        BlogForm {
            blog_title: "Holiday swag".into(),
            blog_description: "A roundup of winter gifts".into(),
        }
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_sink() {
        let sink = StubSink::new(false);
        let notifier = RecordingNotifier::new();
        let mut view = FormSyncView::new(BlogForm::default(), 1024);

        let err = view.submit(&sink, &notifier).await.expect_err("invalid");
        assert!(matches!(err, FormError::Invalid(_)));
        assert!(view.field_errors().has_field("blogTitle"));
        assert!(sink.calls.lock().expect("lock").is_empty());
        assert_eq!(view.state(), &FormState::Editing);
    }

    #[tokio::test]
    async fn image_switches_to_multipart_and_success_releases_preview() {
        let sink = StubSink::new(false);
        let notifier = RecordingNotifier::new();
        let mut view = FormSyncView::new(valid_blog(), 1024);
        view.attach_image(LocalImage::from_bytes("cover.png", vec![7_u8; 4], 1024).expect("image"))
            .expect("attach");

        let outcome = view.submit(&sink, &notifier).await.expect("submitted");
        assert_eq!(outcome.route, AdminRoute::Blogs);
        assert!(!view.image().has_local_preview());

        let calls = sink.calls.lock().expect("lock");
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Submission::Multipart {
                data, image_field, ..
            } => {
                assert_eq!(*image_field, "image");
                assert_eq!(data["blogTitle"], "Holiday swag");
            }
            other => panic!("expected multipart, got {other:?}"),
        }
        let toasts = notifier.drain();
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].text, "Blog created successfully");
    }

    #[tokio::test]
    async fn failure_keeps_form_and_image() {
        let sink = StubSink::new(true);
        let notifier = RecordingNotifier::new();
        let mut view = FormSyncView::new(valid_blog(), 1024);
        view.attach_image(LocalImage::from_bytes("cover.png", vec![1_u8], 1024).expect("image"))
            .expect("attach");

        let err = view.submit(&sink, &notifier).await.expect_err("rejected");
        assert!(matches!(err, FormError::Api(ApiError::Validation { .. })));
        assert!(view.image().has_local_preview());
        assert_eq!(view.form(), &valid_blog());
        assert!(matches!(view.state(), FormState::Failed(_)));
        assert_eq!(notifier.drain()[0].text, "Failed to create blog: Title taken");
    }

    #[test]
    fn without_image_the_payload_is_json() {
        let mut view = FormSyncView::editing(valid_blog(), Some("https://cdn/x.png".into()), 1024);
        assert!(matches!(view.image(), ImageField::Remote(_)));
        assert!(matches!(view.prepare(), Ok(Submission::Json(_))));
    }

    #[test]
    fn oversized_attachment_is_a_field_error() {
        let mut view = FormSyncView::new(valid_blog(), 2);
        let image = LocalImage::from_bytes("cover.png", vec![1_u8; 2], 2).expect("image");
        view.attach_image(image).expect("fits");
        view.max_image_bytes = 1;
        let image = LocalImage::from_bytes("cover.png", vec![1_u8; 2], 2).expect("image");
        assert!(matches!(view.attach_image(image), Err(FormError::Image(_))));
        assert!(view.field_errors().has_field("image"));
    }
}
