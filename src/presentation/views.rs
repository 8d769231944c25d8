use askama::{Error as AskamaError, Template};
use thiserror::Error;

use crate::application::notify::Toast;

#[derive(Debug, Error)]
#[error("failed to render {source}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, error: AskamaError) -> Self {
        Self { source, error }
    }
}

pub fn render_template<T: Template>(
    source: &'static str,
    template: &T,
) -> Result<String, TemplateRenderError> {
    template
        .render()
        .map_err(|err| TemplateRenderError::new(source, err))
}

/// One-paragraph status message, used for loading, signed-out and error panels.
#[derive(Template)]
#[template(path = "notice.txt")]
pub struct NoticeView {
    pub headline: String,
    pub hint: String,
}

impl NoticeView {
    pub fn new(headline: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            hint: hint.into(),
        }
    }

    pub fn render(&self) -> Result<String, TemplateRenderError> {
        render_template("notice", self)
    }
}

#[derive(Template)]
#[template(path = "toast.txt")]
struct ToastView<'a> {
    kind: &'static str,
    text: &'a str,
}

pub fn render_toast(toast: &Toast) -> Result<String, TemplateRenderError> {
    render_template(
        "toast",
        &ToastView {
            kind: toast.kind.as_variant(),
            text: &toast.text,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_line_carries_kind() {
        let rendered = render_toast(&Toast::success("Blog deleted successfully")).expect("render");
        assert_eq!(rendered.trim_end(), "[success] Blog deleted successfully");
    }

    #[test]
    fn notice_omits_empty_hint() {
        let rendered = NoticeView::new("Loading blogs", "").render().expect("render");
        assert_eq!(rendered.trim_end(), "Loading blogs");
        let rendered = NoticeView::new("Failed", "Retry with --page 2")
            .render()
            .expect("render");
        assert!(rendered.contains("Retry with --page 2"));
    }
}
