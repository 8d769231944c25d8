#![deny(clippy::all, clippy::pedantic)]

use std::path::Path;

use gratiswag_admin::application::forms::{FormError, FormModel, FormSink, FormSyncView};

use crate::args::OutputFormat;
use crate::client::{CliError, Ctx};
use crate::print::print_json;

/// Attach the optional image, submit once and report the outcome.
pub async fn submit<F: FormModel>(
    ctx: &Ctx,
    mut view: FormSyncView<F>,
    image: Option<&Path>,
    sink: &dyn FormSink,
) -> Result<(), CliError> {
    if let Some(path) = image {
        view.select_image(path).await?;
    }
    let result = view.submit(sink, ctx.notifier()).await;
    ctx.flush_toasts()?;
    match result {
        Ok(outcome) => match ctx.output {
            OutputFormat::Json => print_json(&outcome.response),
            OutputFormat::Table => {
                println!("Back to {}", outcome.route);
                Ok(())
            }
        },
        Err(FormError::Invalid(errors)) => {
            for error in errors.iter() {
                eprintln!("{}: {}", error.field, error.message);
            }
            Err(FormError::Invalid(errors).into())
        }
        Err(err) => Err(err.into()),
    }
}
