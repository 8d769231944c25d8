#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::{
        forms::{FormSyncView, ProfileForm},
        routes::AdminRoute,
    },
    infra::http::resources::ProfileApi,
};

use crate::args::ProfileCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::forms;
use crate::print::print_record;

pub async fn handle(ctx: &Ctx, cmd: ProfileCmd) -> Result<(), CliError> {
    ctx.require_session(AdminRoute::Settings)?;
    let api = ProfileApi::new(ctx.client());
    match cmd {
        ProfileCmd::Show => {
            let profile = api.show().await?;
            print_record(ctx, &profile)
        }
        ProfileCmd::Update {
            name,
            email,
            phone,
            image,
        } => {
            let current = api.show().await?;
            let form = ProfileForm {
                name,
                email,
                phone: phone.or(current.phone),
            };
            let view = FormSyncView::editing(form, current.image_link, ctx.max_image_bytes());
            forms::submit(ctx, view, image.as_deref(), &api.update_target()).await
        }
    }
}
