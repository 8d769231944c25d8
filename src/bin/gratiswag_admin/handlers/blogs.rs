#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::{
        forms::{BlogForm, FormSyncView},
        routes::AdminRoute,
    },
    domain::{ids::RecordId, mutation::PendingMutation},
    infra::http::resources::BlogsApi,
};

use crate::args::BlogsCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::{forms, lists::Screen};
use crate::io::read_opt_value;
use crate::print::print_record;

pub async fn handle(ctx: &Ctx, cmd: BlogsCmd) -> Result<(), CliError> {
    let api = BlogsApi::new(ctx.client());
    match cmd {
        BlogsCmd::List(paging) => screen(api).show(ctx, paging.page).await,
        BlogsCmd::Show { id } => {
            ctx.require_session(AdminRoute::Blogs)?;
            let blog = api.get(&RecordId::new(id)?).await?;
            print_record(ctx, &blog)
        }
        BlogsCmd::Create {
            title,
            description,
            description_file,
            image,
        } => {
            ctx.require_session(AdminRoute::Blogs)?;
            let form = BlogForm {
                blog_title: title,
                blog_description: read_opt_value(description, description_file)
                    .await?
                    .unwrap_or_default(),
            };
            let view = FormSyncView::new(form, ctx.max_image_bytes());
            forms::submit(ctx, view, image.as_deref(), &api.create_target()).await
        }
        BlogsCmd::Update {
            id,
            title,
            description,
            description_file,
            image,
        } => {
            ctx.require_session(AdminRoute::Blogs)?;
            let id = RecordId::new(id)?;
            let current = api.get(&id).await?;
            let form = BlogForm {
                blog_title: title,
                blog_description: read_opt_value(description, description_file)
                    .await?
                    .unwrap_or(current.blog_description),
            };
            let view = FormSyncView::editing(form, current.image, ctx.max_image_bytes());
            forms::submit(ctx, view, image.as_deref(), &api.update_target(&id)).await
        }
        BlogsCmd::Delete { id, page, confirm } => {
            let mutation = PendingMutation::delete(RecordId::new(id)?);
            screen(api).act(ctx, page.page, mutation, confirm.yes).await
        }
    }
}

fn screen(api: BlogsApi) -> Screen<BlogsApi> {
    Screen::new(AdminRoute::Blogs, "blogs", api)
}
