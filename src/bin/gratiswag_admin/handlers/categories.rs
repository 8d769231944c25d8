#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::{
        forms::{CategoryForm, FormSyncView},
        routes::AdminRoute,
    },
    domain::{ids::RecordId, mutation::PendingMutation},
    infra::http::resources::CategoriesApi,
};

use crate::args::CategoriesCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::{forms, lists::Screen};
use crate::print::print_record;

pub async fn handle(ctx: &Ctx, cmd: CategoriesCmd) -> Result<(), CliError> {
    let api = CategoriesApi::new(ctx.client());
    match cmd {
        CategoriesCmd::List(paging) => screen(api).show(ctx, paging.page).await,
        CategoriesCmd::Show { id } => {
            ctx.require_session(AdminRoute::Categories)?;
            let category = api.get(&RecordId::new(id)?).await?;
            print_record(ctx, &category)
        }
        CategoriesCmd::Create { title, image } => {
            ctx.require_session(AdminRoute::Categories)?;
            let view = FormSyncView::new(CategoryForm { title }, ctx.max_image_bytes());
            forms::submit(ctx, view, image.as_deref(), &api.create_target()).await
        }
        CategoriesCmd::Update { id, title, image } => {
            ctx.require_session(AdminRoute::Categories)?;
            let id = RecordId::new(id)?;
            let current = api.get(&id).await?;
            let view = FormSyncView::editing(
                CategoryForm { title },
                current.thumbnail,
                ctx.max_image_bytes(),
            );
            forms::submit(ctx, view, image.as_deref(), &api.update_target(&id)).await
        }
        CategoriesCmd::Delete { id, page, confirm } => {
            let mutation = PendingMutation::delete(RecordId::new(id)?);
            screen(api).act(ctx, page.page, mutation, confirm.yes).await
        }
    }
}

fn screen(api: CategoriesApi) -> Screen<CategoriesApi> {
    Screen::new(AdminRoute::Categories, "categories", api)
}
