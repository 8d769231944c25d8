#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::routes::AdminRoute,
    domain::{ids::RecordId, mutation::PendingMutation},
    infra::http::resources::ShopsApi,
};

use crate::args::ShopsCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::lists::Screen;

pub async fn handle(ctx: &Ctx, cmd: ShopsCmd) -> Result<(), CliError> {
    let screen = Screen::new(
        AdminRoute::CompanyRequests,
        "company requests",
        ShopsApi::new(ctx.client()),
    );
    match cmd {
        ShopsCmd::List(paging) => screen.show(ctx, paging.page).await,
        ShopsCmd::Show { id, page } => screen.detail(ctx, page.page, &RecordId::new(id)?).await,
        ShopsCmd::Approve { id, page } => {
            let mutation = PendingMutation::approve(RecordId::new(id)?);
            screen.act(ctx, page.page, mutation, false).await
        }
        ShopsCmd::Reject { id, page } => {
            let mutation = PendingMutation::reject(RecordId::new(id)?);
            screen.act(ctx, page.page, mutation, false).await
        }
    }
}
