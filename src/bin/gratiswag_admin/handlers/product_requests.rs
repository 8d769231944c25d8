#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::routes::AdminRoute,
    domain::{ids::RecordId, mutation::PendingMutation},
    infra::http::resources::ProductRequestsApi,
};

use crate::args::ProductRequestsCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::lists::Screen;

pub async fn handle(ctx: &Ctx, cmd: ProductRequestsCmd) -> Result<(), CliError> {
    let screen = Screen::new(
        AdminRoute::ProductRequests,
        "product requests",
        ProductRequestsApi::new(ctx.client()),
    );
    match cmd {
        ProductRequestsCmd::List(paging) => screen.show(ctx, paging.page).await,
        ProductRequestsCmd::Approve { id, page } => {
            let mutation = PendingMutation::approve(RecordId::new(id)?);
            screen.act(ctx, page.page, mutation, false).await
        }
        ProductRequestsCmd::Reject { id, page } => {
            let mutation = PendingMutation::reject(RecordId::new(id)?);
            screen.act(ctx, page.page, mutation, false).await
        }
    }
}
