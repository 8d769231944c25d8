#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::routes::AdminRoute,
    domain::{ids::RecordId, mutation::PendingMutation},
    infra::http::resources::OrdersApi,
};
use gratiswag_api_types::OrderStatus;

use crate::args::OrdersCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::lists::Screen;

pub async fn handle(ctx: &Ctx, cmd: OrdersCmd) -> Result<(), CliError> {
    let screen = Screen::new(
        AdminRoute::Orders,
        "orders",
        OrdersApi::new(ctx.client()),
    );
    match cmd {
        OrdersCmd::List(paging) => screen.show(ctx, paging.page).await,
        OrdersCmd::SetStatus { id, status, page } => {
            let status = OrderStatus::from(status);
            let mutation = PendingMutation::status_change(RecordId::new(id)?, status.as_str());
            screen.act(ctx, page.page, mutation, false).await
        }
    }
}
