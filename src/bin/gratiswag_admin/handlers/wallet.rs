#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{application::routes::AdminRoute, infra::http::resources::WalletApi};

use crate::args::WalletCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::lists::Screen;
use crate::print::print_record;

pub async fn handle(ctx: &Ctx, cmd: WalletCmd) -> Result<(), CliError> {
    let api = WalletApi::new(ctx.client());
    match cmd {
        WalletCmd::Summary => {
            ctx.require_session(AdminRoute::Wallet)?;
            let overview = api.overview().await?;
            print_record(ctx, &overview)
        }
        WalletCmd::Payments(args) => {
            let source = api.payments(args.search.as_deref());
            Screen::new(AdminRoute::Wallet, "payments", source)
                .show(ctx, args.paging.page)
                .await
        }
        WalletCmd::Products(args) => {
            let source = api.products(args.search.as_deref());
            Screen::new(AdminRoute::Wallet, "revenue by product", source)
                .show(ctx, args.paging.page)
                .await
        }
    }
}
