//! gratiswag-admin: administration console for the GratiSwag platform API.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;


use std::process::ExitCode;

use clap::Parser;
use gratiswag_admin::{config, infra::telemetry};
use tracing::error;

use args::{Cli, Commands};
use client::{CliError, Ctx};
use handlers::{
    auth, blogs, categories, dashboard, orders, product_requests, products, profile, shops, wallet,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target = "gratiswag_admin::cli", error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = config::load(&cli.config)?;
    telemetry::init(&settings.logging)?;
    let ctx = Ctx::new(settings, cli.output)?;

    let result = match cli.command {
        Commands::Auth(cmd) => auth::handle(&ctx, cmd.action).await,
        Commands::Profile(cmd) => profile::handle(&ctx, cmd.action).await,
        Commands::Dashboard(cmd) => dashboard::handle(&ctx, cmd.action).await,
        Commands::Blogs(cmd) => blogs::handle(&ctx, cmd.action).await,
        Commands::Categories(cmd) => categories::handle(&ctx, cmd.action).await,
        Commands::Products(cmd) => products::handle(&ctx, cmd.action).await,
        Commands::Orders(cmd) => orders::handle(&ctx, cmd.action).await,
        Commands::Shops(cmd) => shops::handle(&ctx, cmd.action).await,
        Commands::ProductRequests(cmd) => product_requests::handle(&ctx, cmd.action).await,
        Commands::Wallet(cmd) => wallet::handle(&ctx, cmd.action).await,
    };
    ctx.flush_toasts()?;
    result
}
