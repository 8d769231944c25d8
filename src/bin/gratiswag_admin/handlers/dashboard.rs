#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::routes::AdminRoute,
    infra::http::resources::DashboardApi,
    presentation::detail::{RevenueReportView, render_detail},
};
use gratiswag_api_types::RevenueFilter;

use crate::args::{DashboardCmd, OutputFormat};
use crate::client::{CliError, Ctx};
use crate::print::{print_json, print_record, print_text};

pub async fn handle(ctx: &Ctx, cmd: DashboardCmd) -> Result<(), CliError> {
    ctx.require_session(AdminRoute::Dashboard)?;
    let api = DashboardApi::new(ctx.client());
    match cmd {
        DashboardCmd::Summary => {
            let summary = api.summary().await?;
            print_record(ctx, &summary)
        }
        DashboardCmd::Revenue { filter } => {
            let filter = RevenueFilter::from(filter);
            let report = api.revenue_report(filter).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&report),
                OutputFormat::Table => {
                    let view = RevenueReportView {
                        filter,
                        report: &report,
                    };
                    print_text(&render_detail(&view)?);
                    Ok(())
                }
            }
        }
    }
}
