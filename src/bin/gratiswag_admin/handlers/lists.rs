#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::{
        list_sync::{ActionResult, ListSource, ListSyncController, ListSyncError},
        routes::{AdminRoute, login_location},
    },
    domain::{ids::RecordId, mutation::PendingMutation},
    presentation::{detail::DetailFields, table::TableRow},
};
use serde::Serialize;

use crate::client::{CliError, Ctx};
use crate::io::Input;
use crate::print::{print_list, print_record};

/// One screen of a paginated list.
pub struct Screen<S> {
    pub route: AdminRoute,
    pub title: &'static str,
    pub source: S,
}

impl<S> Screen<S>
where
    S: ListSource,
    S::Item: TableRow + Serialize,
{
    pub fn new(route: AdminRoute, title: &'static str, source: S) -> Self {
        Self {
            route,
            title,
            source,
        }
    }

    pub async fn show(self, ctx: &Ctx, page: u32) -> Result<(), CliError> {
        let Self {
            route,
            title,
            source,
        } = self;
        let controller = open(ctx, route, source, page).await?;
        print_list(ctx, title, controller.view()).map_err(|err| expired(err, route))
    }

    /// Open `page`, run `mutation` against one of its rows and print the
    /// re-fetched page.
    pub async fn act(
        self,
        ctx: &Ctx,
        page: u32,
        mutation: PendingMutation,
        assume_yes: bool,
    ) -> Result<(), CliError> {
        let Self {
            route,
            title,
            source,
        } = self;
        let mut controller = open(ctx, route, source, page).await?;
        if controller.view().state().error().is_some() {
            return print_list(ctx, title, controller.view()).map_err(|err| expired(err, route));
        }

        let mut result = controller.trigger(mutation).await?;
        if result == ActionResult::AwaitingConfirmation {
            let question = controller
                .view()
                .state()
                .pending()
                .map(|pending| {
                    format!(
                        "{} {} `{}`?",
                        capitalize(pending.kind().verb()),
                        controller.source().label(),
                        pending.target_id()
                    )
                })
                .unwrap_or_default();
            if assume_yes || Input::stdin().confirm(&question).await? {
                result = controller.confirm().await?;
            } else {
                controller.cancel()?;
                eprintln!("Nothing changed.");
                return Ok(());
            }
        }

        ctx.flush_toasts()?;
        let printed = match result {
            ActionResult::RolledBack(error) => Err(error.into()),
            ActionResult::Committed
            | ActionResult::Discarded
            | ActionResult::AwaitingConfirmation => print_list(ctx, title, controller.view()),
        };
        printed.map_err(|err| expired(err, route))
    }
}

impl<S> Screen<S>
where
    S: ListSource,
    S::Item: TableRow + DetailFields + Serialize,
{
    /// Print one row of `page` as a detail record; the list endpoint is the
    /// only source for these records.
    pub async fn detail(self, ctx: &Ctx, page: u32, id: &RecordId) -> Result<(), CliError> {
        let Self {
            route,
            title,
            source,
        } = self;
        let controller = open(ctx, route, source, page).await?;
        let view = controller.view();
        if view.state().error().is_some() {
            return print_list(ctx, title, view).map_err(|err| expired(err, route));
        }
        let row = view
            .row(id.as_str())
            .ok_or_else(|| ListSyncError::UnknownRow(id.to_string()))?;
        print_record(ctx, row)
    }
}

async fn open<S: ListSource>(
    ctx: &Ctx,
    route: AdminRoute,
    source: S,
    page: u32,
) -> Result<ListSyncController<S>, CliError> {
    ctx.require_session(route)?;
    let mut controller = ctx.list_controller(source)?;
    controller.open(page).await?;
    Ok(controller)
}

/// A token the server no longer accepts leads to the same redirect as no session.
fn expired(err: CliError, route: AdminRoute) -> CliError {
    match err {
        CliError::Api(api) if api.is_unauthorized() => CliError::LoginRequired {
            location: login_location(route.path()),
        },
        other => other,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
