#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::list_sync::{ListRow, ListSyncView, ViewState},
    presentation::{
        detail::{DetailFields, render_detail},
        table::{TableRow, render_list},
    },
};
use serde::Serialize;

use crate::args::OutputFormat;
use crate::client::{CliError, Ctx};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{out}");
    Ok(())
}

pub fn print_text(rendered: &str) {
    println!("{}", rendered.trim_end());
}

#[derive(Serialize)]
struct ListJson<'a, T> {
    page: u32,
    page_size: u32,
    total_items: u64,
    total_pages: u32,
    items: &'a [T],
}

/// Print the list view as it stands; a failed fetch prints its retry hint to
/// stderr and becomes the command's error.
pub fn print_list<T>(ctx: &Ctx, title: &str, view: &ListSyncView<T>) -> Result<(), CliError>
where
    T: TableRow + ListRow + Clone + Serialize,
{
    if let ViewState::Error { error, .. } = view.state() {
        if ctx.output == OutputFormat::Table {
            eprintln!("{}", render_list(title, view)?.trim_end());
        }
        return Err(error.clone().into());
    }
    match (ctx.output, view.state().page()) {
        (OutputFormat::Json, Some(page)) => print_json(&ListJson {
            page: page.number(),
            page_size: page.size(),
            total_items: page.total_items(),
            total_pages: page.total_pages(),
            items: page.items(),
        }),
        _ => {
            print_text(&render_list(title, view)?);
            Ok(())
        }
    }
}

pub fn print_record<T: DetailFields + Serialize>(ctx: &Ctx, record: &T) -> Result<(), CliError> {
    match ctx.output {
        OutputFormat::Json => print_json(record),
        OutputFormat::Table => {
            print_text(&render_detail(record)?);
            Ok(())
        }
    }
}
