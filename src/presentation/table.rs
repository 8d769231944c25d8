//! Column-aligned list output.

use askama::Template;
use gratiswag_api_types::{
    AssignedProduct, Blog, Category, Order, PaymentRecord, Product, RevenueProduct, Shop,
};

use crate::{
    application::list_sync::{ListRow, ListSyncView, ViewState},
    domain::pagination::Page,
    presentation::{
        format,
        views::{NoticeView, TemplateRenderError, render_template},
    },
};

const COLUMN_GAP: &str = "  ";
const TEXT_WIDTH: usize = 40;

/// A record that can be shown as one table line.
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    /// Index of the status column, if rows carry a status.
    const STATUS_COLUMN: Option<usize> = None;

    fn cells(&self) -> Vec<String>;
}

#[derive(Template)]
#[template(path = "table.txt")]
struct TableView {
    title: String,
    header: String,
    rule: String,
    lines: Vec<String>,
    empty_message: String,
    footer: String,
}

/// Render whatever the list view currently shows.
pub fn render_list<T>(title: &str, view: &ListSyncView<T>) -> Result<String, TemplateRenderError>
where
    T: TableRow + ListRow + Clone,
{
    match view.state() {
        ViewState::Idle { .. } => NoticeView::new(
            format!("Sign in to view {title}."),
            "Run `gratiswag-admin auth login` first.",
        )
        .render(),
        ViewState::Loading { page } => {
            NoticeView::new(format!("Loading {title}, page {page}…"), "").render()
        }
        ViewState::Error { page, error } => NoticeView::new(
            format!("Could not load {title} page {page}: {}", error.message()),
            format!("Retry with --page {page}."),
        )
        .render(),
        ViewState::Loaded { page }
        | ViewState::ConfirmingAction { page, .. }
        | ViewState::Mutating { page, .. } => render_page(title, page, |row, cells| {
            if let Some(index) = T::STATUS_COLUMN
                && let Some(cell) = cells.get_mut(index)
            {
                let shown = view.displayed_status(row.row_id(), cell).to_string();
                *cell = shown;
            }
        }),
    }
}

fn render_page<T: TableRow>(
    title: &str,
    page: &Page<T>,
    adjust: impl Fn(&T, &mut Vec<String>),
) -> Result<String, TemplateRenderError> {
    let footer = format!(
        "Page {} of {} · {} total",
        page.number(),
        page.last_page(),
        format::count(page.total_items())
    );
    render_table(title, page.items(), adjust, footer)
}

/// Render rows that are not part of a paginated view.
pub fn render_rows<T: TableRow>(
    title: &str,
    rows: &[T],
    footer: impl Into<String>,
) -> Result<String, TemplateRenderError> {
    render_table(title, rows, |_, _| {}, footer.into())
}

fn render_table<T: TableRow>(
    title: &str,
    rows: &[T],
    adjust: impl Fn(&T, &mut Vec<String>),
    footer: String,
) -> Result<String, TemplateRenderError> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = row.cells();
            adjust(row, &mut cells);
            cells
        })
        .collect();
    let (header, rule, lines) = layout(T::COLUMNS, &cells);
    let view = TableView {
        title: title.to_string(),
        header,
        rule,
        lines,
        empty_message: format!("No {title} found."),
        footer,
    };
    render_template("table", &view)
}

fn layout(columns: &[&str], rows: &[Vec<String>]) -> (String, String, Vec<String>) {
    let mut widths: Vec<usize> = columns.iter().map(|name| name.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate().take(widths.len()) {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let join = |cells: &mut dyn Iterator<Item = String>| -> String {
        let line: Vec<String> = cells
            .zip(widths.iter())
            .map(|(cell, width)| pad(&cell, *width))
            .collect();
        line.join(COLUMN_GAP).trim_end().to_string()
    };

    let header = join(&mut columns.iter().map(|name| (*name).to_string()));
    let rule = join(&mut widths.iter().map(|width| "-".repeat(*width)));
    let lines = rows
        .iter()
        .map(|row| join(&mut row.iter().cloned()))
        .collect();
    (header, rule, lines)
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    let mut padded = String::with_capacity(width.max(len));
    padded.push_str(cell);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}

impl TableRow for Blog {
    const COLUMNS: &'static [&'static str] = &["ID", "TITLE", "CREATED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format::truncate(&self.blog_title, TEXT_WIDTH),
            format::timestamp(self.created_at),
        ]
    }
}

impl TableRow for Category {
    const COLUMNS: &'static [&'static str] = &["ID", "TITLE", "CREATED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format::truncate(&self.title, TEXT_WIDTH),
            format::timestamp(self.created_at),
        ]
    }
}

impl TableRow for Product {
    const COLUMNS: &'static [&'static str] = &["ID", "TITLE", "CATEGORY", "PRICE", "QTY"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format::truncate(&self.title, TEXT_WIDTH),
            format::optional(self.category.as_ref().map(|c| c.title.as_str())),
            format::amount(self.price),
            self.quantity.to_string(),
        ]
    }
}

impl TableRow for Order {
    const COLUMNS: &'static [&'static str] =
        &["ID", "CUSTOMER", "COMPANY", "ITEMS", "COINS", "STATUS", "PLACED"];
    const STATUS_COLUMN: Option<usize> = Some(5);

    fn cells(&self) -> Vec<String> {
        let items: u32 = self.items.iter().map(|item| item.quantity).sum();
        vec![
            self.id.clone(),
            format::optional(Some(&self.name)),
            format::optional(self.shop.as_ref().map(|s| s.company_name.as_str())),
            items.to_string(),
            format::amount(self.total_pay_coin),
            self.status.as_str().to_string(),
            format::timestamp(self.created_at),
        ]
    }
}

impl TableRow for Shop {
    const COLUMNS: &'static [&'static str] = &["ID", "COMPANY", "OWNER", "PLAN", "STATUS"];
    const STATUS_COLUMN: Option<usize> = Some(4);

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format::truncate(&self.company_name, TEXT_WIDTH),
            format::optional(self.owner.as_ref().map(|o| o.email.as_str())),
            format::optional(self.subscription_plan.as_deref()),
            self.status.as_str().to_string(),
        ]
    }
}

impl TableRow for AssignedProduct {
    const COLUMNS: &'static [&'static str] = &["ID", "PRODUCT", "COMPANY", "COINS", "STATUS"];
    const STATUS_COLUMN: Option<usize> = Some(4);

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format::optional(self.product.as_ref().map(|p| p.title.as_str())),
            format::optional(self.shop.as_ref().map(|s| s.company_name.as_str())),
            format::amount(self.coin),
            self.status.clone(),
        ]
    }
}

impl TableRow for PaymentRecord {
    const COLUMNS: &'static [&'static str] = &["TRANSACTION", "COMPANY", "AMOUNT", "DATE"];

    fn cells(&self) -> Vec<String> {
        vec![
            format::optional(Some(&self.transaction_id)),
            format::optional(Some(&self.company_name)),
            format::amount(self.amount),
            format::optional(self.created_at_formatted.as_deref()),
        ]
    }
}

impl TableRow for RevenueProduct {
    const COLUMNS: &'static [&'static str] = &["PRODUCT", "COMPANY", "QTY", "COINS"];

    fn cells(&self) -> Vec<String> {
        vec![
            format::truncate(&self.title, TEXT_WIDTH),
            format::optional(Some(&self.company_name)),
            format::count(self.total_quantity),
            format::amount(self.total_coin),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row(&'static str, &'static str);

    impl ListRow for Row {
        fn row_id(&self) -> &str {
            self.0
        }
    }

    impl TableRow for Row {
        const COLUMNS: &'static [&'static str] = &["ID", "STATUS"];
        const STATUS_COLUMN: Option<usize> = Some(1);

        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn layout_pads_to_widest_cell() {
        let rows = vec![vec!["abc123".to_string(), "ok".to_string()]];
        let (header, rule, lines) = layout(&["ID", "STATUS"], &rows);
        assert_eq!(header, "ID      STATUS");
        assert_eq!(rule, "------  ------");
        assert_eq!(lines, vec!["abc123  ok".to_string()]);
    }

    #[test]
    fn loading_state_renders_notice() {
        let view = ListSyncView::<Row>::new(10).expect("view");
        let rendered = render_list("orders", &view).expect("render");
        assert!(rendered.starts_with("Loading orders, page 1"));
    }

    #[test]
    fn loaded_page_renders_rows_and_footer() {
        let mut view = ListSyncView::<Row>::new(10).expect("view");
        let ticket = view.reload().expect("ticket");
        let page = Page::new(vec![Row("o1", "pending")], 1, 10, 1, 1).expect("page");
        view.complete_fetch(ticket, Ok(crate::domain::pagination::PageFetch::Page(page)));

        let rendered = render_list("orders", &view).expect("render");
        assert!(rendered.contains("o1  pending"));
        assert!(rendered.contains("Page 1 of 1 · 1 total"));
    }

    #[test]
    fn empty_page_renders_placeholder() {
        let mut view = ListSyncView::<Row>::new(10).expect("view");
        let ticket = view.reload().expect("ticket");
        let page = Page::new(Vec::new(), 1, 10, 0, 0).expect("page");
        view.complete_fetch(ticket, Ok(crate::domain::pagination::PageFetch::Page(page)));

        let rendered = render_list("blogs", &view).expect("render");
        assert!(rendered.contains("No blogs found."));
        assert!(!rendered.contains("ID"));
    }
}
