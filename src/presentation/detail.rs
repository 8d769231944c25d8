use askama::Template;
use gratiswag_api_types::{
    Blog, Category, DashboardSummary, Product, RevenueFilter, RevenueOverview, RevenueReport,
    Shop, UserProfile,
};

use crate::presentation::{
    format,
    views::{TemplateRenderError, render_template},
};

#[derive(Template)]
#[template(path = "detail.txt")]
struct DetailView {
    title: String,
    lines: Vec<String>,
}

/// A record shown as aligned `Label: value` lines.
pub trait DetailFields {
    fn title(&self) -> String;

    fn fields(&self) -> Vec<(&'static str, String)>;
}

pub fn render_detail<T: DetailFields + ?Sized>(record: &T) -> Result<String, TemplateRenderError> {
    let fields = record.fields();
    let width = fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let lines = fields
        .into_iter()
        .map(|(label, value)| {
            let padding = " ".repeat(width - label.chars().count());
            format!("{label}:{padding} {value}")
        })
        .collect();
    render_template(
        "detail",
        &DetailView {
            title: record.title(),
            lines,
        },
    )
}

impl DetailFields for Blog {
    fn title(&self) -> String {
        format!("Blog {}", self.id)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.blog_title.clone()),
            ("Description", format::optional(Some(&self.blog_description))),
            ("Image", format::optional(self.image.as_deref())),
            ("Created", format::timestamp(self.created_at)),
            ("Updated", format::timestamp(self.updated_at)),
        ]
    }
}

impl DetailFields for Category {
    fn title(&self) -> String {
        format!("Category {}", self.id)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Thumbnail", format::optional(self.thumbnail.as_deref())),
            ("Created", format::timestamp(self.created_at)),
        ]
    }
}

impl DetailFields for Product {
    fn title(&self) -> String {
        format!("Product {}", self.id)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Description", format::optional(Some(&self.description))),
            ("Price", format::amount(self.price)),
            ("Quantity", self.quantity.to_string()),
            (
                "Category",
                format::optional(self.category.as_ref().map(|c| c.title.as_str())),
            ),
            ("Image", format::optional(self.product_image.as_deref())),
            ("Created", format::timestamp(self.created_at)),
        ]
    }
}

impl DetailFields for Shop {
    fn title(&self) -> String {
        format!("{} details", self.company_name)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Company ID", format::optional(Some(&self.company_id))),
            (
                "Owner",
                format::optional(self.owner.as_ref().map(|owner| owner.name.as_str())),
            ),
            ("Address", format::optional(Some(&self.company_address))),
            ("Status", self.status.to_string()),
            ("Plan", format::optional(self.subscription_plan.as_deref())),
            ("Plan starts", format::timestamp(self.subscription_start_date)),
            ("Plan ends", format::timestamp(self.subscription_end_date)),
            ("Employees", format::count(u64::from(self.subscription_employees))),
            ("Coins given", format::amount(self.total_given_coin)),
            ("Coins used", format::amount(self.total_used_coin)),
            ("Logo", format::optional(self.company_logo.as_deref())),
            ("Banner", format::optional(self.company_banner.as_deref())),
            ("Created", format::timestamp(self.created_at)),
            ("Updated", format::timestamp(self.updated_at)),
        ]
    }
}

impl DetailFields for UserProfile {
    fn title(&self) -> String {
        format!("Profile of {}", self.name)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Email", self.email.clone()),
            ("Phone", format::optional(self.phone.as_deref())),
            ("Role", format::optional(Some(&self.role))),
            ("Verified", yes_no(self.is_verified)),
            ("Photo", format::optional(self.image_link.as_deref())),
            ("Joined", format::timestamp(self.created_at)),
        ]
    }
}

impl DetailFields for DashboardSummary {
    fn title(&self) -> String {
        "Dashboard".to_string()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total revenue", format::amount(self.total_revenue)),
            ("Live products", format::count(self.total_live_products)),
            ("Companies", format::count(self.total_companies)),
            ("Product requests", format::count(self.total_product_requests)),
            ("Company requests", format::count(self.company_requests)),
        ]
    }
}

impl DetailFields for RevenueOverview {
    fn title(&self) -> String {
        "Wallet".to_string()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total revenue", format::amount(self.total_revenue)),
            ("Products sold", format::count(self.products.len() as u64)),
            ("Payments", format::count(self.payment_history.len() as u64)),
        ]
    }
}

/// Revenue report with the bucket size it was requested for.
pub struct RevenueReportView<'a> {
    pub filter: RevenueFilter,
    pub report: &'a RevenueReport,
}

impl DetailFields for RevenueReportView<'_> {
    fn title(&self) -> String {
        format!("Revenue by {}", self.filter)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let series = |values: &Option<Vec<f64>>| match values {
            Some(values) => self
                .report
                .labels
                .iter()
                .zip(values)
                .map(|(label, value)| format!("{label} {}", format::amount(*value)))
                .collect::<Vec<_>>()
                .join(", "),
            None => format::optional(None),
        };
        let mut fields = Vec::new();
        if self.report.data.is_some() || self.report.this_year.is_none() {
            fields.push(("Revenue", series(&self.report.data)));
        }
        if self.report.this_year.is_some() {
            fields.push(("This year", series(&self.report.this_year)));
            fields.push(("Last year", series(&self.report.last_year)));
        }
        fields
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_aligned() {
        let summary = DashboardSummary {
            total_revenue: 1500.0,
            total_live_products: 12,
            total_companies: 3,
            total_product_requests: 4,
            company_requests: 1,
        };
        let rendered = render_detail(&summary).expect("render");
        assert!(rendered.starts_with("Dashboard\n"));
        assert!(rendered.contains("Total revenue:    1,500.00"));
        assert!(rendered.contains("Product requests: 4"));
    }

    #[test]
    fn yearly_report_shows_both_series() {
        let report = RevenueReport {
            labels: vec!["Jan".into(), "Feb".into()],
            this_year: Some(vec![10.0, 20.0]),
            last_year: Some(vec![5.0, 0.0]),
            data: None,
        };
        let rendered = render_detail(&RevenueReportView {
            filter: RevenueFilter::Year,
            report: &report,
        })
        .expect("render");
        assert!(rendered.contains("This year: Jan 10.00, Feb 20.00"));
        assert!(rendered.contains("Last year: Jan 5.00, Feb 0.00"));
        assert!(!rendered.contains("Revenue:"));
    }

    #[test]
    fn single_series_report() {
        let report = RevenueReport {
            labels: vec!["Mon".into()],
            data: Some(vec![42.0]),
            ..RevenueReport::default()
        };
        let rendered = render_detail(&RevenueReportView {
            filter: RevenueFilter::Week,
            report: &report,
        })
        .expect("render");
        assert!(rendered.starts_with("Revenue by week"));
        assert!(rendered.contains("Revenue: Mon 42.00"));
    }

    #[test]
    fn shop_detail_names_owner_and_plan() {
        let shop: Shop = serde_json::from_value(serde_json::json!({
            "_id": "s1",
            "companyName": "Acme",
            "status": "approved",
            "userId": { "_id": "u1", "name": "Grace" },
            "subscriptionPlan": "growth",
            "subscriptionEmployees": 40
        }))
        .expect("shop");
        let rendered = render_detail(&shop).expect("render");
        assert!(rendered.starts_with("Acme details\n"));
        let line = |label: &str| {
            rendered
                .lines()
                .find(|line| line.starts_with(label))
                .map(str::trim_end)
                .map(str::to_string)
        };
        assert!(line("Owner:").is_some_and(|l| l.ends_with("Grace")));
        assert!(line("Plan:").is_some_and(|l| l.ends_with("growth")));
        assert!(line("Status:").is_some_and(|l| l.ends_with("approved")));
    }
}
