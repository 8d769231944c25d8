use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// `data` of `GET /dashboard/admin-summary`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub total_live_products: u64,
    pub total_companies: u64,
    pub total_product_requests: u64,
    pub company_requests: u64,
}

/// Bucket size of the revenue report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueFilter {
    Day,
    Week,
    Month,
    #[default]
    Year,
}

impl RevenueFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            RevenueFilter::Day => "day",
            RevenueFilter::Week => "week",
            RevenueFilter::Month => "month",
            RevenueFilter::Year => "year",
        }
    }
}

impl fmt::Display for RevenueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RevenueFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "day" => Ok(RevenueFilter::Day),
            "week" => Ok(RevenueFilter::Week),
            "month" => Ok(RevenueFilter::Month),
            "year" => Ok(RevenueFilter::Year),
            other => Err(format!("unknown revenue filter `{other}`")),
        }
    }
}

/// `data` of `GET /dashboard/admin-revenue-report`. The yearly filter sends
/// `thisYear`/`lastYear` series, the others a single `data` series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub this_year: Option<Vec<f64>>,
    #[serde(default)]
    pub last_year: Option<Vec<f64>>,
    #[serde(default)]
    pub data: Option<Vec<f64>>,
}

/// `data` of `GET /payment/total-revenue`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueOverview {
    pub total_revenue: f64,
    #[serde(default)]
    pub products: Vec<RevenueProduct>,
    #[serde(default)]
    pub payment_history: Vec<PaymentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueProduct {
    pub title: String,
    #[serde(default)]
    pub total_quantity: u64,
    #[serde(default)]
    pub total_coin: f64,
    #[serde(default)]
    pub company_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub company_name: String,
    pub amount: f64,
    #[serde(default)]
    pub created_at_formatted: Option<String>,
}
