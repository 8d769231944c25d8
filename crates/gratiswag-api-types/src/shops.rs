use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Onboarding state of a company (shop) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopStatus {
    Pending,
    Approved,
    Rejected,
}

impl ShopStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ShopStatus::Pending => "pending",
            ShopStatus::Approved => "approved",
            ShopStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ShopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShopStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(ShopStatus::Pending),
            "approved" => Ok(ShopStatus::Approved),
            "rejected" => Ok(ShopStatus::Rejected),
            other => Err(format!("unknown shop status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOwner {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "userId")]
    pub owner: Option<ShopOwner>,
    #[serde(default)]
    pub company_id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_address: String,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub company_banner: Option<String>,
    pub status: ShopStatus,
    #[serde(default)]
    pub subscription_plan: Option<String>,
    #[serde(default)]
    pub subscription_employees: u32,
    #[serde(default)]
    pub total_given_coin: f64,
    #[serde(default)]
    pub total_used_coin: f64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub subscription_start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub subscription_end_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Product request raised by a company ("assigned product").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedProduct {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "productId")]
    pub product: Option<AssignedProductItem>,
    #[serde(default, rename = "userId")]
    pub requester: Option<ShopOwner>,
    #[serde(default, rename = "shopId")]
    pub shop: Option<AssignedProductShop>,
    #[serde(default)]
    pub coin: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedProductItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedProductShop {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_address: String,
}
