//! One adapter per platform resource.
//!
//! Listable resources implement [`ListSource`](crate::application::list_sync::ListSource)
//! so the console drives them through the same list state machine.

pub mod auth;
pub mod blogs;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod product_requests;
pub mod products;
pub mod profile;
pub mod shops;
pub mod wallet;

use crate::{application::error::ApiError, domain::mutation::MutationKind};

pub use auth::AuthApi;
pub use blogs::BlogsApi;
pub use categories::CategoriesApi;
pub use dashboard::DashboardApi;
pub use orders::OrdersApi;
pub use product_requests::ProductRequestsApi;
pub use products::ProductsApi;
pub use profile::ProfileApi;
pub use shops::ShopsApi;
pub use wallet::{WalletApi, WalletPayments, WalletProducts};

fn unsupported(label: &str, kind: &MutationKind) -> ApiError {
    ApiError::rejected(Some(format!("{label} records do not support {kind}")))
}
