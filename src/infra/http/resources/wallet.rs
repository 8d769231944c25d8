use async_trait::async_trait;
use gratiswag_api_types::{PaymentRecord, RevenueOverview, RevenueProduct};

use crate::{
    application::{
        error::ApiError,
        list_sync::{ListRow, ListSource},
    },
    domain::{
        mutation::{MutationKind, PendingMutation},
        pagination::{PageFetch, PageRequest},
    },
    infra::http::{Auth, RestClient},
};

use super::unsupported;

#[derive(Clone)]
pub struct WalletApi {
    client: RestClient,
}

impl WalletApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn overview(&self) -> Result<RevenueOverview, ApiError> {
        self.client
            .get("payment/total-revenue", &[], Auth::Session)
            .await
    }

    /// Payment history, narrowed to rows whose company name or transaction id
    /// contains `search`.
    pub fn payments(&self, search: Option<&str>) -> WalletPayments {
        WalletPayments {
            api: self.clone(),
            search: SearchTerm::new(search),
        }
    }

    /// Revenue per product, narrowed to rows whose title or company name
    /// contains `search`.
    pub fn products(&self, search: Option<&str>) -> WalletProducts {
        WalletProducts {
            api: self.clone(),
            search: SearchTerm::new(search),
        }
    }
}

/// Case-insensitive substring filter; a blank term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(Option<String>);

impl SearchTerm {
    pub fn new(term: Option<&str>) -> Self {
        Self(
            term.map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_lowercase),
        )
    }

    pub fn matches(&self, fields: &[&str]) -> bool {
        match &self.0 {
            Some(term) => fields
                .iter()
                .any(|field| field.to_lowercase().contains(term.as_str())),
            None => true,
        }
    }
}

/// Payment history from the revenue overview, filtered and paged locally.
#[derive(Clone)]
pub struct WalletPayments {
    api: WalletApi,
    search: SearchTerm,
}

/// Per-product revenue from the revenue overview, filtered and paged locally.
#[derive(Clone)]
pub struct WalletProducts {
    api: WalletApi,
    search: SearchTerm,
}

impl ListRow for PaymentRecord {
    fn row_id(&self) -> &str {
        &self.transaction_id
    }
}

impl ListRow for RevenueProduct {
    fn row_id(&self) -> &str {
        &self.title
    }
}

#[async_trait]
impl ListSource for WalletPayments {
    type Item = PaymentRecord;

    fn label(&self) -> &'static str {
        "payment"
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<PageFetch<PaymentRecord>, ApiError> {
        let overview = self.api.overview().await?;
        let rows = overview
            .payment_history
            .into_iter()
            .filter(|row| {
                self.search
                    .matches(&[row.company_name.as_str(), row.transaction_id.as_str()])
            })
            .collect();
        PageFetch::from_slice(rows, request)
            .map_err(|err| ApiError::malformed(err.to_string()))
    }

    async fn apply(&self, mutation: &PendingMutation) -> Result<(), ApiError> {
        Err(unsupported(self.label(), mutation.kind()))
    }

    fn permits(&self, _row: &PaymentRecord, _kind: &MutationKind) -> bool {
        false
    }
}

#[async_trait]
impl ListSource for WalletProducts {
    type Item = RevenueProduct;

    fn label(&self) -> &'static str {
        "revenue product"
    }

    async fn fetch_page(
        &self,
        request: PageRequest,
    ) -> Result<PageFetch<RevenueProduct>, ApiError> {
        let overview = self.api.overview().await?;
        let rows = overview
            .products
            .into_iter()
            .filter(|row| {
                self.search
                    .matches(&[row.title.as_str(), row.company_name.as_str()])
            })
            .collect();
        PageFetch::from_slice(rows, request)
            .map_err(|err| ApiError::malformed(err.to_string()))
    }

    async fn apply(&self, mutation: &PendingMutation) -> Result<(), ApiError> {
        Err(unsupported(self.label(), mutation.kind()))
    }

    fn permits(&self, _row: &RevenueProduct, _kind: &MutationKind) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_ignores_case_and_surrounding_space() {
        let term = SearchTerm::new(Some("  ACME "));
        assert!(term.matches(&["Acme Corp", "tx-1"]));
        assert!(term.matches(&["Globex", "acme-refund"]));
        assert!(!term.matches(&["Globex", "tx-2"]));
    }

    #[test]
    fn blank_search_matches_everything() {
        assert!(SearchTerm::new(None).matches(&["anything"]));
        assert!(SearchTerm::new(Some("   ")).matches(&[""]));
    }
}
