use serde::{Deserialize, Serialize};

/// Raw response envelope. `data` is kept untyped so callers can enforce the
/// shape they expect and report anything else as malformed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiEnvelope {
    #[serde(default, alias = "status")]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub pagination: Option<PageMeta>,
}

impl ApiEnvelope {
    /// List endpoints disagree on the key: blogs and orders send `meta`,
    /// shops and products send `pagination`.
    pub fn page_meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref().or(self.pagination.as_ref())
    }

    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(alias = "totalProducts")]
    pub total: u64,
    #[serde(alias = "currentPage")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    pub total_pages: u32,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
