//! Authenticated administrator identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Opaque credential attached to authenticated requests.
///
/// The value never appears in `Debug` output so sessions can be logged safely.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::empty("bearer token"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl TryFrom<String> for BearerToken {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BearerToken> for String {
    fn from(value: BearerToken) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    subject_id: String,
    display_name: String,
    role: String,
    bearer_token: BearerToken,
}

impl Session {
    pub fn new(
        subject_id: impl Into<String>,
        display_name: impl Into<String>,
        role: impl Into<String>,
        bearer_token: BearerToken,
    ) -> Result<Self, DomainError> {
        let subject_id = subject_id.into();
        if subject_id.trim().is_empty() {
            return Err(DomainError::empty("session subject"));
        }
        Ok(Self {
            subject_id,
            display_name: display_name.into(),
            role: role.into(),
            bearer_token,
        })
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn bearer_token(&self) -> &BearerToken {
        &self.bearer_token
    }

    pub fn with_token(mut self, token: BearerToken) -> Self {
        self.bearer_token = token;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_token() {
        let token = BearerToken::new("secret-value").expect("token");
        let session = Session::new("u1", "Admin", "admin", token).expect("session");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn token_round_trips_through_serde_as_plain_string() {
        let token = BearerToken::new("abc").expect("token");
        let json = serde_json::to_string(&token).expect("serialize");
        assert_eq!(json, "\"abc\"");
        let err = serde_json::from_str::<BearerToken>("\"  \"");
        assert!(err.is_err());
    }
}
