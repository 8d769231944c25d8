//! Session store contract and the in-process implementation.

use std::sync::{PoisonError, RwLock};

use crate::domain::session::{BearerToken, Session};

/// Holds the credential attached to authenticated API calls.
///
/// Reads never fail; a missing credential is `None`. Implementations must be
/// shareable across tasks.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<BearerToken>;

    fn session(&self) -> Option<Session>;

    /// Replace the credential; the current session, if any, adopts it.
    fn set_token(&self, token: BearerToken);

    fn set_session(&self, session: Session);

    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Token and identity as seen by a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub token: Option<BearerToken>,
}

impl SessionState {
    pub fn apply_token(&mut self, token: BearerToken) {
        if let Some(session) = self.session.take() {
            self.session = Some(session.with_token(token.clone()));
        }
        self.token = Some(token);
    }

    pub fn apply_session(&mut self, session: Session) {
        self.token = Some(session.bearer_token().clone());
        self.session = Some(session);
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: RwLock<SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::default();
        store.set_session(session);
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<BearerToken> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    fn session(&self) -> Option<Session> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .session
            .clone()
    }

    fn set_token(&self, token: BearerToken) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply_token(token);
    }

    fn set_session(&self, session: Session) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply_session(session);
    }

    fn clear(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str) -> BearerToken {
        BearerToken::new(value).expect("token")
    }

    #[test]
    fn empty_store_has_no_token() {
        let store = MemorySessionStore::new();
        assert!(store.token().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn set_token_updates_existing_session() {
        let session = Session::new("u1", "Admin", "admin", token("first")).expect("session");
        let store = MemorySessionStore::with_session(session);
        store.set_token(token("second"));

        assert_eq!(store.token().map(|t| t.expose().to_string()), Some("second".into()));
        let session = store.session().expect("session kept");
        assert_eq!(session.bearer_token().expose(), "second");
    }

    #[test]
    fn clear_drops_everything() {
        let store = MemorySessionStore::new();
        store.set_token(token("abc"));
        store.clear();
        assert!(store.token().is_none());
        assert!(store.session().is_none());
    }
}
