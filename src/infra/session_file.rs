//! Session store persisted as a small JSON file between console invocations.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    application::session::{SessionState, SessionStore},
    domain::session::{BearerToken, Session},
    infra::error::InfraError,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(flatten)]
    state: SessionState,
    /// Token issued by the forgot-password and OTP steps.
    #[serde(default)]
    reset_token: Option<BearerToken>,
}

/// File-backed [`SessionStore`].
///
/// Writes through the trait that fail are logged and the in-memory state stays
/// authoritative for the rest of the process. [`Self::try_clear`] reports them.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    contents: RwLock<SessionFile>,
}

impl FileSessionStore {
    /// Open the store, treating a missing file as signed out.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, InfraError> {
        let path = path.into();
        let contents = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => SessionFile::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| InfraError::session_file(&path, err.to_string()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => SessionFile::default(),
            Err(err) => return Err(InfraError::session_file(&path, err.to_string())),
        };
        debug!(
            target = "gratiswag_admin::session",
            path = %path.display(),
            signed_in = contents.state.token.is_some(),
            "session file opened"
        );
        Ok(Self {
            path,
            contents: RwLock::new(contents),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reset_token(&self) -> Option<BearerToken> {
        self.read().reset_token.clone()
    }

    pub fn set_reset_token(&self, token: BearerToken) {
        self.update(|file| file.reset_token = Some(token));
    }

    pub fn clear_reset_token(&self) {
        self.update(|file| file.reset_token = None);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionFile> {
        self.contents.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forget the session and reset token, failing if the file still holds them.
    pub fn try_clear(&self) -> Result<(), InfraError> {
        self.try_update(|file| *file = SessionFile::default())
    }

    fn try_update(&self, apply: impl FnOnce(&mut SessionFile)) -> Result<(), InfraError> {
        let mut guard = self.contents.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard);
        persist(&self.path, &guard)
    }

    fn update(&self, apply: impl FnOnce(&mut SessionFile)) {
        if let Err(err) = self.try_update(apply) {
            warn!(
                target = "gratiswag_admin::session",
                path = %self.path.display(),
                error = %err,
                "failed to persist session file"
            );
        }
    }
}

fn persist(path: &Path, contents: &SessionFile) -> Result<(), InfraError> {
    if contents.state.token.is_none() && contents.reset_token.is_none() {
        return match fs::remove_file(path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        };
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(contents)
        .map_err(|err| InfraError::session_file(path, err.to_string()))?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json)?;
    restrict_permissions(&staging)?;
    fs::rename(&staging, path)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), InfraError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), InfraError> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<BearerToken> {
        self.read().state.token.clone()
    }

    fn session(&self) -> Option<Session> {
        self.read().state.session.clone()
    }

    fn set_token(&self, token: BearerToken) {
        self.update(|file| file.state.apply_token(token));
    }

    fn set_session(&self, session: Session) {
        self.update(|file| {
            file.state.apply_session(session);
            file.reset_token = None;
        });
    }

    fn clear(&self) {
        self.update(|file| *file = SessionFile::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session::new(
            "u1",
            "Admin",
            "admin",
            BearerToken::new(token).expect("token"),
        )
        .expect("session")
    }

    #[test]
    fn missing_file_means_signed_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSessionStore::open(dir.path().join("session.json")).expect("open");
        assert!(store.token().is_none());
        assert!(store.session().is_none());
    }

    #[test]
    fn session_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("session.json");
        let store = FileSessionStore::open(&path).expect("open");
        store.set_session(session("tok-1"));

        let reopened = FileSessionStore::open(&path).expect("reopen");
        assert_eq!(
            reopened.token().map(|t| t.expose().to_string()),
            Some("tok-1".to_string())
        );
        assert_eq!(reopened.session().expect("session").display_name(), "Admin");
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let store = FileSessionStore::open(&path).expect("open");
        store.set_session(session("tok"));
        assert!(path.exists());

        store.clear();
        assert!(!path.exists());
        assert!(store.token().is_none());
    }

    #[test]
    fn failed_clear_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let store = FileSessionStore::open(&path).expect("open");
        store.set_session(session("tok"));
        fs::remove_file(&path).expect("remove");
        fs::create_dir(&path).expect("block the path");

        assert!(store.try_clear().is_err());
        assert!(store.token().is_none());
    }

    #[test]
    fn reset_token_is_kept_apart_from_the_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let store = FileSessionStore::open(&path).expect("open");
        store.set_reset_token(BearerToken::new("reset").expect("token"));
        assert!(store.token().is_none());

        let reopened = FileSessionStore::open(&path).expect("reopen");
        assert_eq!(
            reopened.reset_token().map(|t| t.expose().to_string()),
            Some("reset".to_string())
        );
        reopened.set_session(session("tok"));
        assert!(reopened.reset_token().is_none());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, b"{not json").expect("write");
        assert!(matches!(
            FileSessionStore::open(&path),
            Err(InfraError::SessionFile { .. })
        ));
    }
}
