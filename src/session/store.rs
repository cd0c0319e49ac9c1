use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{Session, SessionError};

/// Постоянное хранилище сессии (аналог localStorage): JSON-файл с токеном и пользователем.
/// Без пути хранилище работает только в памяти.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Читает сохранённую сессию. Повреждённый файл удаляется.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(path)?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Failed to parse saved session {}: {}", path.display(), e);
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let stored = Session {
            token: session.token.clone(),
            user: session.user.without_password(),
        };
        let data = serde_json::to_string_pretty(&stored)?;

        // Временный файл создаётся с правами 0600 и подменяет старый атомарно
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(data.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        debug!("Session saved to {}", path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        if let Some(path) = &self.path {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};

    fn session() -> Session {
        Session {
            token: "h.p.s".into(),
            user: User {
                id: Some(1),
                email: "ann@example.com".into(),
                password: "secret1".into(),
                name: "ann".into(),
                role: Some(Role::User),
            },
        }
    }

    #[test]
    fn save_then_load_drops_password() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::file(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "h.p.s");
        assert!(loaded.user.password.is_empty());
        assert_eq!(loaded.user.email, "ann@example.com");
    }

    #[test]
    fn save_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::file(&path);
        store.save(&session()).unwrap();

        let mut next = session();
        next.token = "h.p2.s2".into();
        store.save(&next).unwrap();

        assert_eq!(store.load().unwrap().unwrap().token, "h.p2.s2");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        SessionStore::file(&path).save(&session()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::file(&path);
        assert!(store.load().unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn in_memory_store_never_touches_disk() {
        let store = SessionStore::in_memory();
        store.save(&session()).unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(store.path().is_none());
    }
}
