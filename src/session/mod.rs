//! Контекст аутентификации: текущий токен и пользователь в памяти,
//! зеркалируемые в постоянное хранилище.

pub mod store;
pub mod token;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::User;
pub use store::SessionStore;
pub use token::{decode_claims, Claims};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to decode authentication token")]
    MalformedToken,
    #[error("session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Разделяемый между API-клиентом и экранами контекст сессии.
#[derive(Clone)]
pub struct AuthContext {
    current: Arc<RwLock<Option<Session>>>,
    store: Arc<SessionStore>,
}

impl AuthContext {
    pub fn new(store: SessionStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store: Arc::new(store),
        }
    }

    /// Поднимает сессию из хранилища. Просроченный токен отбрасывается.
    pub fn restore(store: SessionStore) -> Result<Self, SessionError> {
        let ctx = Self::new(store);
        if let Some(session) = ctx.store.load()? {
            let expired = decode_claims(&session.token)
                .map(|claims| claims.is_expired_at(chrono::Utc::now().timestamp()))
                .unwrap_or(false);
            if expired {
                info!("Saved session for {} has expired", session.user.email);
                ctx.store.clear()?;
            } else {
                info!("Restored session for {}", session.user.email);
                *ctx.write() = Some(session);
            }
        }
        Ok(ctx)
    }

    /// Принимает токен от бэкенда, декодирует его и сохраняет сессию.
    /// При ошибке декодирования частично сохранённые данные стираются.
    pub fn establish(&self, token: String, email: &str) -> Result<User, SessionError> {
        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Login failed: {}", e);
                self.logout();
                return Err(e);
            }
        };

        let user = claims.to_user(email);
        let session = Session { token, user: user.clone() };
        if let Err(e) = self.store.save(&session) {
            self.logout();
            return Err(e);
        }
        *self.write() = Some(session);

        info!(
            "Login successful. User ID: {:?}, Email: {}, Role: {:?}",
            user.id, user.email, user.role
        );
        Ok(user)
    }

    pub fn logout(&self) {
        *self.write() = None;
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear saved session: {}", e);
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read().as_ref().is_some_and(|s| s.user.is_admin())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}
