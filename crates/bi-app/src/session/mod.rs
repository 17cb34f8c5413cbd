//! Session store.
//!
//! Explicit application state shared by the screens: who is signed in, with
//! which token, in which school and role. Created empty, filled by login and
//! role selection, emptied by logout. Nothing is persisted.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use bi_core::auth::{BearerToken, Role, User};
use bi_core::school::School;

#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    pub token: Option<BearerToken>,
    pub user: Option<User>,
    pub school: Option<School>,
    pub role: Option<Role>,
}

/// Cloneable handle to the shared session.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<AuthSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn login(&self, token: BearerToken, user: User) {
        info!(username = %user.username, "session login");
        let mut guard = self.inner.write().await;
        *guard = AuthSession {
            token: Some(token),
            user: Some(user),
            school: None,
            role: None,
        };
    }

    /// Resume with a token obtained earlier; the user identity stays unknown.
    pub async fn resume(&self, token: BearerToken) {
        info!("session resumed from stored token");
        *self.inner.write().await = AuthSession {
            token: Some(token),
            ..AuthSession::default()
        };
    }

    pub async fn set_school_and_role(&self, school: School, role: Role) {
        info!(school = %school.name, role = %role, "session school and role set");
        let mut guard = self.inner.write().await;
        guard.school = Some(school);
        guard.role = Some(role);
    }

    pub async fn logout(&self) {
        info!("session logout");
        *self.inner.write().await = AuthSession::default();
    }

    pub async fn token(&self) -> Option<BearerToken> {
        self.inner.read().await.token.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.user.clone()
    }

    pub async fn snapshot(&self) -> AuthSession {
        self.inner.read().await.clone()
    }
}
