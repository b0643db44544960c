use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{error::AppResult, models::User};

/// Process-wide holder of the signed-in user.
///
/// Created once with [`AuthContext::init`] and cleared with [`AuthContext::teardown`].
/// Clones share the same slot. Logging out only forgets the user locally; there is
/// no server-side session to invalidate.
#[derive(Clone, Default)]
pub struct AuthContext {
    current: Arc<RwLock<Option<User>>>,
}

impl AuthContext {
    /// Creates the context, optionally signed in as `seed`
    pub fn init(seed: Option<User>) -> Self {
        if let Some(user) = &seed {
            tracing::info!(user_id = %user.id, "Auth context initialised with signed-in user");
        }

        Self {
            current: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Signs in, replacing any previous user
    pub async fn login(&self, name: &str, email: Option<String>) -> AppResult<User> {
        let user = User::new(name, email)?;

        let mut current = self.current.write().await;
        if let Some(previous) = current.replace(user.clone()) {
            tracing::info!(previous = %previous.id, "Replacing signed-in user");
        }
        tracing::info!(user_id = %user.id, "User signed in");

        Ok(user)
    }

    /// Signs out; returns the user that was signed in
    pub async fn logout(&self) -> Option<User> {
        let previous = self.current.write().await.take();
        if let Some(user) = &previous {
            tracing::info!(user_id = %user.id, "User signed out");
        }
        previous
    }

    /// Releases the context at shutdown
    pub async fn teardown(&self) {
        if self.logout().await.is_some() {
            tracing::debug!("Auth context torn down with an active user");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_init_empty() {
        let auth = AuthContext::init(None);
        assert!(!auth.is_authenticated().await);
        assert_eq!(auth.current_user().await, None);
    }

    #[tokio::test]
    async fn test_init_seeded() {
        let user = User::new("hjindal", None).unwrap();
        let auth = AuthContext::init(Some(user.clone()));
        assert_eq!(auth.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn test_login_logout_shared_between_clones() {
        let auth = AuthContext::init(None);
        let view = auth.clone();

        let user = auth.login("Ada Lovelace", None).await.unwrap();
        assert_eq!(user.id, "ada-lovelace");
        assert!(view.is_authenticated().await);

        let previous = view.logout().await;
        assert_eq!(previous, Some(user));
        assert!(!auth.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_blank_login_keeps_previous_user() {
        let auth = AuthContext::init(None);
        auth.login("grace", None).await.unwrap();

        let result = auth.login("  ", None).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert_eq!(auth.current_user().await.map(|u| u.id), Some("grace".to_string()));
    }

    #[tokio::test]
    async fn test_teardown_clears_user() {
        let auth = AuthContext::init(Some(User::new("grace", None).unwrap()));
        auth.teardown().await;
        assert!(!auth.is_authenticated().await);
    }
}
