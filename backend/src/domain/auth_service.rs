//! Login, logout and session lookup.
//!
//! Credentials come from the injected [`AuthConfig`]; passwords are compared
//! as plain text and sessions never expire.
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::{AuthConfig, UserCredential};
use crate::domain::models::Session;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("missing or unknown session")]
    InvalidSession,
}

#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<HashMap<String, UserCredential>>,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        let credentials = config
            .users
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();

        Self {
            credentials: Arc::new(credentials),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Check credentials and open a new session
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let user = match self.credentials.get(username) {
            Some(user) if user.password == password => user,
            _ => {
                warn!("Rejected login for '{}'", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let session = Session {
            token: uuid::Uuid::new_v4().to_string(),
            username: user.username.clone(),
            role: user.role,
            created_at: Utc::now(),
        };

        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());

        info!("'{}' logged in as {}", session.username, session.role);
        Ok(session)
    }

    /// Look up the session a token belongs to
    pub async fn resolve(&self, token: &str) -> Result<Session, AuthError> {
        self.sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidSession)
    }

    /// Invalidate a session; later lookups of its token fail
    pub async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        match self.sessions.write().await.remove(&session.token) {
            Some(_) => {
                info!("'{}' logged out", session.username);
                Ok(())
            }
            None => Err(AuthError::InvalidSession),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Role;

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            users: vec![
                UserCredential {
                    username: "alice".to_string(),
                    password: "pw1".to_string(),
                    role: Role::Cashier,
                },
                UserCredential {
                    username: "boss".to_string(),
                    password: "pw2".to_string(),
                    role: Role::Manager,
                },
            ],
        })
    }

    #[tokio::test]
    async fn test_login_creates_resolvable_session() {
        let auth = service();

        let session = auth.login("boss", "pw2").await.unwrap();
        assert_eq!(session.username, "boss");
        assert_eq!(session.role, Role::Manager);

        let resolved = auth.resolve(&session.token).await.unwrap();
        assert_eq!(resolved, session);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_rejected() {
        let auth = service();

        assert_eq!(auth.login("alice", "nope").await, Err(AuthError::InvalidCredentials));
        assert_eq!(auth.login("mallory", "pw1").await, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_each_login_gets_its_own_token() {
        let auth = service();

        let first = auth.login("alice", "pw1").await.unwrap();
        let second = auth.login("alice", "pw1").await.unwrap();
        assert_ne!(first.token, second.token);
        assert!(auth.resolve(&first.token).await.is_ok());
        assert!(auth.resolve(&second.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let auth = service();
        let session = auth.login("alice", "pw1").await.unwrap();

        auth.logout(&session).await.unwrap();

        assert_eq!(auth.resolve(&session.token).await, Err(AuthError::InvalidSession));
        assert_eq!(auth.logout(&session).await, Err(AuthError::InvalidSession));
    }

    #[tokio::test]
    async fn test_no_configured_users_means_no_logins() {
        let auth = AuthService::new(AuthConfig::default());
        assert_eq!(auth.login("alice", "pw1").await, Err(AuthError::InvalidCredentials));
    }
}
