//! Session Authenticator
//!
//! Verifies credentials against the [`UserStore`], opens server-side
//! sessions and answers "who is logged in" for a session token.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use shared::models::Role;

use super::password::{dummy_hash, verify_password};
use super::session::SessionStore;
use super::{AuthError, Principal};
use crate::db::UserStore;
use crate::security_log;

/// A successful login: the new session token and who it belongs to
#[derive(Debug, Clone)]
pub struct Login {
    pub token: String,
    pub principal: Principal,
}

#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    sessions: Arc<SessionStore>,
    fixed_delay: Duration,
}

impl Authenticator {
    /// `fixed_delay` is waited out on every attempt. Unknown usernames still
    /// run a full argon2 verification (against a dummy hash), so neither the
    /// delay nor the hashing work reveals whether a username exists.
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<SessionStore>,
        fixed_delay: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            fixed_delay,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Check a username/password pair.
    ///
    /// On success the user's last-access time is updated in the background;
    /// a failed update is logged and otherwise ignored.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Principal, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let lookup = self.users.find_by_username(username).await;

        tokio::time::sleep(self.fixed_delay).await;

        let user = match lookup {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "Credential lookup failed");
                return Err(AuthError::Unavailable("credential store unavailable".into()));
            }
        };

        let password = password.to_owned();
        let stored = user.as_ref().map(|u| u.password_hash.clone());
        let valid = tokio::task::spawn_blocking(move || {
            verify_password(&password, stored.as_deref().unwrap_or_else(|| dummy_hash()))
        })
        .await
        .map_err(|e| AuthError::Unavailable(format!("password check aborted: {e}")))?;

        let Some(user) = user else {
            security_log!("WARN", "login_failed", username = username, reason = "unknown_user");
            return Err(AuthError::InvalidCredentials);
        };
        if !valid {
            security_log!("WARN", "login_failed", username = username, reason = "bad_password");
            return Err(AuthError::InvalidCredentials);
        }

        let Some(role) = Role::parse(&user.role) else {
            tracing::warn!(user_id = user.id, role = %user.role, "Stored user has an unknown role");
            return Err(AuthError::InvalidCredentials);
        };

        self.record_access(user.id);

        Ok(Principal {
            id: user.id,
            username: user.username,
            role,
            employee_id: user.employee_id,
        })
    }

    /// Authenticate and open a session
    pub async fn login(&self, username: &str, password: &str) -> Result<Login, AuthError> {
        let principal = self.authenticate(username, password).await?;
        let token = self.sessions.create(principal.clone());

        tracing::info!(
            user_id = principal.id,
            username = %principal.username,
            role = %principal.role,
            "User logged in"
        );

        Ok(Login { token, principal })
    }

    /// Principal of the active session behind `token`, if any
    pub fn current_session(&self, token: Option<&str>) -> Option<Principal> {
        token.and_then(|t| self.sessions.current(t))
    }

    /// End the session behind `token`. No session is not an error.
    pub fn logout(&self, token: Option<&str>) {
        let Some(token) = token else {
            return;
        };
        if self.sessions.destroy(token) {
            security_log!("INFO", "logout", sessions = self.sessions.len());
        }
    }

    fn record_access(&self, user_id: i64) {
        let users = Arc::clone(&self.users);
        let now = Utc::now();
        tokio::spawn(async move {
            if let Err(e) = users.touch_last_access(user_id, now).await {
                tracing::warn!(user_id, error = %e, "Failed to record last access");
            }
        });
    }
}
