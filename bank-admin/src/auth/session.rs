//! Server-side session storage
//!
//! Sessions live in memory, keyed by an opaque random token that is handed
//! to the browser in the `bank_session` cookie. A session ends on logout,
//! after `idle_ttl` without activity, or `absolute_ttl` after login,
//! whichever comes first.

use chrono::{DateTime, Duration, Utc};
use cookie::{Cookie, SameSite};
use dashmap::DashMap;
use http::HeaderMap;
use rand::RngCore;

use super::Principal;

/// Session cookie name
pub const SESSION_COOKIE: &str = "bank_session";

/// Token entropy in bytes (hex-encoded on the wire)
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub idle_ttl: Duration,
    pub absolute_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::minutes(60),
            absolute_ttl: Duration::hours(8),
        }
    }
}

#[derive(Debug, Clone)]
struct Session {
    principal: Principal,
    created_at: DateTime<Utc>,
    last_access: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>, config: &SessionConfig) -> bool {
        now - self.last_access > config.idle_ttl || now - self.created_at > config.absolute_ttl
    }
}

/// Outcome of a token lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    Active(Principal),
    Expired,
    Missing,
}

impl SessionLookup {
    pub fn active(self) -> Option<Principal> {
        match self {
            SessionLookup::Active(p) => Some(p),
            _ => None,
        }
    }
}

pub struct SessionStore {
    sessions: DashMap<String, Session>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start a session for `principal`, returning its token
    pub fn create(&self, principal: Principal) -> String {
        self.create_at(principal, Utc::now())
    }

    fn create_at(&self, principal: Principal, now: DateTime<Utc>) -> String {
        let token = generate_token();
        self.sessions.insert(
            token.clone(),
            Session {
                principal,
                created_at: now,
                last_access: now,
            },
        );
        token
    }

    /// Principal of an active session, refreshing its idle timer
    pub fn current(&self, token: &str) -> Option<Principal> {
        self.lookup(token).active()
    }

    pub fn lookup(&self, token: &str) -> SessionLookup {
        self.lookup_at(token, Utc::now())
    }

    fn lookup_at(&self, token: &str, now: DateTime<Utc>) -> SessionLookup {
        {
            let Some(mut session) = self.sessions.get_mut(token) else {
                return SessionLookup::Missing;
            };
            if !session.is_expired(now, &self.config) {
                session.last_access = now;
                return SessionLookup::Active(session.principal.clone());
            }
        }
        // Guard dropped above; removing while holding it would deadlock the shard
        self.sessions.remove(token);
        SessionLookup::Expired
    }

    /// End a session. Unknown tokens are ignored.
    pub fn destroy(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// End every session belonging to `user_id`
    pub fn revoke_user(&self, user_id: i64) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.principal.id != user_id);
        before.saturating_sub(self.sessions.len())
    }

    /// Drop expired sessions, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        let config = self.config;
        self.sessions.retain(|_, s| !s.is_expired(now, &config));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Session token from the request's `Cookie` headers, if any
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(token: &str, secure: bool) -> String {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
        .to_string()
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(cookie::time::Duration::ZERO)
        .build()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use shared::models::Role;

    fn principal(id: i64) -> Principal {
        Principal {
            id,
            username: format!("user{id}"),
            role: Role::Supervisor,
            employee_id: None,
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(SessionConfig {
            idle_ttl: Duration::minutes(10),
            absolute_ttl: Duration::hours(1),
        })
    }

    #[test]
    fn test_create_and_current() {
        let store = store();
        let token = store.create(principal(1));
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert_eq!(store.current(&token), Some(principal(1)));
        assert_eq!(store.current("nope"), None);
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = store();
        let a = store.create(principal(1));
        let b = store.create(principal(1));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let store = store();
        let token = store.create(principal(1));
        assert!(store.destroy(&token));
        assert!(!store.destroy(&token));
        assert_eq!(store.current(&token), None);
    }

    #[test]
    fn test_idle_expiry_and_refresh() {
        let store = store();
        let t0 = Utc::now();
        let token = store.create_at(principal(1), t0);

        // Activity inside the idle window keeps it alive
        let t1 = t0 + Duration::minutes(9);
        assert!(matches!(store.lookup_at(&token, t1), SessionLookup::Active(_)));
        let t2 = t1 + Duration::minutes(9);
        assert!(matches!(store.lookup_at(&token, t2), SessionLookup::Active(_)));

        let t3 = t2 + Duration::minutes(11);
        assert_eq!(store.lookup_at(&token, t3), SessionLookup::Expired);
        // Expired entries are removed
        assert_eq!(store.lookup_at(&token, t3), SessionLookup::Missing);
    }

    #[test]
    fn test_absolute_expiry() {
        let store = store();
        let t0 = Utc::now();
        let token = store.create_at(principal(1), t0);
        let mut now = t0;
        for _ in 0..6 {
            now += Duration::minutes(9);
            assert!(matches!(store.lookup_at(&token, now), SessionLookup::Active(_)));
        }
        now += Duration::minutes(9);
        assert_eq!(store.lookup_at(&token, now), SessionLookup::Expired);
    }

    #[test]
    fn test_purge_expired() {
        let store = store();
        let t0 = Utc::now();
        store.create_at(principal(1), t0 - Duration::minutes(30));
        let live = store.create_at(principal(2), t0);
        assert_eq!(store.purge_expired_at(t0), 1);
        assert_eq!(store.len(), 1);
        assert!(store.current(&live).is_some());
    }

    #[test]
    fn test_revoke_user() {
        let store = store();
        let a = store.create(principal(1));
        store.create(principal(1));
        let b = store.create(principal(2));
        assert_eq!(store.revoke_user(1), 2);
        assert_eq!(store.current(&a), None);
        assert!(store.current(&b).is_some());
        assert_eq!(store.revoke_user(1), 0);
    }

    #[test]
    fn test_token_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("theme=dark; bank_session=abc123; lang=es"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc123"));

        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(token_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, HeaderValue::from_static("bank_session="));
        assert_eq!(token_from_headers(&headers), None);
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let set = session_cookie("tok", true);
        assert!(set.starts_with("bank_session=tok"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("SameSite=Lax"));
        assert!(set.contains("Path=/"));
        assert!(set.contains("Secure"));
        assert!(!session_cookie("tok", false).contains("Secure"));

        let clear = clear_session_cookie(false);
        assert!(clear.starts_with("bank_session=;"));
        assert!(clear.contains("Max-Age=0"));
    }
}
