use std::str::FromStr;
use std::time::Duration;

use crate::auth::SessionConfig;
use crate::db::BoxError;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_URL | (none) | PostgreSQL URL; without it development runs on the in-memory store |
/// | HTTP_PORT | 8080 | HTTP listen port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | SESSION_IDLE_MINUTES | 60 | Session ends after this long without activity |
/// | SESSION_ABSOLUTE_HOURS | 8 | Session ends this long after login regardless of activity |
/// | AUTH_DELAY_MS | 300 | Fixed delay on every login attempt |
/// | SESSION_COOKIE_SECURE | true outside development | Mark the session cookie `Secure` |
/// | LOG_LEVEL | info | Default log filter when `RUST_LOG` is unset |
/// | LOG_DIR | (none) | Also write daily-rolling log files here |
/// | BOOTSTRAP_ADMIN_USERNAME / BOOTSTRAP_ADMIN_PASSWORD | (none) | Seed an Administrator when no users exist |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub http_port: u16,
    pub environment: String,
    pub session_idle_minutes: i64,
    pub session_absolute_hours: i64,
    pub auth_delay_ms: u64,
    pub session_cookie_secure: bool,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Initial administrator account
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Outside development a database is mandatory.
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_development = environment == "development";

        let database_url = var("DATABASE_URL").filter(|s| !s.is_empty());
        if database_url.is_none() && !is_development {
            return Err(format!("DATABASE_URL must be set in {environment} environment").into());
        }

        let bootstrap_admin = match (
            var("BOOTSTRAP_ADMIN_USERNAME").filter(|s| !s.trim().is_empty()),
            var("BOOTSTRAP_ADMIN_PASSWORD").filter(|s| !s.is_empty()),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin {
                username: username.trim().to_string(),
                password,
            }),
            (None, None) => None,
            _ => {
                return Err(
                    "BOOTSTRAP_ADMIN_USERNAME and BOOTSTRAP_ADMIN_PASSWORD must be set together"
                        .into(),
                );
            }
        };

        let session_idle_minutes = parse_or(&var, "SESSION_IDLE_MINUTES", 60)?;
        let session_absolute_hours = parse_or(&var, "SESSION_ABSOLUTE_HOURS", 8)?;
        if session_idle_minutes <= 0 || session_absolute_hours <= 0 {
            return Err("session lifetimes must be positive".into());
        }

        Ok(Self {
            database_url,
            http_port: parse_or(&var, "HTTP_PORT", 8080)?,
            session_idle_minutes,
            session_absolute_hours,
            auth_delay_ms: parse_or(&var, "AUTH_DELAY_MS", 300)?,
            session_cookie_secure: parse_or(&var, "SESSION_COOKIE_SECURE", !is_development)?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR").filter(|s| !s.is_empty()),
            bootstrap_admin,
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            idle_ttl: chrono::Duration::minutes(self.session_idle_minutes),
            absolute_ttl: chrono::Duration::hours(self.session_absolute_hours),
        }
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    /// Development settings with no delays, for tests and local tooling
    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            http_port: 0,
            environment: "development".into(),
            session_idle_minutes: 60,
            session_absolute_hours: 8,
            auth_delay_ms: 0,
            session_cookie_secure: false,
            log_level: "debug".into(),
            log_dir: None,
            bootstrap_admin: None,
        }
    }
}

fn parse_or<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, BoxError> {
    match var(name).filter(|s| !s.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{name} has an invalid value: {raw}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, BoxError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.is_development());
        assert_eq!(config.database_url, None);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.auth_delay(), Duration::from_millis(300));
        assert!(!config.session_cookie_secure);
        assert_eq!(config.session().idle_ttl, chrono::Duration::minutes(60));
        assert_eq!(config.session().absolute_ttl, chrono::Duration::hours(8));
    }

    #[test]
    fn test_production_requires_database() {
        let err = load(&[("ENVIRONMENT", "production")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let config = load(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "postgres://bank@db/bank"),
        ])
        .unwrap();
        assert!(config.session_cookie_secure);
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        assert!(load(&[("HTTP_PORT", "eighty")]).is_err());
        assert!(load(&[("SESSION_IDLE_MINUTES", "0")]).is_err());
        assert_eq!(load(&[("AUTH_DELAY_MS", " 0 ")]).unwrap().auth_delay_ms, 0);
    }

    #[test]
    fn test_bootstrap_admin_pairing() {
        assert!(load(&[("BOOTSTRAP_ADMIN_USERNAME", "admin")]).is_err());
        let config = load(&[
            ("BOOTSTRAP_ADMIN_USERNAME", "admin"),
            ("BOOTSTRAP_ADMIN_PASSWORD", "change-me"),
        ])
        .unwrap();
        let admin = config.bootstrap_admin.unwrap();
        assert_eq!(admin.username, "admin");
        assert!(!format!("{admin:?}").contains("change-me"));
    }
}
