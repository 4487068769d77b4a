//! Configuration for the back office.
//!
//! ```rust
//! use backoffice::config::AdminConfig;
//! use chrono::Duration;
//!
//! let mut config = AdminConfig::development();
//! config.tokens.lifetime = Duration::hours(12);
//! ```
//!
//! The server binary builds its configuration with [`AdminConfig::from_env`]:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BACKOFFICE_JWT_SECRET` | required, at least 32 bytes |
//! | `BACKOFFICE_TOKEN_HOURS` | `24` |
//! | `BACKOFFICE_COOKIE_SECURE` | `true` |
//! | `BACKOFFICE_BIND` | `0.0.0.0:8080` |
//! | `DATABASE_URL` | unset (in-memory store) |
//! | `BACKOFFICE_ADMIN_EMAIL`, `BACKOFFICE_ADMIN_PASSWORD` | unset (no bootstrap) |

use chrono::Duration;

use crate::crypto::Argon2Hasher;
use crate::jwt::JwtConfig;
use crate::session::SessionConfig;
use crate::validators::PasswordPolicy;
use crate::{AdminError, SecretString};

/// Longest accepted session lifetime, in hours.
pub const MAX_TOKEN_HOURS: i64 = 24 * 366;

#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    pub tokens: TokenConfig,
    pub session: SessionConfig,
    pub password: PasswordConfig,
    pub server: ServerConfig,
}

impl AdminConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insecure cookies for plain-HTTP local work.
    pub fn development() -> Self {
        Self {
            session: SessionConfig::development(),
            ..Self::default()
        }
    }

    /// Shorter sessions, strict password policy and heavier hashing.
    pub fn strict() -> Self {
        Self {
            tokens: TokenConfig {
                lifetime: Duration::hours(8),
                ..TokenConfig::default()
            },
            password: PasswordConfig {
                policy: PasswordPolicy::strict(),
                hasher: Argon2Hasher::production(),
            },
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, AdminError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdminError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let secret = lookup("BACKOFFICE_JWT_SECRET").ok_or_else(|| {
            AdminError::ConfigurationError("BACKOFFICE_JWT_SECRET is not set".to_owned())
        })?;
        config.tokens.secret = SecretString::new(secret);

        if let Some(hours) = lookup("BACKOFFICE_TOKEN_HOURS") {
            let hours: i64 = hours.trim().parse().map_err(|_| {
                AdminError::ConfigurationError(format!("BACKOFFICE_TOKEN_HOURS is not a number: {hours}"))
            })?;
            if !(1..=MAX_TOKEN_HOURS).contains(&hours) {
                return Err(AdminError::ConfigurationError(format!(
                    "BACKOFFICE_TOKEN_HOURS must be between 1 and {MAX_TOKEN_HOURS}"
                )));
            }
            config.tokens.lifetime = Duration::try_hours(hours).ok_or_else(|| {
                AdminError::ConfigurationError("BACKOFFICE_TOKEN_HOURS is out of range".to_owned())
            })?;
        }

        if let Some(secure) = lookup("BACKOFFICE_COOKIE_SECURE") {
            config.session.cookie_secure = parse_bool("BACKOFFICE_COOKIE_SECURE", &secure)?;
        }

        if let Some(bind) = lookup("BACKOFFICE_BIND") {
            config.server.bind_addr = bind;
        }

        config.server.database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        config.server.bootstrap_email = lookup("BACKOFFICE_ADMIN_EMAIL");
        config.server.bootstrap_password = lookup("BACKOFFICE_ADMIN_PASSWORD").map(SecretString::new);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        let lifetime = self.tokens.lifetime;
        if lifetime <= Duration::zero() || lifetime > Duration::hours(MAX_TOKEN_HOURS) {
            return Err(AdminError::ConfigurationError(format!(
                "token lifetime must be positive and at most {MAX_TOKEN_HOURS} hours"
            )));
        }
        self.session
            .validate()
            .map_err(|msg| AdminError::ConfigurationError(msg.to_owned()))?;
        self.jwt_config().map(|_| ())
    }

    pub fn jwt_config(&self) -> Result<JwtConfig, AdminError> {
        let config = JwtConfig::new(self.tokens.secret.clone())?.with_expiry(self.tokens.lifetime);
        Ok(match self.tokens.issuer {
            Some(ref issuer) => config.with_issuer(issuer.clone()),
            None => config,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AdminError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(AdminError::ConfigurationError(format!(
            "{key} must be a boolean, got {value}"
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HS256 signing secret, at least 32 bytes.
    pub secret: SecretString,
    /// Session token and cookie lifetime. Default: 24 hours.
    pub lifetime: Duration,
    pub issuer: Option<String>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::new(""),
            lifetime: Duration::hours(24),
            issuer: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordConfig {
    pub policy: PasswordPolicy,
    pub hasher: Argon2Hasher,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    /// First administrator, created when no employee exists.
    pub bootstrap_email: Option<String>,
    pub bootstrap_password: Option<SecretString>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_owned(),
            database_url: None,
            bootstrap_email: None,
            bootstrap_password: None,
        }
    }
}
