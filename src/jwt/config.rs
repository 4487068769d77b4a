use chrono::Duration;

use crate::{AdminError, SecretString};

/// Minimum signing secret length in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Signing settings for session tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub(crate) secret: SecretString,
    /// Token lifetime. Default: 24 hours.
    pub(crate) expiry: Duration,
    pub(crate) issuer: Option<String>,
}

impl JwtConfig {
    /// # Errors
    /// Returns `AdminError::ConfigurationError` if the secret is shorter than 32 bytes.
    pub fn new(secret: impl Into<SecretString>) -> Result<Self, AdminError> {
        let secret = secret.into();

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AdminError::ConfigurationError(format!(
                "JWT secret must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self {
            secret,
            expiry: Duration::hours(24),
            issuer: None,
        })
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }
}
