use serde::{Deserialize, Serialize};

use super::{validate_length, ValidationError};

/// Password rules applied when employees are registered.
///
/// ```
/// use backoffice::validators::PasswordPolicy;
///
/// let policy = PasswordPolicy::default();
/// assert!(policy.validate("secret").is_ok());
/// assert!(policy.validate("short").is_err());
///
/// let strict = PasswordPolicy::strict();
/// assert!(strict.validate("longer-secret-42").is_ok());
/// assert!(strict.validate("no-digits-in-here").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum length in characters (default: 6)
    pub min_length: usize,
    /// Maximum length in characters (default: 128)
    pub max_length: usize,
    /// Require at least one ASCII digit
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            max_length: 128,
            require_digit: false,
        }
    }
}

impl PasswordPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn strict() -> Self {
        Self {
            min_length: 12,
            max_length: 128,
            require_digit: true,
        }
    }

    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = len;
        self
    }

    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }

    pub fn validate(&self, password: &str) -> Result<(), ValidationError> {
        validate_length(password, self.min_length, self.max_length)?;

        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::PasswordMissingDigit);
        }

        Ok(())
    }
}

/// Validates against the default policy.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    PasswordPolicy::default().validate(password)
}
