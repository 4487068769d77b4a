//! Input validators.
//!
//! Single-value checks return a [`ValidationError`]; callers collect them
//! per field into [`FieldErrors`], which becomes `AdminError::Validation`.

pub mod contact;
pub mod email;
pub mod identifier;
pub mod length;
pub mod password;

pub use contact::{validate_http_url, validate_phone};
pub use email::{normalize_email, validate_email};
pub use identifier::is_object_id;
pub use length::validate_length;
pub use password::{validate_password, PasswordPolicy};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::AdminError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    OutOfRange { min: usize, max: usize },
    EmailTooLong,
    EmailInvalidFormat,
    PasswordMismatch,
    PasswordMissingDigit,
    PhoneInvalid,
    UrlInvalid,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "Is required"),
            Self::TooShort { min } => write!(f, "Must be at least {min} characters"),
            Self::TooLong { max } => write!(f, "Must be at most {max} characters"),
            Self::OutOfRange { min, max } => {
                write!(f, "Must be between {min} and {max} characters")
            }
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
            Self::PasswordMissingDigit => write!(f, "Password must contain a digit"),
            Self::PhoneInvalid => write!(f, "Phone number must be exactly 10 digits"),
            Self::UrlInvalid => write!(f, "Must be a valid http(s) URL"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validation messages keyed by field path (`title`, `options[0].label`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Records the error of `result`, if any, under `field`.
    pub fn check(&mut self, field: impl Into<String>, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            self.add(field, err.to_string());
        }
    }

    /// Moves every entry of `other` under `prefix` (e.g. `[2].title`).
    pub fn merge_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, messages) in other.0 {
            let key = format!("{prefix}{field}");
            self.0.entry(key).or_default().extend(messages);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), AdminError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AdminError::Validation(self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_records_only_failures() {
        let mut errors = FieldErrors::new();
        errors.check("title", Ok(()));
        errors.check("label", Err(ValidationError::TooLong { max: 50 }));

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("label"),
            Some(&["Must be at most 50 characters".to_owned()][..])
        );
    }

    #[test]
    fn test_merge_prefixed() {
        let mut inner = FieldErrors::new();
        inner.add("title", "Is required");
        inner.add("options[0].label", "Is required");

        let mut errors = FieldErrors::new();
        errors.merge_prefixed("[1].", inner);

        assert!(errors.contains("[1].title"));
        assert!(errors.contains("[1].options[0].label"));
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add("email", "Invalid email format");
        assert!(matches!(
            errors.into_result(),
            Err(AdminError::Validation(_))
        ));
    }

    #[test]
    fn test_serializes_as_map() {
        let mut errors = FieldErrors::new();
        errors.add("phone", "Phone number must be exactly 10 digits");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"phone": ["Phone number must be exactly 10 digits"]})
        );
    }
}
