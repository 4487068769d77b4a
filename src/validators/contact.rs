use regex::Regex;
use std::sync::LazyLock;

use super::ValidationError;

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex"));

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url regex"));

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(ValidationError::Required);
    }
    if !PHONE_REGEX.is_match(phone) {
        return Err(ValidationError::PhoneInvalid);
    }
    Ok(())
}

pub fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::Required);
    }
    if !URL_REGEX.is_match(url) {
        return Err(ValidationError::UrlInvalid);
    }
    Ok(())
}
