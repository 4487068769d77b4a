use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validators::normalize_email;
use crate::{AdminError, Employee, EmployeeRole, FieldErrors, SecretString};

/// Envelope shared by every response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Envelope without a payload.
pub type MessageResponse = ApiResponse<()>;

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            errors: None,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>, errors: Option<FieldErrors>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors,
        }
    }
}

/// A body that may hold one item or an array of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

impl LoginRequest {
    /// Presence check only; credentials are judged by the login action.
    pub fn into_credentials(self) -> Result<(String, SecretString), AdminError> {
        let mut errors = FieldErrors::new();

        let email = self
            .email
            .map(|e| normalize_email(&e))
            .filter(|e| !e.is_empty());
        if email.is_none() {
            errors.add("email", "Is required");
        }

        let password = self.password.filter(|p| !p.is_empty());
        if password.is_none() {
            errors.add("password", "Is required");
        }

        errors.into_result()?;
        Ok((email.unwrap_or_default(), password.unwrap_or_default()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoleSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "roleName")]
    pub name: String,
}

impl From<&EmployeeRole> for RoleSummary {
    fn from(role: &EmployeeRole) -> Self {
        Self {
            id: role.id.clone(),
            name: role.name.clone(),
        }
    }
}

/// Login payload. The session token travels only in the http-only cookie.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub employee: Employee,
    pub role: RoleSummary,
    pub capabilities: crate::CapabilityMatrix,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for LoginData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginData")
            .field("employee", &self.employee.id)
            .field("role", &self.role.name)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCount {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_or_many() {
        let one: OneOrMany<serde_json::Value> = serde_json::from_value(json!({"title": "a"})).unwrap();
        assert!(!one.is_many());
        assert_eq!(one.into_vec().len(), 1);

        let many: OneOrMany<serde_json::Value> =
            serde_json::from_value(json!([{"title": "a"}, {"title": "b"}])).unwrap();
        assert!(many.is_many());
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn test_envelope_skips_empty_fields() {
        let body = serde_json::to_value(MessageResponse::message("ok")).unwrap();
        assert_eq!(body, json!({"success": true, "message": "ok"}));

        let body = serde_json::to_value(ApiResponse::with_message("No data available", Vec::<u8>::new())).unwrap();
        assert_eq!(body, json!({"success": true, "message": "No data available", "data": []}));
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let err = LoginRequest::default().into_credentials().unwrap_err();
        let AdminError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));

        let (email, _) = LoginRequest {
            email: Some(" Admin@Example.com ".to_owned()),
            password: Some(SecretString::new("pw")),
        }
        .into_credentials()
        .unwrap();
        assert_eq!(email, "admin@example.com");
    }
}
