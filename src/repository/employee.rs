use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AdminError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityType {
    Aadhar,
    Pan,
    Passport,
}

impl IdentityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aadhar => "aadhar",
            Self::Pan => "pan",
            Self::Passport => "passport",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "aadhar" => Some(Self::Aadhar),
            "pan" => Some(Self::Pan),
            "passport" => Some(Self::Passport),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Role id.
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_type: Option<IdentityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_image: Option<String>,
    /// Stored lowercased.
    pub email: String,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(any(test, feature = "mocks"))]
impl Employee {
    pub fn mock_with_role(role_id: &str) -> Self {
        Self::mock_from_credentials("employee@example.com", "fakehashedpassword", role_id)
    }

    pub fn mock_from_credentials(email: &str, hashed_password: &str, role_id: &str) -> Self {
        let now = Utc::now();
        Employee {
            id: crate::crypto::generate_object_id(),
            first_name: "Test".to_owned(),
            last_name: "Employee".to_owned(),
            phone: "5551234567".to_owned(),
            address: None,
            image: None,
            role: role_id.to_owned(),
            identity_type: None,
            identity_number: None,
            identity_image: None,
            email: email.to_owned(),
            hashed_password: hashed_password.to_owned(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
pub trait EmployeeRepository {
    /// Stores a new employee; `Conflict` if the email is taken.
    async fn insert_employee(&self, employee: Employee) -> Result<Employee, AdminError>;
    async fn find_employee_by_id(&self, id: &str) -> Result<Option<Employee>, AdminError>;
    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, AdminError>;
    /// Newest first.
    async fn list_employees(&self) -> Result<Vec<Employee>, AdminError>;
    async fn set_employee_active(
        &self,
        id: &str,
        is_active: bool,
    ) -> Result<Option<Employee>, AdminError>;
    async fn count_employees(&self) -> Result<u64, AdminError>;
    async fn count_employees_with_role(&self, role_id: &str) -> Result<u64, AdminError>;
}
