use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::CapabilityMatrix;
use crate::AdminError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRole {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "roleName")]
    pub name: String,
    pub capabilities: CapabilityMatrix,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeRole {
    pub fn new(name: impl Into<String>, capabilities: CapabilityMatrix) -> Self {
        let now = Utc::now();
        Self {
            id: crate::crypto::generate_object_id(),
            name: name.into(),
            capabilities,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(any(test, feature = "mocks"))]
impl EmployeeRole {
    pub fn mock_with(name: &str, capabilities: CapabilityMatrix) -> Self {
        Self::new(name, capabilities)
    }
}

#[async_trait]
pub trait RoleRepository {
    /// Stores a new role; `Conflict` if the name is taken, ignoring case.
    async fn insert_role(&self, role: EmployeeRole) -> Result<EmployeeRole, AdminError>;
    async fn find_role_by_id(&self, id: &str) -> Result<Option<EmployeeRole>, AdminError>;
    /// Case-insensitive lookup.
    async fn find_role_by_name(&self, name: &str) -> Result<Option<EmployeeRole>, AdminError>;
    async fn list_roles(&self) -> Result<Vec<EmployeeRole>, AdminError>;
    /// Replaces the capability matrix; the name never changes.
    async fn update_role_capabilities(
        &self,
        id: &str,
        capabilities: &CapabilityMatrix,
    ) -> Result<Option<EmployeeRole>, AdminError>;
    async fn delete_role(&self, id: &str) -> Result<bool, AdminError>;
}
