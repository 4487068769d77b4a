#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::access::CapabilityMatrix;
use crate::AdminError;

use super::role::{EmployeeRole, RoleRepository};

#[derive(Clone, Default)]
pub struct MockRoleRepository {
    pub roles: Arc<RwLock<HashMap<String, EmployeeRole>>>,
}

impl MockRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for MockRoleRepository {
    async fn insert_role(&self, role: EmployeeRole) -> Result<EmployeeRole, AdminError> {
        let mut roles = self.roles.write().unwrap();
        if roles.values().any(|r| r.name.to_lowercase() == role.name.to_lowercase()) {
            return Err(AdminError::Conflict("Role name already exists".to_owned()));
        }
        roles.insert(role.id.clone(), role.clone());
        Ok(role)
    }

    async fn find_role_by_id(&self, id: &str) -> Result<Option<EmployeeRole>, AdminError> {
        Ok(self.roles.read().unwrap().get(id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<EmployeeRole>, AdminError> {
        let roles = self.roles.read().unwrap();
        Ok(roles.values().find(|r| r.name.to_lowercase() == name.to_lowercase()).cloned())
    }

    async fn list_roles(&self) -> Result<Vec<EmployeeRole>, AdminError> {
        let mut roles: Vec<_> = self.roles.read().unwrap().values().cloned().collect();
        roles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(roles)
    }

    async fn update_role_capabilities(
        &self,
        id: &str,
        capabilities: &CapabilityMatrix,
    ) -> Result<Option<EmployeeRole>, AdminError> {
        let mut roles = self.roles.write().unwrap();
        Ok(roles.get_mut(id).map(|role| {
            role.capabilities = capabilities.clone();
            role.updated_at = Utc::now();
            role.clone()
        }))
    }

    async fn delete_role(&self, id: &str) -> Result<bool, AdminError> {
        Ok(self.roles.write().unwrap().remove(id).is_some())
    }
}
