use chrono::Utc;
use serde::Deserialize;

use crate::access::{is_known_module, ActionSet, CapabilityMatrix};
use crate::events::{dispatch, AdminEvent};
use crate::validators::{is_object_id, validate_length};
use crate::{AdminError, EmployeeRepository, EmployeeRole, FieldErrors, RoleRepository};

/// Role payload.
///
/// Either the canonical `capabilities` matrix, or the legacy form shape
/// where `permissions` lists modules that all receive `manageAccess`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInput {
    pub role_name: Option<String>,
    pub capabilities: Option<CapabilityMatrix>,
    pub permissions: Option<Vec<String>>,
    pub manage_access: Option<ActionSet>,
}

impl RoleInput {
    fn capability_matrix(&self, errors: &mut FieldErrors) -> Option<CapabilityMatrix> {
        let matrix = match (&self.capabilities, &self.permissions, &self.manage_access) {
            (Some(matrix), None, None) => matrix.clone(),
            (None, Some(modules), Some(actions)) => {
                CapabilityMatrix::uniform(modules.iter().map(|m| m.trim().to_owned()), *actions)
            }
            (Some(_), _, _) => {
                errors.add(
                    "capabilities",
                    "Send either capabilities or permissions with manageAccess",
                );
                return None;
            }
            (None, Some(_), None) => {
                errors.add("manageAccess", "Is required with permissions");
                return None;
            }
            (None, None, Some(_)) => {
                errors.add("permissions", "Is required with manageAccess");
                return None;
            }
            (None, None, None) => {
                errors.add("capabilities", "Is required");
                return None;
            }
        };

        for module in matrix.modules().filter(|m| !is_known_module(m)) {
            errors.add(format!("capabilities.{module}"), "Unknown module");
        }

        Some(matrix)
    }
}

fn role_not_found() -> AdminError {
    AdminError::NotFound("Role not found".to_owned())
}

fn check_role_id(id: &str) -> Result<(), AdminError> {
    if is_object_id(id) {
        Ok(())
    } else {
        Err(AdminError::invalid("id", "Invalid role ID"))
    }
}

pub struct CreateRoleAction<R: RoleRepository> {
    role_repository: R,
}

impl<R: RoleRepository> CreateRoleAction<R> {
    pub fn new(role_repository: R) -> Self {
        Self { role_repository }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "create_role", skip_all, err))]
    pub async fn execute(&self, input: RoleInput) -> Result<EmployeeRole, AdminError> {
        let mut errors = FieldErrors::new();

        let name = input
            .role_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_owned();
        errors.check("roleName", validate_length(&name, 3, 50));
        let matrix = input.capability_matrix(&mut errors);

        errors.into_result()?;
        let matrix = matrix.unwrap_or_default();

        if self.role_repository.find_role_by_name(&name).await?.is_some() {
            return Err(AdminError::Conflict("Role name already exists".to_owned()));
        }

        let role = self
            .role_repository
            .insert_role(EmployeeRole::new(name, matrix))
            .await?;

        dispatch(AdminEvent::RoleCreated {
            role_id: role.id.clone(),
            name: role.name.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(role)
    }
}

pub struct ListRolesAction<R: RoleRepository> {
    role_repository: R,
}

impl<R: RoleRepository> ListRolesAction<R> {
    pub fn new(role_repository: R) -> Self {
        Self { role_repository }
    }

    pub async fn execute(&self) -> Result<Vec<EmployeeRole>, AdminError> {
        self.role_repository.list_roles().await
    }
}

/// Replaces a role's capabilities. Tokens already issued keep the
/// capabilities they were minted with.
pub struct UpdateRoleAction<R: RoleRepository> {
    role_repository: R,
}

impl<R: RoleRepository> UpdateRoleAction<R> {
    pub fn new(role_repository: R) -> Self {
        Self { role_repository }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "update_role", skip_all, err))]
    pub async fn execute(&self, id: &str, input: RoleInput) -> Result<EmployeeRole, AdminError> {
        check_role_id(id)?;

        let role = self
            .role_repository
            .find_role_by_id(id)
            .await?
            .ok_or_else(role_not_found)?;

        let mut errors = FieldErrors::new();
        if let Some(name) = input.role_name.as_deref().map(str::trim) {
            if name != role.name {
                errors.add("roleName", "Role name cannot be changed");
            }
        }
        let matrix = input.capability_matrix(&mut errors);
        errors.into_result()?;

        let updated = self
            .role_repository
            .update_role_capabilities(id, &matrix.unwrap_or_default())
            .await?
            .ok_or_else(role_not_found)?;

        dispatch(AdminEvent::RoleUpdated {
            role_id: updated.id.clone(),
            name: updated.name.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(updated)
    }
}

/// Deletes a role that no employee references.
pub struct DeleteRoleAction<R: RoleRepository, E: EmployeeRepository> {
    role_repository: R,
    employee_repository: E,
}

impl<R: RoleRepository, E: EmployeeRepository> DeleteRoleAction<R, E> {
    pub fn new(role_repository: R, employee_repository: E) -> Self {
        Self {
            role_repository,
            employee_repository,
        }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "delete_role", skip_all, err))]
    pub async fn execute(&self, id: &str) -> Result<(), AdminError> {
        check_role_id(id)?;

        if self.role_repository.find_role_by_id(id).await?.is_none() {
            return Err(role_not_found());
        }

        let assigned = self.employee_repository.count_employees_with_role(id).await?;
        if assigned > 0 {
            return Err(AdminError::Conflict(format!(
                "Role is assigned to {assigned} employee(s)"
            )));
        }

        if !self.role_repository.delete_role(id).await? {
            return Err(role_not_found());
        }

        dispatch(AdminEvent::RoleDeleted {
            role_id: id.to_owned(),
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}
