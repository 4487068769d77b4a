use chrono::Utc;

use crate::crypto::PasswordHasher;
use crate::events::{dispatch, AdminEvent};
use crate::jwt::{IssuedToken, JwtService};
use crate::validators::normalize_email;
use crate::{AdminError, Employee, EmployeeRepository, EmployeeRole, RoleRepository, SecretString};

#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub employee: Employee,
    pub role: EmployeeRole,
    pub token: IssuedToken,
}

/// Checks credentials and issues a session token holding the employee's
/// current role and capabilities.
///
/// There is no lockout or backoff: every wrong password is answered with
/// `InvalidCredentials`, however many came before it.
pub struct LoginAction<E, R, H>
where
    E: EmployeeRepository,
    R: RoleRepository,
    H: PasswordHasher,
{
    employee_repository: E,
    role_repository: R,
    jwt_service: JwtService,
    hasher: H,
}

impl<E, R, H> LoginAction<E, R, H>
where
    E: EmployeeRepository,
    R: RoleRepository,
    H: PasswordHasher,
{
    pub fn new(employee_repository: E, role_repository: R, jwt_service: JwtService, hasher: H) -> Self {
        Self {
            employee_repository,
            role_repository,
            jwt_service,
            hasher,
        }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "login", skip_all, err))]
    pub async fn execute(&self, email: &str, password: &SecretString) -> Result<LoginResponse, AdminError> {
        let email = normalize_email(email);

        let Some(employee) = self.employee_repository.find_employee_by_email(&email).await? else {
            Self::reject(&email, "unknown email").await;
            return Err(AdminError::InvalidCredentials);
        };

        // the password is checked first so account state stays hidden
        if !self.hasher.verify(password.expose_secret(), &employee.hashed_password)? {
            Self::reject(&email, "wrong password").await;
            return Err(AdminError::InvalidCredentials);
        }

        if !employee.is_active {
            Self::reject(&email, "account inactive").await;
            return Err(AdminError::AccountInactive);
        }

        let role = self
            .role_repository
            .find_role_by_id(&employee.role)
            .await?
            .ok_or_else(|| {
                log::error!(
                    target: "backoffice",
                    "msg=\"employee references a missing role\" employee_id=\"{}\" role_id=\"{}\"",
                    employee.id,
                    employee.role
                );
                AdminError::Internal("employee role not found".to_owned())
            })?;

        let token = self.jwt_service.issue(&employee, &role)?;

        dispatch(AdminEvent::LoginSucceeded {
            employee_id: employee.id.clone(),
            email: employee.email.clone(),
            role: role.name.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(LoginResponse {
            employee,
            role,
            token,
        })
    }

    async fn reject(email: &str, reason: &str) {
        log::info!(target: "backoffice", "msg=\"login rejected\" email=\"{email}\" reason=\"{reason}\"");
        dispatch(AdminEvent::LoginFailed {
            email: email.to_owned(),
            reason: reason.to_owned(),
            at: Utc::now(),
        })
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AccessAction, ActionSet, CapabilityMatrix};
    use crate::actions::test_support::{hasher, jwt_service, seed_employee};
    use crate::{MockEmployeeRepository, MockRoleRepository};

    fn viewer() -> CapabilityMatrix {
        CapabilityMatrix::builder()
            .grant("Gender", ActionSet::only(&[AccessAction::View]))
            .build()
    }

    #[tokio::test]
    async fn test_login_success_snapshots_role() {
        let employees = MockEmployeeRepository::new();
        let roles = MockRoleRepository::new();
        let (employee, role) =
            seed_employee(&employees, &roles, "viewer@example.com", "secret1", viewer()).await;

        let action = LoginAction::new(employees, roles, jwt_service(), hasher());
        let response = action
            .execute("  Viewer@Example.com ", &SecretString::new("secret1"))
            .await
            .unwrap();

        assert_eq!(response.employee.id, employee.id);
        assert_eq!(response.role.id, role.id);

        let principal = jwt_service().verify(&response.token.token).unwrap();
        assert_eq!(principal.capabilities, viewer());
    }

    #[tokio::test]
    async fn test_wrong_password_twice_has_no_lockout() {
        let employees = MockEmployeeRepository::new();
        let roles = MockRoleRepository::new();
        seed_employee(&employees, &roles, "a@example.com", "secret1", viewer()).await;

        let action = LoginAction::new(employees, roles, jwt_service(), hasher());
        for _ in 0..2 {
            let err = action
                .execute("a@example.com", &SecretString::new("nope!!"))
                .await
                .unwrap_err();
            assert_eq!(err, AdminError::InvalidCredentials);
        }
        assert!(action
            .execute("a@example.com", &SecretString::new("secret1"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let action = LoginAction::new(
            MockEmployeeRepository::new(),
            MockRoleRepository::new(),
            jwt_service(),
            hasher(),
        );
        let err = action
            .execute("ghost@example.com", &SecretString::new("secret1"))
            .await
            .unwrap_err();
        assert_eq!(err, AdminError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_inactive_account_only_revealed_with_right_password() {
        let employees = MockEmployeeRepository::new();
        let roles = MockRoleRepository::new();
        let (employee, _) =
            seed_employee(&employees, &roles, "off@example.com", "secret1", viewer()).await;
        employees.set_employee_active(&employee.id, false).await.unwrap();

        let action = LoginAction::new(employees, roles, jwt_service(), hasher());
        assert_eq!(
            action
                .execute("off@example.com", &SecretString::new("wrong1"))
                .await
                .unwrap_err(),
            AdminError::InvalidCredentials
        );
        assert_eq!(
            action
                .execute("off@example.com", &SecretString::new("secret1"))
                .await
                .unwrap_err(),
            AdminError::AccountInactive
        );
    }

    #[tokio::test]
    async fn test_missing_role_is_internal() {
        let employees = MockEmployeeRepository::new();
        let roles = MockRoleRepository::new();
        let (_, role) = seed_employee(&employees, &roles, "x@example.com", "secret1", viewer()).await;
        roles.delete_role(&role.id).await.unwrap();

        let action = LoginAction::new(employees, roles, jwt_service(), hasher());
        let err = action
            .execute("x@example.com", &SecretString::new("secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Internal(_)));
    }
}
