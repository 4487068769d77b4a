use chrono::Utc;

use crate::access::CapabilityMatrix;
use crate::crypto::{generate_object_id, PasswordHasher};
use crate::events::{dispatch, AdminEvent};
use crate::validators::{normalize_email, validate_email, PasswordPolicy};
use crate::{AdminError, Employee, EmployeeRepository, EmployeeRole, FieldErrors, RoleRepository};

pub const SUPER_ADMIN_ROLE: &str = "Super Admin";

/// Seeds the first employee of an empty store.
///
/// Creates (or reuses) the `Super Admin` role with every catalog module and
/// every action, then an active employee holding it. Does nothing once any
/// employee exists.
pub struct BootstrapAdminAction<E, R, H>
where
    E: EmployeeRepository,
    R: RoleRepository,
    H: PasswordHasher,
{
    employee_repository: E,
    role_repository: R,
    hasher: H,
    password_policy: PasswordPolicy,
}

impl<E, R, H> BootstrapAdminAction<E, R, H>
where
    E: EmployeeRepository,
    R: RoleRepository,
    H: PasswordHasher,
{
    pub fn new(employee_repository: E, role_repository: R, hasher: H) -> Self {
        Self {
            employee_repository,
            role_repository,
            hasher,
            password_policy: PasswordPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "bootstrap_admin", skip_all, err))]
    pub async fn execute(&self, email: &str, password: &str) -> Result<Option<Employee>, AdminError> {
        if self.employee_repository.count_employees().await? > 0 {
            log::debug!(target: "backoffice", "msg=\"bootstrap skipped, employees exist\"");
            return Ok(None);
        }

        let email = normalize_email(email);
        let mut errors = FieldErrors::new();
        errors.check("email", validate_email(&email));
        errors.check("password", self.password_policy.validate(password));
        errors.into_result()?;

        let role = match self.role_repository.find_role_by_name(SUPER_ADMIN_ROLE).await? {
            Some(role) => role,
            None => {
                let role = self
                    .role_repository
                    .insert_role(EmployeeRole::new(SUPER_ADMIN_ROLE, CapabilityMatrix::full()))
                    .await?;
                dispatch(AdminEvent::RoleCreated {
                    role_id: role.id.clone(),
                    name: role.name.clone(),
                    at: Utc::now(),
                })
                .await;
                role
            }
        };

        let now = Utc::now();
        let employee = self
            .employee_repository
            .insert_employee(Employee {
                id: generate_object_id(),
                first_name: "Super".to_owned(),
                last_name: "Admin".to_owned(),
                phone: "0000000000".to_owned(),
                address: None,
                image: None,
                role: role.id.clone(),
                identity_type: None,
                identity_number: None,
                identity_image: None,
                email,
                hashed_password: self.hasher.hash(password)?,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        log::info!(
            target: "backoffice",
            "msg=\"bootstrap admin created\" employee_id=\"{}\" email=\"{}\"",
            employee.id,
            employee.email
        );

        dispatch(AdminEvent::EmployeeRegistered {
            employee_id: employee.id.clone(),
            email: employee.email.clone(),
            registered_by: None,
            at: Utc::now(),
        })
        .await;

        Ok(Some(employee))
    }
}
