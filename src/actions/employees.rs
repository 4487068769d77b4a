use chrono::Utc;
use serde::Deserialize;

use crate::access::Principal;
use crate::crypto::{generate_object_id, PasswordHasher};
use crate::events::{dispatch, AdminEvent};
use crate::repository::IdentityType;
use crate::validators::{
    is_object_id, normalize_email, validate_email, validate_http_url, validate_length,
    validate_phone, PasswordPolicy, ValidationError,
};
use crate::{AdminError, Employee, EmployeeRepository, FieldErrors, RoleRepository, SecretString};

/// Registration form for a new employee.
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported next to the others instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
    pub identity_type: Option<String>,
    pub identity_number: Option<String>,
    pub identity_image: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub confirm_password: Option<SecretString>,
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn required(value: Option<&str>) -> Result<&str, ValidationError> {
    value.ok_or(ValidationError::Required)
}

pub struct RegisterEmployeeAction<E, R, H>
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

impl<E, R, H> RegisterEmployeeAction<E, R, H>
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

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "register_employee", skip_all, err))]
    pub async fn execute(
        &self,
        input: RegisterEmployeeInput,
        registered_by: Option<&Principal>,
    ) -> Result<Employee, AdminError> {
        let mut errors = FieldErrors::new();

        let first_name = trimmed(&input.first_name);
        let last_name = trimmed(&input.last_name);
        let phone = trimmed(&input.phone);
        let address = trimmed(&input.address);
        let image = trimmed(&input.image);
        let identity_number = trimmed(&input.identity_number);
        let identity_image = trimmed(&input.identity_image);
        let email = input.email.as_deref().map(normalize_email).unwrap_or_default();
        let role_id = trimmed(&input.role);

        errors.check(
            "firstName",
            required(first_name.as_deref()).and_then(|v| validate_length(v, 2, 50)),
        );
        errors.check(
            "lastName",
            required(last_name.as_deref()).and_then(|v| validate_length(v, 2, 50)),
        );
        errors.check("phone", required(phone.as_deref()).and_then(validate_phone));
        if let Some(address) = &address {
            errors.check("address", validate_length(address, 0, 200));
        }
        if let Some(image) = &image {
            errors.check("image", validate_http_url(image));
        }
        if let Some(url) = &identity_image {
            errors.check("identityImage", validate_http_url(url));
        }
        if let Some(number) = &identity_number {
            errors.check("identityNumber", validate_length(number, 6, usize::MAX));
        }

        let identity_type = match input.identity_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => {
                let parsed = IdentityType::from_str(&value.to_lowercase());
                if parsed.is_none() {
                    errors.add("identityType", "Must be one of aadhar, pan, passport");
                }
                parsed
            }
        };

        errors.check("email", validate_email(&email));

        let password = input.password.unwrap_or_default();
        errors.check("password", self.password_policy.validate(password.expose_secret()));
        let confirm = input.confirm_password.unwrap_or_default();
        if confirm.is_empty() {
            errors.check("confirmPassword", Err(ValidationError::Required));
        } else if confirm != password {
            errors.check("confirmPassword", Err(ValidationError::PasswordMismatch));
        }

        match role_id.as_deref() {
            None => errors.check("role", Err(ValidationError::Required)),
            Some(id) if !is_object_id(id) => errors.add("role", "Invalid role ID"),
            Some(id) => {
                if self.role_repository.find_role_by_id(id).await?.is_none() {
                    errors.add("role", "Role does not exist");
                }
            }
        }

        errors.into_result()?;

        if self.employee_repository.find_employee_by_email(&email).await?.is_some() {
            return Err(AdminError::Conflict("Email already registered".to_owned()));
        }

        let hashed_password = self.hasher.hash(password.expose_secret())?;
        let now = Utc::now();

        let employee = self
            .employee_repository
            .insert_employee(Employee {
                id: generate_object_id(),
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
                address,
                image,
                role: role_id.unwrap_or_default(),
                identity_type,
                identity_number,
                identity_image,
                email,
                hashed_password,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        dispatch(AdminEvent::EmployeeRegistered {
            employee_id: employee.id.clone(),
            email: employee.email.clone(),
            registered_by: registered_by.map(|p| p.employee_id.clone()),
            at: Utc::now(),
        })
        .await;

        Ok(employee)
    }
}

/// Employees, newest first.
pub struct ListEmployeesAction<E: EmployeeRepository> {
    employee_repository: E,
}

impl<E: EmployeeRepository> ListEmployeesAction<E> {
    pub fn new(employee_repository: E) -> Self {
        Self { employee_repository }
    }

    pub async fn execute(&self) -> Result<Vec<Employee>, AdminError> {
        self.employee_repository.list_employees().await
    }
}

/// Activates or deactivates an employee. A deactivated employee can no
/// longer log in; tokens already issued stay valid until they expire.
pub struct SetEmployeeStatusAction<E: EmployeeRepository> {
    employee_repository: E,
}

impl<E: EmployeeRepository> SetEmployeeStatusAction<E> {
    pub fn new(employee_repository: E) -> Self {
        Self { employee_repository }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "set_employee_status", skip_all, err))]
    pub async fn execute(
        &self,
        id: &str,
        is_active: bool,
        changed_by: &Principal,
    ) -> Result<Employee, AdminError> {
        if !is_object_id(id) {
            return Err(AdminError::invalid("id", "Invalid employee ID"));
        }

        let employee = self
            .employee_repository
            .set_employee_active(id, is_active)
            .await?
            .ok_or_else(|| AdminError::NotFound("Employee not found".to_owned()))?;

        dispatch(AdminEvent::EmployeeStatusChanged {
            employee_id: employee.id.clone(),
            is_active,
            changed_by: changed_by.employee_id.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(employee)
    }
}
