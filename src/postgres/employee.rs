use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{db_error, map_write_error};
use crate::repository::IdentityType;
use crate::{AdminError, Employee, EmployeeRepository};

#[derive(Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct EmployeeRecord {
    id: String,
    first_name: String,
    last_name: String,
    phone: String,
    address: Option<String>,
    image: Option<String>,
    role_id: String,
    identity_type: Option<String>,
    identity_number: Option<String>,
    identity_image: Option<String>,
    email: String,
    hashed_password: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EmployeeRecord> for Employee {
    fn from(row: EmployeeRecord) -> Self {
        Employee {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            address: row.address,
            image: row.image,
            role: row.role_id,
            identity_type: row.identity_type.as_deref().and_then(IdentityType::from_str),
            identity_number: row.identity_number,
            identity_image: row.identity_image,
            email: row.email,
            hashed_password: row.hashed_password,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str = "id, first_name, last_name, phone, address, image, role_id, identity_type, \
    identity_number, identity_image, email, hashed_password, is_active, created_at, updated_at";

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn insert_employee(&self, employee: Employee) -> Result<Employee, AdminError> {
        let row: EmployeeRecord = sqlx::query_as(&format!(
            "INSERT INTO employees ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        ))
        .bind(&employee.id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.phone)
        .bind(&employee.address)
        .bind(&employee.image)
        .bind(&employee.role)
        .bind(employee.identity_type.map(|t| t.as_str()))
        .bind(&employee.identity_number)
        .bind(&employee.identity_image)
        .bind(&employee.email)
        .bind(&employee.hashed_password)
        .bind(employee.is_active)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Email already registered"))?;

        Ok(row.into())
    }

    async fn find_employee_by_id(&self, id: &str) -> Result<Option<Employee>, AdminError> {
        let row: Option<EmployeeRecord> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM employees WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, AdminError> {
        let row: Option<EmployeeRecord> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM employees WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, AdminError> {
        let rows: Vec<EmployeeRecord> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM employees ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_employee_active(
        &self,
        id: &str,
        is_active: bool,
    ) -> Result<Option<Employee>, AdminError> {
        let row: Option<EmployeeRecord> = sqlx::query_as(&format!(
            "UPDATE employees SET is_active = $1, updated_at = NOW() WHERE id = $2 RETURNING {COLUMNS}"
        ))
        .bind(is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn count_employees(&self) -> Result<u64, AdminError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count.unsigned_abs())
    }

    async fn count_employees_with_role(&self, role_id: &str) -> Result<u64, AdminError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE role_id = $1")
            .bind(role_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count.unsigned_abs())
    }
}
