use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::{db_error, map_write_error};
use crate::access::CapabilityMatrix;
use crate::{AdminError, EmployeeRole, RoleRepository};

#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RoleRecord {
    id: String,
    name: String,
    capabilities: Json<CapabilityMatrix>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoleRecord> for EmployeeRole {
    fn from(row: RoleRecord) -> Self {
        EmployeeRole {
            id: row.id,
            name: row.name,
            capabilities: row.capabilities.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str = "id, name, capabilities, created_at, updated_at";

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn insert_role(&self, role: EmployeeRole) -> Result<EmployeeRole, AdminError> {
        let row: RoleRecord = sqlx::query_as(&format!(
            "INSERT INTO employee_roles ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(&role.id)
        .bind(&role.name)
        .bind(Json(&role.capabilities))
        .bind(role.created_at)
        .bind(role.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Role name already exists"))?;

        Ok(row.into())
    }

    async fn find_role_by_id(&self, id: &str) -> Result<Option<EmployeeRole>, AdminError> {
        let row: Option<RoleRecord> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM employee_roles WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<EmployeeRole>, AdminError> {
        let row: Option<RoleRecord> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM employee_roles WHERE LOWER(name) = LOWER($1)"))
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_roles(&self) -> Result<Vec<EmployeeRole>, AdminError> {
        let rows: Vec<RoleRecord> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM employee_roles ORDER BY created_at, name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_role_capabilities(
        &self,
        id: &str,
        capabilities: &CapabilityMatrix,
    ) -> Result<Option<EmployeeRole>, AdminError> {
        let row: Option<RoleRecord> = sqlx::query_as(&format!(
            "UPDATE employee_roles SET capabilities = $1, updated_at = NOW() WHERE id = $2 RETURNING {COLUMNS}"
        ))
        .bind(Json(capabilities))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete_role(&self, id: &str) -> Result<bool, AdminError> {
        let result = sqlx::query("DELETE FROM employee_roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AdminError::Conflict("Role is assigned to employees".to_owned())
                }
                _ => db_error(e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
