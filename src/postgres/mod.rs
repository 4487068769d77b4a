mod employee;
pub mod migrations;
mod role;
mod taxonomy;

pub use employee::PostgresEmployeeRepository;
pub use role::PostgresRoleRepository;
pub use taxonomy::PostgresTaxonomyRepository;

use sqlx::PgPool;

use crate::AdminError;

/// Creates all Postgres repository instances from a connection pool.
pub fn create_repositories(
    pool: PgPool,
) -> (
    PostgresEmployeeRepository,
    PostgresRoleRepository,
    PostgresTaxonomyRepository,
) {
    (
        PostgresEmployeeRepository::new(pool.clone()),
        PostgresRoleRepository::new(pool.clone()),
        PostgresTaxonomyRepository::new(pool),
    )
}

/// Unique violations become `Conflict(message)`, everything else a
/// database error.
fn map_write_error(err: sqlx::Error, conflict_message: &str) -> AdminError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AdminError::Conflict(conflict_message.to_owned())
        }
        _ => AdminError::DatabaseError(err.to_string()),
    }
}

fn db_error(err: sqlx::Error) -> AdminError {
    AdminError::DatabaseError(err.to_string())
}
