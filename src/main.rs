//! Back office HTTP server.
//!
//! Configuration comes from the environment, see [`AdminConfig::from_env`].
//! With the `postgres` feature and `DATABASE_URL` set, data lives in
//! Postgres; otherwise in memory for the lifetime of the process.

use std::error::Error;

use backoffice::actions::BootstrapAdminAction;
use backoffice::api::axum::{router, AppState};
use backoffice::config::AdminConfig;
use backoffice::events::listeners::TracingListener;
use backoffice::{
    register_event_listeners, EmployeeRepository, MockEmployeeRepository, MockRoleRepository,
    MockTaxonomyRepository, RoleRepository, TaxonomyRepository,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AdminConfig::from_env()?;

    register_event_listeners(|registry| {
        registry.listen(TracingListener);
    });

    #[cfg(feature = "postgres")]
    if let Some(url) = config.server.database_url.clone() {
        use backoffice::postgres::{create_repositories, migrations};
        use sqlx::postgres::PgPoolOptions;

        let pool = PgPoolOptions::new().max_connections(10).connect(&url).await?;
        migrations::run(&pool).await?;
        tracing::info!("connected to postgres, migrations applied");

        let (employees, roles, taxonomies) = create_repositories(pool);
        return serve(config, employees, roles, taxonomies).await;
    }

    #[cfg(not(feature = "postgres"))]
    if config.server.database_url.is_some() {
        tracing::warn!("DATABASE_URL is ignored, built without the postgres feature");
    }

    tracing::info!("using the in-memory store");
    serve(
        config,
        MockEmployeeRepository::new(),
        MockRoleRepository::new(),
        MockTaxonomyRepository::new(),
    )
    .await
}

async fn serve<E, R, T>(
    config: AdminConfig,
    employees: E,
    roles: R,
    taxonomies: T,
) -> Result<(), Box<dyn Error>>
where
    E: EmployeeRepository + Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    if let (Some(email), Some(password)) = (
        config.server.bootstrap_email.as_deref(),
        config.server.bootstrap_password.as_ref(),
    ) {
        let created = BootstrapAdminAction::new(
            employees.clone(),
            roles.clone(),
            config.password.hasher.clone(),
        )
        .with_password_policy(config.password.policy.clone())
        .execute(email, password.expose_secret())
        .await?;

        if let Some(admin) = created {
            tracing::info!(email = %admin.email, "bootstrap administrator created");
        }
    }

    let state = AppState::new(&config, employees, roles, taxonomies)?;
    let listener = TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!(addr = %config.server.bind_addr, "backoffice listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
