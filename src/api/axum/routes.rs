use axum::routing::{delete, get, patch, post};
use axum::{Extension, Router};

use super::{cors, handlers, taxonomy};
use crate::config::AdminConfig;
use crate::crypto::Argon2Hasher;
use crate::jwt::JwtService;
use crate::session::SessionConfig;
use crate::taxonomy::TaxonomyKind;
use crate::validators::PasswordPolicy;
use crate::{AdminError, EmployeeRepository, RoleRepository, TaxonomyRepository};

#[derive(Clone)]
pub struct AppState<E, R, T> {
    pub employee_repo: E,
    pub role_repo: R,
    pub taxonomy_repo: T,
    pub jwt: JwtService,
    pub session: SessionConfig,
    pub hasher: Argon2Hasher,
    pub password_policy: PasswordPolicy,
}

impl<E, R, T> AppState<E, R, T> {
    pub fn new(
        config: &AdminConfig,
        employee_repo: E,
        role_repo: R,
        taxonomy_repo: T,
    ) -> Result<Self, AdminError> {
        config.validate()?;

        Ok(Self {
            employee_repo,
            role_repo,
            taxonomy_repo,
            jwt: JwtService::new(config.jwt_config()?),
            session: config.session.clone(),
            hasher: config.password.hasher.clone(),
            password_policy: config.password.policy.clone(),
        })
    }
}

/// The whole service: `/health`, everything under `/api`, and CORS.
pub fn router<E, R, T>(state: AppState<E, R, T>) -> Router
where
    E: EmployeeRepository + Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    let mut api = Router::new()
        .nest("/employee/auth", auth_routes())
        .nest("/employee/employee-roles", role_routes())
        .route(
            "/employee/{id}/status",
            patch(handlers::set_employee_status::<E, R, T>),
        );

    for kind in TaxonomyKind::ALL {
        api = api.nest(&format!("/{}", kind.slug()), taxonomy_routes(kind));
    }

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(cors::default())
        .with_state(state)
}

/// login, logout, session details and employee registration
pub fn auth_routes<E, R, T>() -> Router<AppState<E, R, T>>
where
    E: EmployeeRepository + Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<E, R, T>))
        .route("/logout", post(handlers::logout::<E, R, T>))
        .route("/details", get(handlers::details))
        .route(
            "/register",
            post(handlers::register_employee::<E, R, T>).get(handlers::list_employees::<E, R, T>),
        )
}

pub fn role_routes<E, R, T>() -> Router<AppState<E, R, T>>
where
    E: EmployeeRepository + Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            post(handlers::create_role::<E, R, T>).get(handlers::list_roles::<E, R, T>),
        )
        .route("/modules", get(handlers::list_modules))
        .route(
            "/{id}",
            patch(handlers::update_role::<E, R, T>).delete(handlers::delete_role::<E, R, T>),
        )
}

/// Routes for one taxonomy kind, to be nested under `/api/<slug>`.
pub fn taxonomy_routes<E, R, T>(kind: TaxonomyKind) -> Router<AppState<E, R, T>>
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/create", post(taxonomy::create::<E, R, T>))
        .route("/get-all", get(taxonomy::list::<E, R, T>))
        .route("/delete", delete(taxonomy::delete_all::<E, R, T>))
        .route(
            "/{id}",
            get(taxonomy::get_one::<E, R, T>)
                .patch(taxonomy::update::<E, R, T>)
                .delete(taxonomy::delete_one::<E, R, T>),
        )
        .route("/{id}/add-option", patch(taxonomy::add_option::<E, R, T>))
        .route(
            "/{id}/delete-option/{option_id}",
            delete(taxonomy::delete_option::<E, R, T>),
        )
        .layer(Extension(kind))
}
