mod cors;
mod error;
mod handlers;
mod middleware;
mod routes;
mod taxonomy;

pub use cors::default as default_cors;
pub use error::AppError;
pub use middleware::{extract_bearer_token, extract_session_token, Authenticated, JsonBody};
pub use routes::{auth_routes, role_routes, router, taxonomy_routes, AppState};
