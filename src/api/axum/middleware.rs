use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::AppError;
use super::routes::AppState;
use crate::access::{AccessAction, Principal};
use crate::actions::VerifySessionAction;
use crate::session::{find_session_token, SessionConfig};
use crate::AdminError;

/// The verified session behind a request.
///
/// The token is read from the session cookie, falling back to an
/// `Authorization: Bearer` header. Verification is signature and expiry
/// only; no storage is consulted.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

impl Authenticated {
    pub fn principal(&self) -> &Principal {
        &self.0
    }

    /// `Forbidden` unless the session grants `action` on `module`.
    pub fn require(&self, module: &str, action: AccessAction) -> Result<(), AppError> {
        self.0.require(module, action).map_err(AppError)
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
}

/// Session token from the cookie, else from a bearer header.
pub fn extract_session_token(headers: &HeaderMap, session: &SessionConfig) -> Option<String> {
    let cookies = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok());

    find_session_token(cookies, session).or_else(|| extract_bearer_token(headers))
}

impl<E, R, T> FromRequestParts<AppState<E, R, T>> for Authenticated
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<E, R, T>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers, &state.session);

        VerifySessionAction::new(state.jwt.clone())
            .execute(token.as_deref())
            .map(Authenticated)
            .map_err(AppError)
    }
}

/// `Json` whose rejections become validation errors on `body`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError(AdminError::invalid("body", rejection.body_text()))),
        }
    }
}
