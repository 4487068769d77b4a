use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::MessageResponse;
use crate::AdminError;

/// converts `AdminError` into the response envelope and status code
#[derive(Debug)]
pub struct AppError(pub AdminError);

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        Self(err)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AdminError::Validation(_) | AdminError::Conflict(_) => StatusCode::BAD_REQUEST,
            AdminError::NotFound(_) => StatusCode::NOT_FOUND,
            AdminError::Unauthorized | AdminError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AdminError::AccountInactive | AdminError::Forbidden => StatusCode::FORBIDDEN,
            AdminError::PasswordHashError
            | AdminError::ConfigurationError(_)
            | AdminError::DatabaseError(_)
            | AdminError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self.0 {
            AdminError::Validation(errors) => {
                MessageResponse::failure("Validation failed", Some(errors))
            }
            err if err.is_internal() => {
                log::error!(target: "backoffice", "msg=\"request failed\" error=\"{err}\"");
                MessageResponse::failure("Internal server error", None)
            }
            err => MessageResponse::failure(err.to_string(), None),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: AdminError) -> (StatusCode, serde_json::Value) {
        let response = AppError(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_detail_is_hidden() {
        let (status, body) = body_of(AdminError::DatabaseError("password=hunter2".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_validation_carries_field_map() {
        let (status, body) = body_of(AdminError::invalid("title", "Is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"]["title"][0], "Is required");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError(AdminError::Conflict("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError(AdminError::AccountInactive).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError(AdminError::InvalidCredentials).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError(AdminError::NotFound("x".into())).status(), StatusCode::NOT_FOUND);
    }
}
