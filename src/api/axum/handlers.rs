//! HTTP handlers for employee auth, employees and roles.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error::AppError;
use super::middleware::{extract_session_token, Authenticated, JsonBody};
use super::routes::AppState;
use crate::access::catalog::{EMPLOYEES, EMPLOYEE_ROLES};
use crate::access::{AccessAction, MODULE_GROUPS};
use crate::actions::{
    CreateRoleAction, DeleteRoleAction, ListEmployeesAction, ListRolesAction, LoginAction,
    LogoutAction, RegisterEmployeeAction, RegisterEmployeeInput, RoleInput,
    SetEmployeeStatusAction, UpdateRoleAction, VerifySessionAction,
};
use crate::api::{
    ApiResponse, LoginData, LoginRequest, MessageResponse, RoleSummary, StatusRequest,
};
use crate::session::{build_removal_cookie, build_session_cookie};
use crate::{EmployeeRepository, RoleRepository};

/// GET /health
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::message("ok"))
}

/// Check credentials and set the session cookie.
///
/// POST /api/employee/auth/login
pub async fn login<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Response, AppError>
where
    E: EmployeeRepository + Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    let (email, password) = body.into_credentials()?;

    let action = LoginAction::new(
        state.employee_repo,
        state.role_repo,
        state.jwt,
        state.hasher,
    );
    let login = action.execute(&email, &password).await?;

    let cookie = build_session_cookie(&login.token.token, login.token.expires_in, &state.session);
    let data = LoginData {
        role: RoleSummary::from(&login.role),
        capabilities: login.role.capabilities,
        employee: login.employee,
        expires_at: login.token.expires_at,
    };

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(ApiResponse::with_message("Login successful", data)),
    )
        .into_response())
}

/// Clear the session cookie. Succeeds without a valid session too.
///
/// POST /api/employee/auth/logout
pub async fn logout<E, R, T>(State(state): State<AppState<E, R, T>>, headers: HeaderMap) -> Response
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    let token = extract_session_token(&headers, &state.session);
    let principal = VerifySessionAction::new(state.jwt)
        .execute(token.as_deref())
        .ok();

    LogoutAction::new().execute(principal.as_ref()).await;

    let cookie = build_removal_cookie(&state.session);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(MessageResponse::message("Logged out successfully")),
    )
        .into_response()
}

/// GET /api/employee/auth/details
pub async fn details(auth: Authenticated) -> Json<ApiResponse<crate::Principal>> {
    Json(ApiResponse::data(auth.0))
}

/// POST /api/employee/auth/register
pub async fn register_employee<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    auth: Authenticated,
    JsonBody(body): JsonBody<RegisterEmployeeInput>,
) -> Result<Response, AppError>
where
    E: EmployeeRepository + Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    auth.require(EMPLOYEES, AccessAction::Add)?;

    let action = RegisterEmployeeAction::new(state.employee_repo, state.role_repo, state.hasher)
        .with_password_policy(state.password_policy);
    let employee = action.execute(body, Some(auth.principal())).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Employee registered successfully", employee)),
    )
        .into_response())
}

/// GET /api/employee/auth/register
pub async fn list_employees<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    auth: Authenticated,
) -> Result<Response, AppError>
where
    E: EmployeeRepository + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    auth.require(EMPLOYEES, AccessAction::View)?;

    let employees = ListEmployeesAction::new(state.employee_repo).execute().await?;
    Ok(Json(ApiResponse::data(employees)).into_response())
}

/// PATCH /api/employee/{id}/status
pub async fn set_employee_status<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    auth: Authenticated,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<StatusRequest>,
) -> Result<Response, AppError>
where
    E: EmployeeRepository + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    auth.require(EMPLOYEES, AccessAction::Update)?;

    let employee = SetEmployeeStatusAction::new(state.employee_repo)
        .execute(&id, body.is_active, auth.principal())
        .await?;

    let message = if employee.is_active {
        "Employee activated"
    } else {
        "Employee deactivated"
    };
    Ok(Json(ApiResponse::with_message(message, employee)).into_response())
}

/// POST /api/employee/employee-roles
pub async fn create_role<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    auth: Authenticated,
    JsonBody(body): JsonBody<RoleInput>,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    auth.require(EMPLOYEE_ROLES, AccessAction::Add)?;

    let role = CreateRoleAction::new(state.role_repo).execute(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Role created successfully", role)),
    )
        .into_response())
}

/// GET /api/employee/employee-roles
pub async fn list_roles<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    auth: Authenticated,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    auth.require(EMPLOYEE_ROLES, AccessAction::View)?;

    let roles = ListRolesAction::new(state.role_repo).execute().await?;
    Ok(Json(ApiResponse::data(roles)).into_response())
}

/// Grouped module catalog for the role form.
///
/// GET /api/employee/employee-roles/modules
pub async fn list_modules(auth: Authenticated) -> Result<Response, AppError> {
    auth.require(EMPLOYEE_ROLES, AccessAction::View)?;
    Ok(Json(ApiResponse::data(MODULE_GROUPS)).into_response())
}

/// PATCH /api/employee/employee-roles/{id}
pub async fn update_role<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    auth: Authenticated,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<RoleInput>,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    auth.require(EMPLOYEE_ROLES, AccessAction::Update)?;

    let role = UpdateRoleAction::new(state.role_repo).execute(&id, body).await?;
    Ok(Json(ApiResponse::with_message("Role updated successfully", role)).into_response())
}

/// DELETE /api/employee/employee-roles/{id}
pub async fn delete_role<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    E: EmployeeRepository + Clone + Send + Sync + 'static,
    R: RoleRepository + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    auth.require(EMPLOYEE_ROLES, AccessAction::Delete)?;

    DeleteRoleAction::new(state.role_repo, state.employee_repo)
        .execute(&id)
        .await?;
    Ok(Json(MessageResponse::message("Role deleted successfully")).into_response())
}
