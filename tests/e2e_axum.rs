//! End-to-end tests for the auth, employee and role routes.
//!
//! These tests use mock repositories - no database required.
//! Run with: `cargo test --test e2e_axum`

#![cfg(all(feature = "axum_api", feature = "mocks"))]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use backoffice::access::catalog::{EMPLOYEES, EMPLOYEE_ROLES};
use backoffice::api::axum::{router, AppState};
use backoffice::config::AdminConfig;
use backoffice::crypto::{Argon2Hasher, PasswordHasher};
use backoffice::{
    AccessAction, ActionSet, CapabilityMatrix, Employee, EmployeeRepository, EmployeeRole,
    MockEmployeeRepository, MockRoleRepository, MockTaxonomyRepository, RoleRepository,
    SecretString,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const PASSWORD: &str = "correct-horse";

struct TestApp {
    app: Router,
    employees: MockEmployeeRepository,
    roles: MockRoleRepository,
}

fn hasher() -> Argon2Hasher {
    Argon2Hasher::new(8192, 1, 1)
}

fn create_app() -> TestApp {
    let mut config = AdminConfig::development();
    config.tokens.secret = SecretString::new("e2e-axum-signing-secret-0123456789");
    config.password.hasher = hasher();

    let employees = MockEmployeeRepository::new();
    let roles = MockRoleRepository::new();
    let state = AppState::new(
        &config,
        employees.clone(),
        roles.clone(),
        MockTaxonomyRepository::new(),
    )
    .unwrap();

    TestApp {
        app: router(state),
        employees,
        roles,
    }
}

impl TestApp {
    async fn seed(&self, email: &str, role_name: &str, capabilities: CapabilityMatrix) -> Employee {
        let role = self
            .roles
            .insert_role(EmployeeRole::new(role_name, capabilities))
            .await
            .unwrap();
        let hash = hasher().hash(PASSWORD).unwrap();
        self.employees
            .insert_employee(Employee::mock_from_credentials(email, &hash, &role.id))
            .await
            .unwrap()
    }

    async fn seed_admin(&self) -> String {
        self.seed("admin@example.com", "Super Admin", CapabilityMatrix::full())
            .await;
        self.login("admin@example.com", PASSWORD).await
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = cookie {
            builder = builder.header(header::COOKIE, format!("auth_token={token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    /// Logs in and returns the token from the session cookie.
    async fn login(&self, email: &str, password: &str) -> String {
        let (status, headers, body) = self
            .send(
                "POST",
                "/api/employee/auth/login",
                None,
                Some(json!({"email": email, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        session_cookie_value(&headers).expect("session cookie")
    }
}

fn set_cookie(headers: &HeaderMap) -> String {
    headers
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .unwrap()
        .to_owned()
}

fn session_cookie_value(headers: &HeaderMap) -> Option<String> {
    let raw = set_cookie(headers);
    raw.strip_prefix("auth_token=")?
        .split(';')
        .next()
        .map(ToOwned::to_owned)
}

fn view_only() -> ActionSet {
    ActionSet::only(&[AccessAction::View])
}

#[tokio::test]
async fn test_health() {
    let app = create_app();
    let (status, _, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "ok"}));
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = create_app();
    app.seed("asha@example.com", "Editor", CapabilityMatrix::new())
        .await;

    let (status, headers, body) = app
        .send(
            "POST",
            "/api/employee/auth/login",
            None,
            Some(json!({"email": "Asha@Example.com", "password": PASSWORD})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let cookie = set_cookie(&headers);
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["employee"]["email"], "asha@example.com");
    assert_eq!(body["data"]["role"]["roleName"], "Editor");
    assert!(body["data"]["employee"].get("hashedPassword").is_none());
    assert!(body["data"]["employee"].get("hashed_password").is_none());

    // the token is only ever handed out in the http-only cookie
    assert!(body["data"].get("token").is_none());
    assert!(body["data"]["expiresAt"].is_string());
    let token = session_cookie_value(&headers).unwrap();
    assert!(!body.to_string().contains(&token));
}

#[tokio::test]
async fn test_wrong_password_twice_is_never_locked_out() {
    let app = create_app();
    app.seed("asha@example.com", "Editor", CapabilityMatrix::new())
        .await;

    for _ in 0..2 {
        let (status, headers, body) = app
            .send(
                "POST",
                "/api/employee/auth/login",
                None,
                Some(json!({"email": "asha@example.com", "password": "wrong-password"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
        assert!(headers.get(header::SET_COOKIE).is_none());
    }

    // the right password still works straight after
    app.login("asha@example.com", PASSWORD).await;
}

#[tokio::test]
async fn test_unknown_email_matches_wrong_password() {
    let app = create_app();
    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/auth/login",
            None,
            Some(json!({"email": "ghost@example.com", "password": PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_inactive_account() {
    let app = create_app();
    let employee = app
        .seed("asha@example.com", "Editor", CapabilityMatrix::new())
        .await;
    app.employees
        .set_employee_active(&employee.id, false)
        .await
        .unwrap();

    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/auth/login",
            None,
            Some(json!({"email": "asha@example.com", "password": PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Account is inactive");

    // without the password the account state stays hidden
    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/auth/login",
            None,
            Some(json!({"email": "asha@example.com", "password": "wrong-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = create_app();
    let (status, _, body) = app
        .send("POST", "/api/employee/auth/login", None, Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = create_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/employee/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["errors"]["body"].is_array());
}

#[tokio::test]
async fn test_details_requires_session() {
    let app = create_app();

    let (status, _, body) = app
        .send("GET", "/api/employee/auth/details", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");

    let (status, _, _) = app
        .send("GET", "/api/employee/auth/details", Some("not.a.token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.seed_admin().await;
    let (status, _, body) = app
        .send("GET", "/api/employee/auth/details", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "admin@example.com");
    assert_eq!(body["data"]["role"], "Super Admin");
    assert_eq!(body["data"]["capabilities"]["Gender"]["Delete"], true);
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = create_app();
    let token = app.seed_admin().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/employee/auth/details")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_clears_cookie_only() {
    let app = create_app();
    let token = app.seed_admin().await;

    let (status, headers, body) = app
        .send("POST", "/api/employee/auth/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
    let cookie = set_cookie(&headers);
    assert!(cookie.starts_with("auth_token=;"));
    assert!(cookie.contains("Max-Age=0"));

    // there is no revocation list: the token itself stays valid
    let (status, _, _) = app
        .send("GET", "/api/employee/auth/details", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // logging out without a session still clears the cookie
    let (status, headers, _) = app
        .send("POST", "/api/employee/auth/logout", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(set_cookie(&headers).contains("Max-Age=0"));
}

#[tokio::test]
async fn test_role_crud() {
    let app = create_app();
    let token = app.seed_admin().await;

    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/employee-roles",
            Some(&token),
            Some(json!({
                "roleName": "Moderator",
                "permissions": ["Gender", "Lifestyle"],
                "manageAccess": {"Add": true, "Update": true, "Delete": false, "View": true, "Export": false}
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["roleName"], "Moderator");
    assert_eq!(body["data"]["capabilities"]["Lifestyle"]["Update"], true);
    assert_eq!(body["data"]["capabilities"]["Lifestyle"]["Delete"], false);
    let role_id = body["data"]["_id"].as_str().unwrap().to_owned();

    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/employee-roles",
            Some(&token),
            Some(json!({"roleName": "Moderator", "capabilities": {}})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Role name already exists");

    let (status, _, body) = app
        .send("GET", "/api/employee/employee-roles", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _, body) = app
        .send(
            "PATCH",
            &format!("/api/employee/employee-roles/{role_id}"),
            Some(&token),
            Some(json!({"capabilities": {"Coupons": {
                "Add": false, "Update": false, "Delete": false, "View": true, "Export": true
            }}})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["capabilities"]["Coupons"]["Export"], true);
    assert!(body["data"]["capabilities"].get("Gender").is_none());

    let (status, _, _) = app
        .send(
            "DELETE",
            &format!("/api/employee/employee-roles/{role_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = app
        .send(
            "DELETE",
            &format!("/api/employee/employee-roles/{role_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_validation() {
    let app = create_app();
    let token = app.seed_admin().await;

    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/employee-roles",
            Some(&token),
            Some(json!({"roleName": "QA", "capabilities": {"Payroll": {
                "Add": true, "Update": true, "Delete": true, "View": true, "Export": true
            }}})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["roleName"].is_array());
    assert!(body["errors"]["capabilities.Payroll"].is_array());

    // partial action sets are rejected while parsing
    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/employee-roles",
            Some(&token),
            Some(json!({"roleName": "Partial", "capabilities": {"Gender": {"View": true}}})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["body"].is_array());
}

#[tokio::test]
async fn test_role_in_use_cannot_be_deleted() {
    let app = create_app();
    let token = app.seed_admin().await;
    let editor = app
        .seed("editor@example.com", "Editor", CapabilityMatrix::new())
        .await;

    let (status, _, _) = app
        .send(
            "DELETE",
            &format!("/api/employee/employee-roles/{}", editor.role),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_module_catalog() {
    let app = create_app();
    let token = app.seed_admin().await;

    let (status, _, body) = app
        .send("GET", "/api/employee/employee-roles/modules", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let groups = body["data"].as_array().unwrap();
    let onboarding = groups
        .iter()
        .find(|g| g["group"] == "Onboarding")
        .unwrap();
    assert!(onboarding["modules"]
        .as_array()
        .unwrap()
        .contains(&json!("Sexual Orientation")));
}

#[tokio::test]
async fn test_missing_capability_is_forbidden() {
    let app = create_app();
    app.seed(
        "viewer@example.com",
        "Viewer",
        CapabilityMatrix::builder()
            .grant(EMPLOYEE_ROLES, view_only())
            .build(),
    )
    .await;
    let token = app.login("viewer@example.com", PASSWORD).await;

    let (status, _, _) = app
        .send("GET", "/api/employee/employee-roles", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/employee-roles",
            Some(&token),
            Some(json!({"roleName": "Sneaky", "capabilities": {}})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied");

    let (status, _, _) = app
        .send("GET", "/api/employee/auth/register", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_capabilities_are_a_login_snapshot() {
    let app = create_app();
    let admin = app.seed_admin().await;
    let editor = app
        .seed(
            "editor@example.com",
            "Gender Editor",
            CapabilityMatrix::builder().grant("Gender", view_only()).build(),
        )
        .await;
    let old_token = app.login("editor@example.com", PASSWORD).await;

    let (status, _, _) = app
        .send(
            "PATCH",
            &format!("/api/employee/employee-roles/{}", editor.role),
            Some(&admin),
            Some(json!({"capabilities": {"Gender": {
                "Add": false, "Update": true, "Delete": false, "View": true, "Export": false
            }}})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let stored = app.roles.find_role_by_id(&editor.role).await.unwrap().unwrap();
    assert!(stored.capabilities.allows("Gender", AccessAction::Update));

    let patch = json!({"title": "Gender"});
    let uri = "/api/gender/65f1a2b3c4d5e6f708192a3b";

    // the old token still carries Update: false
    let (status, _, _) = app.send("PATCH", uri, Some(&old_token), Some(patch.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // a fresh login picks up the new matrix; the document does not exist
    let new_token = app.login("editor@example.com", PASSWORD).await;
    let (status, _, body) = app.send("PATCH", uri, Some(&new_token), Some(patch)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Gender not found");
}

#[tokio::test]
async fn test_register_and_manage_employees() {
    let app = create_app();
    let token = app.seed_admin().await;
    let role = app
        .roles
        .insert_role(EmployeeRole::new(
            "Employee Manager",
            CapabilityMatrix::builder()
                .grant(EMPLOYEES, ActionSet::all())
                .build(),
        ))
        .await
        .unwrap();

    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/auth/register",
            Some(&token),
            Some(json!({
                "firstName": "Ravi",
                "lastName": "Kumar",
                "phone": "9123456780",
                "role": role.id,
                "email": "Ravi@Example.com",
                "password": "ravi-pass-1",
                "confirmPassword": "ravi-pass-1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["email"], "ravi@example.com");
    assert_eq!(body["data"]["isActive"], true);
    assert!(body["data"].get("hashedPassword").is_none());
    let ravi_id = body["data"]["_id"].as_str().unwrap().to_owned();

    let (status, _, body) = app
        .send("GET", "/api/employee/auth/register", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["email"], "ravi@example.com");

    // the new employee can log in until deactivated
    app.login("ravi@example.com", "ravi-pass-1").await;

    let (status, _, body) = app
        .send(
            "PATCH",
            &format!("/api/employee/{ravi_id}/status"),
            Some(&token),
            Some(json!({"isActive": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], false);

    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/auth/login",
            None,
            Some(json!({"email": "ravi@example.com", "password": "ravi-pass-1"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Account is inactive");
}

#[tokio::test]
async fn test_register_validation_and_duplicates() {
    let app = create_app();
    let token = app.seed_admin().await;

    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/auth/register",
            Some(&token),
            Some(json!({
                "firstName": "R",
                "phone": "123",
                "role": "65f1a2b3c4d5e6f708192a3b",
                "email": "admin@example.com",
                "password": "abc",
                "confirmPassword": "abd"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["firstName", "lastName", "phone", "role", "password", "confirmPassword"] {
        assert!(body["errors"][field].is_array(), "missing error for {field}");
    }

    let admin_role = app
        .roles
        .find_role_by_name("Super Admin")
        .await
        .unwrap()
        .unwrap();
    let (status, _, body) = app
        .send(
            "POST",
            "/api/employee/auth/register",
            Some(&token),
            Some(json!({
                "firstName": "Second",
                "lastName": "Admin",
                "phone": "9123456780",
                "role": admin_role.id,
                "email": "ADMIN@example.com",
                "password": "another-pass",
                "confirmPassword": "another-pass"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn test_status_of_unknown_employee() {
    let app = create_app();
    let token = app.seed_admin().await;

    let (status, _, body) = app
        .send(
            "PATCH",
            "/api/employee/65f1a2b3c4d5e6f708192aff/status",
            Some(&token),
            Some(json!({"isActive": true})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Employee not found");
}
