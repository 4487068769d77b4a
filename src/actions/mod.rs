//! Back office operations.
//!
//! Every operation is an `XxxAction` built from the repositories it needs
//! and run with `execute`. Actions validate input, talk to storage, and fire
//! [`AdminEvent`](crate::AdminEvent)s; they know nothing about HTTP.

mod bootstrap;
mod employees;
mod login;
mod logout;
mod roles;
pub mod taxonomy;
mod verify_session;

pub use bootstrap::{BootstrapAdminAction, SUPER_ADMIN_ROLE};
pub use employees::{
    ListEmployeesAction, RegisterEmployeeAction, RegisterEmployeeInput, SetEmployeeStatusAction,
};
pub use login::{LoginAction, LoginResponse};
pub use logout::LogoutAction;
pub use roles::{CreateRoleAction, DeleteRoleAction, ListRolesAction, RoleInput, UpdateRoleAction};
pub use taxonomy::{
    AddOptionAction, CreateTaxonomyAction, DeleteAllTaxonomyAction, DeleteOptionAction,
    DeleteTaxonomyAction, GetTaxonomyAction, ListTaxonomyAction, UpdateTaxonomyAction,
};
pub use verify_session::VerifySessionAction;
