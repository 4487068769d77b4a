//! Repository traits and data types.
//!
//! Implement these traits to plug in a storage backend.
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`EmployeeRepository`] | Employee accounts |
//! | [`RoleRepository`] | Roles and their capability matrices |
//! | [`TaxonomyRepository`] | Onboarding taxonomy documents |
//!
//! Enable the `mocks` feature for in-memory implementations:
//! [`MockEmployeeRepository`], [`MockRoleRepository`] and
//! [`MockTaxonomyRepository`].

mod employee;
mod role;
mod taxonomy;

#[cfg(any(test, feature = "mocks"))]
mod employee_mock;
#[cfg(any(test, feature = "mocks"))]
mod role_mock;
#[cfg(any(test, feature = "mocks"))]
mod taxonomy_mock;

pub use employee::{Employee, EmployeeRepository, IdentityType};
pub use role::{EmployeeRole, RoleRepository};
pub use taxonomy::TaxonomyRepository;

#[cfg(any(test, feature = "mocks"))]
pub use employee_mock::MockEmployeeRepository;
#[cfg(any(test, feature = "mocks"))]
pub use role_mock::MockRoleRepository;
#[cfg(any(test, feature = "mocks"))]
pub use taxonomy_mock::MockTaxonomyRepository;
