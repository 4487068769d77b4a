//! Role-based access control.
//!
//! A role carries a [`CapabilityMatrix`]: for every module in the
//! [`catalog`], which of the five [`AccessAction`]s are allowed. The matrix
//! is copied into the session token at login, and every protected route
//! checks the copy through [`Principal::require`].

mod action;
pub mod catalog;
mod matrix;
mod principal;

pub use action::{AccessAction, ActionSet};
pub use catalog::{is_known_module, ModuleGroup, MODULE_GROUPS};
pub use matrix::{CapabilityMatrix, CapabilityMatrixBuilder};
pub use principal::{authorize, Principal};
