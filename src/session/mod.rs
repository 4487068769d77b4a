//! Session cookie settings and helpers.
//!
//! The cookie carries the signed session token itself; there is no
//! server-side session store.

mod config;
mod cookie;

pub use self::config::{SameSite, SessionConfig};
pub use self::cookie::{build_removal_cookie, build_session_cookie, find_session_token};
