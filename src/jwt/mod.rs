//! Signed session tokens.
//!
//! A session token is an HS256 JWT whose claims carry the employee's
//! identity and a snapshot of their role's capability matrix. Nothing is
//! stored server-side; expiry is the only revocation.
//!
//! ```ignore
//! use backoffice::jwt::{JwtConfig, JwtService};
//!
//! let service = JwtService::new(JwtConfig::new(secret)?);
//! let issued = service.issue(&employee, &role)?;
//! let principal = service.verify(&issued.token)?;
//! ```

mod claims;
mod config;
mod service;

pub use claims::SessionClaims;
pub use config::{JwtConfig, MIN_SECRET_LENGTH};
pub use service::{IssuedToken, JwtService};
