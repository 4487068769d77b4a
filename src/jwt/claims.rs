use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::access::{CapabilityMatrix, Principal};
use crate::AdminError;

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Employee id.
    pub sub: String,
    pub email: String,
    /// Role name at login time.
    pub role: String,
    pub role_id: String,
    /// Role capabilities at login time.
    pub capabilities: CapabilityMatrix,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl SessionClaims {
    pub fn employee_id(&self) -> &str {
        &self.sub
    }

    pub fn into_principal(self) -> Result<Principal, AdminError> {
        let issued_at = DateTime::from_timestamp(self.iat, 0).ok_or(AdminError::Unauthorized)?;
        let expires_at = DateTime::from_timestamp(self.exp, 0).ok_or(AdminError::Unauthorized)?;

        Ok(Principal {
            employee_id: self.sub,
            email: self.email,
            role: self.role,
            role_id: self.role_id,
            capabilities: self.capabilities,
            issued_at,
            expires_at,
        })
    }
}
