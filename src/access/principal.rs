use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccessAction, CapabilityMatrix};
use crate::AdminError;

/// The authenticated employee behind a request, as recorded in the session
/// token at login.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub employee_id: String,
    pub email: String,
    pub role: String,
    pub role_id: String,
    pub capabilities: CapabilityMatrix,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Principal {
    pub fn can(&self, module: &str, action: AccessAction) -> bool {
        self.capabilities.allows(module, action)
    }

    pub fn require(&self, module: &str, action: AccessAction) -> Result<(), AdminError> {
        if self.can(module, action) {
            Ok(())
        } else {
            log::info!(
                target: "backoffice",
                "msg=\"access denied\" employee_id=\"{}\" module=\"{module}\" action=\"{action}\"",
                self.employee_id
            );
            Err(AdminError::Forbidden)
        }
    }
}

/// String form of [`Principal::can`]; unknown action names are denied.
pub fn authorize(principal: &Principal, module: &str, action: &str) -> bool {
    AccessAction::from_str(action).is_some_and(|a| principal.can(module, a))
}
