use chrono::Utc;

use crate::access::Principal;
use crate::events::{dispatch, AdminEvent};

/// Ends a browser session. The token itself stays valid until it expires;
/// only the cookie is cleared by the caller.
#[derive(Default)]
pub struct LogoutAction;

impl LogoutAction {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, principal: Option<&Principal>) {
        dispatch(AdminEvent::LoggedOut {
            employee_id: principal.map(|p| p.employee_id.clone()),
            at: Utc::now(),
        })
        .await;
    }
}
