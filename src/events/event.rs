use chrono::{DateTime, Utc};

use crate::taxonomy::TaxonomyKind;

#[derive(Debug, Clone)]
pub enum AdminEvent {
    // session
    LoginSucceeded {
        employee_id: String,
        email: String,
        role: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        email: String,
        reason: String,
        at: DateTime<Utc>,
    },
    LoggedOut {
        employee_id: Option<String>,
        at: DateTime<Utc>,
    },

    // employees
    EmployeeRegistered {
        employee_id: String,
        email: String,
        registered_by: Option<String>,
        at: DateTime<Utc>,
    },
    EmployeeStatusChanged {
        employee_id: String,
        is_active: bool,
        changed_by: String,
        at: DateTime<Utc>,
    },

    // roles
    RoleCreated {
        role_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    RoleUpdated {
        role_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    RoleDeleted {
        role_id: String,
        at: DateTime<Utc>,
    },

    // taxonomies
    TaxonomyCreated {
        kind: TaxonomyKind,
        document_id: String,
        at: DateTime<Utc>,
    },
    TaxonomyUpdated {
        kind: TaxonomyKind,
        document_id: String,
        at: DateTime<Utc>,
    },
    TaxonomyDeleted {
        kind: TaxonomyKind,
        /// `None` when every document of the kind was removed.
        document_id: Option<String>,
        count: u64,
        at: DateTime<Utc>,
    },
    OptionAdded {
        kind: TaxonomyKind,
        document_id: String,
        option_ids: Vec<String>,
        at: DateTime<Utc>,
    },
    OptionRemoved {
        kind: TaxonomyKind,
        document_id: String,
        option_id: String,
        at: DateTime<Utc>,
    },
}

impl AdminEvent {
    /// Dot-separated event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginSucceeded { .. } => "session.login.success",
            Self::LoginFailed { .. } => "session.login.failed",
            Self::LoggedOut { .. } => "session.logout",
            Self::EmployeeRegistered { .. } => "employee.registered",
            Self::EmployeeStatusChanged { .. } => "employee.status_changed",
            Self::RoleCreated { .. } => "role.created",
            Self::RoleUpdated { .. } => "role.updated",
            Self::RoleDeleted { .. } => "role.deleted",
            Self::TaxonomyCreated { .. } => "taxonomy.created",
            Self::TaxonomyUpdated { .. } => "taxonomy.updated",
            Self::TaxonomyDeleted { .. } => "taxonomy.deleted",
            Self::OptionAdded { .. } => "taxonomy.option.added",
            Self::OptionRemoved { .. } => "taxonomy.option.removed",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::LoginSucceeded { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::LoggedOut { at, .. }
            | Self::EmployeeRegistered { at, .. }
            | Self::EmployeeStatusChanged { at, .. }
            | Self::RoleCreated { at, .. }
            | Self::RoleUpdated { at, .. }
            | Self::RoleDeleted { at, .. }
            | Self::TaxonomyCreated { at, .. }
            | Self::TaxonomyUpdated { at, .. }
            | Self::TaxonomyDeleted { at, .. }
            | Self::OptionAdded { at, .. }
            | Self::OptionRemoved { at, .. } => *at,
        }
    }
}
