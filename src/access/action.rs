use std::fmt;

use serde::{Deserialize, Serialize};

/// An operation that can be granted on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessAction {
    Add,
    Update,
    Delete,
    View,
    Export,
}

impl AccessAction {
    pub const ALL: [AccessAction; 5] = [
        AccessAction::Add,
        AccessAction::Update,
        AccessAction::Delete,
        AccessAction::View,
        AccessAction::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::View => "View",
            Self::Export => "Export",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Add" => Some(Self::Add),
            "Update" => Some(Self::Update),
            "Delete" => Some(Self::Delete),
            "View" => Some(Self::View),
            "Export" => Some(Self::Export),
            _ => None,
        }
    }
}

impl fmt::Display for AccessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five grants for one module. All five keys are required when parsed,
/// so a partially specified module is rejected.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    #[serde(rename = "Add")]
    pub add: bool,
    #[serde(rename = "Update")]
    pub update: bool,
    #[serde(rename = "Delete")]
    pub delete: bool,
    #[serde(rename = "View")]
    pub view: bool,
    #[serde(rename = "Export")]
    pub export: bool,
}

impl ActionSet {
    pub const fn all() -> Self {
        Self {
            add: true,
            update: true,
            delete: true,
            view: true,
            export: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            add: false,
            update: false,
            delete: false,
            view: false,
            export: false,
        }
    }

    pub fn only(actions: &[AccessAction]) -> Self {
        let mut set = Self::none();
        for action in actions {
            set.set(*action, true);
        }
        set
    }

    pub fn allows(&self, action: AccessAction) -> bool {
        match action {
            AccessAction::Add => self.add,
            AccessAction::Update => self.update,
            AccessAction::Delete => self.delete,
            AccessAction::View => self.view,
            AccessAction::Export => self.export,
        }
    }

    pub fn set(&mut self, action: AccessAction, allowed: bool) {
        match action {
            AccessAction::Add => self.add = allowed,
            AccessAction::Update => self.update = allowed,
            AccessAction::Delete => self.delete = allowed,
            AccessAction::View => self.view = allowed,
            AccessAction::Export => self.export = allowed,
        }
    }

    pub fn granted(&self) -> impl Iterator<Item = AccessAction> + '_ {
        AccessAction::ALL.into_iter().filter(|a| self.allows(*a))
    }
}
