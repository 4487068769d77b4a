use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::all_modules;
use super::{AccessAction, ActionSet};

/// Per-module grants of a role.
///
/// Modules that are absent allow nothing.
///
/// ```
/// use backoffice::access::{AccessAction, ActionSet, CapabilityMatrix};
///
/// let matrix = CapabilityMatrix::builder()
///     .grant("Gender", ActionSet::only(&[AccessAction::View]))
///     .build();
///
/// assert!(matrix.allows("Gender", AccessAction::View));
/// assert!(!matrix.allows("Gender", AccessAction::Delete));
/// assert!(!matrix.allows("Lifestyle", AccessAction::View));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityMatrix(BTreeMap<String, ActionSet>);

impl CapabilityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CapabilityMatrixBuilder {
        CapabilityMatrixBuilder::new()
    }

    /// Every catalog module with every action.
    pub fn full() -> Self {
        Self(
            all_modules()
                .map(|m| (m.to_owned(), ActionSet::all()))
                .collect(),
        )
    }

    /// The legacy role shape: one action set shared by a list of modules.
    pub fn uniform<I, S>(modules: I, actions: ActionSet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(modules.into_iter().map(|m| (m.into(), actions)).collect())
    }

    pub fn grant(&mut self, module: impl Into<String>, actions: ActionSet) {
        self.0.insert(module.into(), actions);
    }

    pub fn revoke_module(&mut self, module: &str) {
        self.0.remove(module);
    }

    pub fn allows(&self, module: &str, action: AccessAction) -> bool {
        self.0.get(module).is_some_and(|set| set.allows(action))
    }

    pub fn actions_for(&self, module: &str) -> Option<&ActionSet> {
        self.0.get(module)
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Default)]
pub struct CapabilityMatrixBuilder {
    matrix: CapabilityMatrix,
}

impl CapabilityMatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn grant(mut self, module: impl Into<String>, actions: ActionSet) -> Self {
        self.matrix.grant(module, actions);
        self
    }

    pub fn build(self) -> CapabilityMatrix {
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::catalog;

    #[test]
    fn test_full_covers_catalog() {
        let matrix = CapabilityMatrix::full();
        assert_eq!(matrix.len(), catalog::all_modules().count());
        for module in catalog::all_modules() {
            for action in AccessAction::ALL {
                assert!(matrix.allows(module, action));
            }
        }
    }

    #[test]
    fn test_uniform_matches_legacy_shape() {
        let matrix = CapabilityMatrix::uniform(
            ["Gender", "Lifestyle"],
            ActionSet::only(&[AccessAction::View, AccessAction::Update]),
        );
        assert!(matrix.allows("Gender", AccessAction::Update));
        assert!(matrix.allows("Lifestyle", AccessAction::View));
        assert!(!matrix.allows("Lifestyle", AccessAction::Add));
        assert!(!matrix.allows("Looking For", AccessAction::View));
    }

    #[test]
    fn test_revoke_module() {
        let mut matrix = CapabilityMatrix::builder()
            .grant("Gender", ActionSet::all())
            .grant("Coupons", ActionSet::all())
            .build();
        matrix.revoke_module("Gender");
        assert!(!matrix.allows("Gender", AccessAction::View));
        assert_eq!(matrix.modules().collect::<Vec<_>>(), vec!["Coupons"]);
    }

    #[test]
    fn test_json_shape() {
        let matrix = CapabilityMatrix::builder()
            .grant("Gender", ActionSet::only(&[AccessAction::View]))
            .build();
        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Gender": {"Add": false, "Update": false, "Delete": false, "View": true, "Export": false}
            })
        );
        let parsed: CapabilityMatrix = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, matrix);
    }
}
