use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TaxonomyKind;
use crate::crypto::generate_object_id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionPoint {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyOption {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<OptionPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub kind: TaxonomyKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<TaxonomyOption>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated content of a document that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyDraft {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<TaxonomyOption>,
}

impl TaxonomyDocument {
    pub fn from_draft(kind: TaxonomyKind, draft: TaxonomyDraft) -> Self {
        let now = Utc::now();
        Self {
            id: generate_object_id(),
            kind,
            title: draft.title,
            description: draft.description,
            options: draft.options,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn option(&self, option_id: &str) -> Option<&TaxonomyOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Case-insensitive substring match over title, description and option
    /// labels. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self
                .options
                .iter()
                .any(|o| o.label.to_lowercase().contains(needle))
    }
}

#[cfg(any(test, feature = "mocks"))]
impl TaxonomyDocument {
    pub fn mock(kind: TaxonomyKind, title: &str, labels: &[&str]) -> Self {
        let options = labels
            .iter()
            .map(|label| TaxonomyOption {
                id: generate_object_id(),
                label: (*label).to_owned(),
                description: None,
                value: None,
                points: Vec::new(),
            })
            .collect();

        Self::from_draft(
            kind,
            TaxonomyDraft {
                title: title.to_owned(),
                description: None,
                options,
            },
        )
    }
}
