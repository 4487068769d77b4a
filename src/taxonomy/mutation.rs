use chrono::Utc;

use super::{TaxonomyDocument, TaxonomyOption};
use crate::AdminError;

/// A validated change to one stored document.
///
/// Storage backends load the document under a write lock (or row lock),
/// call [`apply_mutation`] and write it back.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentMutation {
    /// Top-level patch; `None` leaves a field untouched and
    /// `description: Some(None)` clears it.
    SetFields {
        title: Option<String>,
        description: Option<Option<String>>,
        options: Option<Vec<TaxonomyOption>>,
    },
    /// Patch of one existing option.
    SetOption {
        option_id: String,
        label: Option<String>,
        description: Option<Option<String>>,
        value: Option<String>,
    },
    PushOptions(Vec<TaxonomyOption>),
    PullOption(String),
}

fn option_not_found() -> AdminError {
    AdminError::NotFound("Option not found".to_owned())
}

/// Applies `mutation` in place. A missing option is `NotFound` and leaves
/// the document unchanged.
pub fn apply_mutation(
    doc: &mut TaxonomyDocument,
    mutation: &DocumentMutation,
) -> Result<(), AdminError> {
    match mutation {
        DocumentMutation::SetFields {
            title,
            description,
            options,
        } => {
            if let Some(title) = title {
                title.clone_into(&mut doc.title);
            }
            if let Some(description) = description {
                doc.description.clone_from(description);
            }
            if let Some(options) = options {
                doc.options.clone_from(options);
            }
        }
        DocumentMutation::SetOption {
            option_id,
            label,
            description,
            value,
        } => {
            let option = doc
                .options
                .iter_mut()
                .find(|o| &o.id == option_id)
                .ok_or_else(option_not_found)?;

            if let Some(label) = label {
                label.clone_into(&mut option.label);
            }
            if let Some(description) = description {
                option.description.clone_from(description);
            }
            if let Some(value) = value {
                option.value = Some(value.clone());
            }
        }
        DocumentMutation::PushOptions(options) => {
            doc.options.extend(options.iter().cloned());
        }
        DocumentMutation::PullOption(option_id) => {
            let before = doc.options.len();
            doc.options.retain(|o| &o.id != option_id);
            if doc.options.len() == before {
                return Err(option_not_found());
            }
        }
    }

    doc.updated_at = Utc::now();
    Ok(())
}
