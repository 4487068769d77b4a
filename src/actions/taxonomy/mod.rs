//! Per-kind taxonomy operations.
//!
//! Every action is bound to one [`TaxonomyKind`] at construction, so the
//! same code serves all eight onboarding taxonomies.

mod create;
mod delete;
mod query;
mod update;

pub use create::CreateTaxonomyAction;
pub use delete::{DeleteAllTaxonomyAction, DeleteOptionAction, DeleteTaxonomyAction};
pub use query::{GetTaxonomyAction, ListTaxonomyAction};
pub use update::{AddOptionAction, UpdateTaxonomyAction};

use crate::taxonomy::input::INVALID_ID_MESSAGE;
use crate::taxonomy::TaxonomyKind;
use crate::validators::is_object_id;
use crate::AdminError;

fn check_ids(ids: &[&str]) -> Result<(), AdminError> {
    if ids.iter().all(|id| is_object_id(id)) {
        Ok(())
    } else {
        Err(AdminError::invalid("id", INVALID_ID_MESSAGE))
    }
}

fn not_found(kind: TaxonomyKind) -> AdminError {
    AdminError::NotFound(kind.not_found_message())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    use crate::taxonomy::{OptionInput, TaxonomyInput};

    pub fn input(value: Value) -> TaxonomyInput {
        serde_json::from_value(value).unwrap()
    }

    pub fn option(value: Value) -> OptionInput {
        serde_json::from_value(value).unwrap()
    }

    pub fn sexual_orientation() -> TaxonomyInput {
        input(json!({
            "title": "What is your sexual orientation?",
            "description": "Attraction to all genders",
            "options": [
                {
                    "label": "Bisexual",
                    "description": "Attracted to more than one gender identity",
                    "value": "bi"
                },
                {
                    "label": "Straight",
                    "description": "Attracted to people of the opposite gender",
                    "value": "straight"
                }
            ]
        }))
    }

    pub fn gender() -> TaxonomyInput {
        input(json!({
            "title": "How do you identify?",
            "options": [{"label": "Woman"}, {"label": "Man"}, {"label": "Non-binary"}]
        }))
    }
}
