use chrono::Utc;

use super::{check_ids, not_found};
use crate::events::{dispatch, AdminEvent};
use crate::taxonomy::{
    validate_new_options, DocumentMutation, OptionInput, TaxonomyDocument, TaxonomyKind,
    TaxonomyPatch,
};
use crate::{AdminError, TaxonomyRepository};

/// Applies either a top-level patch or a single-option patch.
///
/// An `optionId` that matches no option is `NotFound`; options are only
/// ever appended through [`AddOptionAction`].
pub struct UpdateTaxonomyAction<T: TaxonomyRepository> {
    taxonomy_repository: T,
    kind: TaxonomyKind,
}

impl<T: TaxonomyRepository> UpdateTaxonomyAction<T> {
    pub fn new(taxonomy_repository: T, kind: TaxonomyKind) -> Self {
        Self {
            taxonomy_repository,
            kind,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_taxonomy", skip_all, fields(kind = %self.kind), err)
    )]
    pub async fn execute(&self, id: &str, patch: TaxonomyPatch) -> Result<TaxonomyDocument, AdminError> {
        check_ids(&[id])?;
        let mutation = patch.into_mutation(self.kind)?;

        let document = self
            .taxonomy_repository
            .update_document(self.kind, id, &mutation)
            .await?
            .ok_or_else(|| not_found(self.kind))?;

        dispatch(AdminEvent::TaxonomyUpdated {
            kind: self.kind,
            document_id: document.id.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(document)
    }
}

/// Appends options with freshly generated ids.
pub struct AddOptionAction<T: TaxonomyRepository> {
    taxonomy_repository: T,
    kind: TaxonomyKind,
}

impl<T: TaxonomyRepository> AddOptionAction<T> {
    pub fn new(taxonomy_repository: T, kind: TaxonomyKind) -> Self {
        Self {
            taxonomy_repository,
            kind,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "add_taxonomy_option", skip_all, fields(kind = %self.kind), err)
    )]
    pub async fn execute(&self, id: &str, inputs: Vec<OptionInput>) -> Result<TaxonomyDocument, AdminError> {
        check_ids(&[id])?;
        let options = validate_new_options(self.kind, inputs).map_err(AdminError::Validation)?;
        let option_ids = options.iter().map(|o| o.id.clone()).collect();

        let document = self
            .taxonomy_repository
            .update_document(self.kind, id, &DocumentMutation::PushOptions(options))
            .await?
            .ok_or_else(|| not_found(self.kind))?;

        dispatch(AdminEvent::OptionAdded {
            kind: self.kind,
            document_id: document.id.clone(),
            option_ids,
            at: Utc::now(),
        })
        .await;

        Ok(document)
    }
}
