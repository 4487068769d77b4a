use chrono::Utc;

use crate::events::{dispatch, AdminEvent};
use crate::taxonomy::{TaxonomyDocument, TaxonomyInput, TaxonomyKind};
use crate::{AdminError, FieldErrors, TaxonomyRepository};

/// Validates and stores one or more documents of a kind.
///
/// Every item is validated before anything is written. Errors of a batch
/// are keyed `[index].field`.
pub struct CreateTaxonomyAction<T: TaxonomyRepository> {
    taxonomy_repository: T,
    kind: TaxonomyKind,
}

impl<T: TaxonomyRepository> CreateTaxonomyAction<T> {
    pub fn new(taxonomy_repository: T, kind: TaxonomyKind) -> Self {
        Self {
            taxonomy_repository,
            kind,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_taxonomy", skip_all, fields(kind = %self.kind), err)
    )]
    pub async fn execute(&self, inputs: Vec<TaxonomyInput>) -> Result<Vec<TaxonomyDocument>, AdminError> {
        if inputs.is_empty() {
            return Err(AdminError::invalid("body", "At least one document is required"));
        }

        if self.kind.is_singleton() {
            if inputs.len() > 1 {
                return Err(AdminError::Conflict(format!(
                    "Only one {} document is allowed",
                    self.kind.module()
                )));
            }
            if self.taxonomy_repository.count_documents(self.kind).await? > 0 {
                return Err(AdminError::Conflict(format!(
                    "{} already exists",
                    self.kind.module()
                )));
            }
        }

        let batch = inputs.len() > 1;
        let mut errors = FieldErrors::new();
        let mut documents = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.into_iter().enumerate() {
            match input.validate(self.kind) {
                Ok(draft) => documents.push(TaxonomyDocument::from_draft(self.kind, draft)),
                Err(item_errors) if batch => errors.merge_prefixed(&format!("[{index}]."), item_errors),
                Err(item_errors) => errors.merge_prefixed("", item_errors),
            }
        }

        errors.into_result()?;

        let documents = self.taxonomy_repository.insert_documents(documents).await?;

        for document in &documents {
            dispatch(AdminEvent::TaxonomyCreated {
                kind: self.kind,
                document_id: document.id.clone(),
                at: Utc::now(),
            })
            .await;
        }

        Ok(documents)
    }
}
