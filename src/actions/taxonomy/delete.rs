use chrono::Utc;

use super::{check_ids, not_found};
use crate::events::{dispatch, AdminEvent};
use crate::taxonomy::{DocumentMutation, TaxonomyDocument, TaxonomyKind};
use crate::{AdminError, TaxonomyRepository};

pub struct DeleteTaxonomyAction<T: TaxonomyRepository> {
    taxonomy_repository: T,
    kind: TaxonomyKind,
}

impl<T: TaxonomyRepository> DeleteTaxonomyAction<T> {
    pub fn new(taxonomy_repository: T, kind: TaxonomyKind) -> Self {
        Self {
            taxonomy_repository,
            kind,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_taxonomy", skip_all, fields(kind = %self.kind), err)
    )]
    pub async fn execute(&self, id: &str) -> Result<(), AdminError> {
        check_ids(&[id])?;

        if !self.taxonomy_repository.delete_document(self.kind, id).await? {
            return Err(not_found(self.kind));
        }

        dispatch(AdminEvent::TaxonomyDeleted {
            kind: self.kind,
            document_id: Some(id.to_owned()),
            count: 1,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}

/// Removes every document of a singleton kind.
pub struct DeleteAllTaxonomyAction<T: TaxonomyRepository> {
    taxonomy_repository: T,
    kind: TaxonomyKind,
}

impl<T: TaxonomyRepository> DeleteAllTaxonomyAction<T> {
    pub fn new(taxonomy_repository: T, kind: TaxonomyKind) -> Self {
        Self {
            taxonomy_repository,
            kind,
        }
    }

    /// Number of documents removed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_all_taxonomy", skip_all, fields(kind = %self.kind), err)
    )]
    pub async fn execute(&self) -> Result<u64, AdminError> {
        if !self.kind.is_singleton() {
            return Err(AdminError::Conflict(format!(
                "{} does not support deleting all documents",
                self.kind.module()
            )));
        }

        let count = self.taxonomy_repository.delete_all_documents(self.kind).await?;
        if count == 0 {
            return Err(not_found(self.kind));
        }

        dispatch(AdminEvent::TaxonomyDeleted {
            kind: self.kind,
            document_id: None,
            count,
            at: Utc::now(),
        })
        .await;

        Ok(count)
    }
}

/// Removes one option. Sibling options and document fields are untouched.
pub struct DeleteOptionAction<T: TaxonomyRepository> {
    taxonomy_repository: T,
    kind: TaxonomyKind,
}

impl<T: TaxonomyRepository> DeleteOptionAction<T> {
    pub fn new(taxonomy_repository: T, kind: TaxonomyKind) -> Self {
        Self {
            taxonomy_repository,
            kind,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_taxonomy_option", skip_all, fields(kind = %self.kind), err)
    )]
    pub async fn execute(&self, id: &str, option_id: &str) -> Result<TaxonomyDocument, AdminError> {
        check_ids(&[id, option_id])?;

        let document = self
            .taxonomy_repository
            .update_document(
                self.kind,
                id,
                &DocumentMutation::PullOption(option_id.to_owned()),
            )
            .await?
            .ok_or_else(|| not_found(self.kind))?;

        dispatch(AdminEvent::OptionRemoved {
            kind: self.kind,
            document_id: document.id.clone(),
            option_id: option_id.to_owned(),
            at: Utc::now(),
        })
        .await;

        Ok(document)
    }
}
