use async_trait::async_trait;

use crate::taxonomy::{DocumentMutation, TaxonomyDocument, TaxonomyKind};
use crate::AdminError;

#[async_trait]
pub trait TaxonomyRepository {
    /// Stores all documents or none.
    async fn insert_documents(
        &self,
        documents: Vec<TaxonomyDocument>,
    ) -> Result<Vec<TaxonomyDocument>, AdminError>;

    /// Documents of `kind` in insertion order, optionally filtered by a
    /// case-insensitive search over title, description and option labels.
    async fn find_documents(
        &self,
        kind: TaxonomyKind,
        search: Option<&str>,
    ) -> Result<Vec<TaxonomyDocument>, AdminError>;

    async fn find_document(
        &self,
        kind: TaxonomyKind,
        id: &str,
    ) -> Result<Option<TaxonomyDocument>, AdminError>;

    async fn count_documents(&self, kind: TaxonomyKind) -> Result<u64, AdminError>;

    /// Applies `mutation` atomically. `Ok(None)` when the document does not
    /// exist; errors from the mutation itself leave the document unchanged.
    async fn update_document(
        &self,
        kind: TaxonomyKind,
        id: &str,
        mutation: &DocumentMutation,
    ) -> Result<Option<TaxonomyDocument>, AdminError>;

    async fn delete_document(&self, kind: TaxonomyKind, id: &str) -> Result<bool, AdminError>;

    /// Number of documents removed.
    async fn delete_all_documents(&self, kind: TaxonomyKind) -> Result<u64, AdminError>;
}
