use super::{check_ids, not_found};
use crate::taxonomy::{TaxonomyDocument, TaxonomyKind};
use crate::{AdminError, TaxonomyRepository};

/// All documents of a kind, optionally narrowed by a case-insensitive
/// search over title, description and option labels.
pub struct ListTaxonomyAction<T: TaxonomyRepository> {
    taxonomy_repository: T,
    kind: TaxonomyKind,
}

impl<T: TaxonomyRepository> ListTaxonomyAction<T> {
    pub fn new(taxonomy_repository: T, kind: TaxonomyKind) -> Self {
        Self {
            taxonomy_repository,
            kind,
        }
    }

    pub async fn execute(&self, search: Option<&str>) -> Result<Vec<TaxonomyDocument>, AdminError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        self.taxonomy_repository.find_documents(self.kind, search).await
    }
}

pub struct GetTaxonomyAction<T: TaxonomyRepository> {
    taxonomy_repository: T,
    kind: TaxonomyKind,
}

impl<T: TaxonomyRepository> GetTaxonomyAction<T> {
    pub fn new(taxonomy_repository: T, kind: TaxonomyKind) -> Self {
        Self {
            taxonomy_repository,
            kind,
        }
    }

    pub async fn execute(&self, id: &str) -> Result<TaxonomyDocument, AdminError> {
        check_ids(&[id])?;

        self.taxonomy_repository
            .find_document(self.kind, id)
            .await?
            .ok_or_else(|| not_found(self.kind))
    }
}
