#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::taxonomy::{apply_mutation, DocumentMutation, TaxonomyDocument, TaxonomyKind};
use crate::AdminError;

use super::taxonomy::TaxonomyRepository;

/// Keeps documents in insertion order; every mutation runs under the
/// write lock.
#[derive(Clone, Default)]
pub struct MockTaxonomyRepository {
    pub documents: Arc<RwLock<Vec<TaxonomyDocument>>>,
}

impl MockTaxonomyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaxonomyRepository for MockTaxonomyRepository {
    async fn insert_documents(
        &self,
        documents: Vec<TaxonomyDocument>,
    ) -> Result<Vec<TaxonomyDocument>, AdminError> {
        let mut stored = self.documents.write().unwrap();
        stored.extend(documents.iter().cloned());
        Ok(documents)
    }

    async fn find_documents(
        &self,
        kind: TaxonomyKind,
        search: Option<&str>,
    ) -> Result<Vec<TaxonomyDocument>, AdminError> {
        let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        let stored = self.documents.read().unwrap();
        Ok(stored
            .iter()
            .filter(|d| d.kind == kind && d.matches(&needle))
            .cloned()
            .collect())
    }

    async fn find_document(
        &self,
        kind: TaxonomyKind,
        id: &str,
    ) -> Result<Option<TaxonomyDocument>, AdminError> {
        let stored = self.documents.read().unwrap();
        Ok(stored.iter().find(|d| d.kind == kind && d.id == id).cloned())
    }

    async fn count_documents(&self, kind: TaxonomyKind) -> Result<u64, AdminError> {
        let stored = self.documents.read().unwrap();
        Ok(stored.iter().filter(|d| d.kind == kind).count() as u64)
    }

    async fn update_document(
        &self,
        kind: TaxonomyKind,
        id: &str,
        mutation: &DocumentMutation,
    ) -> Result<Option<TaxonomyDocument>, AdminError> {
        let mut stored = self.documents.write().unwrap();
        let Some(doc) = stored.iter_mut().find(|d| d.kind == kind && d.id == id) else {
            return Ok(None);
        };

        let mut updated = doc.clone();
        apply_mutation(&mut updated, mutation)?;
        *doc = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_document(&self, kind: TaxonomyKind, id: &str) -> Result<bool, AdminError> {
        let mut stored = self.documents.write().unwrap();
        let before = stored.len();
        stored.retain(|d| !(d.kind == kind && d.id == id));
        Ok(stored.len() < before)
    }

    async fn delete_all_documents(&self, kind: TaxonomyKind) -> Result<u64, AdminError> {
        let mut stored = self.documents.write().unwrap();
        let before = stored.len();
        stored.retain(|d| d.kind != kind);
        Ok((before - stored.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_kinds_are_isolated() {
        let repo = MockTaxonomyRepository::new();
        let gender = TaxonomyDocument::mock(TaxonomyKind::Gender, "Gender", &["Woman"]);
        let looking = TaxonomyDocument::mock(TaxonomyKind::LookingFor, "Looking for", &["Friends"]);
        repo.insert_documents(vec![gender.clone(), looking]).await.unwrap();

        assert_eq!(repo.count_documents(TaxonomyKind::Gender).await.unwrap(), 1);
        assert!(repo
            .find_document(TaxonomyKind::LookingFor, &gender.id)
            .await
            .unwrap()
            .is_none());
        assert!(!repo
            .delete_document(TaxonomyKind::LookingFor, &gender.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_search_and_order() {
        let repo = MockTaxonomyRepository::new();
        let first = TaxonomyDocument::mock(TaxonomyKind::InterestedIn, "Interested in", &["Women"]);
        let second = TaxonomyDocument::mock(TaxonomyKind::InterestedIn, "Dating goals", &["Men"]);
        repo.insert_documents(vec![first.clone(), second.clone()]).await.unwrap();

        let all = repo.find_documents(TaxonomyKind::InterestedIn, None).await.unwrap();
        assert_eq!(all, vec![first.clone(), second.clone()]);

        let hits = repo
            .find_documents(TaxonomyKind::InterestedIn, Some("  WOMEN "))
            .await
            .unwrap();
        assert_eq!(hits, vec![first]);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_document() {
        let repo = MockTaxonomyRepository::new();
        let doc = TaxonomyDocument::mock(TaxonomyKind::Gender, "Gender", &["Woman"]);
        repo.insert_documents(vec![doc.clone()]).await.unwrap();

        let result = repo
            .update_document(
                TaxonomyKind::Gender,
                &doc.id,
                &DocumentMutation::PullOption("65f1a2b3c4d5e6f708192a3b".to_owned()),
            )
            .await;
        assert!(matches!(result, Err(AdminError::NotFound(_))));

        let stored = repo.find_document(TaxonomyKind::Gender, &doc.id).await.unwrap();
        assert_eq!(stored, Some(doc));
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let repo = MockTaxonomyRepository::new();
        let result = repo
            .update_document(
                TaxonomyKind::Gender,
                "65f1a2b3c4d5e6f708192a3b",
                &DocumentMutation::PushOptions(Vec::new()),
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
