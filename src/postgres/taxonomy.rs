use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use super::db_error;
use crate::taxonomy::{apply_mutation, DocumentMutation, TaxonomyDocument, TaxonomyKind};
use crate::{AdminError, TaxonomyRepository};

/// Documents are stored whole as JSONB next to their id and kind.
/// Mutations lock the row, apply the change in Rust and write it back.
#[derive(Clone)]
pub struct PostgresTaxonomyRepository {
    pool: PgPool,
}

impl PostgresTaxonomyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `%needle%` with LIKE wildcards escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl TaxonomyRepository for PostgresTaxonomyRepository {
    async fn insert_documents(
        &self,
        documents: Vec<TaxonomyDocument>,
    ) -> Result<Vec<TaxonomyDocument>, AdminError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        for document in &documents {
            sqlx::query(
                "INSERT INTO taxonomy_documents (id, kind, document, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&document.id)
            .bind(document.kind.slug())
            .bind(Json(document))
            .bind(document.created_at)
            .bind(document.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(documents)
    }

    async fn find_documents(
        &self,
        kind: TaxonomyKind,
        search: Option<&str>,
    ) -> Result<Vec<TaxonomyDocument>, AdminError> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let rows: Vec<Json<TaxonomyDocument>> = sqlx::query_scalar(
            "SELECT document FROM taxonomy_documents \
             WHERE kind = $1 AND ($2::TEXT IS NULL \
                OR document->>'title' ILIKE $2 \
                OR document->>'description' ILIKE $2 \
                OR EXISTS (SELECT 1 FROM jsonb_array_elements(document->'options') AS o \
                           WHERE o->>'label' ILIKE $2)) \
             ORDER BY seq",
        )
        .bind(kind.slug())
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    async fn find_document(
        &self,
        kind: TaxonomyKind,
        id: &str,
    ) -> Result<Option<TaxonomyDocument>, AdminError> {
        let row: Option<Json<TaxonomyDocument>> = sqlx::query_scalar(
            "SELECT document FROM taxonomy_documents WHERE kind = $1 AND id = $2",
        )
        .bind(kind.slug())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(|row| row.0))
    }

    async fn count_documents(&self, kind: TaxonomyKind) -> Result<u64, AdminError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM taxonomy_documents WHERE kind = $1")
            .bind(kind.slug())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count.unsigned_abs())
    }

    async fn update_document(
        &self,
        kind: TaxonomyKind,
        id: &str,
        mutation: &DocumentMutation,
    ) -> Result<Option<TaxonomyDocument>, AdminError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let row: Option<Json<TaxonomyDocument>> = sqlx::query_scalar(
            "SELECT document FROM taxonomy_documents WHERE kind = $1 AND id = $2 FOR UPDATE",
        )
        .bind(kind.slug())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;

        let Some(Json(mut document)) = row else {
            return Ok(None);
        };

        // dropping the transaction on error releases the lock unchanged
        apply_mutation(&mut document, mutation)?;

        sqlx::query("UPDATE taxonomy_documents SET document = $1, updated_at = $2 WHERE id = $3")
            .bind(Json(&document))
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(Some(document))
    }

    async fn delete_document(&self, kind: TaxonomyKind, id: &str) -> Result<bool, AdminError> {
        let result = sqlx::query("DELETE FROM taxonomy_documents WHERE kind = $1 AND id = $2")
            .bind(kind.slug())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_documents(&self, kind: TaxonomyKind) -> Result<u64, AdminError> {
        let result = sqlx::query("DELETE FROM taxonomy_documents WHERE kind = $1")
            .bind(kind.slug())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected())
    }
}
