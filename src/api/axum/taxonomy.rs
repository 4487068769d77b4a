//! HTTP handlers shared by every taxonomy kind.
//!
//! The kind comes from an `Extension` set on each kind's nested router;
//! capability checks use the kind's module name.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use super::error::AppError;
use super::middleware::{Authenticated, JsonBody};
use super::routes::AppState;
use crate::access::AccessAction;
use crate::actions::{
    AddOptionAction, CreateTaxonomyAction, DeleteAllTaxonomyAction, DeleteOptionAction,
    DeleteTaxonomyAction, GetTaxonomyAction, ListTaxonomyAction, UpdateTaxonomyAction,
};
use crate::api::{ApiResponse, DeletedCount, MessageResponse, OneOrMany, SearchQuery};
use crate::taxonomy::{OptionInput, TaxonomyInput, TaxonomyKind, TaxonomyPatch};
use crate::TaxonomyRepository;

/// POST /api/{kind}/create
///
/// One object in, one document out; an array in, an array out.
pub async fn create<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    Extension(kind): Extension<TaxonomyKind>,
    auth: Authenticated,
    JsonBody(body): JsonBody<OneOrMany<TaxonomyInput>>,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    auth.require(kind.module(), AccessAction::Add)?;

    let many = body.is_many();
    let mut documents = CreateTaxonomyAction::new(state.taxonomy_repo, kind)
        .execute(body.into_vec())
        .await?;

    let message = format!("{kind} created successfully");
    let response = if many {
        Json(ApiResponse::with_message(message, documents)).into_response()
    } else {
        Json(ApiResponse::with_message(message, documents.remove(0))).into_response()
    };

    Ok((StatusCode::CREATED, response).into_response())
}

/// GET /api/{kind}/get-all?search=
pub async fn list<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    Extension(kind): Extension<TaxonomyKind>,
    auth: Authenticated,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    auth.require(kind.module(), AccessAction::View)?;

    let documents = ListTaxonomyAction::new(state.taxonomy_repo, kind)
        .execute(query.search.as_deref())
        .await?;

    if documents.is_empty() {
        return Ok(Json(ApiResponse::with_message("No data available", documents)).into_response());
    }
    Ok(Json(ApiResponse::data(documents)).into_response())
}

/// GET /api/{kind}/{id}
pub async fn get_one<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    Extension(kind): Extension<TaxonomyKind>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    auth.require(kind.module(), AccessAction::View)?;

    let document = GetTaxonomyAction::new(state.taxonomy_repo, kind)
        .execute(&id)
        .await?;
    Ok(Json(ApiResponse::data(document)).into_response())
}

/// PATCH /api/{kind}/{id}
pub async fn update<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    Extension(kind): Extension<TaxonomyKind>,
    auth: Authenticated,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<TaxonomyPatch>,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    auth.require(kind.module(), AccessAction::Update)?;

    let document = UpdateTaxonomyAction::new(state.taxonomy_repo, kind)
        .execute(&id, patch)
        .await?;
    Ok(Json(ApiResponse::with_message(format!("{kind} updated successfully"), document)).into_response())
}

/// PATCH /api/{kind}/{id}/add-option
pub async fn add_option<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    Extension(kind): Extension<TaxonomyKind>,
    auth: Authenticated,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<OneOrMany<OptionInput>>,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    auth.require(kind.module(), AccessAction::Add)?;

    let document = AddOptionAction::new(state.taxonomy_repo, kind)
        .execute(&id, body.into_vec())
        .await?;
    Ok(Json(ApiResponse::with_message("Option added successfully", document)).into_response())
}

/// DELETE /api/{kind}/{id}/delete-option/{option_id}
pub async fn delete_option<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    Extension(kind): Extension<TaxonomyKind>,
    auth: Authenticated,
    Path((id, option_id)): Path<(String, String)>,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    auth.require(kind.module(), AccessAction::Delete)?;

    let document = DeleteOptionAction::new(state.taxonomy_repo, kind)
        .execute(&id, &option_id)
        .await?;
    Ok(Json(ApiResponse::with_message("Option deleted successfully", document)).into_response())
}

/// DELETE /api/{kind}/{id}
pub async fn delete_one<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    Extension(kind): Extension<TaxonomyKind>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    auth.require(kind.module(), AccessAction::Delete)?;

    DeleteTaxonomyAction::new(state.taxonomy_repo, kind)
        .execute(&id)
        .await?;
    Ok(Json(MessageResponse::message(format!("{kind} deleted successfully"))).into_response())
}

/// DELETE /api/{kind}/delete
pub async fn delete_all<E, R, T>(
    State(state): State<AppState<E, R, T>>,
    Extension(kind): Extension<TaxonomyKind>,
    auth: Authenticated,
) -> Result<Response, AppError>
where
    E: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    T: TaxonomyRepository + Clone + Send + Sync + 'static,
{
    auth.require(kind.module(), AccessAction::Delete)?;

    let deleted_count = DeleteAllTaxonomyAction::new(state.taxonomy_repo, kind)
        .execute()
        .await?;
    Ok(Json(ApiResponse::with_message(
        format!("{kind} deleted successfully"),
        DeletedCount { deleted_count },
    ))
    .into_response())
}
