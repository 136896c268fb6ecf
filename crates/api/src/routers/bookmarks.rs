use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use db::models::Bookmark as DbBookmark;
use serde::Deserialize;
use url::Url;
use web::{
    errors::{ApiError, AppError},
    AppState,
};

use crate::{
    common::bookmarks::{self, CreateOutcome},
    entities::Bookmark,
};

#[derive(Deserialize)]
pub struct CreateBody {
    url: Url,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    archived: bool,
}

pub async fn http_post_create(
    state: State<Arc<AppState>>,
    Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, AppError> {
    if !matches!(body.url.scheme(), "http" | "https") {
        return Ok(
            ApiError::unprocessable("URL scheme should be 'http' or 'https'").into_response(),
        );
    }

    let outcome = bookmarks::create(&state.db_pool, &state.metadata, &body.url).await?;
    Ok(created_response(outcome))
}

/// 201 with the new bookmark, or 409 naming the bookmark that already holds the url.
pub fn created_response(outcome: CreateOutcome) -> Response {
    match outcome {
        CreateOutcome::Created(bookmark) => {
            (StatusCode::CREATED, Json(Bookmark::from(bookmark))).into_response()
        }
        CreateOutcome::Conflict { existing_id } => ApiError::conflict(&format!(
            "URL already exists with bookmark ID {}",
            existing_id
        ))
        .into_response(),
    }
}

pub async fn http_get_list(
    state: State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookmarks = bookmarks::list(&state.db_pool, query.archived).await?;
    Ok(Json(
        bookmarks
            .into_iter()
            .map(Bookmark::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn http_patch_archive(
    state: State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let archived = bookmarks::archive(&state.db_pool, id).await?;
    Ok(archived_response(id, archived))
}

pub fn archived_response(id: i32, archived: Option<DbBookmark>) -> Response {
    match archived {
        Some(bookmark) => Json(Bookmark::from(bookmark)).into_response(),
        None => ApiError::not_found(&format!("Bookmark with ID {} not found", id)).into_response(),
    }
}

pub fn bookmarks() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookmarks", get(http_get_list).post(http_post_create))
        .route("/bookmarks/:id/archive", patch(http_patch_archive))
}
