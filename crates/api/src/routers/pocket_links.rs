use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use web::{errors::AppError, AppState};

use crate::{
    common::pocket_links::{self, DEFAULT_STATUS},
    entities::PocketLink,
};

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "status_filter_default")]
    status_filter: String,
}

fn status_filter_default() -> String {
    String::from(DEFAULT_STATUS)
}

pub async fn http_get_list(
    state: State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let links = pocket_links::list(&state.db_pool, &query.status_filter).await?;
    Ok(Json(
        links.into_iter().map(PocketLink::from).collect::<Vec<_>>(),
    ))
}

pub fn pocket_links() -> Router<Arc<AppState>> {
    Router::new().route("/pocket-links", get(http_get_list))
}

#[cfg(test)]
mod tests {
    use axum::{extract::Query, http::Uri};

    use super::ListQuery;

    fn parse(uri: &str) -> ListQuery {
        let uri: Uri = uri.parse().unwrap();
        Query::<ListQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn status_filter_defaults_to_unread() {
        assert_eq!(parse("/pocket-links").status_filter, "unread");
        assert_eq!(parse("/pocket-links?status_filter=all").status_filter, "all");
    }
}
