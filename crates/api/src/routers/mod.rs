pub mod bookmarks;
pub mod pocket_links;

use std::sync::Arc;

use axum::Router;
use web::AppState;

pub fn api() -> Router<Arc<AppState>> {
    Router::new()
        .merge(bookmarks::bookmarks())
        .merge(pocket_links::pocket_links())
}
