use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection};
use metadata::MetadataFetcher;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Pool<AsyncPgConnection>,
    pub metadata: MetadataFetcher,
}
