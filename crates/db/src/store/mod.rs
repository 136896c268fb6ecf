//! Store seams used by the bookmark service and the Pocket importer.
//!
//! The Postgres implementations delegate to the model methods; the
//! in-memory ones (feature `testing`) back the unit tests of dependent crates.

#[cfg(any(test, feature = "testing"))]
pub mod memory;

use async_trait::async_trait;
use diesel_async::{
    pooled_connection::deadpool::{Object, Pool},
    AsyncPgConnection,
};

use crate::models::{Bookmark, NewBookmark, NewPocketLink, PocketLink};

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn by_url(&self, url: &str) -> anyhow::Result<Option<Bookmark>>;

    /// `None` when the url is already taken.
    async fn insert(&self, bookmark: &NewBookmark) -> anyhow::Result<Option<Bookmark>>;

    async fn list(&self, archived: bool) -> anyhow::Result<Vec<Bookmark>>;

    async fn archive(&self, id: i32) -> anyhow::Result<Option<Bookmark>>;
}

#[async_trait]
impl BookmarkStore for Pool<AsyncPgConnection> {
    async fn by_url(&self, url: &str) -> anyhow::Result<Option<Bookmark>> {
        Bookmark::by_url(url, self).await
    }

    async fn insert(&self, bookmark: &NewBookmark) -> anyhow::Result<Option<Bookmark>> {
        Bookmark::create(bookmark, self).await
    }

    async fn list(&self, archived: bool) -> anyhow::Result<Vec<Bookmark>> {
        Bookmark::list(archived, self).await
    }

    async fn archive(&self, id: i32) -> anyhow::Result<Option<Bookmark>> {
        Bookmark::archive(id, self).await
    }
}

#[async_trait]
pub trait PocketLinkListing: Send + Sync {
    /// Newest `time_added` first, ties broken by newest id. `None` lists every status.
    async fn list(&self, status: Option<&str>) -> anyhow::Result<Vec<PocketLink>>;
}

#[async_trait]
impl PocketLinkListing for Pool<AsyncPgConnection> {
    async fn list(&self, status: Option<&str>) -> anyhow::Result<Vec<PocketLink>> {
        PocketLink::list(status, self).await
    }
}

/// Session used by one import run.
#[async_trait]
pub trait PocketLinkStore: Send {
    async fn url_exists(&mut self, url: &str) -> anyhow::Result<bool>;

    /// Commits the batch; returns how many rows were written.
    async fn insert_batch(&mut self, links: &[NewPocketLink]) -> anyhow::Result<usize>;
}

/// Holds a single pooled connection for the lifetime of an import run. The
/// connection goes back to the pool when this is dropped.
pub struct PgPocketLinks {
    conn: Object<AsyncPgConnection>,
}

impl PgPocketLinks {
    pub async fn acquire(db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<Self> {
        Ok(PgPocketLinks {
            conn: db_pool.get().await?,
        })
    }

    pub fn connection(&mut self) -> &mut AsyncPgConnection {
        &mut self.conn
    }
}

#[async_trait]
impl PocketLinkStore for PgPocketLinks {
    async fn url_exists(&mut self, url: &str) -> anyhow::Result<bool> {
        PocketLink::url_exists(url, &mut self.conn).await
    }

    async fn insert_batch(&mut self, links: &[NewPocketLink]) -> anyhow::Result<usize> {
        PocketLink::insert_batch(links, &mut self.conn).await
    }
}
