use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use chrono::Utc;

use crate::{
    models::{Bookmark, NewBookmark, NewPocketLink, PocketLink},
    store::{BookmarkStore, PocketLinkListing, PocketLinkStore},
};

/// Bookmarks kept in a vector, with the same url uniqueness as the table.
#[derive(Debug, Default)]
pub struct MemoryBookmarks {
    rows: Mutex<Vec<Bookmark>>,
}

impl MemoryBookmarks {
    pub fn all(&self) -> Vec<Bookmark> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookmarkStore for MemoryBookmarks {
    async fn by_url(&self, url: &str) -> anyhow::Result<Option<Bookmark>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.url == url).cloned())
    }

    async fn insert(&self, bookmark: &NewBookmark) -> anyhow::Result<Option<Bookmark>> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|row| row.url == bookmark.url) {
            return Ok(None);
        }

        let created = Bookmark {
            id: rows.len() as i32 + 1,
            url: bookmark.url.clone(),
            title: bookmark.title.clone(),
            description: bookmark.description.clone(),
            archived: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        rows.push(created.clone());
        Ok(Some(created))
    }

    async fn list(&self, archived: bool) -> anyhow::Result<Vec<Bookmark>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|row| row.archived == archived)
            .cloned()
            .collect())
    }

    async fn archive(&self, id: i32) -> anyhow::Result<Option<Bookmark>> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.archived = true;
                row.updated_at = Some(Utc::now());
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }
}

/// Committed Pocket links plus counters for the importer tests.
#[derive(Debug, Default)]
pub struct MemoryPocketLinks {
    pub rows: Vec<PocketLink>,
    /// Number of `insert_batch` calls, empty ones included.
    pub flushes: usize,
    pub lookups: usize,
    /// Makes the n-th flush (1-based) fail without writing anything.
    pub fail_on_flush: Option<usize>,
}

impl MemoryPocketLinks {
    pub fn urls(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.url.as_str()).collect()
    }
}

#[async_trait]
impl PocketLinkStore for MemoryPocketLinks {
    async fn url_exists(&mut self, url: &str) -> anyhow::Result<bool> {
        self.lookups += 1;
        Ok(self.rows.iter().any(|row| row.url == url))
    }

    async fn insert_batch(&mut self, links: &[NewPocketLink]) -> anyhow::Result<usize> {
        self.flushes += 1;
        if self.fail_on_flush == Some(self.flushes) {
            bail!("connection reset during flush {}", self.flushes);
        }

        let mut written = 0;
        for link in links {
            if self.rows.iter().any(|row| row.url == link.url) {
                continue;
            }
            self.rows.push(PocketLink {
                id: self.rows.len() as i32 + 1,
                title: link.title.clone(),
                url: link.url.clone(),
                time_added: link.time_added,
                tags: link.tags.clone(),
                status: link.status.clone(),
                created_at: Utc::now(),
            });
            written += 1;
        }
        Ok(written)
    }
}

#[async_trait]
impl PocketLinkListing for MemoryPocketLinks {
    async fn list(&self, status: Option<&str>) -> anyhow::Result<Vec<PocketLink>> {
        let mut links = self
            .rows
            .iter()
            .filter(|row| status.map_or(true, |status| row.status == status))
            .cloned()
            .collect::<Vec<_>>();
        links.sort_by(|a, b| b.time_added.cmp(&a.time_added).then(b.id.cmp(&a.id)));
        Ok(links)
    }
}
