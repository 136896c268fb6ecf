use chrono::{DateTime, Utc};
use db::models::PocketLink as DbPocketLink;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PocketLink {
    pub id: i32,
    pub title: Option<String>,
    pub url: String,
    /// Unix timestamp from the Pocket export
    pub time_added: i64,
    pub tags: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbPocketLink> for PocketLink {
    fn from(link: DbPocketLink) -> Self {
        PocketLink {
            id: link.id,
            title: link.title,
            url: link.url,
            time_added: link.time_added,
            tags: link.tags,
            status: link.status,
            created_at: link.created_at,
        }
    }
}
