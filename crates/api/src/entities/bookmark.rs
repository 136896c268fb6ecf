use chrono::{DateTime, Utc};
use db::models::Bookmark as DbBookmark;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub id: i32,
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<DbBookmark> for Bookmark {
    fn from(bookmark: DbBookmark) -> Self {
        Bookmark {
            id: bookmark.id,
            url: bookmark.url,
            title: bookmark.title,
            description: bookmark.description,
            archived: bookmark.archived,
            created_at: bookmark.created_at,
            updated_at: bookmark.updated_at,
        }
    }
}
