use chrono::{DateTime, Utc};
use diesel::{insert_into, prelude::*, result::Error::NotFound, update};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::schema::bookmarks;

/// Stored when a page offers no description of its own.
pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Queryable, Identifiable, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = bookmarks)]
pub struct Bookmark {
    pub id: i32,
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = bookmarks)]
pub struct NewBookmark {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl NewBookmark {
    /// Missing descriptions are replaced with [`NO_DESCRIPTION`].
    pub fn new(url: String, title: Option<String>, description: Option<String>) -> Self {
        NewBookmark {
            url,
            title,
            description: Some(description.unwrap_or_else(|| NO_DESCRIPTION.to_string())),
        }
    }
}

impl Bookmark {
    pub async fn by_url(
        url: &str,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let bookmark = bookmarks::table
            .filter(bookmarks::url.eq(url))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match bookmark {
            Ok(bookmark) => Ok(Some(bookmark)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn list(
        archived: bool,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        Ok(bookmarks::table
            .filter(bookmarks::archived.eq(archived))
            .order(bookmarks::id.asc())
            .load::<Self>(&mut db_pool.get().await?)
            .await?)
    }

    /// Returns `None` when a bookmark with the same url already exists.
    pub async fn create(
        bookmark: &NewBookmark,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let created = insert_into(bookmarks::table)
            .values(bookmark)
            .on_conflict(bookmarks::url)
            .do_nothing()
            .get_result::<Self>(&mut db_pool.get().await?)
            .await;
        match created {
            Ok(bookmark) => Ok(Some(bookmark)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Sets `archived` and bumps `updated_at`, even if the bookmark was already archived.
    pub async fn archive(
        id: i32,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let archived = update(bookmarks::table.find(id))
            .set((
                bookmarks::archived.eq(true),
                bookmarks::updated_at.eq(Some(Utc::now())),
            ))
            .get_result::<Self>(&mut db_pool.get().await?)
            .await;
        match archived {
            Ok(bookmark) => Ok(Some(bookmark)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewBookmark, NO_DESCRIPTION};

    #[test]
    fn placeholder_description() {
        let bookmark = NewBookmark::new("https://example.com/".to_string(), None, None);
        assert_eq!(bookmark.description.as_deref(), Some(NO_DESCRIPTION));

        let bookmark = NewBookmark::new(
            "https://example.com/".to_string(),
            Some("Example".to_string()),
            Some("desc".to_string()),
        );
        assert_eq!(bookmark.description.as_deref(), Some("desc"));
        assert_eq!(bookmark.title.as_deref(), Some("Example"));
    }
}
