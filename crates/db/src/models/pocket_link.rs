use chrono::{DateTime, Utc};
use diesel::{dsl::exists, insert_into, prelude::*, select};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::schema::pocket_links;

#[derive(Queryable, Identifiable, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = pocket_links)]
pub struct PocketLink {
    pub id: i32,
    pub title: Option<String>,
    pub url: String,
    pub time_added: i64,
    pub tags: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = pocket_links)]
pub struct NewPocketLink {
    pub title: Option<String>,
    pub url: String,
    pub time_added: i64,
    pub tags: Option<String>,
    pub status: String,
}

impl PocketLink {
    /// Newest first. `None` lists every status.
    pub async fn list(
        status: Option<&str>,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        let mut query = pocket_links::table.into_boxed();
        if let Some(status) = status {
            query = query.filter(pocket_links::status.eq(status.to_string()));
        }
        Ok(query
            .order((pocket_links::time_added.desc(), pocket_links::id.desc()))
            .load::<Self>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn url_exists(url: &str, conn: &mut AsyncPgConnection) -> anyhow::Result<bool> {
        Ok(
            select(exists(pocket_links::table.filter(pocket_links::url.eq(url))))
                .get_result::<bool>(conn)
                .await?,
        )
    }

    /// Inserts the whole batch in one statement. Rows whose url is already
    /// taken are dropped by the unique index; the count of rows actually
    /// written is returned.
    pub async fn insert_batch(
        links: &[NewPocketLink],
        conn: &mut AsyncPgConnection,
    ) -> anyhow::Result<usize> {
        if links.is_empty() {
            return Ok(0);
        }

        Ok(insert_into(pocket_links::table)
            .values(links)
            .on_conflict(pocket_links::url)
            .do_nothing()
            .execute(conn)
            .await?)
    }
}
