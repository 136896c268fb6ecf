use diesel_async::AsyncPgConnection;
use lazy_static::lazy_static;

lazy_static! {
    static ref MIGRATIONS: diesel_async_migrations::EmbeddedMigrations =
        diesel_async_migrations::embed_migrations!();
}

/// Creates the `bookmarks` and `pocket_links` tables if they are missing.
pub async fn run_migrations(conn: &mut AsyncPgConnection) -> anyhow::Result<()> {
    MIGRATIONS.run_pending_migrations(conn).await?;
    log::debug!("Database schema is up to date");
    Ok(())
}
