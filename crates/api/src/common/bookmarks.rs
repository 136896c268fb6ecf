use db::{
    models::{Bookmark, NewBookmark},
    store::BookmarkStore,
};
use metadata::MetadataFetcher;
use url::Url;

#[derive(Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Bookmark),
    Conflict { existing_id: i32 },
}

/// Saves `url` unless it is already bookmarked. Metadata is only fetched for
/// new urls; a failed fetch still creates the bookmark.
pub async fn create<S>(
    store: &S,
    fetcher: &MetadataFetcher,
    url: &Url,
) -> anyhow::Result<CreateOutcome>
where
    S: BookmarkStore + ?Sized,
{
    let url = url.as_str();

    if let Some(existing) = store.by_url(url).await? {
        return Ok(CreateOutcome::Conflict {
            existing_id: existing.id,
        });
    }

    let metadata = fetcher.fetch(url).await.into_metadata();
    let bookmark = NewBookmark::new(url.to_string(), metadata.title, metadata.description);

    match store.insert(&bookmark).await? {
        Some(created) => {
            log::info!("Bookmarked {} as {}", created.url, created.id);
            Ok(CreateOutcome::Created(created))
        }
        None => {
            // Lost a race against a concurrent create of the same url
            let existing = store
                .by_url(url)
                .await?
                .ok_or_else(|| anyhow::anyhow!("bookmark for {} vanished after conflict", url))?;
            Ok(CreateOutcome::Conflict {
                existing_id: existing.id,
            })
        }
    }
}

pub async fn list<S>(store: &S, archived: bool) -> anyhow::Result<Vec<Bookmark>>
where
    S: BookmarkStore + ?Sized,
{
    store.list(archived).await
}

/// `None` when no bookmark has this id.
pub async fn archive<S>(store: &S, id: i32) -> anyhow::Result<Option<Bookmark>>
where
    S: BookmarkStore + ?Sized,
{
    store.archive(id).await
}

#[cfg(test)]
mod tests {
    use db::{models::bookmark::NO_DESCRIPTION, store::memory::MemoryBookmarks};
    use metadata::{MetadataFetcher, DEFAULT_TIMEOUT};
    use url::Url;

    use crate::common::bookmarks::{archive, create, list, CreateOutcome};

    const PAGE: &str = r#"<html><head>
        <title>Example</title>
        <meta name="description" content="desc">
    </head></html>"#;

    fn fetcher() -> MetadataFetcher {
        MetadataFetcher::new(DEFAULT_TIMEOUT).unwrap()
    }

    fn created(outcome: CreateOutcome) -> db::models::Bookmark {
        match outcome {
            CreateOutcome::Created(bookmark) => bookmark,
            CreateOutcome::Conflict { existing_id } => {
                panic!("unexpected conflict with {}", existing_id)
            }
        }
    }

    #[tokio::test]
    async fn create_with_metadata() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/post")
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;

        let store = MemoryBookmarks::default();
        let url = Url::parse(&format!("{}/post", server.url()))?;
        let bookmark = created(create(&store, &fetcher(), &url).await?);

        assert_eq!(bookmark.url, url.as_str());
        assert_eq!(bookmark.title.as_deref(), Some("Example"));
        assert_eq!(bookmark.description.as_deref(), Some("desc"));
        assert!(!bookmark.archived);
        assert_eq!(bookmark.updated_at, None);
        Ok(())
    }

    #[tokio::test]
    async fn create_when_fetch_fails() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/gone")
            .with_status(404)
            .create_async()
            .await;

        let store = MemoryBookmarks::default();
        let url = Url::parse(&format!("{}/gone", server.url()))?;
        let bookmark = created(create(&store, &fetcher(), &url).await?);

        assert_eq!(bookmark.title, None);
        assert_eq!(bookmark.description.as_deref(), Some(NO_DESCRIPTION));
        assert!(!bookmark.archived);
        Ok(())
    }

    #[tokio::test]
    async fn create_normalizes_url() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;

        let store = MemoryBookmarks::default();
        // a bare origin is serialized with a trailing slash
        let url = Url::parse(&server.url())?;
        let bookmark = created(create(&store, &fetcher(), &url).await?);
        assert_eq!(bookmark.url, format!("{}/", server.url()));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_url_conflicts() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/post")
            .with_status(200)
            .with_body(PAGE)
            .expect(1)
            .create_async()
            .await;

        let store = MemoryBookmarks::default();
        let url = Url::parse(&format!("{}/post", server.url()))?;
        let first = created(create(&store, &fetcher(), &url).await?);

        let second = create(&store, &fetcher(), &url).await?;
        assert_eq!(
            second,
            CreateOutcome::Conflict {
                existing_id: first.id
            }
        );
        assert_eq!(store.all().len(), 1);
        // the duplicate never reaches the network
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn archive_is_idempotent() -> anyhow::Result<()> {
        let store = MemoryBookmarks::default();
        let url = Url::parse("http://127.0.0.1:1/unreachable")?;
        let bookmark = created(create(&store, &fetcher(), &url).await?);

        let archived = archive(&store, bookmark.id).await?.unwrap();
        assert!(archived.archived);
        assert!(archived.updated_at.is_some());

        let again = archive(&store, bookmark.id).await?.unwrap();
        assert!(again.archived);
        Ok(())
    }

    #[tokio::test]
    async fn archive_unknown_id() -> anyhow::Result<()> {
        let store = MemoryBookmarks::default();
        let url = Url::parse("http://127.0.0.1:1/unreachable")?;
        created(create(&store, &fetcher(), &url).await?);
        let before = store.all();

        assert_eq!(archive(&store, 42).await?, None);
        assert_eq!(store.all(), before);
        Ok(())
    }

    #[tokio::test]
    async fn list_partitions_by_archived() -> anyhow::Result<()> {
        let store = MemoryBookmarks::default();
        let fetcher = fetcher();
        for path in ["a", "b", "c"] {
            let url = Url::parse(&format!("http://127.0.0.1:1/{}", path))?;
            created(create(&store, &fetcher, &url).await?);
        }
        archive(&store, 2).await?;

        let unread = list(&store, false).await?;
        let archived = list(&store, true).await?;
        assert!(unread.iter().all(|bookmark| !bookmark.archived));
        assert!(archived.iter().all(|bookmark| bookmark.archived));
        assert_eq!(unread.len() + archived.len(), store.all().len());
        assert_eq!(archived.len(), 1);
        Ok(())
    }
}
