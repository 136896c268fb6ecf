#![forbid(unsafe_code)]

//! Page title and description lookup for newly saved URLs.

use std::time::Duration;

use lazy_static::lazy_static;
use reqwest::redirect::Policy;
use scraper::{Html, Selector};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_REDIRECTS: usize = 10;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref META_DESCRIPTION: Selector =
        Selector::parse(r#"meta[name="description"]"#).unwrap();
    static ref OG_DESCRIPTION: Selector =
        Selector::parse(r#"meta[property="og:description"]"#).unwrap();
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PageMetadata {
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        let title = document
            .select(&TITLE)
            .next()
            .and_then(|title| non_empty(&title.text().collect::<String>()));

        // og:description is only consulted when no description meta exists at all
        let description = document
            .select(&META_DESCRIPTION)
            .next()
            .or_else(|| document.select(&OG_DESCRIPTION).next())
            .and_then(|meta| meta.value().attr("content"))
            .and_then(non_empty);

        PageMetadata { title, description }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Result of a lookup. A failure never leaves the fetcher as an error; callers
/// collapse it with [`FetchOutcome::into_metadata`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(PageMetadata),
    Failure(String),
}

impl FetchOutcome {
    pub fn into_metadata(self) -> PageMetadata {
        match self {
            FetchOutcome::Success(metadata) => metadata,
            FetchOutcome::Failure(_) => PageMetadata::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetadataFetcher {
    client: reqwest::Client,
}

impl MetadataFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(MetadataFetcher { client })
    }

    /// Issues one GET; no retries.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        match self.try_fetch(url).await {
            Ok(metadata) => FetchOutcome::Success(metadata),
            Err(err) => {
                log::warn!("Error fetching metadata for {}, {:#}", url, err);
                FetchOutcome::Failure(format!("{:#}", err))
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> anyhow::Result<PageMetadata> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(PageMetadata::from_html(&html))
    }
}
