#![forbid(unsafe_code)]

//! Bulk import of a Pocket CSV export into `pocket_links`.

use std::{fmt, path::Path};

use anyhow::Context;
use db::{models::NewPocketLink, store::PocketLinkStore};
use serde::Deserialize;

/// Staged rows are committed every time this many rows have been processed.
pub const BATCH_SIZE: usize = 100;

/// One line of the export. Columns missing from the file read as empty.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct PocketRow {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub time_added: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingUrl,
    InvalidTimeAdded { url: String, raw: String },
    Duplicate { url: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingUrl => write!(f, "missing url"),
            SkipReason::InvalidTimeAdded { url, raw } => {
                write!(f, "invalid time_added '{}' for URL {}", raw, url)
            }
            SkipReason::Duplicate { url } => write!(f, "URL already exists: {}", url),
        }
    }
}

impl PocketRow {
    /// Field checks that need no store access, in the order they are applied.
    pub fn into_new_link(self) -> Result<NewPocketLink, SkipReason> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(SkipReason::MissingUrl);
        }

        let raw = self.time_added.trim();
        let time_added = raw
            .parse::<i64>()
            .map_err(|_| SkipReason::InvalidTimeAdded {
                url: url.to_string(),
                raw: raw.to_string(),
            })?;

        Ok(NewPocketLink {
            title: non_empty(&self.title),
            url: url.to_string(),
            time_added,
            tags: non_empty(&self.tags),
            status: self.status.trim().to_string(),
        })
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

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows that passed validation and the lookup, and were staged for a batch.
    pub processed: usize,
    pub skipped: usize,
    /// Staged rows the store dropped at flush time because an earlier row in
    /// the same batch already claimed the url.
    pub ignored: usize,
}

/// Streams rows from a CSV file with a header line. A malformed record shows
/// up as an `Err` item when it is reached.
pub fn read_rows(
    path: impl AsRef<Path>,
) -> anyhow::Result<impl Iterator<Item = anyhow::Result<PocketRow>>> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(reader
        .into_deserialize::<PocketRow>()
        .map(|row| row.context("failed to read CSV record")))
}

/// Imports `rows` in input order. Row-level problems are counted as skipped;
/// a read or store error aborts the run and discards the batch that has not
/// been flushed yet. Batches flushed before the error stay committed.
pub async fn import<S, I>(store: &mut S, rows: I) -> anyhow::Result<ImportSummary>
where
    S: PocketLinkStore + ?Sized,
    I: IntoIterator<Item = anyhow::Result<PocketRow>>,
{
    let result = run(store, rows).await;
    if let Err(err) = &result {
        log::error!("Error during ingestion, {:#}", err);
    }
    result
}

async fn run<S, I>(store: &mut S, rows: I) -> anyhow::Result<ImportSummary>
where
    S: PocketLinkStore + ?Sized,
    I: IntoIterator<Item = anyhow::Result<PocketRow>>,
{
    let mut summary = ImportSummary::default();
    let mut staged: Vec<NewPocketLink> = Vec::with_capacity(BATCH_SIZE);

    for row in rows {
        let link = match row?.into_new_link() {
            Ok(link) => link,
            Err(reason) => {
                if reason != SkipReason::MissingUrl {
                    log::warn!("Skipping row, {}", reason);
                }
                summary.skipped += 1;
                continue;
            }
        };

        if store.url_exists(&link.url).await? {
            log::info!("{}", SkipReason::Duplicate { url: link.url });
            summary.skipped += 1;
            continue;
        }

        staged.push(link);
        summary.processed += 1;

        if summary.processed % BATCH_SIZE == 0 {
            summary.ignored += flush(store, &mut staged).await?;
            log::info!("Processed {} records...", summary.processed);
        }
    }

    summary.ignored += flush(store, &mut staged).await?;

    Ok(summary)
}

/// Returns how many staged rows the store did not write.
async fn flush<S>(store: &mut S, staged: &mut Vec<NewPocketLink>) -> anyhow::Result<usize>
where
    S: PocketLinkStore + ?Sized,
{
    let written = store.insert_batch(&staged[..]).await?;
    let ignored = staged.len().saturating_sub(written);
    if ignored > 0 {
        log::warn!(
            "{} staged row(s) were already stored and have been ignored",
            ignored
        );
    }
    staged.clear();
    Ok(ignored)
}
