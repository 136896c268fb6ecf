use db::{models::PocketLink, store::PocketLinkListing};

pub const DEFAULT_STATUS: &str = "unread";
const ALL_STATUSES: &str = "all";

/// `"all"` disables the status filter; any other value must match exactly.
pub async fn list<S>(store: &S, status_filter: &str) -> anyhow::Result<Vec<PocketLink>>
where
    S: PocketLinkListing + ?Sized,
{
    let status = match status_filter {
        ALL_STATUSES => None,
        status => Some(status),
    };
    store.list(status).await
}
