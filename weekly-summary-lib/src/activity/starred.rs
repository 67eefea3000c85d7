use super::aggregate::StarredEntry;
use super::client::{Client, MEDIA_TYPE_STAR};
use super::records::StarredRecord;
use super::time_window::{TimeWindow, parse_timestamp};

const LOG_TARGET: &str = "   starred";

/// Collect the repositories the authenticated user starred within `window`, newest first.
///
/// The upstream order can't be relied on to end the listing early, so every page is scanned.
/// A failed listing is logged and yields no entries.
pub async fn starred_repositories(client: &Client, window: TimeWindow) -> Vec<StarredEntry> {
    let result = client
        .get_pages("/user/starred", &[], Some(MEDIA_TYPE_STAR), |_: &[StarredRecord]| false)
        .await;

    let records = result.or_warn("starred repositories").unwrap_or_default();
    let scanned = records.len();
    let entries = select_starred(records, window);

    log::info!(target: LOG_TARGET, "Found {} repositories starred since {} ({scanned} scanned)", entries.len(), window.since().format("%F"));
    entries
}

/// Keep records starred inside `window` and sort them newest first.
///
/// Records whose star time is missing or doesn't parse are dropped.
#[must_use]
pub fn select_starred(records: Vec<StarredRecord>, window: TimeWindow) -> Vec<StarredEntry> {
    let mut entries: Vec<StarredEntry> = records
        .into_iter()
        .filter_map(|record| {
            let Some(starred_at) = record.starred_at.as_deref().and_then(parse_timestamp) else {
                log::debug!(target: LOG_TARGET, "Dropping starred repository '{}' with missing or unparseable star time", record.repo.name);
                return None;
            };

            if !window.contains(starred_at) {
                return None;
            }

            let repo = record.repo;
            Some(StarredEntry {
                starred_at,
                name: Some(repo.name).filter(|n| !n.is_empty()),
                full_name: repo.full_name,
                url: repo.html_url,
                description: repo.description,
                owner_login: repo.owner.map(|o| o.login),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.starred_at.cmp(&a.starred_at));
    entries
}
