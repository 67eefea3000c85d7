use super::common::{non_blank, plural};
use crate::activity::StarredEntry;

const LOG_TARGET: &str = "    digest";
const NO_STARS: &str = "*No repositories starred in the past month*";
const MAX_LISTED: usize = 10;

pub fn format_starred(entries: &[StarredEntry]) -> String {
    let mut out = format!(
        "**Recently Starred:** {} {} starred in the past month",
        entries.len(),
        plural(entries.len(), "repository", "repositories")
    );

    if entries.is_empty() {
        out.push_str("\n\n");
        out.push_str(NO_STARS);
        return out;
    }

    for entry in entries.iter().take(MAX_LISTED) {
        let Some(label) = label(entry) else {
            log::warn!(target: LOG_TARGET, "Skipping starred repository with no usable name (starred at {})", entry.starred_at);
            continue;
        };

        out.push_str("\n- ");
        out.push_str(&label);
        if let Some(description) = non_blank(entry.description.as_deref()) {
            out.push_str(" - ");
            out.push_str(description);
        }
    }

    out
}

/// Work out the best label for an entry from whatever identifying fields it has.
fn label(entry: &StarredEntry) -> Option<String> {
    let full_name = non_blank(entry.full_name.as_deref());
    let name = non_blank(entry.name.as_deref());
    let url = non_blank(entry.url.as_deref());
    let reconstructed = match (non_blank(entry.owner_login.as_deref()), name) {
        (Some(owner), Some(name)) => Some(format!("{owner}/{name}")),
        _ => None,
    };

    match (full_name, reconstructed, url) {
        (Some(full_name), _, Some(url)) => Some(format!("[{full_name}]({url})")),
        (None, Some(reconstructed), Some(url)) => Some(format!("[{reconstructed}]({url})")),
        (Some(full_name), _, None) => Some(full_name.to_string()),
        (None, Some(reconstructed), None) => Some(format!("[{reconstructed}](https://github.com/{reconstructed})")),
        (None, None, _) => name.map(ToString::to_string),
    }
}
