//! Overview and the optional pull request, issue, and release sections.

use super::common::{non_blank, plural};
use crate::activity::{Issue, IssueState, PullRequest, Release, RepositoryOverview, Tagged};

const DESCRIPTION_PLACEHOLDER: &str = "Personal repository showcasing various projects and contributions";
const RECENT_LIMIT: usize = 3;

pub fn format_overview(overview: &RepositoryOverview) -> String {
    let description = non_blank(overview.description.as_deref()).unwrap_or(DESCRIPTION_PLACEHOLDER);

    let mut out = format!(
        "**Repository:** {}  \n**Description:** {description}  \n**Community:** {} stars • {} forks",
        overview.name, overview.stars, overview.forks
    );

    if let Some(count) = overview.repository_count.filter(|&c| c > 0) {
        out.push_str(&format!(" • {count} repositories"));
    }

    out
}

pub fn format_pull_requests(prs: &[Tagged<PullRequest>]) -> String {
    let open = prs.iter().filter(|pr| pr.item.state == IssueState::Open).count();
    let closed = prs.iter().filter(|pr| pr.item.state == IssueState::Closed).count();
    let merged: Vec<&PullRequest> = prs.iter().map(|pr| &pr.item).filter(|pr| pr.merged_at.is_some()).collect();

    let mut out = format!("**Pull Requests:** {open} open | {} merged | {closed} closed", merged.len());

    if !merged.is_empty() {
        out.push_str("  \nRecently merged:");
        for pr in merged.iter().take(RECENT_LIMIT) {
            out.push_str(&format!("\n- #{}: {}", pr.number, pr.title));
        }
    }

    out
}

pub fn format_issues(issues: &[Tagged<Issue>]) -> String {
    let open = issues.iter().filter(|i| i.item.state == IssueState::Open).count();
    let closed = issues.iter().filter(|i| i.item.state == IssueState::Closed).count();

    let mut out = format!("**Issues:** {open} open | {closed} recently closed");

    if !issues.is_empty() {
        out.push_str("  \nRecent activity:");
        for issue in issues.iter().take(RECENT_LIMIT).map(|i| &i.item) {
            let state = match issue.state {
                IssueState::Open => "[OPEN]",
                IssueState::Closed => "[CLOSED]",
            };
            out.push_str(&format!("\n- {state} #{}: {}", issue.number, issue.title));
        }
    }

    out
}

pub fn format_releases(releases: &[Tagged<Release>]) -> String {
    let mut out = format!(
        "**Releases:** {} new {}",
        releases.len(),
        plural(releases.len(), "release", "releases")
    );

    if !releases.is_empty() {
        out.push_str("  \nLatest releases:");
        for release in releases.iter().map(|r| &r.item) {
            let name = non_blank(release.name.as_deref()).unwrap_or(&release.tag_name);
            out.push_str(&format!("\n- {name} ({})", release.tag_name));
        }
    }

    out
}
