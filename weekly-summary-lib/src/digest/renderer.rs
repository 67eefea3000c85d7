use super::commits::format_commits;
use super::options::RenderOptions;
use super::sections::{format_issues, format_overview, format_pull_requests, format_releases};
use super::starred::format_starred;
use crate::activity::Aggregate;

/// The heading line every digest starts with.
pub const HEADING: &str = "## Weekly Summary";

/// Render the digest for `aggregate`.
#[must_use]
pub fn render(aggregate: &Aggregate, options: &RenderOptions) -> String {
    let sections = options.sections();
    let mut parts = Vec::new();

    if let Some(overview) = &aggregate.overview {
        parts.push(format_overview(overview));
    }

    parts.push(format_commits(&aggregate.commits, aggregate.window, options));

    if sections.pull_requests {
        parts.push(format_pull_requests(&aggregate.pull_requests));
    }

    if sections.issues {
        parts.push(format_issues(&aggregate.issues));
    }

    if sections.releases {
        parts.push(format_releases(&aggregate.releases));
    }

    if sections.starred {
        parts.push(format_starred(&aggregate.starred));
    }

    format!("{HEADING}\n\n{}", parts.join("\n\n"))
}
