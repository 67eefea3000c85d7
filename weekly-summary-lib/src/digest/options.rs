use crate::activity::RepoCoordinate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which optional sections appear in the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
#[expect(clippy::struct_excessive_bools, reason = "each flag is an independent toggle")]
pub struct Sections {
    pub pull_requests: bool,
    pub issues: bool,
    pub releases: bool,
    pub starred: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            pull_requests: false,
            issues: false,
            releases: false,
            starred: true,
        }
    }
}

/// Controls what the renderer includes.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    sections: Sections,
    excluded: HashSet<String>,
}

impl RenderOptions {
    /// Create options with the given sections and repositories left out of commit grouping.
    pub fn new(sections: Sections, excluded: impl IntoIterator<Item = RepoCoordinate>) -> Self {
        Self {
            sections,
            excluded: excluded.into_iter().map(|c| c.full_name().to_lowercase()).collect(),
        }
    }

    #[must_use]
    pub const fn sections(&self) -> Sections {
        self.sections
    }

    /// Whether commits from `repository` (an `owner/name` string) are left out of commit grouping.
    ///
    /// GitHub names are case-insensitive, so the comparison is too.
    #[must_use]
    pub fn is_excluded(&self, repository: &str) -> bool {
        !self.excluded.is_empty() && self.excluded.contains(&repository.to_lowercase())
    }
}
