use super::records::{Commit, Issue, PullRequest, Release, Repository};
use super::time_window::{TimeWindow, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight repository description attached to commits for grouped rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl From<&Repository> for RepoSummary {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo.description.clone(),
            url: repo.html_url.clone(),
        }
    }
}

/// An upstream record plus the `owner/name` of the repository it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagged<T> {
    pub item: T,
    pub repository: String,
}

impl<T> Tagged<T> {
    pub fn new(item: T, repository: impl Into<String>) -> Self {
        Self {
            item,
            repository: repository.into(),
        }
    }
}

/// A commit tagged with its owning repository and that repository's summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedCommit {
    pub commit: Commit,
    pub repository: String,
    pub summary: Option<RepoSummary>,
}

impl TaggedCommit {
    #[must_use]
    pub fn authored_at(&self) -> Option<DateTime<Utc>> {
        self.commit.authored_at().and_then(parse_timestamp)
    }
}

/// Everything fetched for one repository.
#[derive(Debug, Clone, Default)]
pub struct RepositoryActivity {
    pub commits: Vec<Commit>,
    pub pull_requests: Vec<PullRequest>,
    pub issues: Vec<Issue>,
    pub releases: Vec<Release>,
    pub metadata: Option<Repository>,
}

/// Community figures shown at the top of the digest.
///
/// In single-repository mode this mirrors that repository's metadata; across an account it is
/// synthesized from running totals and carries the repository count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOverview {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub repository_count: Option<usize>,
}

impl RepositoryOverview {
    /// Synthesize the overview for all repositories owned by `owner`.
    #[must_use]
    pub fn for_account(owner: &str, stars: u64, forks: u64, repository_count: usize) -> Self {
        Self {
            name: format!("{owner}'s repositories"),
            description: Some(format!("Aggregated activity across {repository_count} repositories")),
            stars,
            forks,
            repository_count: Some(repository_count),
        }
    }
}

impl From<&Repository> for RepositoryOverview {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo.description.clone(),
            stars: u64::from(repo.stargazers_count.unwrap_or(0)),
            forks: u64::from(repo.forks_count.unwrap_or(0)),
            repository_count: None,
        }
    }
}

/// A repository the principal starred within the starred window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarredEntry {
    pub starred_at: DateTime<Utc>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub owner_login: Option<String>,
}

/// The merged, cross-repository activity bundle that gets rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aggregate {
    pub commits: Vec<TaggedCommit>,
    pub pull_requests: Vec<Tagged<PullRequest>>,
    pub issues: Vec<Tagged<Issue>>,
    pub releases: Vec<Tagged<Release>>,
    pub overview: Option<RepositoryOverview>,
    pub window: Option<TimeWindow>,
    pub starred: Vec<StarredEntry>,
}

impl Aggregate {
    /// Fold one repository's activity in, tagging every item with `repository`.
    pub fn absorb(&mut self, repository: &str, activity: RepositoryActivity) {
        let summary = activity.metadata.as_ref().map(RepoSummary::from);

        self.commits.extend(activity.commits.into_iter().map(|commit| TaggedCommit {
            commit,
            repository: repository.to_string(),
            summary: summary.clone(),
        }));
        self.pull_requests
            .extend(activity.pull_requests.into_iter().map(|pr| Tagged::new(pr, repository)));
        self.issues.extend(activity.issues.into_iter().map(|issue| Tagged::new(issue, repository)));
        self.releases
            .extend(activity.releases.into_iter().map(|release| Tagged::new(release, repository)));
    }

    /// Sort commits newest first; commits without a usable timestamp go last.
    pub fn sort_commits(&mut self) {
        self.commits.sort_by_cached_key(|c| core::cmp::Reverse(c.authored_at()));
    }
}
