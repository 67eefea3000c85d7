use super::aggregate::RepositoryActivity;
use super::client::{ApiResult, Client};
use super::records::{Commit, Issue, PullRequest, Release, Repository};
use super::repo_coordinate::RepoCoordinate;
use super::time_window::{TimeWindow, parse_timestamp};

const LOG_TARGET: &str = "  activity";

/// Fetches the activity of single repositories within a fixed window.
#[derive(Debug, Clone, Copy)]
pub struct Fetcher<'a> {
    client: &'a Client,
    window: TimeWindow,
}

impl<'a> Fetcher<'a> {
    #[must_use]
    pub const fn new(client: &'a Client, window: TimeWindow) -> Self {
        Self { client, window }
    }

    #[must_use]
    pub const fn window(&self) -> TimeWindow {
        self.window
    }

    /// Fetch all four activity collections plus metadata for one repository.
    ///
    /// A resource that can't be fetched comes back empty; this never fails as a whole.
    pub async fn fetch_repository(&self, repo: &RepoCoordinate) -> RepositoryActivity {
        log::info!(target: LOG_TARGET, "Querying GitHub for activity in '{repo}'");

        let mut activity = self.fetch_collections(repo).await;
        activity.metadata = self.metadata(repo).await;
        activity
    }

    /// Like [`Fetcher::fetch_repository`], but for a repository taken from the owned-repository
    /// listing, whose record already carries the metadata.
    pub async fn fetch_listed_repository(&self, repo: &RepoCoordinate, listing: &Repository) -> RepositoryActivity {
        log::info!(target: LOG_TARGET, "Querying GitHub for activity in '{repo}'");

        let mut activity = self.fetch_collections(repo).await;
        activity.metadata = Some(listing.clone());
        activity
    }

    async fn fetch_collections(&self, repo: &RepoCoordinate) -> RepositoryActivity {
        let activity = RepositoryActivity {
            commits: self.commits(repo).await,
            pull_requests: self.pull_requests(repo).await,
            issues: self.issues(repo).await,
            releases: self.releases(repo).await,
            metadata: None,
        };

        log::debug!(
            target: LOG_TARGET,
            "'{repo}': {} commit(s), {} pull request(s), {} issue(s), {} release(s)",
            activity.commits.len(),
            activity.pull_requests.len(),
            activity.issues.len(),
            activity.releases.len()
        );

        activity
    }

    pub async fn commits(&self, repo: &RepoCoordinate) -> Vec<Commit> {
        let since = self.window.since_param();
        let path = format!("/repos/{}/{}/commits", repo.owner(), repo.name());
        let result = self.client.get_pages(&path, &[("since", &since)], None, |_: &[Commit]| false).await;

        result
            .or_warn(&format!("commits for '{repo}'"))
            .map(|commits| filter_commits(commits, self.window))
            .unwrap_or_default()
    }

    pub async fn pull_requests(&self, repo: &RepoCoordinate) -> Vec<PullRequest> {
        let path = format!("/repos/{}/{}/pulls", repo.owner(), repo.name());
        let window = self.window;

        // Sorted by most recently updated, so a page ending before the window ends the listing.
        let result = self
            .client
            .get_pages(
                &path,
                &[("state", "all"), ("sort", "updated"), ("direction", "desc")],
                None,
                |page: &[PullRequest]| {
                    page.last()
                        .and_then(|pr| pr.updated_at.as_deref())
                        .and_then(parse_timestamp)
                        .is_some_and(|ts| ts < window.since())
                },
            )
            .await;

        result
            .or_warn(&format!("pull requests for '{repo}'"))
            .map(|prs| filter_pull_requests(prs, window))
            .unwrap_or_default()
    }

    pub async fn issues(&self, repo: &RepoCoordinate) -> Vec<Issue> {
        let since = self.window.since_param();
        let path = format!("/repos/{}/{}/issues", repo.owner(), repo.name());
        let result = self
            .client
            .get_pages(
                &path,
                &[("state", "all"), ("sort", "updated"), ("direction", "desc"), ("since", &since)],
                None,
                |_: &[Issue]| false,
            )
            .await;

        result
            .or_warn(&format!("issues for '{repo}'"))
            .map(|issues| filter_issues(issues, self.window))
            .unwrap_or_default()
    }

    pub async fn releases(&self, repo: &RepoCoordinate) -> Vec<Release> {
        let path = format!("/repos/{}/{}/releases", repo.owner(), repo.name());
        let result = self.client.get_pages(&path, &[], None, |_: &[Release]| false).await;

        result
            .or_warn(&format!("releases for '{repo}'"))
            .map(|releases| filter_releases(releases, self.window))
            .unwrap_or_default()
    }

    pub async fn metadata(&self, repo: &RepoCoordinate) -> Option<Repository> {
        let path = format!("/repos/{}/{}", repo.owner(), repo.name());
        let result: ApiResult<Repository> = self.client.get_json(&path).await;
        result.or_warn(&format!("metadata for '{repo}'"))
    }
}

/// Keep commits authored inside the window.
///
/// Commits whose timestamp is missing or doesn't parse are kept.
#[must_use]
pub fn filter_commits(commits: Vec<Commit>, window: TimeWindow) -> Vec<Commit> {
    commits
        .into_iter()
        .filter(|commit| match commit.authored_at().and_then(parse_timestamp) {
            Some(ts) => window.contains(ts),
            None => {
                log::debug!(target: LOG_TARGET, "Keeping commit {} with missing or unparseable date", commit.sha);
                true
            }
        })
        .collect()
}

/// Keep pull requests updated at or after the start of the window.
#[must_use]
pub fn filter_pull_requests(prs: Vec<PullRequest>, window: TimeWindow) -> Vec<PullRequest> {
    prs.into_iter()
        .filter(|pr| updated_since(pr.updated_at.as_deref(), window))
        .collect()
}

/// Keep real issues (not pull requests) updated at or after the start of the window.
#[must_use]
pub fn filter_issues(issues: Vec<Issue>, window: TimeWindow) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| !issue.is_pull_request())
        .filter(|issue| updated_since(issue.updated_at.as_deref(), window))
        .collect()
}

/// Keep releases published at or after the start of the window; unpublished releases are dropped.
#[must_use]
pub fn filter_releases(releases: Vec<Release>, window: TimeWindow) -> Vec<Release> {
    releases
        .into_iter()
        .filter(|release| updated_since(release.published_at.as_deref(), window))
        .collect()
}

fn updated_since(ts: Option<&str>, window: TimeWindow) -> bool {
    ts.and_then(parse_timestamp).is_some_and(|ts| ts >= window.since())
}
