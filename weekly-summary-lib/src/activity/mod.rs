//! Fetching, windowing, and aggregating repository activity
//!
//! Everything here talks to the GitHub REST API through a single [`Client`]. Each resource is
//! requested once; a resource that can't be fetched is logged and treated as empty so that one
//! failing repository never sinks a whole run.
//!
//! The pieces, from the bottom up:
//!
//! - [`TimeWindow`] bounds every filter.
//! - [`Fetcher`] pulls commits, pull requests, issues, releases, and metadata for one repository.
//! - [`owned_repositories`] lists the repositories to fan out over.
//! - [`aggregate_account`] and [`aggregate_repository`] fold everything into an [`Aggregate`].
//! - [`starred_repositories`] collects recently starred repositories under their own window.

mod aggregate;
mod aggregator;
mod client;
mod enumerator;
mod fetcher;
mod progress;
mod records;
mod repo_coordinate;
mod starred;
mod time_window;

pub use aggregate::{Aggregate, RepoSummary, RepositoryActivity, RepositoryOverview, StarredEntry, Tagged, TaggedCommit};
pub use aggregator::{aggregate_account, aggregate_repository};
pub use client::{ApiResult, Client, DEFAULT_API_URL, DEFAULT_PAGE_SIZE, MEDIA_TYPE_STAR, MEDIA_TYPE_V3, RateLimitInfo};
pub use enumerator::{filter_repositories, owned_repositories};
pub use fetcher::{Fetcher, filter_commits, filter_issues, filter_pull_requests, filter_releases};
pub use progress::{NoProgress, Progress};
pub use records::{
    Account, Commit, CommitDetail, GitSignature, Issue, IssueState, PullRequest, PullRequestMarker, Release, Repository, StarredRecord,
};
pub use repo_coordinate::RepoCoordinate;
pub use starred::{select_starred, starred_repositories};
pub use time_window::{TimeWindow, parse_timestamp};
