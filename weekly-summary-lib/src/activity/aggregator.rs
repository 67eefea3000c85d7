use super::aggregate::{Aggregate, RepositoryOverview};
use super::client::Client;
use super::enumerator::owned_repositories;
use super::fetcher::Fetcher;
use super::progress::Progress;
use super::repo_coordinate::RepoCoordinate;
use super::time_window::TimeWindow;

const LOG_TARGET: &str = "aggregator";

/// Collect activity across every eligible repository owned by the authenticated user.
///
/// Repositories are processed one at a time in enumeration order. The overview sums stars and
/// forks over every enumerated repository, whether or not its activity could be fetched.
pub async fn aggregate_account(client: &Client, owner: &str, window: TimeWindow, include_private: bool, progress: &dyn Progress) -> Aggregate {
    progress.set_phase("Enumerating");
    let repos = owned_repositories(client, include_private).await;

    let fetcher = Fetcher::new(client, window);
    let mut aggregate = Aggregate {
        window: Some(window),
        ..Aggregate::default()
    };

    let mut stars = 0u64;
    let mut forks = 0u64;
    let total = repos.len() as u64;

    progress.set_phase("Collecting");
    for (index, repo) in repos.iter().enumerate() {
        stars += u64::from(repo.stargazers_count.unwrap_or(0));
        forks += u64::from(repo.forks_count.unwrap_or(0));

        let repo_owner = repo.owner.as_ref().map_or(owner, |o| o.login.as_str());
        let coordinate = match RepoCoordinate::new(repo_owner, &repo.name) {
            Ok(coordinate) => coordinate,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping repository with unusable name: {e:#}");
                continue;
            }
        };

        progress.set_position(index as u64 + 1, total, &coordinate.full_name());
        log::info!(target: LOG_TARGET, "[{}/{total}] {coordinate}", index + 1);

        let activity = fetcher.fetch_listed_repository(&coordinate, repo).await;
        aggregate.absorb(&coordinate.full_name(), activity);
    }

    aggregate.sort_commits();
    aggregate.overview = Some(RepositoryOverview::for_account(owner, stars, forks, repos.len()));
    progress.done();

    log::info!(
        target: LOG_TARGET,
        "Collected {} commit(s) across {} repositories",
        aggregate.commits.len(),
        repos.len()
    );

    aggregate
}

/// Collect activity for a single repository.
///
/// The overview comes from the repository's own metadata and is absent when that can't be fetched.
pub async fn aggregate_repository(client: &Client, repo: &RepoCoordinate, window: TimeWindow, progress: &dyn Progress) -> Aggregate {
    progress.set_phase("Collecting");
    progress.set_position(1, 1, &repo.full_name());

    let activity = Fetcher::new(client, window).fetch_repository(repo).await;
    let overview = activity.metadata.as_ref().map(RepositoryOverview::from);

    let mut aggregate = Aggregate {
        window: Some(window),
        overview,
        ..Aggregate::default()
    };

    aggregate.absorb(&repo.full_name(), activity);
    aggregate.sort_commits();
    progress.done();

    aggregate
}
