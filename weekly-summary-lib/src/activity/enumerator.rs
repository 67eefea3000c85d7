use super::client::Client;
use super::records::Repository;

const LOG_TARGET: &str = "enumerator";

/// List the repositories owned by the authenticated user, most recently updated first.
///
/// Archived repositories are always left out, and private ones unless `include_private` is set.
/// A failed listing is logged and yields no repositories.
pub async fn owned_repositories(client: &Client, include_private: bool) -> Vec<Repository> {
    let result = client
        .get_pages(
            "/user/repos",
            &[("affiliation", "owner"), ("sort", "updated"), ("direction", "desc")],
            None,
            |_: &[Repository]| false,
        )
        .await;

    let repos = result.or_warn("owned repositories").unwrap_or_default();
    let total = repos.len();
    let kept = filter_repositories(repos, include_private);

    log::info!(target: LOG_TARGET, "Found {} eligible repositories out of {total} owned", kept.len());
    kept
}

/// Drop archived repositories, and private ones unless `include_private` is set.
#[must_use]
pub fn filter_repositories(repos: Vec<Repository>, include_private: bool) -> Vec<Repository> {
    repos
        .into_iter()
        .filter(|repo| {
            if repo.archived {
                log::debug!(target: LOG_TARGET, "Skipping archived repository '{}'", repo.name);
                return false;
            }

            if repo.private && !include_private {
                log::debug!(target: LOG_TARGET, "Skipping private repository '{}'", repo.name);
                return false;
            }

            true
        })
        .collect()
}
