use super::common::{clean_subject, format_date, non_blank, plural};
use super::options::RenderOptions;
use crate::activity::{RepoSummary, TaggedCommit, TimeWindow};
use std::collections::{HashMap, HashSet};

const NO_COMMITS: &str = "*No recent commits this week*";
const UNKNOWN_AUTHOR: &str = "Unknown";
const COMMITS_PER_REPOSITORY: usize = 3;

/// Commits of one repository, in the order they appear in the sorted commit list.
struct Group<'a> {
    repository: &'a str,
    summary: Option<&'a RepoSummary>,
    subjects: Vec<&'a str>,
}

pub fn format_commits(commits: &[TaggedCommit], window: Option<TimeWindow>, options: &RenderOptions) -> String {
    let authors: HashSet<&str> = commits.iter().map(|c| c.commit.author_name().unwrap_or(UNKNOWN_AUTHOR)).collect();
    let repositories: HashSet<&str> = commits.iter().map(|c| c.repository.as_str()).collect();

    let mut out = format!(
        "**Recent Activity:** {} {} from {} {}",
        commits.len(),
        plural(commits.len(), "commit", "commits"),
        authors.len(),
        plural(authors.len(), "contributor", "contributors"),
    );

    if !repositories.is_empty() {
        out.push_str(&format!(
            " across {} {}",
            repositories.len(),
            plural(repositories.len(), "repository", "repositories")
        ));
    }

    if let Some(window) = window {
        out.push_str(&format!(
            "  \n**Date Range:** {} to {}",
            format_date(window.since()),
            format_date(window.until())
        ));
    }

    out.push_str("\n\n");

    let groups = group_commits(commits, options);
    if groups.is_empty() {
        out.push_str(NO_COMMITS);
    } else {
        let blocks: Vec<String> = groups.iter().map(format_group).collect();
        out.push_str(&blocks.join("\n\n"));
    }

    out
}

fn group_commits<'a>(commits: &'a [TaggedCommit], options: &RenderOptions) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for commit in commits {
        let repository = commit.repository.as_str();
        if options.is_excluded(repository) {
            continue;
        }

        let slot = *index.entry(repository).or_insert_with(|| {
            groups.push(Group {
                repository,
                summary: commit.summary.as_ref(),
                subjects: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        if group.subjects.len() < COMMITS_PER_REPOSITORY {
            group.subjects.push(clean_subject(commit.commit.subject()));
        }
    }

    groups
}

fn format_group(group: &Group<'_>) -> String {
    let short_name = group.repository.rsplit('/').next().unwrap_or(group.repository);
    let name = group.summary.map_or(short_name, |s| s.name.as_str());
    let url = group.summary.and_then(|s| non_blank(s.url.as_deref()));
    let description = group.summary.and_then(|s| non_blank(s.description.as_deref()));

    let mut block = url.map_or_else(|| format!("**{name}**"), |url| format!("**[{name}]({url})**"));

    if let Some(description) = description {
        block.push_str("  \n");
        block.push_str(description);
    }

    block.push_str(&format!("  \n({})", group.subjects.join(", ")));
    block
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::activity::{Commit, CommitDetail, GitSignature, RepoCoordinate};
    use crate::digest::Sections;
    use chrono::{DateTime, Utc};

    fn commit(repository: &str, message: &str, author: Option<&str>) -> TaggedCommit {
        let name = repository.rsplit('/').next().unwrap();
        TaggedCommit {
            commit: Commit {
                sha: format!("{repository}:{message}"),
                html_url: None,
                commit: CommitDetail {
                    message: message.to_string(),
                    author: Some(GitSignature {
                        name: author.map(ToString::to_string),
                        email: None,
                        date: None,
                    }),
                },
                author: None,
            },
            repository: repository.to_string(),
            summary: Some(RepoSummary {
                name: name.to_string(),
                description: Some(format!("The {name} project")),
                url: Some(format!("https://github.com/{repository}")),
            }),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().to_utc()
    }

    #[test]
    fn test_no_commits_placeholder() {
        assert_eq!(
            format_commits(&[], None, &options()),
            "**Recent Activity:** 0 commits from 0 contributors\n\n*No recent commits this week*"
        );
    }

    #[test]
    fn test_singular_nouns() {
        let commits = vec![commit("octocat/hello", "fix typo", Some("Mona"))];

        assert_eq!(
            format_commits(&commits, None, &options()),
            "**Recent Activity:** 1 commit from 1 contributor across 1 repository\n\n\
             **[hello](https://github.com/octocat/hello)**  \nThe hello project  \n(fix typo)"
        );
    }

    #[test]
    fn test_strips_robot_and_preserves_order() {
        let commits = vec![
            commit("octocat/hello", "🤖 fix bug", Some("Mona")),
            commit("octocat/hello", "add feature\n\nwith a long body", Some("Mona")),
        ];

        let out = format_commits(&commits, None, &options());
        assert!(out.ends_with("(fix bug, add feature)"), "{out}");
    }

    #[test]
    fn test_at_most_three_per_repository() {
        let commits: Vec<_> = ["one", "two", "three", "four"]
            .iter()
            .map(|m| commit("octocat/hello", m, Some("Mona")))
            .collect();

        let out = format_commits(&commits, None, &options());
        assert!(out.starts_with("**Recent Activity:** 4 commits from 1 contributor across 1 repository"));
        assert!(out.ends_with("(one, two, three)"), "{out}");
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let commits = vec![
            commit("octocat/beta", "b1", Some("Mona")),
            commit("octocat/alpha", "a1", Some("Hubot")),
            commit("octocat/beta", "b2", None),
        ];

        let out = format_commits(&commits, None, &options());
        assert_eq!(
            out,
            "**Recent Activity:** 3 commits from 3 contributors across 2 repositories\n\n\
             **[beta](https://github.com/octocat/beta)**  \nThe beta project  \n(b1, b2)\n\n\
             **[alpha](https://github.com/octocat/alpha)**  \nThe alpha project  \n(a1)"
        );
    }

    #[test]
    fn test_missing_author_counts_as_unknown() {
        let commits = vec![
            commit("octocat/hello", "a", None),
            commit("octocat/hello", "b", None),
            commit("octocat/hello", "c", Some("Unknown")),
        ];

        let out = format_commits(&commits, None, &options());
        assert!(out.starts_with("**Recent Activity:** 3 commits from 1 contributor across"), "{out}");
    }

    #[test]
    fn test_date_range() {
        let window = TimeWindow::new(ts("2024-03-01T10:00:00Z"), ts("2024-03-08T10:00:00Z")).unwrap();

        let out = format_commits(&[], Some(window), &options());
        assert_eq!(
            out,
            "**Recent Activity:** 0 commits from 0 contributors  \n**Date Range:** March 1, 2024 to March 8, 2024\n\n\
             *No recent commits this week*"
        );
    }

    #[test]
    fn test_excluded_repositories_still_counted() {
        let excluded = vec!["octocat/noise".parse::<RepoCoordinate>().unwrap()];
        let options = RenderOptions::new(Sections::default(), excluded);
        let commits = vec![
            commit("octocat/noise", "bump", Some("bot")),
            commit("octocat/hello", "real work", Some("Mona")),
        ];

        let out = format_commits(&commits, None, &options);
        assert!(out.starts_with("**Recent Activity:** 2 commits from 2 contributors across 2 repositories"));
        assert!(out.contains("(real work)"));
        assert!(!out.contains("noise"));
        assert!(!out.contains("bump"));
    }

    #[test]
    fn test_all_excluded_renders_placeholder() {
        let excluded = vec!["octocat/noise".parse::<RepoCoordinate>().unwrap()];
        let options = RenderOptions::new(Sections::default(), excluded);
        let commits = vec![commit("octocat/noise", "bump", Some("bot"))];

        assert_eq!(
            format_commits(&commits, None, &options),
            "**Recent Activity:** 1 commit from 1 contributor across 1 repository\n\n*No recent commits this week*"
        );
    }

    #[test]
    fn test_block_without_summary() {
        let mut plain = commit("octocat/hello", "work", Some("Mona"));
        plain.summary = None;

        let out = format_commits(&[plain], None, &options());
        assert!(out.ends_with("**hello**  \n(work)"), "{out}");
    }

    #[test]
    fn test_block_without_url_or_description() {
        let mut bare = commit("octocat/hello", "work", Some("Mona"));
        bare.summary = Some(RepoSummary {
            name: "hello".to_string(),
            description: Some("  ".to_string()),
            url: None,
        });

        let out = format_commits(&[bare], None, &options());
        assert!(out.ends_with("**hello**  \n(work)"), "{out}");
    }
}
