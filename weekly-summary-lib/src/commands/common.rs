//! Common processing logic shared between the update and preview commands.

use super::ProgressReporter;
use super::config::Config;
use crate::Result;
use crate::activity::{Aggregate, Client, DEFAULT_API_URL, RepoCoordinate, TimeWindow, aggregate_account, aggregate_repository, starred_repositories};
use crate::digest::{RenderOptions, render};
use crate::document::repository_root;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::builder::BoolishValueParser;
use clap::{Args, ValueEnum};
use ohno::{IntoAppError, app_err};
use std::io::IsTerminal;

const LOG_TARGET: &str = "    common";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the update and preview commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Account whose activity is summarized
    #[arg(long, value_name = "LOGIN", env = "REPO_OWNER")]
    pub owner: Option<String>,

    /// Repository to summarize when not covering the whole account
    #[arg(long, value_name = "NAME", env = "REPO_NAME")]
    pub repo: Option<String>,

    /// Summarize every repository owned by the account instead of a single one
    #[arg(long, value_name = "BOOL", env = "CHECK_ALL_REPOS", default_value = "true", value_parser = BoolishValueParser::new())]
    pub all_repos: bool,

    /// Include private repositories when summarizing the whole account [default: from config]
    #[arg(long, value_name = "BOOL", env = "INCLUDE_PRIVATE", value_parser = BoolishValueParser::new())]
    pub include_private: Option<bool>,

    /// Number of days of activity to cover [default: from config]
    #[arg(long, value_name = "DAYS", env = "SUMMARY_DAYS")]
    pub days: Option<u32>,

    /// Number of days covered by the recently starred section [default: from config]
    #[arg(long, value_name = "DAYS", env = "STARRED_DAYS")]
    pub starred_days: Option<u32>,

    /// Path to configuration file (default is `summary.toml` in the repository root)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

/// What the digest covers.
#[derive(Debug, Clone)]
enum Scope {
    Account(String),
    Repository(RepoCoordinate),
}

/// Everything a command needs once arguments and configuration have been checked.
#[derive(Debug)]
pub struct Common {
    pub config: Config,
    cwd: Utf8PathBuf,
    client: Client,
    scope: Scope,
    window: TimeWindow,
    starred_window: TimeWindow,
    show_progress: bool,
}

impl Common {
    /// Check arguments and configuration, and build the API client.
    ///
    /// Nothing here touches the network, so every configuration problem surfaces before any
    /// request is made.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let cwd = std::env::current_dir().into_app_err("determining the current directory")?;
        let cwd = Utf8PathBuf::try_from(cwd).into_app_err("current directory is not valid UTF-8")?;
        let root = repository_root(&cwd).unwrap_or_else(|| cwd.clone());

        let mut config = Config::load(&root, args.config.as_ref())?;
        apply_overrides(&mut config, args);
        config.validate()?;

        let token = non_empty(args.github_token.as_deref())
            .ok_or_else(|| app_err!("a GitHub token is required: pass --github-token or set GITHUB_TOKEN"))?;
        let owner = non_empty(args.owner.as_deref())
            .ok_or_else(|| app_err!("an account is required: pass --owner or set REPO_OWNER"))?;

        let scope = if args.all_repos {
            Scope::Account(owner.to_string())
        } else {
            let repo = non_empty(args.repo.as_deref())
                .ok_or_else(|| app_err!("a repository is required when not summarizing all repositories: pass --repo or set REPO_NAME"))?;
            Scope::Repository(RepoCoordinate::new(owner, repo)?)
        };

        // Both windows end at the same instant.
        let now = Utc::now();
        let window = TimeWindow::trailing_days(now, config.days)?;
        let starred_window = TimeWindow::trailing_days(now, config.starred_days)?;

        let client = Client::new(Some(token), args.api_url.as_str())?;

        log::debug!(target: LOG_TARGET, "Summarizing {scope:?} over the last {} day(s)", config.days);

        Ok(Self {
            config,
            cwd,
            client,
            scope,
            window,
            starred_window,
            show_progress: args.log_level <= LogLevel::Warn && std::io::stderr().is_terminal(),
        })
    }

    /// Fetch everything the digest needs.
    pub async fn collect(&self) -> Aggregate {
        let progress = ProgressReporter::new(self.show_progress);

        let mut aggregate = match &self.scope {
            Scope::Account(owner) => aggregate_account(&self.client, owner, self.window, self.config.include_private, &progress).await,
            Scope::Repository(repo) => aggregate_repository(&self.client, repo, self.window, &progress).await,
        };

        if self.config.sections.starred {
            aggregate.starred = starred_repositories(&self.client, self.starred_window).await;
        }

        aggregate
    }

    /// Render the digest for `aggregate` using the configured sections and exclusions.
    #[must_use]
    pub fn render(&self, aggregate: &Aggregate) -> String {
        let options = RenderOptions::new(self.config.sections, self.config.excluded_repos.iter().cloned());
        render(aggregate, &options)
    }

    #[must_use]
    pub fn cwd(&self) -> &Utf8Path {
        &self.cwd
    }
}

fn apply_overrides(config: &mut Config, args: &CommonArgs) {
    if let Some(days) = args.days {
        config.days = days;
    }

    if let Some(starred_days) = args.starred_days {
        config.starred_days = starred_days;
    }

    if let Some(include_private) = args.include_private {
        config.include_private = include_private;
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when commands run more than once in a process.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
