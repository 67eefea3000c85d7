use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::bail;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// Identifies one repository by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoCoordinate {
    owner: Arc<str>,
    name: Arc<str>,
}

impl RepoCoordinate {
    pub fn new(owner: &str, name: &str) -> Result<Self> {
        let owner = owner.trim();
        let name = name.trim().trim_end_matches(".git");

        if owner.is_empty() || name.is_empty() {
            bail!("invalid repository coordinate: empty owner or repository name in '{owner}/{name}'");
        }

        if owner.contains('/') || name.contains('/') {
            bail!("invalid repository coordinate: unexpected '/' in '{owner}/{name}'");
        }

        Ok(Self {
            owner: Arc::from(owner),
            name: Arc::from(name),
        })
    }

    /// Parse a coordinate from a repository URL such as `https://github.com/owner/name`.
    ///
    /// Any path segments past the repository name are ignored.
    pub fn from_url(url: &Url) -> Result<Self> {
        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        match path_segments.as_slice() {
            [owner, name, ..] => Self::new(owner, name),
            _ => bail!("invalid repository URL format: {url}"),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `owner/name` form used to tag activity with its repository.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl FromStr for RepoCoordinate {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            let url = Url::parse(s)?;
            return Self::from_url(&url);
        }

        match s.split_once('/') {
            Some((owner, name)) => Self::new(owner, name),
            None => bail!("invalid repository coordinate '{s}': expected 'owner/name'"),
        }
    }
}

impl TryFrom<String> for RepoCoordinate {
    type Error = ohno::AppError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RepoCoordinate> for String {
    fn from(value: RepoCoordinate) -> Self {
        value.to_string()
    }
}

impl Display for RepoCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
