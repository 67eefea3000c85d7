use crate::Result;
use crate::activity::RepoCoordinate;
use crate::digest::Sections;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = "summary.toml";

const DEFAULT_DAYS: u32 = 7;
const DEFAULT_STARRED_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of days of activity covered by the digest
    #[serde(default = "default_days")]
    pub days: u32,

    /// Number of days covered by the recently starred section
    #[serde(default = "default_starred_days")]
    pub starred_days: u32,

    /// Whether private repositories are included when summarizing a whole account
    #[serde(default = "default_include_private")]
    pub include_private: bool,

    /// Repositories left out of the per-repository commit listing
    #[serde(default)]
    pub excluded_repos: Vec<RepoCoordinate>,

    /// Optional digest sections
    #[serde(default)]
    pub sections: Sections,
}

const fn default_days() -> u32 {
    DEFAULT_DAYS
}

const fn default_starred_days() -> u32 {
    DEFAULT_STARRED_DAYS
}

const fn default_include_private() -> bool {
    true
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `summary.toml` in `root` is used when present.
    pub fn load(root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = root.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.days == 0 {
            return Err(app_err!("days must be at least 1"));
        }

        if self.starred_days == 0 {
            return Err(app_err!("starred_days must be at least 1"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            starred_days: DEFAULT_STARRED_DAYS,
            include_private: default_include_private(),
            excluded_repos: Vec::new(),
            sections: Sections::default(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_toml_matches_default() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_validate_zero_days() {
        let config = Config { days: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_zero_starred_days() {
        let config = Config { starred_days: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_parse_excluded_repos() {
        let config: Config = toml::from_str(r#"excluded_repos = ["octocat/noise", "https://github.com/octocat/spam"]"#).unwrap();

        let names: Vec<_> = config.excluded_repos.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["octocat/noise", "octocat/spam"]);
        assert_eq!(config.days, 7);
    }

    #[test]
    fn test_parse_rejects_malformed_excluded_repo() {
        let _ = toml::from_str::<Config>(r#"excluded_repos = ["not-a-coordinate"]"#).unwrap_err();
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let _ = toml::from_str::<Config>("weeks = 2").unwrap_err();
        let _ = toml::from_str::<Config>("[sections]\ncommits = false").unwrap_err();
    }

    #[test]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = Utf8PathBuf::try_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        Config::save_default(&output_path).unwrap();

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert_eq!(Config::load(&root, Some(&output_path)).unwrap(), Config::default());
        assert_eq!(Config::load(&root, None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        assert_eq!(Config::load(&root, None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let _ = Config::load(&root, Some(&root.join("nope.toml"))).unwrap_err();
    }

    #[test]
    fn test_load_rejects_zero_days() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(root.join(CONFIG_FILE_NAME), "days = 0").unwrap();

        let _ = Config::load(&root, None).unwrap_err();
    }
}
