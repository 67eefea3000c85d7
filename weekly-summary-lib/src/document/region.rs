use crate::Result;
use crate::digest::HEADING;
use core::fmt::{Display, Formatter};
use ohno::IntoAppError;
use regex::Regex;

/// The digest heading, with an optional emoji between `##` and the title.
const HEADING_PATTERN: &str = r"##[ \t]+(?:\p{Extended_Pictographic}\x{FE0F}?[ \t]*)?Weekly Summary";

/// Line index the digest is inserted at when the document has no heading yet.
const GREETING_LINES: usize = 2;

/// How the digest was placed into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Replaced the region between the heading and the `<details>` delimiter.
    Strict,

    /// Replaced the region between the heading and the end of the document.
    Loose,

    /// Inserted below the greeting because no heading was found.
    GreetingInsert,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Strict => write!(f, "replaced the section ending at <details>"),
            Self::Loose => write!(f, "replaced the section running to the end of the document"),
            Self::GreetingInsert => write!(f, "inserted a new section after the greeting"),
        }
    }
}

/// One way of fitting a digest into a document.
pub trait RegionMatcher {
    fn strategy(&self) -> Strategy;

    /// Produce the patched document, or `None` if this matcher doesn't apply.
    fn apply(&self, document: &str, digest: &str) -> Option<String>;
}

/// Matches the heading up to, but not including, the first following `\n<details>`.
#[derive(Debug, Clone)]
pub struct StrictRegion {
    pattern: Regex,
}

impl StrictRegion {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(&format!(r"(?s)(?P<region>(?P<heading>{HEADING_PATTERN}).*?)\n<details>")).into_app_err("compiling section pattern")?;
        Ok(Self { pattern })
    }
}

impl RegionMatcher for StrictRegion {
    fn strategy(&self) -> Strategy {
        Strategy::Strict
    }

    fn apply(&self, document: &str, digest: &str) -> Option<String> {
        replace_region(&self.pattern, document, digest)
    }
}

/// Matches the heading up to the first following `\n<details>` or the end of the document.
#[derive(Debug, Clone)]
pub struct LooseRegion {
    pattern: Regex,
}

impl LooseRegion {
    pub fn new() -> Result<Self> {
        let pattern =
            Regex::new(&format!(r"(?s)(?P<region>(?P<heading>{HEADING_PATTERN}).*?)(?:\n<details>|\z)")).into_app_err("compiling section pattern")?;
        Ok(Self { pattern })
    }
}

impl RegionMatcher for LooseRegion {
    fn strategy(&self) -> Strategy {
        Strategy::Loose
    }

    fn apply(&self, document: &str, digest: &str) -> Option<String> {
        replace_region(&self.pattern, document, digest)
    }
}

/// Inserts the digest after the first two lines, where a profile README keeps its greeting.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingInsert;

impl RegionMatcher for GreetingInsert {
    fn strategy(&self) -> Strategy {
        Strategy::GreetingInsert
    }

    fn apply(&self, document: &str, digest: &str) -> Option<String> {
        let mut lines: Vec<&str> = document.split('\n').collect();
        let block = format!("\n{digest}");
        lines.insert(GREETING_LINES.min(lines.len()), &block);
        Some(lines.join("\n"))
    }
}

/// Replace the first matched region with the digest.
///
/// The heading already in the document is kept as written, so an emoji inside it survives.
fn replace_region(pattern: &Regex, document: &str, digest: &str) -> Option<String> {
    let captures = pattern.captures(document)?;
    let region = captures.name("region")?;
    let heading = captures.name("heading").map_or(HEADING, |m| m.as_str());

    let digest = digest.trim_end();
    let body = digest
        .strip_prefix(HEADING)
        .map_or_else(|| format!("{digest}\n"), |rest| format!("{heading}{rest}\n"));

    let mut patched = String::with_capacity(document.len() + body.len());
    patched.push_str(document.get(..region.start())?);
    patched.push_str(&body);
    patched.push_str(document.get(region.end()..)?);
    Some(patched)
}
