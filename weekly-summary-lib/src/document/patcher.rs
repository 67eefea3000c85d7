use super::region::{GreetingInsert, LooseRegion, RegionMatcher, Strategy, StrictRegion};
use crate::Result;
use camino::Utf8Path;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const LOG_TARGET: &str = "  document";

/// What happened to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The document was rewritten using the given strategy.
    Updated(Strategy),

    /// The patched text was identical to the existing document, so nothing was written.
    Unchanged(Strategy),
}

impl PatchOutcome {
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Updated(strategy) | Self::Unchanged(strategy) => *strategy,
        }
    }
}

/// Runs the region matchers in order and returns the first result.
#[derive(Debug, Clone)]
pub struct Patcher {
    strict: StrictRegion,
    loose: LooseRegion,
    greeting: GreetingInsert,
}

impl Patcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            strict: StrictRegion::new()?,
            loose: LooseRegion::new()?,
            greeting: GreetingInsert,
        })
    }

    /// Fit `digest` into `document`.
    #[must_use]
    pub fn patch(&self, document: &str, digest: &str) -> (String, Strategy) {
        let matchers: [&dyn RegionMatcher; 3] = [&self.strict, &self.loose, &self.greeting];

        for matcher in matchers {
            if let Some(patched) = matcher.apply(document, digest) {
                return (patched, matcher.strategy());
            }
        }

        // The greeting insert always applies.
        (document.to_string(), Strategy::GreetingInsert)
    }
}

/// Patch the document at `path` with `digest`, writing only if something changed.
///
/// The new content replaces the file in a single rename and is then read back to make sure
/// it landed intact.
pub fn patch_document(path: &Utf8Path, digest: &str) -> Result<PatchOutcome> {
    let original = fs::read_to_string(path).into_app_err_with(|| format!("reading document '{path}'"))?;

    let (patched, strategy) = Patcher::new()?.patch(&original, digest);
    log::info!(target: LOG_TARGET, "Patching '{path}': {strategy}");

    if patched == original {
        log::warn!(target: LOG_TARGET, "Generated digest is identical to the existing content of '{path}', nothing to write");
        return Ok(PatchOutcome::Unchanged(strategy));
    }

    if strategy == Strategy::GreetingInsert {
        log::warn!(
            target: LOG_TARGET,
            "'{path}' had no Weekly Summary heading, so the digest was inserted after the greeting; \
             add a <details> line below the digest, or the next run will replace everything after the heading"
        );
    }

    write_atomically(path, &patched)?;

    let written = fs::read_to_string(path).into_app_err_with(|| format!("re-reading document '{path}'"))?;
    if written != patched {
        bail!("verification of '{path}' failed: the file on disk doesn't match what was written");
    }

    log::info!(target: LOG_TARGET, "Updated '{path}'");
    Ok(PatchOutcome::Updated(strategy))
}

/// Replace the contents of `path` via a temporary file in the same directory.
fn write_atomically(path: &Utf8Path, contents: &str) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_str().is_empty()).unwrap_or_else(|| Utf8Path::new("."));
    let permissions = fs::metadata(path).into_app_err_with(|| format!("reading metadata of '{path}'"))?.permissions();

    let mut tmp = NamedTempFile::new_in(dir).into_app_err_with(|| format!("creating temporary file in '{dir}'"))?;
    tmp.write_all(contents.as_bytes())
        .into_app_err_with(|| format!("writing temporary file for '{path}'"))?;
    tmp.as_file()
        .sync_all()
        .into_app_err_with(|| format!("flushing temporary file for '{path}'"))?;
    tmp.as_file()
        .set_permissions(permissions)
        .into_app_err_with(|| format!("setting permissions on temporary file for '{path}'"))?;

    let _ = tmp.persist(path).into_app_err_with(|| format!("replacing '{path}'"))?;
    Ok(())
}
