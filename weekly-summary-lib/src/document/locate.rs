use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::bail;

const LOG_TARGET: &str = "  document";

/// The document updated when none is given.
pub const DEFAULT_DOCUMENT: &str = "README.md";

/// Find the nearest directory at or above `start` that contains `.git`.
#[must_use]
pub fn repository_root(start: &Utf8Path) -> Option<Utf8PathBuf> {
    start.ancestors().find(|dir| dir.join(".git").exists()).map(Utf8Path::to_path_buf)
}

/// Work out which file to patch.
///
/// Absolute paths are used as given. Relative paths are looked up under the repository root
/// containing `cwd` first, then under `cwd` itself. A document that can't be found is an error.
pub fn resolve_document(path: &Utf8Path, cwd: &Utf8Path) -> Result<Utf8PathBuf> {
    if path.is_absolute() {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }

        bail!("document '{path}' does not exist");
    }

    if let Some(root) = repository_root(cwd) {
        let candidate = root.join(path);
        if candidate.is_file() {
            log::debug!(target: LOG_TARGET, "Using document '{candidate}' under repository root '{root}'");
            return Ok(candidate);
        }
    }

    let candidate = cwd.join(path);
    if candidate.is_file() {
        log::debug!(target: LOG_TARGET, "Using document '{candidate}' under the current directory");
        return Ok(candidate);
    }

    bail!("document '{path}' not found under the repository root or '{cwd}'");
}
