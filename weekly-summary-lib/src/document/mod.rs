//! Locating and patching the target document
//!
//! The document is a human-edited Markdown file, normally a profile README. Only the managed
//! region, from the digest heading up to the first `<details>` line, is ever rewritten.
//!
//! Three [`RegionMatcher`]s are tried in turn and the first that applies wins:
//!
//! - [`StrictRegion`]: heading through to the `<details>` delimiter
//! - [`LooseRegion`]: heading through to the delimiter or the end of the document
//! - [`GreetingInsert`]: no heading at all, so the digest goes in below the greeting lines
//!
//! Writes replace the whole file atomically and are verified by reading the file back.

mod locate;
mod patcher;
mod region;

pub use locate::{DEFAULT_DOCUMENT, repository_root, resolve_document};
pub use patcher::{PatchOutcome, Patcher, patch_document};
pub use region::{GreetingInsert, LooseRegion, RegionMatcher, Strategy, StrictRegion};
