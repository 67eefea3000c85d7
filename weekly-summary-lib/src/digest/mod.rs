//! Markdown rendering of aggregated activity
//!
//! Rendering is a pure function of an [`Aggregate`](crate::activity::Aggregate) and a set of
//! [`RenderOptions`]. The output always starts with the [`HEADING`] line, which is also what the
//! document patcher searches for when replacing a previous digest.
//!
//! # Layout
//!
//! Sections are separated by a blank line and always appear in the same order:
//!
//! - overview, when a totals record exists
//! - commit activity, grouped by repository
//! - pull requests, issues, and releases, each only when enabled
//! - recently starred repositories, unless disabled

mod commits;
mod common;
mod options;
mod renderer;
mod sections;
mod starred;

pub use options::{RenderOptions, Sections};
pub use renderer::{HEADING, render};
