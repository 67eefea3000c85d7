//! Command-line interface and orchestration for weekly-summary
//!
//! This module implements the CLI commands and ties the activity, digest, and document
//! modules together into end-to-end runs.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **update**: collect activity, render the digest, and patch it into the README
//! - **preview**: collect activity and print the digest without writing anything
//! - **init**: generate a default `summary.toml`
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. Update and preview share the same setup in `common`:
//!
//! 1. Initialize logging and load configuration, with command-line values taking precedence
//! 2. Check that a token, an account, and (in single-repository mode) a repository were given
//! 3. Compute the activity and starred windows from a single reading of the clock
//! 4. Collect activity, one repository at a time
//! 5. Render the digest and either print it or patch it into the document
//!
//! Steps 1 through 3 never touch the network, so configuration problems are reported
//! before any request is made.

mod common;
mod config;
mod host;
mod init;
mod preview;
mod progress_reporter;
mod run;
mod update;

#[cfg(debug_assertions)]
pub use config::Config;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use preview::{PreviewArgs, preview_digest};
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use update::{UpdateArgs, update_document};
