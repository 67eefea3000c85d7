#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for weekly-summary
//!
//! This library holds all functionality for the weekly-summary tool, which collects
//! recent GitHub activity for an account and keeps a Markdown digest of it inside a
//! profile README.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`activity`]: Fetching, windowing, and aggregating repository activity
//! - [`digest`]: Markdown rendering of aggregated activity
//! - [`document`]: Locating and patching the target document

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod activity;
pub mod digest;
pub mod document;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub use crate::commands::{Host, run};
