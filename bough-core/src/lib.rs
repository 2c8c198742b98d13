//! # Bough Core Library
//!
//! Branch-comparison engine for local git repositories. The [`GitRunner`]
//! enumerates branches and, for any pair of them, reports latest commits,
//! merge bases and the commits exclusive to each side, using only git
//! porcelain subprocesses.

pub mod batch;
pub mod branch;
pub mod config;
pub mod consts;
pub mod diff;
pub mod error;
pub mod output;
pub mod report;
pub mod resolved;
pub mod runner;
pub mod sort;

// Re-export main types
pub use branch::{Branch, BranchKind, BranchScope};
pub use config::{ConfigDirs, Settings};
pub use diff::BranchDiff;
pub use error::{BranchError, ProcessError};
pub use output::ColorMode;
pub use report::BranchComparison;
pub use resolved::Resolved;
pub use runner::{DateFormat, GitRunner, ListOptions};
pub use sort::SortMode;
