//! Test utilities shared across the bough workspace
//!
//! Provides throwaway git repositories ([`GitRepoTestGuard`]) and helpers for
//! shaping their history: commits with pinned timestamps, branches, checkouts
//! and fake remote-tracking refs.
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod git;

// Re-export commonly used items
pub use git::{
  GitRepoTestGuard, checkout_branch, create_branch, create_commit, create_commit_at, create_remote_ref, head_oid,
};
