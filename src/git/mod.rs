//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the three git operations
//! stale-branch detection needs, so the finder can run against the real `git`
//! executable, libgit2, or a mock.
//!
//! # Overview
//!
//! - [cli::GitCli]: runs the `git` executable (the default backend)
//! - [repository::Git2Repository]: a libgit2 implementation using the `git2` crate
//! - [mock::MockRepository]: a mock implementation for testing
//!
//! All implementations report reference names without the leading `refs/`,
//! e.g. `heads/main` or `remotes/origin/main`.

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCli;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Git collaborator used by the stale branch finder
///
/// Every call blocks until the underlying operation completes. Implementations
/// never retry.
pub trait Repository {
    /// Fetch the named remote, updating its remote-tracking branches
    ///
    /// # Returns
    /// * `Ok(())` - Remote fetched
    /// * `Err` - Unknown remote, network or authentication failure
    fn fetch(&self, remote: &str) -> Result<()>;

    /// List references under `pattern` (e.g. `refs/heads/`)
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Short names with `refs/` stripped, in enumeration order
    /// * `Err` - If the references cannot be read
    fn list_refs(&self, pattern: &str) -> Result<Vec<String>>;

    /// Delete a local branch
    ///
    /// With `force == false` the backend refuses branches it considers unmerged.
    ///
    /// # Arguments
    /// * `name` - Bare branch name (e.g. `feature-x`)
    /// * `force` - Delete even if unmerged
    fn delete_branch(&self, name: &str, force: bool) -> Result<()>;
}

/// Strip the leading `refs/` from a full reference name
pub(crate) fn short_ref_name(full: &str) -> &str {
    full.strip_prefix("refs/").unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_ref_name() {
        assert_eq!(short_ref_name("refs/heads/main"), "heads/main");
        assert_eq!(
            short_ref_name("refs/remotes/origin/main"),
            "remotes/origin/main"
        );
        assert_eq!(short_ref_name("heads/main"), "heads/main");
    }
}
