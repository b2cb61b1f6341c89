use std::path::Path;

use git2::{BranchType, Repository as Git2Repo};
use tracing::{debug, warn};

use crate::error::{RemovedBranchesError, Result};
use crate::git::short_ref_name;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Whether `branch_name` may be deleted without force.
    ///
    /// Mirrors `git branch -d` closely enough: the branch must not be checked out
    /// and its tip must be reachable from HEAD.
    fn check_safe_delete(&self, branch: &git2::Branch<'_>, branch_name: &str) -> Result<()> {
        if branch.is_head() {
            return Err(RemovedBranchesError::delete(
                branch_name,
                "cannot delete the branch that is checked out",
            ));
        }

        let tip = branch.get().target().ok_or_else(|| {
            RemovedBranchesError::delete(branch_name, "branch has no target")
        })?;
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| RemovedBranchesError::delete(branch_name, e.message()))?
            .id();

        let merged = tip == head
            || self
                .repo
                .graph_descendant_of(head, tip)
                .map_err(|e| RemovedBranchesError::delete(branch_name, e.message()))?;

        if !merged {
            return Err(RemovedBranchesError::delete(
                branch_name,
                "the branch is not fully merged",
            ));
        }
        Ok(())
    }
}

/// Fetch callbacks trying SSH keys from ~/.ssh, then the SSH agent, then defaults.
fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }

            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }
        }

        git2::Cred::default()
    });
    callbacks
}

impl super::Repository for Git2Repository {
    fn fetch(&self, remote: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| RemovedBranchesError::fetch(format!("Cannot find remote '{}': {}", remote, e.message())))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());
        fetch_options.prune(git2::FetchPrune::On);

        debug!(remote, "fetching with libgit2");
        // Empty refspec list means the remote's configured fetch refspecs.
        remote_handle
            .fetch(&[] as &[&str], Some(&mut fetch_options), None)
            .map_err(|e| RemovedBranchesError::fetch(e.message()))?;

        Ok(())
    }

    fn list_refs(&self, pattern: &str) -> Result<Vec<String>> {
        let glob = format!("{}*", pattern);
        let references = self
            .repo
            .references_glob(&glob)
            .map_err(|e| RemovedBranchesError::refs(e.message()))?;

        let mut names = Vec::new();
        for reference in references {
            let reference = reference.map_err(|e| RemovedBranchesError::refs(e.message()))?;
            match reference.name() {
                Some(name) => names.push(short_ref_name(name).to_string()),
                None => warn!(
                    reference = %String::from_utf8_lossy(reference.name_bytes()),
                    "skipping reference with a non UTF-8 name"
                ),
            }
        }

        // for-each-ref order
        names.sort();
        Ok(names)
    }

    fn delete_branch(&self, name: &str, force: bool) -> Result<()> {
        let mut branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .map_err(|e| RemovedBranchesError::delete(name, e.message()))?;

        if !force {
            self.check_safe_delete(&branch, name)?;
        }

        branch
            .delete()
            .map_err(|e| RemovedBranchesError::delete(name, e.message()))?;

        Ok(())
    }
}
