//! Stale branch detection and pruning
//!
//! Runs the linear pipeline: fetch the remote, list local branches, list the
//! remote's tracking branches, diff them by name, then report or delete.

use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::domain::find_stale;
use crate::error::{RemovedBranchesError, Result};
use crate::git::Repository;

const LOCAL_BRANCHES: &str = "refs/heads/";

/// Outcome of deleting a single stale branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub branch: String,
    /// `Err` holds the message the backend gave for refusing the deletion
    pub result: std::result::Result<(), String>,
}

impl DeletionOutcome {
    pub fn is_deleted(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleReport {
    pub remote: String,
    /// Stale branch names in local enumeration order
    pub stale: Vec<String>,
    /// Whether deletion was requested for this run
    pub prune_requested: bool,
    /// One entry per attempted deletion; empty unless pruning
    pub deletions: Vec<DeletionOutcome>,
}

impl StaleReport {
    pub fn is_empty(&self) -> bool {
        self.stale.is_empty()
    }

    pub fn failed_deletions(&self) -> impl Iterator<Item = &DeletionOutcome> {
        self.deletions.iter().filter(|outcome| !outcome.is_deleted())
    }

    /// True when deletions were attempted and none of them succeeded
    pub fn all_deletions_failed(&self) -> bool {
        !self.deletions.is_empty() && self.deletions.iter().all(|o| !o.is_deleted())
    }
}

/// Finds local branches whose remote-tracking counterpart is gone
pub struct StaleBranchFinder<'a, R: Repository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: Repository + ?Sized> StaleBranchFinder<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        StaleBranchFinder { repo }
    }

    /// Fetch, detect and optionally prune.
    ///
    /// Fetch and listing failures abort the run. Deletion failures are
    /// recorded in the report and never stop the remaining deletions.
    pub fn run(&self, config: &RunConfig) -> Result<StaleReport> {
        let remote = config.remote.as_str();

        debug!(remote, "fetching remote");
        self.repo.fetch(remote)?;

        let local = self.repo.list_refs(LOCAL_BRANCHES)?;
        let remote_tracking = self.repo.list_refs(&format!("refs/remotes/{}/", remote))?;
        debug!(
            local = local.len(),
            remote_tracking = remote_tracking.len(),
            "listed references"
        );

        let stale: Vec<String> = find_stale(&local, &remote_tracking, remote)
            .into_iter()
            .filter(|branch| {
                let excluded = config.is_excluded(branch);
                if excluded {
                    debug!(branch = %branch, "excluded by configuration");
                }
                !excluded
            })
            .collect();
        info!(remote, count = stale.len(), "stale branch detection finished");

        let deletions = if config.remove {
            self.prune(&stale, config.force)
        } else {
            Vec::new()
        };

        Ok(StaleReport {
            remote: remote.to_string(),
            stale,
            prune_requested: config.remove,
            deletions,
        })
    }

    fn prune(&self, stale: &[String], force: bool) -> Vec<DeletionOutcome> {
        stale
            .iter()
            .map(|branch| {
                let result = self.repo.delete_branch(branch, force).map_err(|e| {
                    warn!(branch = %branch, error = %e, "branch deletion failed");
                    match e {
                        RemovedBranchesError::Delete { message, .. } => message,
                        other => other.to_string(),
                    }
                });
                DeletionOutcome {
                    branch: branch.clone(),
                    result,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;
    use crate::git::mock::{MockCall, MockRepository};

    fn repo_with(local: &[&str], remote: &[&str]) -> MockRepository {
        let mut repo = MockRepository::new();
        for name in local {
            repo.add_local_branch(name);
        }
        for name in remote {
            repo.add_remote_branch("origin", name);
        }
        repo
    }

    #[test]
    fn test_run_reports_stale_branch() {
        let repo = repo_with(&["main", "feature-x"], &["main"]);
        let report = StaleBranchFinder::new(&repo)
            .run(&RunConfig::default())
            .unwrap();

        assert_eq!(report.stale, vec!["feature-x"]);
        assert!(report.deletions.is_empty());
        assert_eq!(
            repo.calls(),
            vec![
                MockCall::Fetch("origin".to_string()),
                MockCall::ListRefs("refs/heads/".to_string()),
                MockCall::ListRefs("refs/remotes/origin/".to_string()),
            ]
        );
    }

    #[test]
    fn test_fetch_failure_stops_before_listing() {
        let mut repo = repo_with(&["main"], &[]);
        repo.fail_fetch("unable to access remote");

        let err = StaleBranchFinder::new(&repo)
            .run(&RunConfig::default())
            .unwrap_err();

        assert!(err.to_string().contains("unable to access remote"));
        assert_eq!(repo.calls(), vec![MockCall::Fetch("origin".to_string())]);
    }

    #[test]
    fn test_listing_failure_is_fatal() {
        let mut repo = repo_with(&["main"], &[]);
        repo.fail_list_refs("bad object");

        let err = StaleBranchFinder::new(&repo)
            .run(&RunConfig::default())
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_report_only_ignores_force() {
        let repo = repo_with(&["gone"], &[]);
        let config = RunConfig {
            force: true,
            ..RunConfig::default()
        };

        let report = StaleBranchFinder::new(&repo).run(&config).unwrap();

        assert_eq!(report.stale, vec!["gone"]);
        assert!(!report.prune_requested);
        assert!(repo.deleted_branches().is_empty());
    }

    #[test]
    fn test_prune_continues_after_failure() {
        let mut repo = repo_with(&["a", "b", "c"], &[]);
        repo.fail_delete("b", "the branch 'b' is not fully merged");
        let config = RunConfig {
            remove: true,
            ..RunConfig::default()
        };

        let report = StaleBranchFinder::new(&repo).run(&config).unwrap();

        assert_eq!(repo.deleted_branches(), vec!["a", "b", "c"]);
        let failed: Vec<_> = report.failed_deletions().map(|o| o.branch.as_str()).collect();
        assert_eq!(failed, vec!["b"]);
        assert_eq!(
            report.deletions[1].result,
            Err("the branch 'b' is not fully merged".to_string())
        );
        assert!(!report.all_deletions_failed());
    }

    #[test]
    fn test_force_reaches_collaborator() {
        let mut repo = repo_with(&["wip"], &[]);
        repo.fail_delete("wip", "not fully merged");
        let config = RunConfig {
            remove: true,
            force: true,
            ..RunConfig::default()
        };

        let report = StaleBranchFinder::new(&repo).run(&config).unwrap();

        assert!(report.deletions[0].is_deleted());
        assert!(repo.calls().contains(&MockCall::DeleteBranch {
            name: "wip".to_string(),
            force: true,
        }));
    }

    #[test]
    fn test_all_deletions_failed() {
        let mut repo = repo_with(&["a"], &[]);
        repo.fail_delete("a", "not fully merged");
        let config = RunConfig {
            remove: true,
            ..RunConfig::default()
        };

        let report = StaleBranchFinder::new(&repo).run(&config).unwrap();
        assert!(report.all_deletions_failed());
    }

    #[test]
    fn test_nothing_stale_means_no_deletions() {
        let repo = repo_with(&["main"], &["main"]);
        let config = RunConfig {
            remove: true,
            ..RunConfig::default()
        };

        let report = StaleBranchFinder::new(&repo).run(&config).unwrap();
        assert!(report.is_empty());
        assert!(report.deletions.is_empty());
        assert!(!report.all_deletions_failed());
    }

    #[test]
    fn test_excluded_branches_are_not_reported() {
        let repo = repo_with(&["release/1.0", "topic"], &[]);
        let file = FileConfig {
            exclude: vec!["^release/".to_string()],
            ..FileConfig::default()
        };
        let config = RunConfig::resolve(file, None, true, false).unwrap();

        let report = StaleBranchFinder::new(&repo).run(&config).unwrap();

        assert_eq!(report.stale, vec!["topic"]);
        assert_eq!(repo.deleted_branches(), vec!["topic"]);
    }

    #[test]
    fn test_second_run_after_prune_is_clean() {
        let repo = repo_with(&["main", "old"], &["main"]);
        let config = RunConfig {
            remove: true,
            ..RunConfig::default()
        };
        let finder = StaleBranchFinder::new(&repo);

        assert_eq!(finder.run(&config).unwrap().stale, vec!["old"]);
        assert!(finder.run(&config).unwrap().is_empty());
    }
}
