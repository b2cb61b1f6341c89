use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{RemovedBranchesError, Result};
use crate::git::Repository;

/// A collaborator call observed by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Fetch(String),
    ListRefs(String),
    DeleteBranch { name: String, force: bool },
}

/// Mock repository for testing without actual git operations
///
/// Holds refs as short names (`heads/<name>`, `remotes/<remote>/<name>`) in
/// insertion order and records every call made against it.
pub struct MockRepository {
    refs: RefCell<Vec<String>>,
    fetch_error: Option<String>,
    list_error: Option<String>,
    delete_errors: HashMap<String, String>,
    calls: RefCell<Vec<MockCall>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            refs: RefCell::new(Vec::new()),
            fetch_error: None,
            list_error: None,
            delete_errors: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Add a local branch (`heads/<name>`)
    pub fn add_local_branch(&mut self, name: impl AsRef<str>) {
        self.refs
            .get_mut()
            .push(format!("heads/{}", name.as_ref()));
    }

    /// Add a remote-tracking branch (`remotes/<remote>/<name>`)
    pub fn add_remote_branch(&mut self, remote: impl AsRef<str>, name: impl AsRef<str>) {
        self.refs
            .get_mut()
            .push(format!("remotes/{}/{}", remote.as_ref(), name.as_ref()));
    }

    /// Make every fetch fail with `message`
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.fetch_error = Some(message.into());
    }

    /// Make every ref listing fail with `message`
    pub fn fail_list_refs(&mut self, message: impl Into<String>) {
        self.list_error = Some(message.into());
    }

    /// Make deleting `branch` fail with `message` unless forced
    pub fn fail_delete(&mut self, branch: impl Into<String>, message: impl Into<String>) {
        self.delete_errors.insert(branch.into(), message.into());
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    /// Names of the deleted branches, in deletion order
    pub fn deleted_branches(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                MockCall::DeleteBranch { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn fetch(&self, remote: &str) -> Result<()> {
        self.calls.borrow_mut().push(MockCall::Fetch(remote.to_string()));

        match &self.fetch_error {
            Some(message) => Err(RemovedBranchesError::fetch(message.clone())),
            None => Ok(()),
        }
    }

    fn list_refs(&self, pattern: &str) -> Result<Vec<String>> {
        self.calls
            .borrow_mut()
            .push(MockCall::ListRefs(pattern.to_string()));

        if let Some(message) = &self.list_error {
            return Err(RemovedBranchesError::refs(message.clone()));
        }

        let prefix = pattern.strip_prefix("refs/").unwrap_or(pattern);
        Ok(self
            .refs
            .borrow()
            .iter()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn delete_branch(&self, name: &str, force: bool) -> Result<()> {
        self.calls.borrow_mut().push(MockCall::DeleteBranch {
            name: name.to_string(),
            force,
        });

        if !force {
            if let Some(message) = self.delete_errors.get(name) {
                return Err(RemovedBranchesError::delete(name, message.clone()));
            }
        }

        let full = format!("heads/{}", name);
        let mut refs = self.refs.borrow_mut();
        match refs.iter().position(|r| *r == full) {
            Some(index) => {
                refs.remove(index);
                Ok(())
            }
            None => Err(RemovedBranchesError::delete(
                name,
                format!("branch '{}' not found", name),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_list_refs_by_namespace() {
        let mut repo = MockRepository::new();
        repo.add_local_branch("main");
        repo.add_remote_branch("origin", "main");
        repo.add_remote_branch("upstream", "dev");

        assert_eq!(repo.list_refs("refs/heads/").unwrap(), vec!["heads/main"]);
        assert_eq!(
            repo.list_refs("refs/remotes/origin/").unwrap(),
            vec!["remotes/origin/main"]
        );
    }

    #[test]
    fn test_mock_repository_fetch_failure() {
        let mut repo = MockRepository::new();
        repo.fail_fetch("unable to access remote");

        let err = repo.fetch("origin").unwrap_err();
        assert!(err.to_string().contains("unable to access remote"));
        assert_eq!(repo.calls(), vec![MockCall::Fetch("origin".to_string())]);
    }

    #[test]
    fn test_mock_repository_delete() {
        let mut repo = MockRepository::new();
        repo.add_local_branch("gone");
        repo.add_local_branch("wip");
        repo.fail_delete("wip", "not fully merged");

        repo.delete_branch("gone", false).unwrap();
        assert!(repo.delete_branch("wip", false).is_err());
        repo.delete_branch("wip", true).unwrap();

        assert!(repo.list_refs("refs/heads/").unwrap().is_empty());
        assert_eq!(repo.deleted_branches(), vec!["gone", "wip", "wip"]);
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_refs("refs/heads/").unwrap().is_empty());
    }
}
