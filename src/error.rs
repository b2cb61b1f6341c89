use thiserror::Error;

/// Unified error type for git-removed-branches operations
#[derive(Error, Debug)]
pub enum RemovedBranchesError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Cannot list references: {0}")]
    Refs(String),

    #[error("Cannot delete branch '{branch}': {message}")]
    Delete { branch: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-removed-branches
pub type Result<T> = std::result::Result<T, RemovedBranchesError>;

impl RemovedBranchesError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RemovedBranchesError::Config(msg.into())
    }

    /// Create a fetch error with context
    pub fn fetch(msg: impl Into<String>) -> Self {
        RemovedBranchesError::Fetch(msg.into())
    }

    /// Create a reference listing error with context
    pub fn refs(msg: impl Into<String>) -> Self {
        RemovedBranchesError::Refs(msg.into())
    }

    /// Create a branch deletion error
    pub fn delete(branch: impl Into<String>, msg: impl Into<String>) -> Self {
        RemovedBranchesError::Delete {
            branch: branch.into(),
            message: msg.into(),
        }
    }

    /// Whether this error aborts a run.
    ///
    /// Deletion errors are reported per branch; everything else stops the pipeline.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RemovedBranchesError::Delete { .. })
    }
}
