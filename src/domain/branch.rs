use std::fmt;

const HEADS_PREFIX: &str = "heads/";
const REMOTES_PREFIX: &str = "remotes/";

/// A short reference name, namespaced by kind.
///
/// Local branches look like `heads/<name>`, remote-tracking branches like
/// `remotes/<remote>/<name>`. The value is the whole identity of the ref.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BranchRef {
    Local(String),
    RemoteTracking { remote: String, name: String },
}

impl BranchRef {
    /// Create a local branch reference from a bare branch name
    pub fn local(name: impl Into<String>) -> Self {
        BranchRef::Local(name.into())
    }

    /// Create a remote-tracking reference from a remote and a bare branch name
    pub fn remote_tracking(remote: impl Into<String>, name: impl Into<String>) -> Self {
        BranchRef::RemoteTracking {
            remote: remote.into(),
            name: name.into(),
        }
    }

    /// Classify a short ref name.
    ///
    /// Returns `None` for anything outside the `heads/` and `remotes/` namespaces.
    /// A remote-tracking name without a `/` after the remote is also rejected.
    pub fn parse(short: &str) -> Option<Self> {
        if let Some(name) = short.strip_prefix(HEADS_PREFIX) {
            if name.is_empty() {
                return None;
            }
            return Some(BranchRef::local(name));
        }

        let rest = short.strip_prefix(REMOTES_PREFIX)?;
        let (remote, name) = rest.split_once('/')?;
        if remote.is_empty() || name.is_empty() {
            return None;
        }
        Some(BranchRef::remote_tracking(remote, name))
    }

    /// The name of the expected remote-tracking counterpart under `remote`.
    ///
    /// Pure prefix substitution: `heads/<name>` becomes `remotes/<remote>/<name>`.
    /// Upstream configuration is never consulted.
    pub fn tracking_counterpart(&self, remote: &str) -> Option<BranchRef> {
        match self {
            BranchRef::Local(name) => Some(BranchRef::remote_tracking(remote, name.clone())),
            BranchRef::RemoteTracking { .. } => None,
        }
    }

    /// Branch name with the namespace stripped
    pub fn branch_name(&self) -> &str {
        match self {
            BranchRef::Local(name) => name,
            BranchRef::RemoteTracking { name, .. } => name,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, BranchRef::Local(_))
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchRef::Local(name) => write!(f, "{}{}", HEADS_PREFIX, name),
            BranchRef::RemoteTracking { remote, name } => {
                write!(f, "{}{}/{}", REMOTES_PREFIX, remote, name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local() {
        let branch = BranchRef::parse("heads/feature/login").unwrap();
        assert!(branch.is_local());
        assert_eq!(branch.branch_name(), "feature/login");
    }

    #[test]
    fn test_parse_remote_tracking() {
        let branch = BranchRef::parse("remotes/origin/feature/login").unwrap();
        assert_eq!(
            branch,
            BranchRef::remote_tracking("origin", "feature/login")
        );
        assert_eq!(branch.branch_name(), "feature/login");
    }

    #[test]
    fn test_parse_rejects_other_namespaces() {
        assert_eq!(BranchRef::parse("tags/v1.0.0"), None);
        assert_eq!(BranchRef::parse("heads/"), None);
        assert_eq!(BranchRef::parse("remotes/origin"), None);
        assert_eq!(BranchRef::parse("main"), None);
    }

    #[test]
    fn test_tracking_counterpart() {
        let local = BranchRef::local("main");
        let counterpart = local.tracking_counterpart("upstream").unwrap();
        assert_eq!(counterpart.to_string(), "remotes/upstream/main");
    }

    #[test]
    fn test_remote_tracking_has_no_counterpart() {
        let remote = BranchRef::remote_tracking("origin", "main");
        assert_eq!(remote.tracking_counterpart("origin"), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for short in ["heads/main", "remotes/origin/release/1.x"] {
            assert_eq!(BranchRef::parse(short).unwrap().to_string(), short);
        }
    }
}
