use std::collections::HashSet;

use crate::domain::BranchRef;

/// Compute the stale local branches.
///
/// A local ref is stale when its counterpart `remotes/<remote>/<name>` is not in
/// `remote_tracking`. Membership is an exact string comparison. The result holds
/// bare branch names in the order `local` was enumerated.
///
/// Entries of `local` outside the `heads/` namespace are not branches and are skipped.
pub fn find_stale(local: &[String], remote_tracking: &[String], remote: &str) -> Vec<String> {
    let known: HashSet<&str> = remote_tracking.iter().map(String::as_str).collect();

    local
        .iter()
        .filter_map(|short| BranchRef::parse(short).filter(BranchRef::is_local))
        .filter(|branch| {
            branch
                .tracking_counterpart(remote)
                .map(|counterpart| !known.contains(counterpart.to_string().as_str()))
                .unwrap_or(false)
        })
        .map(|branch| branch.branch_name().to_string())
        .collect()
}
