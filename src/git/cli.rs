use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, warn};

use crate::error::{RemovedBranchesError, Result};
use crate::git::{short_ref_name, Repository};

/// Repository backed by the `git` executable
///
/// Honors the user's git configuration (credential helpers, SSH setup,
/// `branch -d` merge checks) because git itself does the work.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    work_dir: Option<PathBuf>,
}

impl GitCli {
    /// Run git in the current working directory
    pub fn new() -> Self {
        GitCli { work_dir: None }
    }

    /// Run git inside `path`
    pub fn in_dir<P: AsRef<Path>>(path: P) -> Self {
        GitCli {
            work_dir: Some(path.as_ref().to_path_buf()),
        }
    }

    fn run(&self, args: &[&str]) -> std::io::Result<Output> {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        debug!(command = %args.join(" "), "running git");
        cmd.args(args).output()
    }
}

/// Error text for a failed git invocation: stderr, trimmed, else the exit status
fn failure_message(args: &[&str], output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim_end();
    if stderr.is_empty() {
        format!("`git {}` exited with {}", args.join(" "), output.status)
    } else {
        stderr.to_string()
    }
}

/// Short ref names from `for-each-ref` output, one per line.
///
/// A name that is not valid UTF-8 could not be passed back to git intact, so it
/// is skipped with a warning.
fn parse_ref_lines(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .filter_map(|line| match std::str::from_utf8(line) {
            Ok(name) => Some(short_ref_name(name).to_string()),
            Err(_) => {
                warn!(
                    reference = %String::from_utf8_lossy(line),
                    "skipping reference with a non UTF-8 name"
                );
                None
            }
        })
        .collect()
}

impl Repository for GitCli {
    fn fetch(&self, remote: &str) -> Result<()> {
        // Without --prune, tracking refs of deleted remote branches survive the fetch.
        let args = ["fetch", "--prune", "--", remote];
        let output = self
            .run(&args)
            .map_err(|e| RemovedBranchesError::fetch(format!("could not execute `git`: {}", e)))?;

        if !output.status.success() {
            return Err(RemovedBranchesError::fetch(failure_message(&args, &output)));
        }
        Ok(())
    }

    fn list_refs(&self, pattern: &str) -> Result<Vec<String>> {
        let args = ["for-each-ref", "--format=%(refname)", "--", pattern];
        let output = self
            .run(&args)
            .map_err(|e| RemovedBranchesError::refs(format!("could not execute `git`: {}", e)))?;

        if !output.status.success() {
            return Err(RemovedBranchesError::refs(failure_message(&args, &output)));
        }

        Ok(parse_ref_lines(&output.stdout))
    }

    fn delete_branch(&self, name: &str, force: bool) -> Result<()> {
        let flag = if force { "-D" } else { "-d" };
        let args = ["branch", flag, "--", name];
        let output = self
            .run(&args)
            .map_err(|e| RemovedBranchesError::delete(name, format!("could not execute `git`: {}", e)))?;

        if !output.status.success() {
            return Err(RemovedBranchesError::delete(
                name,
                failure_message(&args, &output),
            ));
        }
        Ok(())
    }
}
