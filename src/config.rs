use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{RemovedBranchesError, Result};

/// Remote consulted when neither the command line nor the config file names one
pub const DEFAULT_REMOTE: &str = "origin";

const LOCAL_CONFIG_FILE: &str = "./gitremovedbranches.toml";
const USER_CONFIG_FILE: &str = ".gitremovedbranches.toml";

/// Which git implementation runs fetch, ref listing and deletion.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The `git` executable
    #[default]
    Cli,
    /// libgit2 through the `git2` crate
    Libgit2,
}

/// Contents of a `gitremovedbranches.toml` file.
///
/// Every key is optional; command-line flags take precedence.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub remote: Option<String>,

    #[serde(default)]
    pub backend: Backend,

    /// Regular expressions; matching branch names are never reported or pruned.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitremovedbranches.toml` in current directory
/// 3. `.gitremovedbranches.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(FileConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<FileConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(FileConfig::default());
        }
    } else {
        return Ok(FileConfig::default());
    };

    toml::from_str(&config_str).map_err(|e| RemovedBranchesError::config(e.to_string()))
}

/// Reject remote names git could not have configured.
///
/// A leading `-` would be read as an option by the `git` executable.
pub fn validate_remote_name(remote: &str) -> Result<()> {
    if remote.trim().is_empty() {
        return Err(RemovedBranchesError::config("remote name must not be empty"));
    }
    if remote.starts_with('-') {
        return Err(RemovedBranchesError::config(format!(
            "invalid remote name '{}': must not start with '-'",
            remote
        )));
    }
    if !git2::Remote::is_valid_name(remote) {
        return Err(RemovedBranchesError::config(format!(
            "invalid remote name '{}'",
            remote
        )));
    }
    Ok(())
}

/// Settings for one run, fixed before any git call is made.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub remote: String,
    /// Delete stale branches instead of only reporting them
    pub remove: bool,
    /// Force-delete branches git considers unmerged; only meaningful with `remove`
    pub force: bool,
    pub exclude: Vec<Regex>,
    pub backend: Backend,
}

impl RunConfig {
    /// Report-only configuration for `remote` with nothing excluded
    pub fn new(remote: impl Into<String>) -> Self {
        RunConfig {
            remote: remote.into(),
            remove: false,
            force: false,
            exclude: Vec::new(),
            backend: Backend::default(),
        }
    }

    /// Merge command-line values over a loaded file.
    ///
    /// `remote` from the command line wins over the file, which wins over `origin`.
    pub fn resolve(file: FileConfig, remote: Option<String>, remove: bool, force: bool) -> Result<Self> {
        let exclude = file
            .exclude
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    RemovedBranchesError::config(format!("invalid exclude pattern '{}': {}", pattern, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let remote = remote
            .or(file.remote)
            .unwrap_or_else(|| DEFAULT_REMOTE.to_string());
        validate_remote_name(&remote)?;

        Ok(RunConfig {
            remote,
            remove,
            force,
            exclude,
            backend: file.backend,
        })
    }

    /// Whether `branch` matches one of the exclude patterns
    pub fn is_excluded(&self, branch: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(branch))
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig::new(DEFAULT_REMOTE)
    }
}
