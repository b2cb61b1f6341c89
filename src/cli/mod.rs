//! Command-line parsing
//!
//! Keeps clap at the edge: the rest of the crate only ever sees a [RunConfig]
//! built from [Args].

use std::ffi::OsString;

use clap::error::ErrorKind;

use crate::config::{FileConfig, RunConfig};
use crate::error::Result;

#[derive(clap::Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "git-removed-branches",
    version,
    about = "List or remove local branches whose remote branch has been deleted"
)]
pub struct Args {
    #[arg(short, long, help = "Delete the stale branches")]
    pub prune: bool,

    #[arg(short, long, help = "Force deletion of unmerged branches (with --prune)")]
    pub force: bool,

    #[arg(short, long, value_name = "REMOTE", help = "Remote to compare against [default: origin]")]
    pub remote: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, help = "Print debug logs to stderr")]
    pub verbose: bool,

    /// Extra operands are accepted and ignored
    #[arg(hide = true)]
    pub operands: Vec<String>,
}

/// What `main` should do with the command line
#[derive(Debug)]
pub enum Invocation {
    Run(Args),
    /// Flags were not understood; print the usage line and do nothing else
    Usage,
    /// `--help` or `--version`; clap renders and exits
    Info(clap::Error),
}

/// Parse arguments without letting clap exit on bad flags.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    use clap::Parser;

    match Args::try_parse_from(args) {
        Ok(args) => Invocation::Run(args),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(e)
        }
        Err(_) => Invocation::Usage,
    }
}

impl Args {
    /// Build the run configuration on top of a loaded config file
    pub fn into_run_config(self, file: FileConfig) -> Result<RunConfig> {
        RunConfig::resolve(file, self.remote, self.prune, self.force)
    }
}
