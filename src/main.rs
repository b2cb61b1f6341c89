use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use git_removed_branches::cli::{self, Invocation};
use git_removed_branches::config::{self, Backend};
use git_removed_branches::git::{Git2Repository, GitCli, Repository};
use git_removed_branches::{ui, StaleBranchFinder};

fn main() -> Result<()> {
    let args = match cli::parse_args(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Usage => {
            ui::display_usage();
            return Ok(());
        }
        Invocation::Info(e) => e.exit(),
    };

    init_logging(args.verbose);

    // Load configuration
    let file_config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;
    let run_config = args
        .into_run_config(file_config)
        .context("Invalid configuration")?;

    let repo: Box<dyn Repository> = match run_config.backend {
        Backend::Cli => Box::new(GitCli::new()),
        Backend::Libgit2 => {
            Box::new(Git2Repository::open(".").context("Git repository error")?)
        }
    };

    let report = match StaleBranchFinder::new(repo.as_ref()).run(&run_config) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_report(&report);

    if report.all_deletions_failed() {
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the report.
///
/// `RUST_LOG` overrides the default; `--verbose` forces debug.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
