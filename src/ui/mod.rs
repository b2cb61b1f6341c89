//! User interface module - terminal output.
//!
//! `formatter` holds all message text; this module re-exports it and owns the
//! usage line printed for unrecognized flags.

pub mod formatter;

pub use formatter::{
    display_error, display_report, display_status, display_success, format_deletion,
    format_force_hint, format_prune_hint, format_stale_branches, NO_STALE_BRANCHES,
    PRUNING_NOTICE,
};

/// One-line usage printed instead of running when the command line is not understood
pub const USAGE: &str =
    "Usage: git removed-branches [-p|--prune] [-f|--force] [-r|--remote <remote>]";

pub fn display_usage() {
    println!("{}", USAGE);
}
