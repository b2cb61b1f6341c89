pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod finder;
pub mod git;
pub mod ui;

pub use error::{RemovedBranchesError, Result};
pub use finder::{StaleBranchFinder, StaleReport};
