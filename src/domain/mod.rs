//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod stale;

pub use branch::BranchRef;
pub use stale::find_stale;
