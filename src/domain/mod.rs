//! Domain logic - pure versioning rules independent of git operations

pub mod branch;
pub mod bump;
pub mod precedence;

pub use branch::find_branch_policy;
pub use bump::{bump_version, Bump};
pub use precedence::compare_with_weights;
