//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only Git
//! operations the versioning engine needs, allowing for a real
//! implementation backed by the `git2` crate and a mock implementation for
//! testing.
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations to enable easy testing and flexibility.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// Committer timestamp, seconds since the Unix epoch
    pub time: i64,
}

/// A tag name together with the commit it ultimately points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Target commit id, with annotated-tag indirection already resolved
    pub target: Oid,
}

/// Common git operation trait for abstraction
///
/// All access is read-only; the engine never writes to the repository.
/// Implementors must be `Send + Sync`.
pub trait Repository: Send + Sync {
    /// Name of the branch HEAD currently points at.
    fn head_branch(&self) -> Result<String>;

    /// Tip commit of a local branch.
    ///
    /// Returns `Ok(None)` when the branch does not exist; other failures
    /// are errors.
    fn branch_tip(&self, branch_name: &str) -> Result<Option<Oid>>;

    /// All repository tags, peeled to the commit they point at.
    ///
    /// Tags whose target cannot be resolved to a commit (e.g. dangling
    /// annotated tag objects) are silently skipped.
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// Commits reachable from `from`, newest first, stopping before
    /// `stop_at` when given.
    ///
    /// `stop_at` is exclusive: the walk ends as soon as that commit is
    /// reached, so arbitrarily long histories behind the anchor are never
    /// visited.
    fn walk_commits(&self, from: Oid, stop_at: Option<Oid>) -> Result<Vec<CommitInfo>>;
}
