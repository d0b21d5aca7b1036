use git2::Oid;
use semver::Version;

use crate::domain::Bump;

/// Working state threaded through the strategy pipeline.
///
/// Created fresh per invocation and passed by value from stage to stage, so
/// every mutation is visible in the pipeline loop and the "first strategy to
/// decide wins" contract stays auditable.
#[derive(Debug, Clone)]
pub struct VersionContext {
    /// Branch being versioned.
    pub branch: String,
    /// Last finalized release point, when one was found.
    pub base_version: Option<Version>,
    /// Commit the base version tag is anchored to.
    pub base_commit: Option<Oid>,
    /// The decided next version; set by the strategy that ends the pipeline.
    pub next_version: Option<Version>,
    /// Bump detected (or substituted) from the commit set.
    pub bump: Bump,
    /// Surviving commits between the branch tip and the anchor.
    pub commits_since_base: usize,
    /// Formatted committer date of the newest surviving commit.
    pub latest_commit_date: Option<String>,
}

impl VersionContext {
    pub fn new(branch: impl Into<String>) -> Self {
        VersionContext {
            branch: branch.into(),
            base_version: None,
            base_commit: None,
            next_version: None,
            bump: Bump::None,
            commits_since_base: 0,
            latest_commit_date: None,
        }
    }
}

/// Final outcome of the pipeline, consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub next_version: Version,
    pub commits_since_base: usize,
    /// Formatted committer date of the newest commit since the base, when
    /// any exists.
    pub commit_date: Option<String>,
}
