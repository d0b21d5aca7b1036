use crate::error::{GitAutoverError, Result};
use crate::git::{CommitInfo, Repository, TagRef};
use git2::Oid;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations.
///
/// History is modeled as linear parent chains: every commit may name one
/// parent, and walking follows the chain from the requested tip.
pub struct MockRepository {
    commits: HashMap<Oid, CommitInfo>,
    parents: HashMap<Oid, Oid>,
    tags: Vec<TagRef>,
    branch_tips: HashMap<String, Oid>,
    head: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            parents: HashMap::new(),
            tags: Vec::new(),
            branch_tips: HashMap::new(),
            head: None,
        }
    }

    /// Add a commit with an optional parent
    pub fn add_commit(&mut self, oid: Oid, parent: Option<Oid>, message: impl Into<String>) {
        self.commits.insert(
            oid,
            CommitInfo {
                hash: oid.to_string(),
                message: message.into(),
                time: 1_700_000_000 + self.commits.len() as i64,
            },
        );
        if let Some(parent) = parent {
            self.parents.insert(oid, parent);
        }
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, target: Oid) {
        self.tags.push(TagRef {
            name: name.into(),
            target,
        });
    }

    /// Set a branch tip
    pub fn set_branch_tip(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_tips.insert(branch.into(), oid);
    }

    /// Set the branch HEAD points at
    pub fn set_head(&mut self, branch: impl Into<String>) {
        self.head = Some(branch.into());
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head_branch(&self) -> Result<String> {
        self.head
            .clone()
            .ok_or_else(|| GitAutoverError::branch("HEAD is not set"))
    }

    fn branch_tip(&self, branch_name: &str) -> Result<Option<Oid>> {
        Ok(self.branch_tips.get(branch_name).copied())
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }

    fn walk_commits(&self, from: Oid, stop_at: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let mut commits = Vec::new();
        let mut current = Some(from);

        while let Some(oid) = current {
            if stop_at == Some(oid) {
                break;
            }
            let info = self.commits.get(&oid).ok_or_else(|| {
                GitAutoverError::branch(format!("unknown commit in mock history: {}", oid))
            })?;
            commits.push(info.clone());
            current = self.parents.get(&oid).copied();
        }

        Ok(commits)
    }
}

/// Deterministic OID for tests (byte `n` repeated).
pub fn test_oid(n: u8) -> Oid {
    Oid::from_bytes(&[n; 20]).expect("20 bytes form a valid oid")
}
