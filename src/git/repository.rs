use crate::error::{GitAutoverError, Result};
use crate::git::{CommitInfo, TagRef};
use git2::{Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn head_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| GitAutoverError::branch("HEAD does not point at a named branch"))
    }

    fn branch_tip(&self, branch_name: &str) -> Result<Option<Oid>> {
        match self.repo.find_branch(branch_name, git2::BranchType::Local) {
            Ok(branch) => {
                let oid = branch.get().peel_to_commit()?.id();
                Ok(Some(oid))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitAutoverError::Branch(format!(
                "cannot resolve branch '{}': {}",
                branch_name, e
            ))),
        }
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(r) => r,
                Err(_) => continue,
            };
            // Peeling resolves annotated tags to the tagged commit; a tag
            // that does not reach a commit is skipped.
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef {
                    name: name.to_string(),
                    target: commit.id(),
                }),
                Err(_) => continue,
            }
        }

        Ok(tags)
    }

    fn walk_commits(&self, from: Oid, stop_at: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(from)?;

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;

            if stop_at == Some(oid) {
                break;
            }

            let commit = self.repo.find_commit(oid)?;
            let message = commit.message().unwrap_or("").to_string();

            commits.push(CommitInfo {
                hash: oid.to_string(),
                message,
                time: commit.time().seconds(),
            });
        }

        Ok(commits)
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Repository {}
