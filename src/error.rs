use thiserror::Error;

/// Unified error type for git-autover operations
#[derive(Error, Debug)]
pub enum GitAutoverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-autover
pub type Result<T> = std::result::Result<T, GitAutoverError>;

impl GitAutoverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitAutoverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitAutoverError::Version(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        GitAutoverError::Branch(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitAutoverError::Tag(msg.into())
    }
}
