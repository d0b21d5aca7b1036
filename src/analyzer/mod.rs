//! Commit message analysis - mapping commit messages to version bumps

pub mod classifier;

pub use classifier::Classifier;
