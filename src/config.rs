use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{GitAutoverError, Result};

/// Sentinel `tag` value that substitutes the current branch name as the
/// pre-release label.
pub const USE_BRANCH_NAME: &str = "use-branch-name";

/// Strategy order used when neither the global nor the branch-level
/// `strategies` list is set.
pub const DEFAULT_STRATEGIES: [&str; 3] = [
    "find-latest-tag",
    "increment-from-commits",
    "configured-next-version",
];

fn default_major_bump_message() -> Option<String> {
    Some(r"\+semver:\s?(breaking|major)".to_string())
}

fn default_minor_bump_message() -> Option<String> {
    Some(r"\+semver:\s?(feature|minor)".to_string())
}

fn default_patch_bump_message() -> Option<String> {
    Some(r"\+semver:\s?(fix|patch)".to_string())
}

fn default_no_bump_message() -> Option<String> {
    Some(r"\+semver:\s?(none|skip)".to_string())
}

fn default_tag_prefix() -> Option<String> {
    Some("[vV]".to_string())
}

/// Represents the complete configuration for git-autover.
///
/// Maps one-to-one onto `gitautover.toml`. Every field has a default, so a
/// missing or partial file is never an error.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Seed version used when the repository carries no version tags.
    pub next_version: Option<String>,

    /// Regex matched against full commit messages to force a major bump.
    pub major_version_bump_message: Option<String>,

    /// Regex matched against full commit messages to force a minor bump.
    pub minor_version_bump_message: Option<String>,

    /// Regex matched against full commit messages to force a patch bump.
    pub patch_version_bump_message: Option<String>,

    /// Regex that suppresses any bump for a matching commit.
    pub no_bump_message: Option<String>,

    /// Regex stripped from the front of tag names before semver parsing.
    pub tag_prefix: Option<String>,

    /// Commit hashes excluded from history walking and bump analysis.
    pub ignore: Vec<String>,

    /// Global bump override applied when commits exist but none carries an
    /// explicit bump signal.
    pub increment: Option<IncrementSetting>,

    /// strftime format for the `CommitDate` output variable.
    pub commit_date_format: Option<String>,

    /// Pre-release label -> weight, used to order same-numeric-version tags.
    pub tag_pre_release_weight: HashMap<String, i64>,

    /// Ordered strategy identifiers; empty means [DEFAULT_STRATEGIES].
    pub strategies: Vec<String>,

    /// Branch-name pattern (regex) -> branch policy.
    pub branches: HashMap<String, BranchPolicy>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            next_version: None,
            major_version_bump_message: default_major_bump_message(),
            minor_version_bump_message: default_minor_bump_message(),
            patch_version_bump_message: default_patch_bump_message(),
            no_bump_message: default_no_bump_message(),
            tag_prefix: default_tag_prefix(),
            ignore: Vec::new(),
            increment: None,
            commit_date_format: None,
            tag_pre_release_weight: HashMap::new(),
            strategies: Vec::new(),
            branches: HashMap::new(),
        }
    }
}

/// Per-branch versioning policy, selected by regex match on the branch name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct BranchPolicy {
    pub mode: BranchMode,

    /// Pre-release label, [USE_BRANCH_NAME], or empty for no pre-release.
    pub tag: String,

    /// Branch-level override of the global increment setting.
    pub increment: Option<IncrementSetting>,

    /// Weight embedded into the rendered pre-release string when positive.
    pub pre_release_weight: i64,

    /// Branches whose tag history is consulted before the global tag scan.
    pub source_branches: Vec<String>,

    /// Branch-level override of the strategy list.
    pub strategies: Vec<String>,

    pub is_release_branch: bool,

    /// Suppresses the default patch bump for commit sets without an
    /// explicit bump signal.
    pub prevent_increment: bool,
}

/// How a branch derives its version number.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BranchMode {
    /// Version comes from tags and commit analysis.
    #[default]
    ContinuousDeployment,
    /// Version is embedded in the branch name (e.g. `release/1.2.3`).
    SemverFromBranch,
}

/// Bump override applied when no commit carries an explicit bump signal.
///
/// `None` suppresses the fallback bump entirely; `Inherit` defers to the
/// bump detected from commit messages (i.e. also no substitution).
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum IncrementSetting {
    Major,
    Minor,
    Patch,
    None,
    Inherit,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitautover.toml` in the current directory
/// 3. `gitautover.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitautover.toml").exists() {
        fs::read_to_string("./gitautover.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("gitautover.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML configuration string.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents)
        .map_err(|e| GitAutoverError::config(format!("cannot parse configuration: {}", e)))
}
