//! The increment strategy pipeline.
//!
//! Strategies form a closed set dispatched through a fixed `match`; the
//! ordered-list-of-identifiers configuration surface selects and orders
//! them. The pipeline threads a [VersionContext] by value through each
//! stage and stops at the first stage that decides a next version.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use regex::Regex;
use semver::{Prerelease, Version};

use crate::analyzer::Classifier;
use crate::config::{BranchMode, Config, IncrementSetting, DEFAULT_STRATEGIES, USE_BRANCH_NAME};
use crate::domain::{bump_version, find_branch_policy, Bump};
use crate::engine::context::{Calculation, VersionContext};
use crate::engine::resolver::find_base_version;
use crate::error::{GitAutoverError, Result};
use crate::git::Repository;

const DEFAULT_COMMIT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Whether a strategy ended the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Decided,
    Continue,
}

/// The closed set of versioning strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Seeds the base version and anchor commit; never decides.
    FindLatestTag,
    /// Derives the next version from the commits since the base.
    IncrementFromCommits,
    /// Uses the configured `next-version` as a literal seed.
    ConfiguredNextVersion,
}

impl Strategy {
    /// Resolves a configured strategy identifier.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "find-latest-tag" => Ok(Strategy::FindLatestTag),
            "increment-from-commits" => Ok(Strategy::IncrementFromCommits),
            "configured-next-version" => Ok(Strategy::ConfiguredNextVersion),
            other => Err(GitAutoverError::config(format!(
                "unknown strategy: {}",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FindLatestTag => "find-latest-tag",
            Strategy::IncrementFromCommits => "increment-from-commits",
            Strategy::ConfiguredNextVersion => "configured-next-version",
        }
    }

    fn run<R: Repository>(
        &self,
        repo: &R,
        config: &Config,
        classifier: &Classifier,
        ctx: VersionContext,
    ) -> Result<(VersionContext, Outcome)> {
        match self {
            Strategy::FindLatestTag => find_latest_tag(repo, config, ctx),
            Strategy::IncrementFromCommits => {
                increment_from_commits(repo, config, classifier, ctx)
            }
            Strategy::ConfiguredNextVersion => configured_next_version(config, ctx),
        }
    }
}

/// Builds the strategy list for a branch: the branch-level override wins
/// over the global list, and an empty list means the default order.
pub fn build_strategies(config: &Config, branch_name: &str) -> Result<Vec<Strategy>> {
    let policy = find_branch_policy(branch_name, &config.branches);

    let names: Vec<&str> = match policy {
        Some(p) if !p.strategies.is_empty() => p.strategies.iter().map(String::as_str).collect(),
        _ if !config.strategies.is_empty() => {
            config.strategies.iter().map(String::as_str).collect()
        }
        _ => DEFAULT_STRATEGIES.to_vec(),
    };

    names.iter().map(|name| Strategy::from_name(name)).collect()
}

/// Runs the strategy pipeline for a branch and returns the calculation the
/// renderer consumes.
///
/// When no strategy decides a next version, a found base version is
/// returned unchanged with zero commits since; with nothing found at all
/// the result defaults to `0.1.0`.
pub fn calculate_next_version<R: Repository>(
    repo: &R,
    config: &Config,
    classifier: &Classifier,
    branch_name: &str,
) -> Result<Calculation> {
    let strategies = build_strategies(config, branch_name)?;

    let mut ctx = VersionContext::new(branch_name);
    for strategy in &strategies {
        let (next_ctx, outcome) = strategy.run(repo, config, classifier, ctx)?;
        ctx = next_ctx;
        if outcome == Outcome::Decided {
            break;
        }
    }

    Ok(match ctx.next_version {
        Some(next_version) => Calculation {
            next_version,
            commits_since_base: ctx.commits_since_base,
            commit_date: ctx.latest_commit_date,
        },
        None => Calculation {
            next_version: ctx.base_version.unwrap_or_else(|| Version::new(0, 1, 0)),
            commits_since_base: 0,
            commit_date: None,
        },
    })
}

fn find_latest_tag<R: Repository>(
    repo: &R,
    config: &Config,
    mut ctx: VersionContext,
) -> Result<(VersionContext, Outcome)> {
    if ctx.base_version.is_some() {
        return Ok((ctx, Outcome::Continue));
    }

    if let Some((version, anchor)) = find_base_version(repo, config, &ctx.branch)? {
        ctx.base_version = Some(version);
        ctx.base_commit = Some(anchor);
    }

    // Seeding only; later strategies decide.
    Ok((ctx, Outcome::Continue))
}

fn increment_from_commits<R: Repository>(
    repo: &R,
    config: &Config,
    classifier: &Classifier,
    mut ctx: VersionContext,
) -> Result<(VersionContext, Outcome)> {
    if ctx.next_version.is_some() {
        return Ok((ctx, Outcome::Continue));
    }
    let Some(base) = ctx.base_version.clone() else {
        return Ok((ctx, Outcome::Continue));
    };

    let tip = repo.branch_tip(&ctx.branch)?.ok_or_else(|| {
        GitAutoverError::branch(format!("cannot resolve branch '{}'", ctx.branch))
    })?;

    let commits = repo.walk_commits(tip, ctx.base_commit)?;
    let surviving: Vec<_> = commits
        .iter()
        .filter(|c| !config.ignore.iter().any(|sha| sha == &c.hash))
        .collect();

    ctx.commits_since_base = surviving.len();
    ctx.latest_commit_date = surviving
        .first()
        .map(|c| format_commit_date(c.time, config.commit_date_format.as_deref()));

    let policy = find_branch_policy(&ctx.branch, &config.branches);

    // Branches in semver-from-branch mode carry their version literally in
    // the branch name; commit messages are not inspected. A branch name
    // without a version falls through to normal classification.
    if policy.is_some_and(|p| p.mode == BranchMode::SemverFromBranch) {
        if let Some(version) = version_from_branch_name(&ctx.branch) {
            let mut version = version;
            let tag = resolve_prerelease_tag(&policy.map(|p| p.tag.as_str()), &ctx.branch);
            if !tag.is_empty() {
                version.pre = Prerelease::new(&format!("{}.1", tag)).map_err(|e| {
                    GitAutoverError::version(format!(
                        "branch '{}' yields an invalid pre-release: {}",
                        ctx.branch, e
                    ))
                })?;
            }
            ctx.next_version = Some(version);
            ctx.bump = Bump::None;
            return Ok((ctx, Outcome::Decided));
        }
    }

    let mut highest = classifier.aggregate(surviving.iter().map(|c| c.message.as_str()));

    let prevent_increment = policy.is_some_and(|p| p.prevent_increment);
    if highest == Bump::None && !surviving.is_empty() && !prevent_increment {
        let setting = policy
            .and_then(|p| p.increment)
            .or(config.increment)
            .unwrap_or(IncrementSetting::Patch);
        highest = match setting {
            IncrementSetting::Major => Bump::Major,
            IncrementSetting::Minor => Bump::Minor,
            IncrementSetting::Patch => Bump::Patch,
            // `None` suppresses the fallback; `Inherit` keeps the detected
            // aggregate, which is `None` here.
            IncrementSetting::None | IncrementSetting::Inherit => Bump::None,
        };
    }

    ctx.bump = highest;
    if highest != Bump::None {
        ctx.next_version = Some(bump_version(&base, highest));
        return Ok((ctx, Outcome::Decided));
    }

    Ok((ctx, Outcome::Continue))
}

fn configured_next_version(
    config: &Config,
    mut ctx: VersionContext,
) -> Result<(VersionContext, Outcome)> {
    if ctx.base_version.is_some() || ctx.next_version.is_some() {
        return Ok((ctx, Outcome::Continue));
    }

    let Some(configured) = config.next_version.as_deref().filter(|s| !s.is_empty()) else {
        return Ok((ctx, Outcome::Continue));
    };

    let version = Version::parse(configured).map_err(|e| {
        GitAutoverError::config(format!("invalid next-version '{}': {}", configured, e))
    })?;

    ctx.next_version = Some(version);
    Ok((ctx, Outcome::Decided))
}

/// Extracts the first `major.minor.patch` triple embedded in a branch name.
fn version_from_branch_name(branch_name: &str) -> Option<Version> {
    let re = Regex::new(r"\d+\.\d+\.\d+").ok()?;
    let m = re.find(branch_name)?;
    Version::parse(m.as_str()).ok()
}

/// Resolves a policy tag to the concrete pre-release label: the
/// use-branch-name sentinel substitutes the branch name, and `/` becomes
/// `-` so the label stays a valid semver identifier.
pub(crate) fn resolve_prerelease_tag(tag: &Option<&str>, branch_name: &str) -> String {
    let tag = tag.unwrap_or("");
    let tag = if tag == USE_BRANCH_NAME { branch_name } else { tag };
    tag.replace('/', "-")
}

/// Formats a committer timestamp per the configured strftime format; an
/// invalid format string falls back to RFC 3339.
pub(crate) fn format_commit_date(seconds: i64, format: Option<&str>) -> String {
    let Some(date) = DateTime::<Utc>::from_timestamp(seconds, 0) else {
        return String::new();
    };

    let format = format.unwrap_or(DEFAULT_COMMIT_DATE_FORMAT);
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return date.to_rfc3339();
    }
    date.format_with_items(items.iter()).to_string()
}
