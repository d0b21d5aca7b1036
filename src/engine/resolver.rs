//! Base-version resolution from repository tags.

use git2::Oid;
use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::Config;
use crate::domain::{compare_with_weights, find_branch_policy};
use crate::error::Result;
use crate::git::{Repository, TagRef};

/// Finds the base version (latest applicable prior release) and the commit
/// it is anchored to.
///
/// When the matched branch policy declares source branches, their reachable
/// tag history is searched first and a hit short-circuits the global scan.
/// Otherwise every repository tag is considered. Tag names are cleaned with
/// the configured tag-prefix regex before parsing; names that still do not
/// parse as semver are skipped, as are tags whose target commit could not
/// be resolved.
pub fn find_base_version<R: Repository>(
    repo: &R,
    config: &Config,
    branch_name: &str,
) -> Result<Option<(Version, Oid)>> {
    let prefix = compile_tag_prefix(config.tag_prefix.as_deref());

    if let Some(policy) = find_branch_policy(branch_name, &config.branches) {
        if !policy.source_branches.is_empty() {
            let found = find_on_source_branches(
                repo,
                &policy.source_branches,
                &prefix,
                &config.tag_pre_release_weight,
            )?;
            if found.is_some() {
                return Ok(found);
            }
        }
    }

    find_across_all_tags(repo, &prefix, &config.tag_pre_release_weight)
}

/// Collects version tags reachable from the named branches and picks the
/// highest. A missing source branch is skipped, not an error.
fn find_on_source_branches<R: Repository>(
    repo: &R,
    branch_names: &[String],
    prefix: &Option<Regex>,
    weights: &HashMap<String, i64>,
) -> Result<Option<(Version, Oid)>> {
    let tags = repo.list_tags()?;
    let mut tags_by_commit: HashMap<String, Vec<&TagRef>> = HashMap::new();
    for tag in &tags {
        tags_by_commit
            .entry(tag.target.to_string())
            .or_default()
            .push(tag);
    }

    let mut candidates: Vec<(Version, Oid)> = Vec::new();

    for branch_name in branch_names {
        let Some(tip) = repo.branch_tip(branch_name)? else {
            continue;
        };

        for commit in repo.walk_commits(tip, None)? {
            let Some(reachable) = tags_by_commit.get(&commit.hash) else {
                continue;
            };
            for tag in reachable {
                if let Some(version) = parse_tag_name(&tag.name, prefix) {
                    candidates.push((version, tag.target));
                }
            }
        }
    }

    Ok(pick_highest(candidates, weights))
}

/// Global scan over every repository tag.
fn find_across_all_tags<R: Repository>(
    repo: &R,
    prefix: &Option<Regex>,
    weights: &HashMap<String, i64>,
) -> Result<Option<(Version, Oid)>> {
    let candidates = repo
        .list_tags()?
        .iter()
        .filter_map(|tag| parse_tag_name(&tag.name, prefix).map(|v| (v, tag.target)))
        .collect();

    Ok(pick_highest(candidates, weights))
}

fn pick_highest(
    candidates: Vec<(Version, Oid)>,
    weights: &HashMap<String, i64>,
) -> Option<(Version, Oid)> {
    candidates.into_iter().reduce(|best, candidate| {
        match compare_with_weights(&candidate.0, &best.0, weights) {
            Ordering::Greater => candidate,
            _ => best,
        }
    })
}

/// Strips the tag prefix and parses the remainder as a semantic version.
fn parse_tag_name(name: &str, prefix: &Option<Regex>) -> Option<Version> {
    let cleaned = match prefix {
        Some(re) => match re.find(name) {
            Some(m) => &name[m.end()..],
            None => name,
        },
        None => name,
    };
    Version::parse(cleaned).ok()
}

/// Anchors the configured prefix pattern to the start of the tag name.
/// An invalid prefix pattern is treated as never matching.
fn compile_tag_prefix(pattern: Option<&str>) -> Option<Regex> {
    let pattern = pattern?;
    if pattern.is_empty() {
        return None;
    }
    Regex::new(&format!("^(?:{})", pattern)).ok()
}
