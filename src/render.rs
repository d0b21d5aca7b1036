//! Rendering a calculation into the output variable set.

use semver::Version;
use serde::Serialize;

use crate::config::Config;
use crate::domain::find_branch_policy;
use crate::engine::strategy::resolve_prerelease_tag;
use crate::engine::Calculation;
use crate::error::{GitAutoverError, Result};

/// Structured version result handed to the presentation layer.
///
/// `full_sem_ver` always equals the canonical rendering of
/// `major.minor.patch[-pre_release_tag]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionVariables {
    #[serde(rename = "Major")]
    pub major: u64,
    #[serde(rename = "Minor")]
    pub minor: u64,
    #[serde(rename = "Patch")]
    pub patch: u64,
    #[serde(rename = "PreReleaseTag")]
    pub pre_release_tag: String,
    #[serde(rename = "FullSemVer")]
    pub full_sem_ver: String,
    #[serde(rename = "CommitsSinceVersionSource")]
    pub commits_since_version_source: usize,
    #[serde(rename = "CommitDate")]
    pub commit_date: String,
}

/// Applies the branch pre-release policy to a calculated version and breaks
/// the result into its component fields.
///
/// A pre-release suffix is attached only when a branch policy matched and
/// either commits exist since the base or the numeric version carries no
/// pre-release yet (the freshly-branched release line case, rendered with
/// count 0). The suffix is `<tag>.<weight>.<count>` when the policy weight
/// is positive, else `<tag>.<count>`. An assembled version that does not
/// re-parse points at an unusable tag configuration and fails the
/// invocation.
pub fn build_version_variables(
    calculation: &Calculation,
    branch_name: &str,
    config: &Config,
) -> Result<VersionVariables> {
    let mut version = calculation.next_version.clone();

    if let Some(policy) = find_branch_policy(branch_name, &config.branches) {
        if calculation.commits_since_base > 0 || version.pre.is_empty() {
            let tag = resolve_prerelease_tag(&Some(policy.tag.as_str()), branch_name);
            if !tag.is_empty() {
                let prerelease = if policy.pre_release_weight > 0 {
                    format!(
                        "{}.{}.{}",
                        tag, policy.pre_release_weight, calculation.commits_since_base
                    )
                } else {
                    format!("{}.{}", tag, calculation.commits_since_base)
                };
                let assembled = format!(
                    "{}.{}.{}-{}",
                    version.major, version.minor, version.patch, prerelease
                );
                version = Version::parse(&assembled).map_err(|e| {
                    GitAutoverError::version(format!(
                        "assembled version '{}' is not valid semver: {}",
                        assembled, e
                    ))
                })?;
            }
        }
    }

    Ok(VersionVariables {
        major: version.major,
        minor: version.minor,
        patch: version.patch,
        pre_release_tag: version.pre.as_str().to_string(),
        full_sem_ver: version.to_string(),
        commits_since_version_source: calculation.commits_since_base,
        commit_date: calculation.commit_date.clone().unwrap_or_default(),
    })
}
