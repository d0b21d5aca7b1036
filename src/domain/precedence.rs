//! Version precedence with configurable pre-release label weights.
//!
//! Plain semver precedence orders pre-release labels lexically, which is
//! rarely what a release pipeline wants (`beta` would always outrank
//! `alpha`, even when `alpha` is the more advanced channel). The weight map
//! lets a configuration impose its own ordering between labels whenever the
//! numeric components tie.

use semver::Version;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Compares two versions, consulting `weights` to order pre-release labels.
///
/// Numeric major/minor/patch comparison wins outright. On a numeric tie a
/// final release outranks any pre-release. Between two pre-releases the
/// first dot-separated label of each is looked up in `weights`; when both
/// labels carry a weight the higher weight wins, otherwise ordering falls
/// back to plain semver precedence.
pub fn compare_with_weights(a: &Version, b: &Version, weights: &HashMap<String, i64>) -> Ordering {
    let numeric = (a.major, a.minor, a.patch).cmp(&(b.major, b.minor, b.patch));
    if numeric != Ordering::Equal {
        return numeric;
    }

    match (a.pre.is_empty(), b.pre.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => a.cmp(b),
        (false, false) => {
            let weight_a = weights.get(first_label(a.pre.as_str()));
            let weight_b = weights.get(first_label(b.pre.as_str()));
            match (weight_a, weight_b) {
                (Some(wa), Some(wb)) if wa != wb => wa.cmp(wb),
                _ => a.cmp(b),
            }
        }
    }
}

fn first_label(pre: &str) -> &str {
    pre.split('.').next().unwrap_or(pre)
}
