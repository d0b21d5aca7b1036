use regex::Regex;
use std::collections::HashMap;

use crate::config::BranchPolicy;

/// Resolves which branch policy applies to a branch name.
///
/// Every pattern in `policies` is evaluated as a regular expression against
/// `branch_name`. Among the patterns that match, the textually longest one
/// wins; a longer pattern is assumed to be the more specific one. Ties on
/// length break lexicographically on the pattern string, so the result is
/// deterministic regardless of map iteration order. Patterns that fail to
/// compile are skipped.
pub fn find_branch_policy<'a>(
    branch_name: &str,
    policies: &'a HashMap<String, BranchPolicy>,
) -> Option<&'a BranchPolicy> {
    let mut best: Option<(&str, &BranchPolicy)> = None;

    for (pattern, policy) in policies {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };
        if !re.is_match(branch_name) {
            continue;
        }

        let better = match best {
            None => true,
            Some((current, _)) => {
                pattern.len() > current.len()
                    || (pattern.len() == current.len() && pattern.as_str() < current)
            }
        };
        if better {
            best = Some((pattern, policy));
        }
    }

    best.map(|(_, policy)| policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(tag: &str) -> BranchPolicy {
        BranchPolicy {
            tag: tag.to_string(),
            ..BranchPolicy::default()
        }
    }

    fn policies(entries: &[(&str, &str)]) -> HashMap<String, BranchPolicy> {
        entries
            .iter()
            .map(|(pattern, tag)| (pattern.to_string(), policy(tag)))
            .collect()
    }

    #[test]
    fn test_simple_match() {
        let map = policies(&[("^develop$", "alpha")]);
        assert_eq!(find_branch_policy("develop", &map).unwrap().tag, "alpha");
    }

    #[test]
    fn test_no_match_returns_none() {
        let map = policies(&[("^develop$", "alpha")]);
        assert!(find_branch_policy("main", &map).is_none());
    }

    #[test]
    fn test_longest_pattern_wins() {
        let map = policies(&[
            ("^feature/.*$", "feature"),
            ("^feature/urgent-.*$", "urgent"),
        ]);
        assert_eq!(
            find_branch_policy("feature/urgent-fix", &map).unwrap().tag,
            "urgent"
        );
        assert_eq!(
            find_branch_policy("feature/login", &map).unwrap().tag,
            "feature"
        );
    }

    #[test]
    fn test_equal_length_ties_break_lexicographically() {
        // Both patterns are 9 characters and both match "release/1";
        // '^' sorts before 'r', so the anchored pattern wins.
        let map = policies(&[("^release/", "anchored"), ("release/1", "literal")]);
        assert_eq!(
            find_branch_policy("release/1", &map).unwrap().tag,
            "anchored"
        );
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let map = policies(&[("([", "broken"), ("^develop$", "alpha")]);
        assert_eq!(find_branch_policy("develop", &map).unwrap().tag, "alpha");
    }

    #[test]
    fn test_unanchored_pattern_matches_substring() {
        let map = policies(&[("hotfix", "hotfix")]);
        assert_eq!(
            find_branch_policy("team/hotfix/crash", &map).unwrap().tag,
            "hotfix"
        );
    }
}
