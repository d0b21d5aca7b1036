use regex::Regex;

use crate::config::Config;
use crate::domain::Bump;

/// Conventional-commit header grammar; the third capture is the breaking
/// change marker.
const CONVENTIONAL_HEADER: &str =
    r"^(feat|fix|build|chore|ci|docs|perf|refactor|revert|style|test)(\(.*\))?(!)?:";

/// Classifies commit messages into version bumps.
///
/// Checks run in a fixed order per message: the no-bump pattern
/// short-circuits everything, then conventional-commit detection, then the
/// custom major/minor/patch patterns as a fallback. Patterns are compiled
/// once; a malformed custom pattern is dropped (it never matches) and
/// reported as a warning rather than failing the invocation.
pub struct Classifier {
    conventional: Regex,
    no_bump: Option<Regex>,
    major: Option<Regex>,
    minor: Option<Regex>,
    patch: Option<Regex>,
}

impl Classifier {
    /// Builds a classifier from the configured bump-message patterns.
    ///
    /// Returns the classifier together with one warning per pattern that
    /// failed to compile.
    pub fn from_config(config: &Config) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let classifier = Classifier {
            conventional: Regex::new(CONVENTIONAL_HEADER)
                .expect("conventional commit header pattern compiles"),
            no_bump: compile_pattern("no-bump-message", &config.no_bump_message, &mut warnings),
            major: compile_pattern(
                "major-version-bump-message",
                &config.major_version_bump_message,
                &mut warnings,
            ),
            minor: compile_pattern(
                "minor-version-bump-message",
                &config.minor_version_bump_message,
                &mut warnings,
            ),
            patch: compile_pattern(
                "patch-version-bump-message",
                &config.patch_version_bump_message,
                &mut warnings,
            ),
        };

        (classifier, warnings)
    }

    /// Determines the bump implied by a single commit message.
    pub fn classify(&self, message: &str) -> Bump {
        if let Some(re) = &self.no_bump {
            if re.is_match(message) {
                return Bump::None;
            }
        }

        let header = message.lines().next().unwrap_or("");
        let captures = self.conventional.captures(header);

        let breaking_marker = captures
            .as_ref()
            .and_then(|c| c.get(3))
            .is_some_and(|m| m.as_str() == "!");
        if breaking_marker || message.contains("BREAKING CHANGE:") {
            return Bump::Major;
        }

        if let Some(captures) = &captures {
            match captures.get(1).map(|m| m.as_str()) {
                Some("feat") => return Bump::Minor,
                Some("fix") => return Bump::Patch,
                _ => {}
            }
        }

        if let Some(re) = &self.major {
            if re.is_match(message) {
                return Bump::Major;
            }
        }
        if let Some(re) = &self.minor {
            if re.is_match(message) {
                return Bump::Minor;
            }
        }
        if let Some(re) = &self.patch {
            if re.is_match(message) {
                return Bump::Patch;
            }
        }

        Bump::None
    }

    /// Aggregates the bump over a set of commit messages.
    ///
    /// The aggregate is the maximum per-commit classification, so adding a
    /// commit can only raise or preserve it.
    pub fn aggregate<'a, I>(&self, messages: I) -> Bump
    where
        I: IntoIterator<Item = &'a str>,
    {
        messages
            .into_iter()
            .map(|m| self.classify(m))
            .max()
            .unwrap_or(Bump::None)
    }
}

fn compile_pattern(
    name: &str,
    pattern: &Option<String>,
    warnings: &mut Vec<String>,
) -> Option<Regex> {
    let pattern = pattern.as_deref()?;
    if pattern.is_empty() {
        return None;
    }
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warnings.push(format!(
                "invalid regex for {}: {}; the pattern will be ignored",
                name, e
            ));
            None
        }
    }
}
