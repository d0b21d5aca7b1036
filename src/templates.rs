//! Starter configuration templates for common branching workflows.

/// GitFlow: long-lived develop, release/hotfix branches, tagged master.
const GITFLOW: &str = r#"# GitFlow workflow configuration for git-autover
# commit-date-format = "%Y-%m-%dT%H:%M:%S%z" # optional, strftime format

[branches."^master$"]
tag = ""
increment = "Patch"
is-release-branch = true

[branches."^develop$"]
tag = "beta"
increment = "Minor"

[branches."^release/.*$"]
mode = "semver-from-branch"
tag = "rc"
increment = "Patch"
is-release-branch = true

[branches."^hotfix/.*$"]
mode = "semver-from-branch"
tag = "hotfix"
increment = "Patch"
is-release-branch = true

[branches."^feature/.*$"]
tag = "use-branch-name"
increment = "Minor"
source-branches = ["develop"]
"#;

/// GitHubFlow: a tagged main branch plus short-lived feature branches.
const GITHUBFLOW: &str = r#"# GitHubFlow workflow configuration for git-autover
# commit-date-format = "%Y-%m-%dT%H:%M:%S%z" # optional, strftime format

[branches."^main$"]
tag = ""
increment = "Patch"
is-release-branch = true

[branches."^feature/.*$"]
tag = "use-branch-name"
increment = "Minor"
source-branches = ["main"]
"#;

/// Returns the configuration template for a workflow name, or `None` for an
/// unknown workflow.
pub fn workflow_template(name: &str) -> Option<&'static str> {
    match name {
        "GitFlow" => Some(GITFLOW),
        "GitHubFlow" => Some(GITHUBFLOW),
        _ => None,
    }
}

/// Workflow names accepted by [workflow_template].
pub fn known_workflows() -> &'static [&'static str] {
    &["GitFlow", "GitHubFlow"]
}
