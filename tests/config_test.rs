use std::fs;

use git_autover::config::{load_config, BranchMode, Config, IncrementSetting};
use serial_test::serial;

#[test]
#[serial]
fn test_defaults_when_no_file_present() {
    let dir = tempfile::tempdir().unwrap();
    let original = std::env::current_dir().unwrap();

    // Run from an empty directory so no project file is picked up.
    std::env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    std::env::set_current_dir(original).unwrap();

    let config = config.unwrap();
    assert!(config.next_version.is_none());
    assert!(config.branches.is_empty());
    assert_eq!(config.tag_prefix.as_deref(), Some("[vV]"));
}

#[test]
#[serial]
fn test_project_file_is_discovered_from_cwd() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("gitautover.toml"),
        "next-version = \"4.0.0\"",
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    std::env::set_current_dir(original).unwrap();

    assert_eq!(config.unwrap().next_version.as_deref(), Some("4.0.0"));
}

#[test]
fn test_full_configuration_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gitautover.toml");
    fs::write(
        &path,
        r#"
next-version = "1.0.0"
major-version-bump-message = "BREAKING"
no-bump-message = "skip-release"
tag-prefix = "ver-"
ignore = ["0123456789abcdef0123456789abcdef01234567"]
increment = "Minor"
strategies = ["find-latest-tag", "increment-from-commits"]

[tag-pre-release-weight]
alpha = 2000
beta = 1000

[branches."^develop$"]
tag = "alpha"

[branches."^release/.*$"]
mode = "semver-from-branch"
tag = "rc"
prevent-increment = true
"#,
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.next_version.as_deref(), Some("1.0.0"));
    assert_eq!(config.major_version_bump_message.as_deref(), Some("BREAKING"));
    assert_eq!(config.no_bump_message.as_deref(), Some("skip-release"));
    assert_eq!(config.tag_prefix.as_deref(), Some("ver-"));
    assert_eq!(config.ignore.len(), 1);
    assert_eq!(config.increment, Some(IncrementSetting::Minor));
    assert_eq!(config.strategies.len(), 2);
    assert_eq!(config.tag_pre_release_weight["alpha"], 2000);
    assert_eq!(config.branches["^develop$"].tag, "alpha");
    assert_eq!(
        config.branches["^release/.*$"].mode,
        BranchMode::SemverFromBranch
    );
    assert!(config.branches["^release/.*$"].prevent_increment);
}

#[test]
fn test_partial_file_keeps_defaults_for_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gitautover.toml");
    fs::write(&path, "[branches.\"^develop$\"]\ntag = \"alpha\"\n").unwrap();

    let config = load_config(Some(&path)).unwrap();
    let defaults = Config::default();
    assert_eq!(
        config.patch_version_bump_message,
        defaults.patch_version_bump_message
    );
    assert_eq!(config.tag_prefix, defaults.tag_prefix);
    assert_eq!(config.branches.len(), 1);
}
