// CLI-level tests driving the compiled binary.

use std::process::Command;

use git2::{Repository, Signature};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_git-autover"))
}

fn seeded_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }

    std::fs::write(dir.path().join("file.txt"), "initial").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(std::path::Path::new("file.txt")).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let c1 = repo
        .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .unwrap();
    repo.tag_lightweight("v1.0.0", &repo.find_object(c1, None).unwrap(), false)
        .unwrap();

    std::fs::write(dir.path().join("file.txt"), "feature").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(std::path::Path::new("file.txt")).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo.find_commit(c1).unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "feat: add search", &tree, &[&parent])
        .unwrap();

    dir
}

#[test]
fn test_help_lists_subcommands() {
    let output = bin().arg("--help").output().expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("calculate"));
    assert!(stdout.contains("init"));
}

#[test]
fn test_calculate_text_output() {
    let dir = seeded_repo();

    let output = bin()
        .args(["calculate", "--path"])
        .arg(dir.path())
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Calculated next version: 1.1.0"));
}

#[test]
fn test_calculate_json_output() {
    let dir = seeded_repo();

    let output = bin()
        .args(["calculate", "--output", "json", "--path"])
        .arg(dir.path())
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["FullSemVer"], "1.1.0");
    assert_eq!(value["Major"], 1);
    assert_eq!(value["CommitsSinceVersionSource"], 1);
}

#[test]
fn test_calculate_outside_repository_fails() {
    let dir = TempDir::new().unwrap();

    let output = bin()
        .args(["calculate", "--path"])
        .arg(dir.path())
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
}

#[test]
fn test_init_writes_workflow_config() {
    let dir = TempDir::new().unwrap();

    let output = bin()
        .args(["init", "GitHubFlow"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let written = std::fs::read_to_string(dir.path().join("gitautover.toml")).unwrap();
    assert!(written.contains("^main$"));

    // A second init must not overwrite the existing file.
    let output = bin()
        .args(["init", "GitFlow"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run binary");
    assert!(output.status.success());
    let unchanged = std::fs::read_to_string(dir.path().join("gitautover.toml")).unwrap();
    assert!(unchanged.contains("^main$"));
    assert!(!unchanged.contains("^develop$"));
}

#[test]
fn test_init_unknown_workflow_fails() {
    let dir = TempDir::new().unwrap();

    let output = bin()
        .args(["init", "SvnFlow"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
}
