use std::fs;
use std::path::Path;

use assert_cmd::Command;
use git2::{IndexAddOption, Repository as GitRepository};
use predicates::prelude::*;
use tempfile::TempDir;

fn indiff(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("indiff").expect("binary");
    cmd.current_dir(dir).env_remove("INDIFF_FORMAT").env_remove("RUST_LOG");
    cmd
}

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, contents).expect("write file");
}

fn docs() -> TempDir {
    let temp = TempDir::new().expect("tempdir");
    write_file(temp.path(), "en/first.md", "# First\n\ntext\n");
    write_file(temp.path(), "en/second.md", "# Second\n");
    write_file(temp.path(), "de/first.md", "# Erste\n\nText\n");
    temp
}

fn stage_and_commit(root: &Path) {
    let repo = GitRepository::init(root).expect("init repo");
    let mut index = repo.index().expect("index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("add");
    index.write().expect("write index");
    let tree = repo
        .find_tree(index.write_tree().expect("write tree"))
        .expect("tree");
    let signature = git2::Signature::now("Test User", "test@example.com").expect("signature");
    repo.commit(Some("HEAD"), &signature, &signature, "docs", &tree, &[])
        .expect("commit");
}

#[test]
fn help_lists_usage() {
    let temp = TempDir::new().expect("tempdir");
    indiff(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--baselang"));
}

#[test]
fn reports_missing_translation_without_git() {
    let temp = docs();
    indiff(temp.path())
        .args(["en,de", "--no-git"])
        .assert()
        .success()
        .stdout("de: missing translation of: en/second.md\n");
}

#[test]
fn directory_flag_and_absolute_paths() {
    let temp = docs();
    let elsewhere = TempDir::new().expect("tempdir");
    let root = fs::canonicalize(temp.path()).expect("canonical");
    let expected = format!(
        "de: missing translation of: {}\n",
        root.join("en/second.md").display()
    );
    indiff(elsewhere.path())
        .args(["en,de", "--no-git", "-a", "-d"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn rejects_single_language() {
    let temp = docs();
    indiff(temp.path())
        .args(["en", "--no-git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("provide at least two language codes"));
}

#[test]
fn rejects_unknown_base_language() {
    let temp = docs();
    indiff(temp.path())
        .args(["en,de", "-b", "fr", "--no-git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base language 'fr'"));
}

#[test]
fn rejects_pattern_without_language_placeholder() {
    let temp = docs();
    indiff(temp.path())
        .args(["en,de", "--no-git", "-g", "**/*.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument: glob"));
}

#[test]
fn lists_predefined_patterns() {
    let temp = TempDir::new().expect("tempdir");
    indiff(temp.path())
        .arg("--list-patterns")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SUB: each language in separate subdirectory (%l/**/*.%e)",
        ))
        .stdout(predicate::str::contains("EXT: "));
}

#[test]
fn json_format_from_environment() {
    let temp = docs();
    indiff(temp.path())
        .env("INDIFF_FORMAT", "json")
        .args(["en,de", "--no-git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"missing\""))
        .stdout(predicate::str::contains("\"path\": \"en/second.md\""));
}

#[test]
fn rejects_unknown_format() {
    let temp = docs();
    indiff(temp.path())
        .args(["en,de", "--no-git", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("json, plain"));
}

#[test]
fn languages_from_config_file() {
    let temp = docs();
    write_file(
        temp.path(),
        "indiff.toml",
        "languages = [\"en\", \"de\"]\nno_git = true\n",
    );
    indiff(temp.path())
        .assert()
        .success()
        .stdout("de: missing translation of: en/second.md\n");
}

#[test]
fn warns_outside_git_repository() {
    let temp = docs();
    indiff(temp.path())
        .arg("en,de")
        .assert()
        .success()
        .stdout("de: missing translation of: en/second.md\n")
        .stderr(predicate::str::contains("git repository was not found"));
}

#[test]
fn reports_outdated_translation_with_patch() {
    let temp = docs();
    stage_and_commit(temp.path());
    write_file(temp.path(), "en/first.md", "# First\n\nupdated\n");

    indiff(temp.path())
        .args(["en,de", "--show-diff"])
        .assert()
        .success()
        .stdout(
            "de: missing translation of: en/second.md\n\
             de: modified only base: en/first.md: de/first.md\n\
             diff en/first.md\n\
             @@ -1,3 +1,3 @@\n \
             # First\n \n\
             -text\n\
             +updated\n",
        );
}
