use assert_cmd::Command;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::*;

mod common;

const AUTHOR_NAME: &str = "Jane Doe";
const AUTHOR_EMAIL: &str = "jane@example.com";
const AUTHOR_DATE: &str = "2005-04-07 15:13:13 -0700";

fn init_repository_with_tree(
    dir: &assert_fs::TempDir,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("mit")?;
    cmd.current_dir(dir.path()).arg("init");
    cmd.assert().success();

    dir.child("hello.txt").write_str("hi\n")?;

    let output = Command::cargo_bin("mit")?
        .current_dir(dir.path())
        .arg("write-tree")
        .output()?
        .stdout;

    Ok(String::from_utf8(output)?.trim().to_string())
}

fn commit_tree_command(
    dir: &assert_fs::TempDir,
    args: &[&str],
) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("mit")?;
    cmd.current_dir(dir.path())
        .env("GIT_AUTHOR_NAME", AUTHOR_NAME)
        .env("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL)
        .env("GIT_AUTHOR_DATE", AUTHOR_DATE);
    for arg in args {
        cmd.arg(arg);
    }
    Ok(cmd)
}

#[test]
fn write_commit_object_successfully() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let tree_oid = init_repository_with_tree(&dir)?;

    let mut sut = commit_tree_command(&dir, &["commit-tree", &tree_oid, "-m", "initial commit"])?;

    let output = sut
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$")?)
        .get_output()
        .stdout
        .clone();
    let commit_oid = String::from_utf8(output)?.trim().to_string();

    let mut cat = Command::cargo_bin("mit")?;
    cat.current_dir(dir.path())
        .arg("cat-file")
        .arg("-p")
        .arg(&commit_oid);

    cat.assert()
        .success()
        .stdout(predicate::str::starts_with(format!("tree {tree_oid}\n")))
        .stdout(predicate::str::contains(format!(
            "author {AUTHOR_NAME} <{AUTHOR_EMAIL}> 1112911993 -0700"
        )))
        .stdout(predicate::str::ends_with("\ninitial commit\n"))
        // a root commit carries no parent reference
        .stdout(predicate::str::contains("parent").not());

    Ok(())
}

#[test]
fn commit_with_parent_records_parent_line() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let tree_oid = init_repository_with_tree(&dir)?;

    let root = commit_tree_command(&dir, &["commit-tree", &tree_oid, "-m", "initial commit"])?
        .output()?
        .stdout;
    let root_oid = String::from_utf8(root)?.trim().to_string();

    let mut sut = commit_tree_command(
        &dir,
        &["commit-tree", &tree_oid, "-p", &root_oid, "-m", "second commit"],
    )?;
    let output = sut.assert().success().get_output().stdout.clone();
    let commit_oid = String::from_utf8(output)?.trim().to_string();

    let mut cat = Command::cargo_bin("mit")?;
    cat.current_dir(dir.path())
        .arg("cat-file")
        .arg("-p")
        .arg(&commit_oid);

    cat.assert()
        .success()
        .stdout(predicate::str::contains(format!("parent {root_oid}\n")));

    Ok(())
}

#[test]
fn commit_id_is_deterministic_for_fixed_author_date() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let tree_oid = init_repository_with_tree(&dir)?;

    let first = commit_tree_command(&dir, &["commit-tree", &tree_oid, "-m", "initial commit"])?
        .output()?
        .stdout;
    let second = commit_tree_command(&dir, &["commit-tree", &tree_oid, "-m", "initial commit"])?
        .output()?
        .stdout;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn commit_tree_requires_author_environment() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let tree_oid = init_repository_with_tree(&dir)?;

    let mut sut = Command::cargo_bin("mit")?;
    sut.current_dir(dir.path())
        .env_remove("GIT_AUTHOR_NAME")
        .env_remove("GIT_AUTHOR_EMAIL")
        .arg("commit-tree")
        .arg(&tree_oid)
        .arg("-m")
        .arg("initial commit");

    sut.assert()
        .failure()
        .stderr(predicate::str::contains("GIT_AUTHOR_NAME not set"));

    Ok(())
}

#[test]
fn listing_a_commit_resolves_its_root_tree() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let tree_oid = init_repository_with_tree(&dir)?;

    let commit = commit_tree_command(&dir, &["commit-tree", &tree_oid, "-m", "initial commit"])?
        .output()?
        .stdout;
    let commit_oid = String::from_utf8(commit)?.trim().to_string();

    let mut sut = Command::cargo_bin("mit")?;
    sut.current_dir(dir.path())
        .arg("ls-tree")
        .arg("--name-only")
        .arg(&commit_oid);

    sut.assert().success().stdout(predicate::eq("hello.txt\n"));

    Ok(())
}
