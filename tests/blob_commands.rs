use assert_cmd::Command;
use assert_fs::fixture::{FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use predicates::prelude::predicate;

mod common;

#[test]
fn new_repository_initiated_with_git_directory() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let mut sut = Command::cargo_bin("mit")?;

    sut.arg("init").arg(dir.path());

    sut.assert().success().stdout(predicate::str::contains(
        "Initialized empty Git repository in",
    ));

    let head = std::fs::read_to_string(dir.path().join(".git").join("HEAD"))?;
    assert_eq!(head, "ref: refs/heads/main\n");
    assert!(dir.path().join(".git").join("objects").is_dir());
    assert!(dir.path().join(".git").join("refs").join("heads").is_dir());

    Ok(())
}

#[test]
fn write_blob_object_successfully() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let mut cmd = Command::cargo_bin("mit")?;
    cmd.current_dir(dir.path()).arg("init");

    cmd.assert().success().stdout(predicate::str::contains(
        "Initialized empty Git repository in",
    ));

    let file_name = format!("{}.txt", Word().fake::<String>());
    let file_path = dir.child(file_name.clone());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    file_path.write_str(&file_content.clone())?;

    let mut sut = Command::cargo_bin("mit")?;
    sut.current_dir(dir.path())
        .arg("hash-object")
        .arg("-w")
        .arg(&file_name);

    sut.assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$")?);

    Ok(())
}

#[test]
fn read_blob_object_successfully() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let mut cmd = Command::cargo_bin("mit")?;
    cmd.current_dir(dir.path()).arg("init");

    cmd.assert().success().stdout(predicate::str::contains(
        "Initialized empty Git repository in",
    ));

    let file_path = dir.child("hello.txt");
    file_path.write_str("hi\n")?;

    let mut cmd = Command::cargo_bin("mit")?;
    cmd.current_dir(dir.path())
        .arg("hash-object")
        .arg("-w")
        .arg("hello.txt");

    // the blob id is a pure function of the content
    cmd.assert()
        .success()
        .stdout(predicate::eq(format!("{}\n", common::BLOB_HI_OID)));

    let mut sut = Command::cargo_bin("mit")?;
    sut.current_dir(dir.path())
        .arg("cat-file")
        .arg("-p")
        .arg(common::BLOB_HI_OID);

    sut.assert().success().stdout(predicate::eq("hi\n"));

    Ok(())
}

#[test]
fn hashing_without_write_does_not_store_the_object() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let mut cmd = Command::cargo_bin("mit")?;
    cmd.current_dir(dir.path()).arg("init");
    cmd.assert().success();

    let file_path = dir.child("hello.txt");
    file_path.write_str("hi\n")?;

    let mut cmd = Command::cargo_bin("mit")?;
    cmd.current_dir(dir.path()).arg("hash-object").arg("hello.txt");

    cmd.assert()
        .success()
        .stdout(predicate::eq(format!("{}\n", common::BLOB_HI_OID)));

    let mut sut = Command::cargo_bin("mit")?;
    sut.current_dir(dir.path())
        .arg("cat-file")
        .arg("-p")
        .arg(common::BLOB_HI_OID);

    sut.assert()
        .failure()
        .stderr(predicate::str::contains("object not found"));

    Ok(())
}

#[test]
fn cat_file_rejects_invalid_object_name() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let mut cmd = Command::cargo_bin("mit")?;
    cmd.current_dir(dir.path()).arg("init");
    cmd.assert().success();

    // one character short of a full object id
    let mut sut = Command::cargo_bin("mit")?;
    sut.current_dir(dir.path())
        .arg("cat-file")
        .arg("-p")
        .arg("45b983be36b73c0788dc9cbcb76cbb80fc7bb05");

    sut.assert()
        .failure()
        .stderr(predicate::str::contains("invalid object id"));

    Ok(())
}
