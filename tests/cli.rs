use assert_cmd::prelude::*;
use assert_fs::TempDir;
use assert_fs::assert::PathAssert;
use assert_fs::fixture::*;
use predicates::prelude::*;
use std::process::Command;

/// Runs `nbk` with its configuration isolated inside `config_home`.
fn nbk(config_home: &TempDir) -> Command {
    let bin = assert_cmd::cargo::cargo_bin!("nbk");
    let mut cmd = Command::new(bin);
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

#[test]
fn no_command() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;
    nbk(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires at least one command"));
    Ok(())
}

#[test]
fn backup_until_limit() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;
    let dir = TempDir::new()?;
    let file = dir.child("sample.txt");
    file.write_str("A test\nActual content\n")?;

    nbk(&config)
        .arg("backup")
        .arg("--limit")
        .arg("1")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sample.txt.~1~"));
    dir.child("sample.txt.~1~")
        .assert("A test\nActual content\n");

    nbk(&config)
        .arg("backup")
        .arg("-l")
        .arg("1")
        .arg(file.path())
        .assert()
        .code(73)
        .stderr(predicate::str::contains("existing backups (1) exceed limit (1)"));
    dir.child("sample.txt.~2~").assert(predicate::path::missing());
    Ok(())
}

#[test]
fn negative_limit_does_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;
    let dir = TempDir::new()?;
    let file = dir.child("sample.txt");
    file.touch()?;

    nbk(&config)
        .arg("backup")
        .arg("--limit")
        .arg("-1")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    dir.child("sample.txt.~1~").assert(predicate::path::missing());
    Ok(())
}

#[test]
fn backup_directory_requires_regular_file() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;
    let dir = TempDir::new()?;

    nbk(&config)
        .arg("backup")
        .arg("--limit")
        .arg("1")
        .arg(dir.path())
        .assert()
        .code(66)
        .stderr(predicate::str::contains("not a file"));
    Ok(())
}

#[test]
fn backup_recursive() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;
    let dir = TempDir::new()?;
    dir.child("a.txt").write_str("a")?;
    dir.child("a.txt.~1~").write_str("old a")?;
    dir.child("sub").create_dir_all()?;
    dir.child("sub/b.txt").write_str("b")?;

    nbk(&config)
        .arg("backup")
        .arg("--recursive")
        .arg("--limit")
        .arg("5")
        .arg(dir.path())
        .assert()
        .success();

    dir.child("a.txt.~2~").assert("a");
    dir.child("sub/b.txt.~1~").assert("b");
    dir.child("a.txt.~1~.~1~").assert(predicate::path::missing());
    Ok(())
}

#[test]
fn count_and_list() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;
    let dir = TempDir::new()?;
    let file = dir.child("file");
    file.touch()?;
    dir.child("file.~1~").touch()?;
    dir.child("file.~2~").touch()?;
    dir.child("file.~4~").touch()?;

    nbk(&config)
        .arg("count")
        .arg(file.path())
        .assert()
        .success()
        .stdout("2\n");

    nbk(&config)
        .arg("list")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("file.~1~"))
        .stdout(predicate::str::contains("file.~2~"))
        .stdout(predicate::str::contains("file.~4~").not());
    Ok(())
}

#[test]
fn copy_concatenates() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;
    let dir = TempDir::new()?;
    dir.child("1.txt").write_str("one\n")?;
    dir.child("2.txt").write_str("two\n")?;
    let dest = dir.child("12.txt");

    nbk(&config)
        .arg("copy")
        .arg(dest.path())
        .arg(dir.child("1.txt").path())
        .arg(dir.child("2.txt").path())
        .assert()
        .success();
    dest.assert("one\ntwo\n");

    nbk(&config)
        .arg("copy")
        .arg(dest.path())
        .arg(dir.child("1.txt").path())
        .arg(dir.child("missing.txt").path())
        .assert()
        .code(74);
    dest.assert(predicate::path::missing());
    Ok(())
}

#[test]
fn configured_limit_is_used() -> Result<(), Box<dyn std::error::Error>> {
    let config = TempDir::new()?;
    let dir = TempDir::new()?;
    let file = dir.child("sample.txt");
    file.touch()?;

    nbk(&config)
        .arg("config")
        .arg("--limit")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("limit: 1"));

    nbk(&config).arg("backup").arg(file.path()).assert().success();
    nbk(&config).arg("backup").arg(file.path()).assert().code(73);

    nbk(&config)
        .arg("config")
        .arg("--reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("limit: 10"));

    nbk(&config).arg("backup").arg(file.path()).assert().success();
    dir.child("sample.txt.~2~").assert(predicate::path::exists());
    Ok(())
}
