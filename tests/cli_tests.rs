// End-to-end tests for the thrl6p-manifest binary

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("thrl6p-manifest"));
    cmd.env_remove("THRL6P_PATCHES_PATH")
        .env_remove("THRL6P_MANIFEST_PATH")
        .env_remove("RUST_LOG");
    cmd
}

const LEAD: &str = r#"{"data":{"tone":{"gain":1},"meta":{"name":"Lead"}}}"#;

#[test]
fn test_writes_manifest_and_exits_zero() -> Result<()> {
    let temp = TempDir::new()?;
    let patches = temp.path().join("patches");
    fs::create_dir(&patches)?;
    fs::write(patches.join("lead.thrl6p"), LEAD)?;
    fs::write(patches.join("broken.thrl6p"), "nope")?;
    let manifest_path = temp.path().join("out.json");

    let output = bin()
        .arg("--patches-path")
        .arg(&patches)
        .arg("--manifest-path")
        .arg(&manifest_path)
        .output()?;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.thrl6p"), "stderr: {}", stderr);
    assert!(stderr.contains("Updated manifest"), "stderr: {}", stderr);

    let written: Value = serde_json::from_str(&fs::read_to_string(&manifest_path)?)?;
    assert_eq!(written.as_array().map(|a| a.len()), Some(1));
    assert_eq!(written[0]["name"], "Lead");

    Ok(())
}

#[test]
fn test_defaults_to_files_and_manifest_json() -> Result<()> {
    let temp = TempDir::new()?;
    fs::create_dir(temp.path().join("files"))?;
    fs::write(temp.path().join("files/lead.thrl6p"), LEAD)?;

    let output = bin().current_dir(temp.path()).output()?;

    assert!(output.status.success());
    assert!(temp.path().join("manifest.json").exists());

    Ok(())
}

#[test]
fn test_env_overrides_paths() -> Result<()> {
    let temp = TempDir::new()?;
    let patches = temp.path().join("env-patches");
    fs::create_dir(&patches)?;
    fs::write(patches.join("lead.thrl6p"), LEAD)?;
    let manifest_path = temp.path().join("env.json");

    let output = bin()
        .env("THRL6P_PATCHES_PATH", &patches)
        .env("THRL6P_MANIFEST_PATH", &manifest_path)
        .output()?;

    assert!(output.status.success());
    assert!(manifest_path.exists());

    Ok(())
}

#[test]
fn test_missing_directory_exits_nonzero_without_output() -> Result<()> {
    let temp = TempDir::new()?;
    let manifest_path = temp.path().join("manifest.json");

    let output = bin()
        .arg("--patches-path")
        .arg(temp.path().join("absent"))
        .arg("--manifest-path")
        .arg(&manifest_path)
        .output()?;

    assert_eq!(output.status.code(), Some(3));
    assert!(!manifest_path.exists());

    Ok(())
}

#[test]
fn test_missing_directory_leaves_prior_manifest() -> Result<()> {
    let temp = TempDir::new()?;
    let manifest_path = temp.path().join("manifest.json");
    fs::write(&manifest_path, "[\"previous\"]\n")?;

    let output = bin()
        .arg("--patches-path")
        .arg(temp.path().join("absent"))
        .arg("--manifest-path")
        .arg(&manifest_path)
        .output()?;

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&manifest_path)?, "[\"previous\"]\n");

    Ok(())
}

#[test]
fn test_quiet_suppresses_warnings() -> Result<()> {
    let temp = TempDir::new()?;
    let patches = temp.path().join("patches");
    fs::create_dir(&patches)?;
    fs::write(patches.join("broken.thrl6p"), "nope")?;

    let output = bin()
        .arg("-q")
        .arg("--patches-path")
        .arg(&patches)
        .arg("--manifest-path")
        .arg(temp.path().join("manifest.json"))
        .output()?;

    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    Ok(())
}
