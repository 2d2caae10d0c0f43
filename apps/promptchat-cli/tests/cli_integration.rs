//! Integration tests for the promptchat CLI.
//!
//! Runs the built binary inside temporary directories. No test reaches a real
//! provider: every `run` invocation fails on configuration or points at a
//! closed local port.

use anyhow::Result;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs the promptchat binary with `args` inside `dir`
fn promptchat(dir: &TempDir, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_promptchat"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()?)
}

#[test]
fn test_cli_version() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = promptchat(&dir, &["--version"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("promptchat"));

    Ok(())
}

#[test]
fn test_cli_help() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = promptchat(&dir, &["--help"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("run"));
    assert!(stdout.contains("vars"));
    assert!(stdout.contains("preview"));

    Ok(())
}

#[test]
fn test_vars_lists_placeholders() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = promptchat(&dir, &["vars"])?;

    assert!(output.status.success(), "vars failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("system: [tipo_coches, tiempo_lectura]"));
    assert!(stdout.contains("user: [peticion_tipo_motor]"));
    assert!(stdout.contains("chat: [tipo_coches, tiempo_lectura, peticion_tipo_motor]"));

    Ok(())
}

#[test]
fn test_preview_uses_default_values() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = promptchat(&dir, &["preview"])?;

    assert!(output.status.success(), "preview failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains(
        "[system] Eres una IA especializada en coches de tipo japoneses y generar articulos que se leen en 10 min."
    ));
    assert!(stdout.contains("[user] Necesito un articulo para vehiculos con motor Hibrido enchufable"));

    Ok(())
}

#[test]
fn test_preview_with_overrides() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = promptchat(
        &dir,
        &[
            "preview",
            "--set",
            "tipo_coches=alemanes",
            "-s",
            "peticion_tipo_motor=Electrico",
        ],
    )?;

    assert!(output.status.success(), "preview failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("coches de tipo alemanes"));
    assert!(stdout.contains("se leen en 10 min"));
    assert!(stdout.contains("motor Electrico"));

    Ok(())
}

#[test]
fn test_preview_rejects_malformed_value() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = promptchat(&dir, &["preview", "--set", "tipo_coches"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("expected name=value"));

    Ok(())
}

#[test]
fn test_run_without_credential_file_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = promptchat(&dir, &[])?;

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("credential file not readable"));
    assert!(stderr.contains("api_key.txt"));

    Ok(())
}

#[test]
fn test_run_with_empty_credential_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("api_key.txt"), "\n")?;

    let output = promptchat(&dir, &["run"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("credential is empty"));

    Ok(())
}

#[test]
fn test_run_with_credential_flag() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("other_key.txt"), "   ")?;

    let output = promptchat(&dir, &["run", "--credential", "other_key.txt"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("other_key.txt"));

    Ok(())
}

#[test]
fn test_run_unreachable_endpoint_is_transport_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("api_key.txt"), "sk-test\n")?;
    fs::write(
        dir.path().join("promptchat.toml"),
        "base_url = \"http://127.0.0.1:9/v1\"\n",
    )?;

    let output = promptchat(&dir, &["run"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("transport error"));
    assert!(!stderr.contains("sk-test"));

    Ok(())
}

#[test]
fn test_run_invalid_config_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("promptchat.toml"), "invalid { toml")?;

    let output = promptchat(&dir, &["run"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to load configuration"));

    Ok(())
}

#[test]
fn test_run_rejects_empty_model_override() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = promptchat(&dir, &["run", "--model", ""])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("model must not be empty"));

    Ok(())
}
