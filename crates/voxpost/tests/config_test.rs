//! Tests for layered configuration loading.

use std::io::Write;
use tempfile::{Builder, NamedTempFile};
use voxpost::{VoxpostConfig, VoxpostErrorKind};

/// Writes `contents` to a `.toml` file that is removed when dropped.
fn temp_config(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut temp_file = Builder::new().prefix("voxpost-").suffix(".toml").tempfile()?;
    write!(temp_file, "{contents}")?;
    temp_file.flush()?;
    Ok(temp_file)
}

#[test]
fn test_bundled_defaults() -> anyhow::Result<()> {
    let config = VoxpostConfig::bundled()?;
    assert_eq!(config.generation().max_attempts(), &5);
    assert_eq!(config.generation().hashtag_minimum(), &12);
    assert_eq!(config.generation().max_output_tokens(), &1400);
    assert_eq!(config.generation().long_form_token_multiplier(), &2);
    assert!((config.generation().temperature() - 0.8).abs() < f32::EPSILON);
    assert_eq!(config.completion().api_key_env.as_deref(), Some("OPENAI_API_KEY"));
    Ok(())
}

#[test]
fn test_file_overrides_only_named_keys() -> anyhow::Result<()> {
    let temp_file =
        temp_config("[generation]\nmax_attempts = 3\n\n[completion]\nmodel = \"llama3\"\n")?;
    let config = VoxpostConfig::from_file(temp_file.path())?;

    assert_eq!(config.generation().max_attempts(), &3);
    assert_eq!(config.generation().hashtag_minimum(), &12);
    assert_eq!(config.completion().model, "llama3");
    assert_eq!(config.completion().timeout_secs, 120);
    Ok(())
}

#[test]
fn test_explicit_missing_file_is_a_config_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("voxpost.toml");
    let err = VoxpostConfig::load(Some(missing.as_path())).unwrap_err();
    assert!(matches!(err.kind(), VoxpostErrorKind::Config(_)));
    Ok(())
}

#[test]
fn test_malformed_file_is_a_config_error() -> anyhow::Result<()> {
    let temp_file = temp_config("[generation]\nmax_attempts = \"many\"\n")?;
    let err = VoxpostConfig::from_file(temp_file.path()).unwrap_err();
    assert!(matches!(err.kind(), VoxpostErrorKind::Config(_)));
    Ok(())
}
