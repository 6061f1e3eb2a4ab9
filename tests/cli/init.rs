use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .autoi18nrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".autoi18nrc.json").exists());
    let content = test.read_file(".autoi18nrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["functionName"], "$t");
    assert_eq!(parsed["sourceLocale"], "zh-CN");
    assert!(parsed.get("targetLocales").is_some());
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".autoi18nrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .autoi18nrc.json already exists
    ");
    assert_eq!(test.read_file(".autoi18nrc.json")?, "{}");

    Ok(())
}
