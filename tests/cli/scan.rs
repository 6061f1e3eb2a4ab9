use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "src/App.vue",
        "<template><button>提交</button></template>\n",
    )?;
    test.write_file("src/api.ts", "export const msg = '请求失败';\nconst id = 'user-id';\n")?;
    Ok(test)
}

#[test]
fn test_scan_reports_new_texts() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    src/App.vue
      提交  new
    src/api.ts
      请求失败  new
    ✘ Scanned 2 source files: 2 texts, 2 new

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_known_texts_succeeds() -> Result<()> {
    let test = project()?;
    test.write_file(
        "locales/zh-CN.json",
        "{\n  \"提交\": \"提交\",\n  \"请求失败\": \"请求失败\"\n}\n",
    )?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    src/App.vue
      提交
    src/api.ts
      请求失败
    ✓ Scanned 2 source files: 2 texts, 0 new

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_honors_source_root_override() -> Result<()> {
    let test = CliTest::with_file("app/src/main.js", "alert('操作成功');\n")?;

    assert_cmd_snapshot!(test.scan_command().args(["--source-root", "app"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    src/main.js
      操作成功  new
    ✘ Scanned 1 source file: 1 text, 1 new

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_invalid_config_is_error() -> Result<()> {
    let test = CliTest::with_file(".autoi18nrc.json", r#"{ "functionName": "not valid!" }"#)?;

    assert_cmd_snapshot!(test.scan_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid 'functionName': "not valid!"
    "#);

    Ok(())
}
