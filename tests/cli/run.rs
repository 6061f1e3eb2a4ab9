use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_run_dry_run_changes_nothing() -> Result<()> {
    let test = CliTest::with_file("src/api.ts", "export const msg = '请求失败';")?;

    assert_cmd_snapshot!(test.run_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Would rewrite src/api.ts (1 replacement)
    Translations: 0 added, 1 missing
    ✘ 1 new text for locales, 1 file to rewrite.
    Run with --apply to write these changes.

    ----- stderr -----
    ");

    assert_eq!(test.read_file("src/api.ts")?, "export const msg = '请求失败';");
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_run_apply_rewrites_and_stores() -> Result<()> {
    let test = CliTest::with_file("src/api.ts", "export const msg = '请求失败';")?;
    test.write_file("src/App.vue", "<template><button>提交</button></template>\n")?;

    assert_cmd_snapshot!(test.run_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Rewrote src/App.vue (1 replacement)
    Rewrote src/api.ts (1 replacement)
    Translations: 0 added, 2 missing
    Wrote locales/zh-CN.json
    Wrote locales/en.json
    ✓ Processed 2 source files, 2 new texts

    ----- stderr -----
    ");

    insta::assert_snapshot!(test.read_file("src/api.ts")?, @r#"export const msg = $t("请求失败");"#);
    assert!(test.read_file("src/App.vue")?.contains("{{ $t('提交') }}"));
    assert_eq!(
        test.read_file("locales/zh-CN.json")?,
        "{\n  \"提交\": \"提交\",\n  \"请求失败\": \"请求失败\"\n}\n"
    );
    assert_eq!(test.read_file("locales/en.json")?, "{}\n");

    // second pass only reports the untranslated texts
    assert_cmd_snapshot!(test.run_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Translations: 0 added, 2 missing
    ✓ Checked 2 source files - nothing to do

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_run_with_dictionary_and_import() -> Result<()> {
    let test = CliTest::with_file(
        ".autoi18nrc.json",
        r#"{
  "targetLocales": ["en"],
  "dictionary": "dict.json",
  "importStatement": "import { $t } from '@/i18n';"
}"#,
    )?;
    test.write_file("dict.json", r#"{ "en": { "保存": "Save" } }"#)?;
    test.write_file("src/save.js", "export const label = \"保存\";\n")?;

    assert_cmd_snapshot!(test.run_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Rewrote src/save.js (1 replacement)
    Translations: 1 added, 0 missing
    Wrote locales/zh-CN.json
    Wrote locales/en.json
    ✓ Processed 1 source file, 1 new text

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("src/save.js")?,
        "import { $t } from '@/i18n';\nexport const label = $t(\"保存\");\n"
    );
    assert_eq!(test.read_file("locales/en.json")?, "{\n  \"保存\": \"Save\"\n}\n");

    Ok(())
}

#[test]
fn test_run_output_dir_override() -> Result<()> {
    let test = CliTest::with_file("src/a.ts", "const a = '你好';\n")?;

    assert_cmd_snapshot!(test.run_command().args(["--apply", "--output-dir", "i18n"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Rewrote src/a.ts (1 replacement)
    Translations: 0 added, 1 missing
    Wrote i18n/zh-CN.json
    Wrote i18n/en.json
    ✓ Processed 1 source file, 1 new text

    ----- stderr -----
    ");

    assert!(test.root().join("i18n/zh-CN.json").exists());
    assert!(!test.root().join("locales").exists());

    Ok(())
}
