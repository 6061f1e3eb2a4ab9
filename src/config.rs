use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{
    extract::ExtractOptions,
    lookup::LookupFunction,
    rewrite::{QuoteStyle, RewriteOptions, SemicolonStyle},
    text::{Classifier, TargetScript},
};

pub const CONFIG_FILE_NAME: &str = ".autoi18nrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

static CALLEE_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*$").unwrap());

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_true")]
    pub ignore_test_files: bool,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    #[serde(default = "default_target_locales")]
    pub target_locales: Vec<String>,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_function_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_statement: Option<String>,
    #[serde(default)]
    pub quote_style: QuoteStyle,
    #[serde(default)]
    pub semicolon_style: SemicolonStyle,
    #[serde(default = "default_true")]
    pub ignore_comments: bool,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default)]
    pub script: TargetScript,
    /// Local dictionary file for the dictionary translator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<String>,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_output_dir() -> String {
    "./locales".to_string()
}

fn default_source_locale() -> String {
    "zh-CN".to_string()
}

fn default_target_locales() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_function_name() -> String {
    "$t".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: Vec::new(),
            ignore_test_files: true,
            source_root: default_source_root(),
            output_dir: default_output_dir(),
            source_locale: default_source_locale(),
            target_locales: default_target_locales(),
            function_name: default_function_name(),
            global_function_name: None,
            import_statement: None,
            quote_style: QuoteStyle::default(),
            semicolon_style: SemicolonStyle::default(),
            ignore_comments: true,
            ignore_texts: Vec::new(),
            script: TargetScript::default(),
            dictionary: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Checks glob patterns, lookup function names and the locale list.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if !CALLEE_PATH_REGEX.is_match(&self.function_name) {
            bail!("Invalid 'functionName': \"{}\"", self.function_name);
        }
        if let Some(global) = &self.global_function_name
            && !CALLEE_PATH_REGEX.is_match(global)
        {
            bail!("Invalid 'globalFunctionName': \"{}\"", global);
        }

        if self.source_locale.trim().is_empty() {
            bail!("'sourceLocale' must not be empty");
        }
        if let Some(locale) = self.target_locales.iter().find(|l| l.trim().is_empty()) {
            bail!("Invalid locale in 'targetLocales': \"{}\"", locale);
        }

        Ok(())
    }

    pub fn lookup_function(&self) -> LookupFunction {
        let lookup = LookupFunction::new(&self.function_name);
        match &self.global_function_name {
            Some(global) => lookup.with_global_name(global),
            None => lookup,
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            lookup: self.lookup_function(),
            classifier: Classifier::new(self.script).with_ignore_texts(self.ignore_texts.iter().cloned()),
            ignore_comments: self.ignore_comments,
        }
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            lookup: self.lookup_function(),
            import_statement: self.import_statement.clone(),
            quote_style: self.quote_style,
            semicolon_style: self.semicolon_style,
            script: self.script,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory holding the config file, or the start directory when
    /// defaults are used. Relative paths in the config resolve against it.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map_or_else(|| start_dir.to_path_buf(), Path::to_path_buf);
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert_eq!(config.function_name, "$t");
        assert_eq!(config.quote_style, QuoteStyle::Double);
        assert!(config.ignore_comments);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "includes": ["src/**"],
              "sourceLocale": "zh",
              "targetLocales": ["en", "ja"],
              "functionName": "t",
              "globalFunctionName": "i18n.global.t",
              "importStatement": "import { t } from '@/i18n'",
              "quoteStyle": "single",
              "semicolonStyle": "never",
              "ignoreComments": false,
              "script": "japanese"
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.includes, vec!["src/**"]);
        assert_eq!(config.target_locales, vec!["en", "ja"]);
        assert_eq!(config.quote_style, QuoteStyle::Single);
        assert_eq!(config.semicolon_style, SemicolonStyle::Never);
        assert_eq!(config.script, TargetScript::Japanese);
        assert!(!config.ignore_comments);

        let lookup = config.lookup_function();
        assert_eq!(lookup.name_for(true), "i18n.global.t");
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "ignores": ["**/dist/**"] }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.ignores, vec!["**/dist/**"]);
        assert_eq!(config.includes, default_includes());
        assert_eq!(config.output_dir, "./locales");
        assert_eq!(config.target_locales, vec!["en"]);
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("pkg");
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "ignores": ["**/legacy/**"] }"#,
        )
        .unwrap();

        let result = load_config(&sub_dir).unwrap();
        assert!(result.from_file);
        assert_eq!(result.base_dir, dir.path());
        assert_eq!(result.config.ignores, vec!["**/legacy/**"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.base_dir, dir.path());
        assert_eq!(result.config.includes, default_includes());
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_invalid_include_pattern() {
        let config = Config {
            includes: vec!["src/**/[invalid".to_string()],
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("includes"));
    }

    #[test]
    fn test_validate_function_names() {
        let config = Config {
            function_name: "$t(".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("functionName"));

        let config = Config {
            global_function_name: Some("i18n..t".to_string()),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("globalFunctionName"));

        let config = Config {
            function_name: "i18n.global.t".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_locales() {
        let config = Config {
            target_locales: vec!["en".to_string(), " ".to_string()],
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("targetLocales"));
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "ignores": ["[invalid"] }"#).unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().unwrap();
        assert!(json.contains("\"functionName\": \"$t\""));
        assert!(!json.contains("importStatement"));
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.source_locale, "zh-CN");
    }

    #[test]
    fn test_extract_options_carry_ignore_texts() {
        let config = Config {
            ignore_texts: vec!["确定".to_string()],
            ..Default::default()
        };
        let options = config.extract_options();
        assert!(!options.classifier.is_qualifying("确定"));
        assert!(options.classifier.is_qualifying("取消"));
    }
}
