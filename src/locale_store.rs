use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::table::TranslationTable;

/// Per-locale JSON files: `{dir}/{locale}.json`, each a flat object mapping
/// source text to its translation.
pub struct LocaleStore {
    dir: PathBuf,
}

impl LocaleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn locale_path(&self, locale: &str) -> PathBuf {
        self.dir.join(format!("{locale}.json"))
    }

    /// Load every existing locale file into one table. Missing files are
    /// skipped; non-string values are ignored.
    pub fn load(&self, locales: &[String]) -> Result<TranslationTable> {
        let mut table = TranslationTable::new();

        for locale in locales {
            let path = self.locale_path(locale);
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let value: Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
            let Value::Object(map) = value else {
                bail!("Root of JSON file must be an object: {}", path.display());
            };

            for (source, value) in map {
                match value {
                    Value::String(text) => {
                        table.merge(&source, locale, &text);
                    }
                    other => tracing::warn!(
                        file = %path.display(),
                        key = %source,
                        "skipping non-string value: {other}"
                    ),
                }
            }
        }

        Ok(table)
    }

    /// Write one file per locale. The source locale maps each text to itself
    /// unless the table already holds an entry for it. A file is only written
    /// when its content differs from what is on disk.
    ///
    /// Returns the paths that were written.
    pub fn save(
        &self,
        table: &TranslationTable,
        source_locale: &str,
        target_locales: &[String],
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let mut written = Vec::new();
        let locales = std::iter::once(source_locale)
            .chain(target_locales.iter().map(String::as_str).filter(|l| *l != source_locale));

        for locale in locales {
            let column: BTreeMap<&str, &str> = if locale == source_locale {
                table
                    .iter()
                    .map(|(source, texts)| {
                        let text = texts.get(locale).map_or(source.as_str(), String::as_str);
                        (source.as_str(), text)
                    })
                    .collect()
            } else {
                table.locale_view(locale)
            };

            let content = serde_json::to_string_pretty(&column).context("Failed to serialize JSON")?;
            let path = self.locale_path(locale);
            if write_if_changed(&path, &format!("{content}\n"))? {
                written.push(path);
            }
        }

        Ok(written)
    }
}

/// Write `content` unless the file already holds exactly that.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(true)
}
