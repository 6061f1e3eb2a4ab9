use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::Translator;

/// Local dictionary backend: `{ "<locale>": { "<source>": "<translation>" } }`.
#[derive(Debug, Default, Clone)]
pub struct DictionaryTranslator {
    entries: HashMap<String, HashMap<String, String>>,
}

impl DictionaryTranslator {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse dictionary: {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries = serde_json::from_str(json)?;
        Ok(Self { entries })
    }
}

impl Translator for DictionaryTranslator {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn translate(&self, texts: &[String], _from: &str, to: &str) -> Result<Vec<Option<String>>> {
        let column = self.entries.get(to);
        Ok(texts
            .iter()
            .map(|text| column.and_then(|c| c.get(text).cloned()))
            .collect())
    }
}
