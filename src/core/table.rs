//! In-memory translation table: source text → {locale → translated text}.

use std::collections::BTreeMap;

use crate::core::rewrite::KeySet;

pub type LocaleTexts = BTreeMap<String, String>;

/// One record per distinct source text. Records only grow: a locale entry,
/// once present, is never overwritten by a later merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    records: BTreeMap<String, LocaleTexts>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, source: &str) -> bool {
        self.records.contains_key(source)
    }

    pub fn translation(&self, source: &str, locale: &str) -> Option<&str> {
        self.records
            .get(source)
            .and_then(|texts| texts.get(locale))
            .map(String::as_str)
    }

    /// Add `text` as the `locale` translation of `source`. Returns false when
    /// the record already had an entry for `locale`.
    pub fn merge(&mut self, source: &str, locale: &str, text: &str) -> bool {
        let texts = self.records.entry(source.to_string()).or_default();
        if texts.contains_key(locale) {
            return false;
        }
        texts.insert(locale.to_string(), text.to_string());
        true
    }

    /// Texts from `texts` without a `locale` entry, in input order.
    pub fn missing<'t>(&self, texts: impl IntoIterator<Item = &'t str>, locale: &str) -> Vec<String> {
        texts
            .into_iter()
            .filter(|text| self.translation(text, locale).is_none())
            .map(str::to_string)
            .collect()
    }

    /// One locale's column: source text → translation.
    pub fn locale_view(&self, locale: &str) -> BTreeMap<&str, &str> {
        self.records
            .iter()
            .filter_map(|(source, texts)| {
                texts
                    .get(locale)
                    .map(|text| (source.as_str(), text.as_str()))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LocaleTexts)> {
        self.records.iter()
    }
}

impl KeySet for TranslationTable {
    fn has_key(&self, text: &str) -> bool {
        self.contains(text)
    }
}
