//! Translation backends.
//!
//! A backend receives a batch of source texts and returns one optional
//! translation per text, in order. `None` means the backend had nothing for
//! that text; the text stays untranslated for that locale.

mod dictionary;

pub use dictionary::DictionaryTranslator;

use anyhow::Result;

pub trait Translator: Send + Sync {
    fn name(&self) -> &'static str;

    fn translate(&self, texts: &[String], from: &str, to: &str) -> Result<Vec<Option<String>>>;
}

/// Backend that never translates. Only the source locale gets filled.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn translate(&self, texts: &[String], _from: &str, _to: &str) -> Result<Vec<Option<String>>> {
        Ok(vec![None; texts.len()])
    }
}
