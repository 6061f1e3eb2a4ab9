//! Extraction: the set of distinct qualifying texts in a source.
//!
//! - `sites`: literal-site collection over a parsed script
//! - `script`: script extraction (AST walk, regex fallback)
//! - `markup`: template rule pipeline and component extraction
//!
//! Extraction never fails. Unparsable scripts degrade to a regex scan.

pub mod markup;
pub mod script;
pub mod sites;

use std::collections::BTreeSet;

pub use markup::{MarkupExtractor, MarkupRule, TemplateRule};
pub use script::ScriptExtractor;
pub use sites::{ImportRecord, LiteralSite, SiteCollection, SiteCollector, SiteContext, SiteKind};

use crate::core::lookup::LookupFunction;
use crate::core::parsers::SourceKind;
use crate::core::text::Classifier;

/// Distinct qualifying texts, ordered for stable output.
pub type ExtractionResult = BTreeSet<String>;

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub lookup: LookupFunction,
    pub classifier: Classifier,
    /// Drop candidates inside comments. When false, comment bodies are
    /// segmented and extracted too.
    pub ignore_comments: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            lookup: LookupFunction::default(),
            classifier: Classifier::default(),
            ignore_comments: true,
        }
    }
}

/// Extraction entry point dispatching on the source kind.
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn extract(&self, source: &str, kind: SourceKind) -> ExtractionResult {
        if kind.is_component() {
            self.extract_component(source)
        } else {
            self.extract_script(source, kind)
        }
    }

    pub fn extract_script(&self, source: &str, kind: SourceKind) -> ExtractionResult {
        ScriptExtractor::new(&self.options).extract(source, kind)
    }

    pub fn extract_component(&self, source: &str) -> ExtractionResult {
        MarkupExtractor::new(&self.options).extract_component(source)
    }

    pub fn extract_template(&self, markup: &str) -> ExtractionResult {
        MarkupExtractor::new(&self.options).extract_template(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_on_kind() {
        let extractor = Extractor::new(ExtractOptions::default());
        let script = extractor.extract("const a = '脚本文本';", SourceKind::Ts);
        assert!(script.contains("脚本文本"));

        let component = extractor.extract("<template><p>模板文本</p></template>", SourceKind::Vue);
        assert!(component.contains("模板文本"));
    }

    #[test]
    fn test_ignore_texts_applied_everywhere() {
        let options = ExtractOptions {
            classifier: Classifier::default().with_ignore_texts(["确定"]),
            ..ExtractOptions::default()
        };
        let extractor = Extractor::new(options);
        assert!(extractor.extract("const a = '确定';", SourceKind::Js).is_empty());
        assert!(extractor.extract_template("<b>确定</b>").is_empty());
    }
}
