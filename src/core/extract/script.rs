//! Script extraction: qualifying text from JS/JSX/TS/TSX sources.

use std::sync::LazyLock;

use regex::Regex;

use super::sites::{SiteCollector, SiteKind};
use super::{ExtractOptions, ExtractionResult};
use crate::core::parsers::{CommentSpans, ParsedScript, SourceKind, parse_script};
use crate::core::text::{collapse_lines, segments};

static SINGLE_QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'((?:[^'\\\n]|\\.)*)'").unwrap());
static DOUBLE_QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""((?:[^"\\\n]|\\.)*)""#).unwrap());
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]*)`").unwrap());
static TEMPLATE_EXPR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").unwrap());

pub struct ScriptExtractor<'a> {
    options: &'a ExtractOptions,
}

impl<'a> ScriptExtractor<'a> {
    pub fn new(options: &'a ExtractOptions) -> Self {
        Self { options }
    }

    /// Qualifying texts in a script source. Never fails: unparsable sources
    /// fall back to a regex scan.
    pub fn extract(&self, source: &str, kind: SourceKind) -> ExtractionResult {
        match parse_script(source, kind) {
            Ok(parsed) => self.extract_parsed(source, &parsed),
            Err(err) => {
                if !err.is_embedded_content() {
                    tracing::debug!(error = %err, "falling back to regex text scan");
                }
                self.extract_fallback(source)
            }
        }
    }

    fn extract_parsed(&self, source: &str, parsed: &ParsedScript) -> ExtractionResult {
        let collection = SiteCollector::new(source, parsed, &self.options.lookup).collect();
        let mut found = ExtractionResult::new();

        for site in collection
            .sites
            .iter()
            .filter(|site| site.context.is_extractable())
        {
            if self.options.ignore_comments && parsed.comments.contains(site.range.start) {
                continue;
            }
            match site.kind {
                SiteKind::StringLiteral | SiteKind::PlainTemplate | SiteKind::JsxAttribute => {
                    self.add(&mut found, &site.value);
                }
                SiteKind::TemplateQuasi => self.add_segments(&mut found, &site.value),
                SiteKind::JsxText => {
                    self.add_segments(&mut found, &collapse_lines(&site.value));
                }
            }
        }

        if !self.options.ignore_comments {
            self.add_comment_text(&mut found, &parsed.comments);
        }
        found
    }

    fn extract_fallback(&self, source: &str) -> ExtractionResult {
        let comments = CommentSpans::scan(source);
        let mut found = ExtractionResult::new();
        let script = self.options.classifier.script();
        let in_comment =
            |pos: usize| self.options.ignore_comments && comments.contains(pos);

        for regex in [&*SINGLE_QUOTED_REGEX, &*DOUBLE_QUOTED_REGEX] {
            for caps in regex.captures_iter(source) {
                let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let text = body.as_str();
                if in_comment(whole.start()) || text.contains('\\') || !script.any_in(text) {
                    continue;
                }
                self.add(&mut found, text);
            }
        }

        for caps in TEMPLATE_REGEX.captures_iter(source) {
            let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if in_comment(whole.start()) {
                continue;
            }
            for part in TEMPLATE_EXPR_REGEX.split(body.as_str()) {
                self.add_segments(&mut found, part);
            }
        }

        if !self.options.ignore_comments {
            self.add_comment_text(&mut found, &comments);
        }
        found
    }

    fn add(&self, found: &mut ExtractionResult, text: &str) {
        if self.options.classifier.is_qualifying(text) {
            found.insert(text.to_string());
        }
    }

    /// Add each phrase segment of a raw text run. Segments holding escape
    /// sequences are skipped: their raw and cooked forms differ.
    fn add_segments(&self, found: &mut ExtractionResult, text: &str) {
        for segment in segments(text, self.options.classifier.script()) {
            if !segment.contains('\\') {
                self.add(found, &segment);
            }
        }
    }

    fn add_comment_text(&self, found: &mut ExtractionResult, comments: &CommentSpans) {
        for block in comments.blocks() {
            self.add_segments(found, &block.text);
        }
    }
}
