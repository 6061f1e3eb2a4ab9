//! Markup extraction: qualifying text from component templates.
//!
//! Template markup is never parsed. A fixed pipeline of regex rules each
//! proposes candidates, and every candidate is post-filtered by the
//! classifier. Rules overlap on purpose; the result is a set.

use std::sync::LazyLock;

use enum_dispatch::enum_dispatch;
use regex::Regex;

use super::script::ScriptExtractor;
use super::{ExtractOptions, ExtractionResult};
use crate::core::parsers::{SourceKind, split_component};
use crate::core::text::TargetScript;

static INTER_TAG_TEXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">([^<>]+)<").unwrap());
static INTERPOLATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap());
static DISPLAY_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:^|\s)(?:title|placeholder|label|alt|aria-label|data-[\w-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
    )
    .unwrap()
});
static BOUND_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)(?:v-bind)?:[\w.-]+\s*=\s*"\s*'([^'"]*)'\s*""#).unwrap()
});
static QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"<>\n]*)"|'([^'<>\n]*)'"#).unwrap());
static SINGLE_QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^'<>\n]*)'").unwrap());
static CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w$])([A-Za-z_$][\w$]*)\s*\(").unwrap());
static CALL_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[^\w$])([A-Za-z_$][\w$]*)\s*\(\s*(?:'([^'\\]*)'|"([^"\\]*)")"#).unwrap()
});
static EXPRESSION_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'([^'\\\n]*)'|"([^"\\\n]*)"|`([^`$\\]*)`"#).unwrap()
});

/// Broad quoted strings are only taken when short: at most this many chars
/// from the first target-script character on.
const QUOTED_TAIL_LIMIT: usize = 50;

/// One candidate-proposing rule of the template pipeline.
#[enum_dispatch]
pub trait MarkupRule {
    fn name(&self) -> &'static str;

    /// Push candidate texts found in `markup`.
    fn collect(&self, markup: &str, out: &mut Vec<String>);
}

#[enum_dispatch(MarkupRule)]
#[derive(Debug, Clone)]
pub enum TemplateRule {
    InterTagText(InterTagText),
    DisplayAttribute(DisplayAttribute),
    BoundLiteral(BoundLiteral),
    QuotedLiteral(QuotedLiteral),
    InterpolationLiteral(InterpolationLiteral),
    WrappedCall(WrappedCall),
}

// ============================================================
// Rules
// ============================================================

/// Text between `>` and `<` on a single line. Text holding interpolations
/// contributes each static part.
#[derive(Debug, Clone)]
pub struct InterTagText {
    script: TargetScript,
}

impl MarkupRule for InterTagText {
    fn name(&self) -> &'static str {
        "inter-tag-text"
    }

    fn collect(&self, markup: &str, out: &mut Vec<String>) {
        for caps in INTER_TAG_TEXT_REGEX.captures_iter(markup) {
            let Some(text) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let trimmed = text.trim();
            if trimmed.contains('\n') || !self.script.any_in(trimmed) {
                continue;
            }
            if INTERPOLATION_REGEX.is_match(trimmed) {
                out.extend(
                    INTERPOLATION_REGEX
                        .split(trimmed)
                        .map(str::trim)
                        .filter(|part| self.script.any_in(part))
                        .map(str::to_string),
                );
            } else {
                out.push(trimmed.to_string());
            }
        }
    }
}

/// Values of attributes that are displayed to the user.
#[derive(Debug, Clone)]
pub struct DisplayAttribute {
    script: TargetScript,
}

impl MarkupRule for DisplayAttribute {
    fn name(&self) -> &'static str {
        "display-attribute"
    }

    fn collect(&self, markup: &str, out: &mut Vec<String>) {
        for caps in DISPLAY_ATTR_REGEX.captures_iter(markup) {
            if let Some(value) = caps.get(1).or_else(|| caps.get(2))
                && self.script.any_in(value.as_str())
            {
                out.push(value.as_str().to_string());
            }
        }
    }
}

/// A binding directive whose whole expression is a string literal:
/// `:title="'标题'"`, `v-bind:title="'标题'"`.
#[derive(Debug, Clone)]
pub struct BoundLiteral {
    script: TargetScript,
}

impl MarkupRule for BoundLiteral {
    fn name(&self) -> &'static str {
        "bound-literal"
    }

    fn collect(&self, markup: &str, out: &mut Vec<String>) {
        for caps in BOUND_LITERAL_REGEX.captures_iter(markup) {
            if let Some(value) = caps.get(1)
                && self.script.any_in(value.as_str())
            {
                out.push(value.as_str().to_string());
            }
        }
    }
}

/// Any short quoted string holding target-script text. Double-quoted
/// attribute values that contain single-quoted literals contribute the inner
/// literals instead.
#[derive(Debug, Clone)]
pub struct QuotedLiteral {
    script: TargetScript,
}

impl QuotedLiteral {
    fn push_if_short(&self, text: &str, out: &mut Vec<String>) {
        // a bound template literal: `标题` contributes its body
        let text = match text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
            Some(body) if !body.contains("${") => body,
            Some(_) => return,
            None => text,
        };
        if text.contains('`') {
            return;
        }
        let Some(first) = text.find(|c| self.script.contains(c)) else {
            return;
        };
        if text[first..].chars().count() <= QUOTED_TAIL_LIMIT {
            out.push(text.to_string());
        }
    }
}

impl MarkupRule for QuotedLiteral {
    fn name(&self) -> &'static str {
        "quoted-literal"
    }

    fn collect(&self, markup: &str, out: &mut Vec<String>) {
        for caps in QUOTED_REGEX.captures_iter(markup) {
            if let Some(double) = caps.get(1) {
                let text = double.as_str();
                if text.contains('\'') {
                    for inner in SINGLE_QUOTED_REGEX.captures_iter(text) {
                        if let Some(m) = inner.get(1) {
                            self.push_if_short(m.as_str(), out);
                        }
                    }
                } else {
                    self.push_if_short(text, out);
                }
            } else if let Some(single) = caps.get(2) {
                self.push_if_short(single.as_str(), out);
            }
        }
    }
}

/// String literals inside `{{ … }}`. Interpolations that already call the
/// lookup function are left alone.
#[derive(Debug, Clone)]
pub struct InterpolationLiteral {
    script: TargetScript,
    callee_names: Vec<String>,
}

impl InterpolationLiteral {
    fn calls_lookup(&self, body: &str) -> bool {
        CALL_REGEX
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .any(|callee| self.callee_names.iter().any(|name| name == callee.as_str()))
    }
}

impl MarkupRule for InterpolationLiteral {
    fn name(&self) -> &'static str {
        "interpolation-literal"
    }

    fn collect(&self, markup: &str, out: &mut Vec<String>) {
        for caps in INTERPOLATION_REGEX.captures_iter(markup) {
            let Some(body) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if self.calls_lookup(body) {
                continue;
            }
            for literal in EXPRESSION_LITERAL_REGEX.captures_iter(body) {
                if let Some(value) = literal
                    .get(1)
                    .or_else(|| literal.get(2))
                    .or_else(|| literal.get(3))
                    && self.script.any_in(value.as_str())
                {
                    out.push(value.as_str().to_string());
                }
            }
        }
    }
}

/// Arguments of lookup calls already present in the markup.
#[derive(Debug, Clone)]
pub struct WrappedCall {
    callee_names: Vec<String>,
}

impl MarkupRule for WrappedCall {
    fn name(&self) -> &'static str {
        "wrapped-call"
    }

    fn collect(&self, markup: &str, out: &mut Vec<String>) {
        for caps in CALL_LITERAL_REGEX.captures_iter(markup) {
            let is_lookup = caps
                .get(1)
                .is_some_and(|callee| self.callee_names.iter().any(|name| name == callee.as_str()));
            if !is_lookup {
                continue;
            }
            if let Some(value) = caps.get(2).or_else(|| caps.get(3)) {
                out.push(value.as_str().to_string());
            }
        }
    }
}

// ============================================================
// Extractor
// ============================================================

pub struct MarkupExtractor<'a> {
    options: &'a ExtractOptions,
    rules: Vec<TemplateRule>,
}

impl<'a> MarkupExtractor<'a> {
    pub fn new(options: &'a ExtractOptions) -> Self {
        let script = options.classifier.script();
        let callee_names: Vec<String> = options.lookup.callee_names().map(str::to_string).collect();

        let rules = vec![
            InterTagText { script }.into(),
            DisplayAttribute { script }.into(),
            BoundLiteral { script }.into(),
            QuotedLiteral { script }.into(),
            InterpolationLiteral {
                script,
                callee_names: callee_names.clone(),
            }
            .into(),
            WrappedCall { callee_names }.into(),
        ];
        Self { options, rules }
    }

    /// Qualifying texts in template markup.
    pub fn extract_template(&self, markup: &str) -> ExtractionResult {
        let mut candidates = Vec::new();
        for rule in &self.rules {
            let before = candidates.len();
            rule.collect(markup, &mut candidates);
            tracing::trace!(rule = rule.name(), found = candidates.len() - before, "template rule");
        }
        candidates
            .into_iter()
            .filter(|text| self.options.classifier.is_qualifying(text))
            .collect()
    }

    /// Qualifying texts in a whole component: template rules over the
    /// template block, script extraction over the script block.
    pub fn extract_component(&self, source: &str) -> ExtractionResult {
        let document = split_component(source);
        let mut found = ExtractionResult::new();

        if let Some(template) = &document.template {
            found.extend(self.extract_template(template.content));
        }
        if let Some(script) = &document.script {
            let kind = SourceKind::from_lang(script.lang());
            found.extend(ScriptExtractor::new(self.options).extract(script.content, kind));
        }
        found
    }
}
