//! Decides whether a literal value is human-facing text worth externalizing.
//!
//! The checks run cheapest first. Pattern detection is a tunable heuristic:
//! a single regex-looking signal is tolerated, two or more reject the text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::script::TargetScript;

/// Fewest target-script characters a qualifying text must contain.
pub const MIN_TARGET_CHARS: usize = 2;

/// Lowest share of target-script characters in the text.
pub const MIN_DENSITY: f64 = 0.1;

/// Longer values are treated as whole markup blocks rather than labels.
pub const MAX_TEXT_CHARS: usize = 150;

/// Signals needed before a text is treated as a regex pattern.
const PATTERN_SIGNAL_THRESHOLD: usize = 2;

/// More backslash escapes than this is a pattern regardless of other signals.
const MAX_ESCAPES: usize = 3;

static INTERPOLATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}").unwrap());
static DELIMITED_PATTERN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/.+/[dgimsuyv]*$").unwrap());
static CHAR_CLASS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\[\]]+\]").unwrap());
static GROUP_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\?(?:[:=!]|<[=!])").unwrap());
static REPETITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\d+(?:,\d*)?\}").unwrap());
static ESCAPED_META_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[dDwWsSbB.*+?()\[\]{}|^$/\\]").unwrap());
static QUANTIFIER_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\]).][*+?]|[*+]\?").unwrap());
static ALTERNATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^|\s]\|[^|\s]").unwrap());
static ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\.").unwrap());
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^<>]*>|<!--").unwrap());
static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:[A-Za-z][A-Za-z0-9]*|#\d+|#[xX][0-9A-Fa-f]+);").unwrap()
});
static CONTROL_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n|\t){2,}").unwrap());

/// Why a text was rejected. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Ignored,
    TooSparse,
    PatternLike,
    Markup,
    InterpolationOnly,
    TooLong,
    SerializedMarkup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Qualifies,
    Rejects(Rejection),
}

impl Verdict {
    pub fn qualifies(self) -> bool {
        self == Verdict::Qualifies
    }
}

/// Text classifier. Immutable once built; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    script: TargetScript,
    ignore_texts: HashSet<String>,
}

impl Classifier {
    pub fn new(script: TargetScript) -> Self {
        Self {
            script,
            ignore_texts: HashSet::new(),
        }
    }

    /// Exact (trimmed) values that never qualify.
    pub fn with_ignore_texts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_texts = texts.into_iter().map(Into::into).collect();
        self
    }

    pub fn script(&self) -> TargetScript {
        self.script
    }

    pub fn is_qualifying(&self, text: &str) -> bool {
        self.classify(text).qualifies()
    }

    pub fn classify(&self, text: &str) -> Verdict {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Verdict::Rejects(Rejection::Empty);
        }
        if self.ignore_texts.contains(trimmed) {
            return Verdict::Rejects(Rejection::Ignored);
        }
        if trimmed.chars().count() > MAX_TEXT_CHARS {
            return Verdict::Rejects(Rejection::TooLong);
        }
        if CONTROL_RUN_REGEX.is_match(text) {
            return Verdict::Rejects(Rejection::SerializedMarkup);
        }
        if trimmed.starts_with("{{") && trimmed.ends_with("}}") {
            return Verdict::Rejects(Rejection::InterpolationOnly);
        }
        if !self.is_dense(trimmed) {
            return Verdict::Rejects(Rejection::TooSparse);
        }
        if TAG_REGEX.is_match(trimmed) || ENTITY_REGEX.is_match(trimmed) {
            return Verdict::Rejects(Rejection::Markup);
        }
        if is_pattern_like(trimmed) {
            return Verdict::Rejects(Rejection::PatternLike);
        }
        Verdict::Qualifies
    }

    fn is_dense(&self, trimmed: &str) -> bool {
        let stripped = INTERPOLATION_REGEX.replace_all(trimmed, "");
        let stripped = stripped.trim();
        let total = stripped.chars().count();
        let target = self.script.count_in(stripped);
        if target < MIN_TARGET_CHARS || total == 0 {
            return false;
        }
        (target as f64) / (total as f64) >= MIN_DENSITY
    }
}

/// Whether `text` looks like a regular-expression pattern.
pub fn is_pattern_like(text: &str) -> bool {
    if DELIMITED_PATTERN_REGEX.is_match(text) {
        return true;
    }
    if ESCAPE_REGEX.find_iter(text).count() > MAX_ESCAPES {
        return true;
    }
    pattern_signals(text) >= PATTERN_SIGNAL_THRESHOLD
}

fn pattern_signals(text: &str) -> usize {
    let signals = [
        CHAR_CLASS_REGEX.is_match(text),
        GROUP_MARKER_REGEX.is_match(text),
        REPETITION_REGEX.is_match(text),
        ESCAPED_META_REGEX.is_match(text),
        QUANTIFIER_SUFFIX_REGEX.is_match(text),
        ALTERNATION_REGEX.is_match(text),
        text.starts_with('^'),
        text.ends_with('$') && !text.ends_with("\\$"),
    ];
    signals.iter().filter(|hit| **hit).count()
}
