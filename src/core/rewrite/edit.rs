//! Byte-span edits over an original source, and literal quoting.

use std::fmt::Write as _;
use std::ops::Range;

use super::{QuoteStyle, RewriteError};

/// Replace `range` of the source with `text`. An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }
}

/// Apply `edits` to `source`. Bytes outside every edit are copied unchanged.
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> Result<String, RewriteError> {
    edits.sort_by_key(|edit| (edit.range.start, edit.range.end));

    for pair in edits.windows(2) {
        if pair[0].range.end > pair[1].range.start {
            return Err(RewriteError::OverlappingEdit {
                first: pair[0].range.clone(),
                second: pair[1].range.clone(),
            });
        }
    }

    let mut out = String::with_capacity(source.len() + edits.len() * 8);
    let mut cursor = 0;
    for edit in &edits {
        if !source.is_char_boundary(edit.range.end) {
            return Err(RewriteError::InvalidSpan(edit.range.clone()));
        }
        let Some(before) = source.get(cursor..edit.range.start) else {
            return Err(RewriteError::InvalidSpan(edit.range.clone()));
        };
        out.push_str(before);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    match source.get(cursor..) {
        Some(rest) => out.push_str(rest),
        None => return Err(RewriteError::InvalidSpan(cursor..source.len())),
    }
    Ok(out)
}

/// Quote `value` as a JS string literal. `raw` is the literal's original
/// source text, reused verbatim under `QuoteStyle::Preserve`.
pub fn quote_literal(value: &str, style: QuoteStyle, raw: Option<&str>) -> String {
    match (style, raw) {
        (QuoteStyle::Preserve, Some(raw)) => raw.to_string(),
        (QuoteStyle::Single, _) => wrap_quoted(value, '\''),
        (QuoteStyle::Double | QuoteStyle::Preserve, _) => wrap_quoted(value, '"'),
    }
}

pub fn wrap_quoted(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    out.push_str(&escape(value, quote));
    out.push(quote);
    out
}

fn escape(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
