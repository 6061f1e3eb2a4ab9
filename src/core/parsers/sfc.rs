//! Splits a single-file component into its `<template>` and `<script>` blocks.
//!
//! Only the block bodies are located; everything else (`<style>`, custom
//! blocks, whitespace) is left for the caller to splice around.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<script\b([^>]*)>(.*?)</script\s*>").unwrap());
static TEMPLATE_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)template\b([^>]*)>").unwrap());
static LANG_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\blang\s*=\s*["']([\w-]+)["']"#).unwrap());

/// A located block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock<'a> {
    /// Raw attribute text of the opening tag.
    pub attrs: &'a str,
    /// Block body, between the opening and closing tags.
    pub content: &'a str,
    /// Byte range of `content` within the document.
    pub range: Range<usize>,
}

impl SfcBlock<'_> {
    /// Value of the `lang` attribute, if any.
    pub fn lang(&self) -> Option<&str> {
        LANG_ATTR_REGEX
            .captures(self.attrs)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcDocument<'a> {
    pub template: Option<SfcBlock<'a>>,
    pub script: Option<SfcBlock<'a>>,
}

impl SfcDocument<'_> {
    pub fn is_empty(&self) -> bool {
        self.template.is_none() && self.script.is_none()
    }
}

pub fn split_component(source: &str) -> SfcDocument<'_> {
    let script = SCRIPT_BLOCK_REGEX.captures(source).and_then(|caps| {
        let attrs = caps.get(1)?;
        let body = caps.get(2)?;
        Some(SfcBlock {
            attrs: attrs.as_str(),
            content: body.as_str(),
            range: body.range(),
        })
    });

    let script_outer = SCRIPT_BLOCK_REGEX
        .find(source)
        .map(|m| m.range())
        .unwrap_or(0..0);
    let template = find_template(source, &script_outer);

    SfcDocument { template, script }
}

/// Locate the outermost `<template>` block, matching nested `<template>` tags
/// (e.g. `<template v-if>`) by depth.
fn find_template<'a>(source: &'a str, skip: &Range<usize>) -> Option<SfcBlock<'a>> {
    let mut depth = 0usize;
    let mut open: Option<(usize, &'a str)> = None;

    for caps in TEMPLATE_TAG_REGEX.captures_iter(source) {
        let whole = caps.get(0)?;
        if skip.contains(&whole.start()) {
            continue;
        }
        let is_close = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let attrs = caps.get(2).map_or("", |m| m.as_str());

        if is_close {
            if depth == 0 {
                continue;
            }
            depth -= 1;
            if depth == 0 {
                let (start, attrs) = open?;
                let range = start..whole.start();
                return Some(SfcBlock {
                    attrs,
                    content: &source[range.clone()],
                    range,
                });
            }
        } else if !attrs.trim_end().ends_with('/') {
            if depth == 0 {
                open = Some((whole.end(), attrs));
            }
            depth += 1;
        }
    }

    None
}
