//! Phrase segmentation for mixed-script text.
//!
//! A run starts at the first target-script character and keeps growing over
//! further target characters and adjoining punctuation/whitespace. Any other
//! character ends the run. `"登录 to continue，谢谢"` yields `登录` and `谢谢`.

use std::ops::Range;

use super::script::{TargetScript, is_adjoining};

/// Byte ranges of each maximal target-script run in `text`, with trailing
/// whitespace trimmed.
pub fn segment_runs(text: &str, script: TargetScript) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, c) in text.char_indices() {
        if script.contains(c) {
            start.get_or_insert(idx);
        } else if start.is_some() && is_adjoining(c) {
            continue;
        } else if let Some(begin) = start.take() {
            push_trimmed(text, begin..idx, &mut runs);
        }
    }

    if let Some(begin) = start {
        push_trimmed(text, begin..text.len(), &mut runs);
    }

    runs
}

/// Segment `text` and return the owned phrases.
pub fn segments(text: &str, script: TargetScript) -> Vec<String> {
    segment_runs(text, script)
        .into_iter()
        .map(|range| text[range].to_string())
        .collect()
}

/// Join the trimmed non-blank lines of `text` with single spaces, the way JSX
/// renders multi-line text.
pub fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_trimmed(text: &str, range: Range<usize>, runs: &mut Vec<Range<usize>>) {
    let slice = &text[range.clone()];
    let trimmed = slice.trim_end();
    if !trimmed.is_empty() {
        runs.push(range.start..range.start + trimmed.len());
    }
}
