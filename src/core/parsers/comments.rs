//! Comment spans of a script source.
//!
//! Spans come from the parser trivia when the script parses. For sources that
//! fail to parse, `CommentSpans::scan` finds them lexically so the regex
//! fallback can still tell literals from commented-out text.

use std::ops::Range;

use swc_common::{BytePos, comments::SingleThreadedComments};

/// One comment: its byte range (delimiters included) and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub range: Range<usize>,
    pub text: String,
}

/// Sorted, non-overlapping comment blocks of one source.
#[derive(Debug, Clone, Default)]
pub struct CommentSpans {
    blocks: Vec<CommentBlock>,
}

impl CommentSpans {
    /// Collect comments recorded by the swc parser.
    pub fn from_swc(comments: &SingleThreadedComments, start_pos: BytePos) -> Self {
        let (leading, trailing) = comments.borrow_all();
        let blocks = leading
            .iter()
            .chain(trailing.iter())
            .flat_map(|(_, cmts)| cmts.iter())
            .map(|cmt| CommentBlock {
                range: (cmt.span.lo.0 - start_pos.0) as usize..(cmt.span.hi.0 - start_pos.0) as usize,
                text: cmt.text.to_string(),
            })
            .collect();
        Self::from_blocks(blocks)
    }

    /// Lexically scan `source` for `//` and `/* */` comments, stepping over
    /// quoted strings and template literals.
    pub fn scan(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\'' | b'"' => i = skip_quoted(bytes, i, bytes[i], true),
                b'`' => i = skip_quoted(bytes, i, b'`', false),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    let end = source[i..].find('\n').map_or(bytes.len(), |n| i + n);
                    blocks.push(CommentBlock {
                        range: i..end,
                        text: source[i + 2..end].to_string(),
                    });
                    i = end;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    let (body_end, end) = match source[i + 2..].find("*/") {
                        Some(n) => (i + 2 + n, i + 2 + n + 2),
                        None => (bytes.len(), bytes.len()),
                    };
                    blocks.push(CommentBlock {
                        range: i..end,
                        text: source[i + 2..body_end].to_string(),
                    });
                    i = end;
                }
                _ => i += 1,
            }
        }

        Self::from_blocks(blocks)
    }

    fn from_blocks(mut blocks: Vec<CommentBlock>) -> Self {
        blocks.sort_by_key(|b| b.range.start);
        blocks.dedup_by_key(|b| b.range.start);
        Self { blocks }
    }

    /// Whether byte offset `pos` falls inside a comment.
    pub fn contains(&self, pos: usize) -> bool {
        let idx = self.blocks.partition_point(|b| b.range.start <= pos);
        idx > 0 && self.blocks[idx - 1].range.contains(&pos)
    }

    pub fn blocks(&self) -> &[CommentBlock] {
        &self.blocks
    }
}

/// Index just past the closing quote. Single/double quoted strings also end
/// at a newline so an unterminated literal does not swallow the file.
fn skip_quoted(bytes: &[u8], start: usize, quote: u8, stop_at_newline: bool) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if stop_at_newline => return i,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
