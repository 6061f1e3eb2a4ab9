//! Character classes for the target script.

use serde::{Deserialize, Serialize};

/// Writing system whose text is considered translatable source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetScript {
    /// CJK unified ideographs (simplified and traditional Chinese).
    #[default]
    Han,
    /// Han ideographs plus hiragana and katakana.
    Japanese,
    /// Hangul syllables and jamo.
    Hangul,
}

impl TargetScript {
    /// Whether `c` belongs to this script and counts toward text density.
    pub fn contains(self, c: char) -> bool {
        match self {
            TargetScript::Han => is_han(c),
            TargetScript::Japanese => is_han(c) || is_kana(c),
            TargetScript::Hangul => is_hangul(c),
        }
    }

    /// Whether `text` has at least one character of this script.
    pub fn any_in(self, text: &str) -> bool {
        text.chars().any(|c| self.contains(c))
    }

    /// Number of characters of this script in `text`.
    pub fn count_in(self, text: &str) -> usize {
        text.chars().filter(|c| self.contains(*c)).count()
    }
}

fn is_han(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}'
        | '\u{2A700}'..='\u{2EBEF}'
    )
}

fn is_kana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}')
}

fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}'
    )
}

/// Punctuation or whitespace that may continue a run once it has started.
///
/// Covers ASCII punctuation, CJK symbols and punctuation, and full-width forms
/// (e.g. `，`, `。`, `！`, `：`, `（`).
pub fn is_adjoining(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || matches!(c,
            '\u{3000}'..='\u{303F}'
            | '\u{FF00}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF20}'
            | '\u{FF3B}'..='\u{FF40}'
            | '\u{FF5B}'..='\u{FF65}'
            | '\u{2018}'..='\u{201F}'
            | '\u{2026}'
            | '\u{00B7}'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_han_detection() {
        assert!(TargetScript::Han.contains('你'));
        assert!(TargetScript::Han.contains('龍'));
        assert!(!TargetScript::Han.contains('a'));
        assert!(!TargetScript::Han.contains('，'));
        assert!(!TargetScript::Han.contains('あ'));
    }

    #[test]
    fn test_japanese_includes_kana() {
        assert!(TargetScript::Japanese.contains('あ'));
        assert!(TargetScript::Japanese.contains('カ'));
        assert!(TargetScript::Japanese.contains('日'));
    }

    #[test]
    fn test_hangul_detection() {
        assert!(TargetScript::Hangul.contains('한'));
        assert!(!TargetScript::Hangul.contains('你'));
    }

    #[test]
    fn test_count_in() {
        assert_eq!(TargetScript::Han.count_in("共3条记录"), 4);
        assert_eq!(TargetScript::Han.count_in("hello"), 0);
    }

    #[test]
    fn test_adjoining() {
        assert!(is_adjoining('，'));
        assert!(is_adjoining('。'));
        assert!(is_adjoining('！'));
        assert!(is_adjoining(' '));
        assert!(is_adjoining(','));
        assert!(!is_adjoining('a'));
        assert!(!is_adjoining('1'));
    }
}
