//! Whitespace-delimited word lookup.

use super::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// The word under a viewport point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    /// Viewport box of the rendered word.
    pub rect: Rect,
    /// Char offset of the word's first character.
    pub index: usize,
}

/// Returns the char range of the maximal non-whitespace run containing
/// `offset`.
///
/// `None` when `offset` is past the end or sits on whitespace.
pub fn word_bounds_at(text: &str, offset: usize) -> Option<Range<usize>> {
    let chars: Vec<char> = text.chars().collect();
    if chars.get(offset)?.is_whitespace() {
        return None;
    }
    let mut start = offset;
    while start > 0 && !chars[start - 1].is_whitespace() {
        start -= 1;
    }
    let mut end = offset;
    while end < chars.len() && !chars[end].is_whitespace() {
        end += 1;
    }
    Some(start..end)
}

/// Byte offset of char `char_index`, clamped to the text length.
pub(crate) fn char_to_byte(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::{char_to_byte, word_bounds_at};

    #[test]
    fn word_bounds_expand_over_punctuation() {
        let text = "  foo-bar, baz";
        assert_eq!(word_bounds_at(text, 2), Some(2..10));
        assert_eq!(word_bounds_at(text, 9), Some(2..10));
        assert_eq!(word_bounds_at(text, 13), Some(11..14));
    }

    #[test]
    fn whitespace_and_out_of_range_have_no_word() {
        assert_eq!(word_bounds_at("a b", 1), None);
        assert_eq!(word_bounds_at("a\tb\nc", 3), None);
        assert_eq!(word_bounds_at("abc", 3), None);
        assert_eq!(word_bounds_at("", 0), None);
    }

    #[test]
    fn offsets_are_chars() {
        let text = "héllo wörld";
        assert_eq!(word_bounds_at(text, 8), Some(6..11));
        assert_eq!(char_to_byte(text, 6), 7);
        assert_eq!(char_to_byte(text, 11), text.len());
    }
}
