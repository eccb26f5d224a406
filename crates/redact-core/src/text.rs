//! Byte/char offset conversion
//!
//! Spans are expressed in chars; regex matches and string slicing work in
//! bytes. One index is built per request and shared by every stage.

use crate::{Error, Result, Span};

pub struct TextIndex<'a> {
    text: &'a str,
    /// Byte offset of every char, plus `text.len()` as a sentinel.
    char_starts: Vec<usize>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        char_starts.push(text.len());
        Self { text, char_starts }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.char_starts.len() - 1
    }

    /// Char offset of a byte offset that lies on a char boundary.
    pub fn char_offset(&self, byte: usize) -> Option<usize> {
        self.char_starts.binary_search(&byte).ok()
    }

    /// Byte offset of a char offset, `char_len()` maps to `text.len()`.
    pub fn byte_offset(&self, char_pos: usize) -> Option<usize> {
        self.char_starts.get(char_pos).copied()
    }

    /// Converts a byte range (e.g. a regex match) into a char span.
    pub fn span_from_bytes(&self, start: usize, end: usize) -> Option<Span> {
        Span::new(self.char_offset(start)?, self.char_offset(end)?)
    }

    /// Byte range of a char span, checked against this text.
    pub fn byte_range(&self, span: Span) -> Result<std::ops::Range<usize>> {
        let invalid = || Error::InvalidSpan {
            start: span.start(),
            end: span.end(),
            len: self.char_len(),
        };
        let start = self.byte_offset(span.start()).ok_or_else(invalid)?;
        let end = self.byte_offset(span.end()).ok_or_else(invalid)?;
        Ok(start..end)
    }

    pub fn slice(&self, span: Span) -> Result<&'a str> {
        let range = self.byte_range(span)?;
        Ok(&self.text[range])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_identity() {
        let index = TextIndex::new("hello");
        assert_eq!(index.char_len(), 5);
        assert_eq!(index.char_offset(3), Some(3));
        assert_eq!(index.byte_offset(5), Some(5));
    }

    #[test]
    fn test_multibyte_offsets() {
        // 'é' is two bytes, '日' is three
        let index = TextIndex::new("é日x");
        assert_eq!(index.char_len(), 3);
        assert_eq!(index.char_offset(2), Some(1));
        assert_eq!(index.char_offset(5), Some(2));
        assert_eq!(index.char_offset(1), None);
        assert_eq!(index.byte_offset(2), Some(5));
        let span = index.span_from_bytes(2, 6).unwrap();
        assert_eq!((span.start(), span.end()), (1, 3));
        assert_eq!(index.slice(span).unwrap(), "日x");
    }

    #[test]
    fn test_out_of_range_span() {
        let index = TextIndex::new("abc");
        let span = Span::new(1, 9).unwrap();
        assert!(matches!(index.byte_range(span), Err(Error::InvalidSpan { .. })));
    }

    #[test]
    fn test_empty_text() {
        let index = TextIndex::new("");
        assert_eq!(index.char_len(), 0);
        assert_eq!(index.byte_offset(0), Some(0));
    }
}
