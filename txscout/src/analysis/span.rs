use serde::Serialize;
use std::fmt;

/// A 1-based, inclusive range of positions in a text.
///
/// A zero-length span has `end == start - 1`; the algorithms return `(1, 0)` when there is
/// nothing to report (for example, an empty input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Longest palindrome location within a transmission
pub type PalindromeSpan = Span;

/// Longest common substring location within the first transmission
pub type CommonSpan = Span;

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Builds a span from a 0-based start offset and a length
    pub fn from_start_len(start: usize, len: usize) -> Self {
        Self {
            start: start + 1,
            end: start + len,
        }
    }

    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The covered bytes of `text`; empty when the span is empty or out of range
    pub fn slice<'a>(&self, text: &'a [u8]) -> &'a [u8] {
        if self.is_empty() || self.start == 0 || self.end > text.len() {
            return &[];
        }
        &text[self.start - 1..self.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        assert_eq!(Span::new(1, 4).len(), 4);
        assert_eq!(Span::new(3, 3).len(), 1);
        assert_eq!(Span::new(1, 0).len(), 0);
        assert!(Span::new(1, 0).is_empty());
    }

    #[test]
    fn test_from_start_len() {
        assert_eq!(Span::from_start_len(0, 3), Span::new(1, 3));
        assert_eq!(Span::from_start_len(4, 3), Span::new(5, 7));
        assert_eq!(Span::from_start_len(0, 0), Span::new(1, 0));
    }

    #[test]
    fn test_slice() {
        let text = b"abcdxyz";
        assert_eq!(Span::new(1, 4).slice(text), b"abcd");
        assert_eq!(Span::new(5, 7).slice(text), b"xyz");
        assert_eq!(Span::new(1, 0).slice(text), b"");
        assert_eq!(Span::new(6, 9).slice(text), b"");
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::new(2, 5).to_string(), "2 5");
        assert_eq!(Span::new(1, 0).to_string(), "1 0");
    }
}
