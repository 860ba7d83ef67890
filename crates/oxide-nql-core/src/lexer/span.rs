//! Source locations for tokens and errors.

use serde::Serialize;

/// A byte range in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at the given offset.
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the 1-based line and column of the span start in `input`.
    ///
    /// Columns count characters, not bytes.
    #[must_use]
    pub fn line_col(&self, input: &str) -> (usize, usize) {
        let end = self.start.min(input.len());
        let prefix = input.get(..end).unwrap_or(input);
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let column = prefix[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Returns the source text covered by the span.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start..self.end).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(5, 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::point(3).is_empty());
    }

    #[test]
    fn test_span_line_col() {
        let input = "select *\nfrom God\nwhere x = 1";
        let from = input.find("from").unwrap();
        assert_eq!(Span::point(0).line_col(input), (1, 1));
        assert_eq!(Span::point(from).line_col(input), (2, 1));
        assert_eq!(Span::point(from + 5).line_col(input), (2, 6));
    }

    #[test]
    fn test_span_text() {
        let input = "get \"Diana\"";
        assert_eq!(Span::new(4, 11).text(input), "\"Diana\"");
        assert_eq!(Span::new(40, 50).text(input), "");
    }
}
