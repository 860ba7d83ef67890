//! Syntax errors.

use core::fmt;

use crate::lexer::{Span, TokenKind};

/// Malformed query text.
///
/// Lexical errors carry the lexer's description as `message`; grammar
/// errors also record what the parser was looking for.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    /// What went wrong.
    pub message: String,
    /// Where in the query text.
    pub span: Span,
    /// Description of the construct the parser wanted, if any.
    pub expected: Option<String>,
    /// The token that was there instead.
    pub found: Option<TokenKind>,
}

fn describe(token: &TokenKind) -> String {
    match token {
        TokenKind::Integer(n) => format!("integer {n}"),
        TokenKind::Float(n) => format!("number {n}"),
        TokenKind::String(s) => format!("string {s:?}"),
        TokenKind::Identifier(name) => format!("name `{name}`"),
        TokenKind::Parameter(name) => format!("parameter @{name}"),
        TokenKind::Keyword(kw) => format!("keyword `{}`", kw.as_str()),
        TokenKind::Error(message) => message.clone(),
        TokenKind::Eof => String::from("end of input"),
        other => format!("{other:?}"),
    }
}

impl SyntaxError {
    /// An error with a free-form message.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// The parser wanted `expected` but met `found`.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected = expected.into();
        let message = match &found {
            TokenKind::Eof => format!("Unexpected end of input: expected {expected}"),
            TokenKind::Error(message) => message.clone(),
            other => format!("Expected {expected}, found {}", describe(other)),
        };
        Self {
            message,
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Span { start, end } = self.span;
        write!(f, "{} at position {start}..{end}", self.message)
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;

    #[test]
    fn test_display_includes_position() {
        let err = SyntaxError::unexpected("`from`", TokenKind::Comma, Span::new(7, 8));
        assert_eq!(
            err.to_string(),
            "Expected `from`, found Comma at position 7..8"
        );
        assert_eq!(err.expected.as_deref(), Some("`from`"));
    }

    #[test]
    fn test_found_token_is_described() {
        let err = SyntaxError::unexpected(
            "a value",
            TokenKind::Keyword(Keyword::Limit),
            Span::new(0, 5),
        );
        assert_eq!(err.message, "Expected a value, found keyword `limit`");
    }

    #[test]
    fn test_end_of_input() {
        let err = SyntaxError::unexpected("a value", TokenKind::Eof, Span::point(12));
        assert_eq!(err.found, Some(TokenKind::Eof));
        assert!(err.message.starts_with("Unexpected end of input"));
    }

    #[test]
    fn test_lexer_message_is_kept() {
        let err = SyntaxError::unexpected(
            "a value",
            TokenKind::Error(String::from("Unterminated string literal")),
            Span::new(4, 10),
        );
        assert_eq!(err.message, "Unterminated string literal");
    }
}
