//! Token types for the query lexer.

use super::Span;

/// Reserved words of the query language.
///
/// Time units (`second`, `day`, ...) are deliberately not keywords; they
/// are recognized by position so they stay usable as field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Entity statements
    Select,
    Insert,
    Into,
    Update,
    Delete,
    From,

    // Key-value statements
    Get,
    Put,
    Del,

    // Filtering
    Where,
    And,
    Or,
    Not,
    In,
    Between,
    Like,

    // Ordering and paging
    Order,
    By,
    Asc,
    Desc,
    Skip,
    Limit,

    // Literals
    True,
    False,
    Null,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Some(Self::Select),
            "insert" => Some(Self::Insert),
            "into" => Some(Self::Into),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            "from" => Some(Self::From),
            "get" => Some(Self::Get),
            "put" => Some(Self::Put),
            "del" => Some(Self::Del),
            "where" => Some(Self::Where),
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            "in" => Some(Self::In),
            "between" => Some(Self::Between),
            "like" => Some(Self::Like),
            "order" => Some(Self::Order),
            "by" => Some(Self::By),
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            "skip" => Some(Self::Skip),
            "limit" => Some(Self::Limit),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    /// Returns the keyword as it is written in canonical query text.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Into => "into",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::From => "from",
            Self::Get => "get",
            Self::Put => "put",
            Self::Del => "del",
            Self::Where => "where",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::In => "in",
            Self::Between => "between",
            Self::Like => "like",
            Self::Order => "order",
            Self::By => "by",
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::Skip => "skip",
            Self::Limit => "limit",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14)
    Float(f64),
    /// String literal (e.g., "hello")
    String(String),

    // Names
    /// Identifier, possibly dotted (e.g., `address.city`)
    Identifier(String),
    /// Named parameter (e.g., `@id`)
    Parameter(String),
    /// Reserved word
    Keyword(Keyword),

    // Operators
    /// =
    Eq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// -
    Minus,
    /// *
    Star,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// :
    Colon,
    /// ;
    Semicolon,

    // Special
    /// End of input
    Eof,
    /// Invalid input, with a description
    Error(String),
}

/// A token with its span in the query text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the query text.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("DeL"), Some(Keyword::Del));
        assert_eq!(Keyword::from_str("second"), None);
        assert_eq!(Keyword::from_str("name"), None);
    }

    #[test]
    fn test_keyword_as_str_round_trips() {
        for kw in [Keyword::Get, Keyword::Between, Keyword::Limit, Keyword::Null] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_token_as_keyword() {
        let put = Token::new(TokenKind::Keyword(Keyword::Put), Span::new(0, 3));
        let comma = Token::new(TokenKind::Comma, Span::new(3, 4));
        assert_eq!(put.as_keyword(), Some(Keyword::Put));
        assert_eq!(comma.as_keyword(), None);
        assert!(!put.is_eof());
    }
}
