//! Binding powers and token classification for condition parsing.

use crate::ast::Operator;
use crate::lexer::{Keyword, TokenKind};

/// Returns the infix binding power of a condition connective.
///
/// Returns `(left_bp, right_bp)`; both connectives are left associative
/// and `and` binds tighter than `or`. Returns `None` if the token does not
/// join conditions.
#[must_use]
pub const fn connective_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),
        _ => None,
    }
}

/// Converts a connective token to its operator.
#[must_use]
pub const fn token_to_connective(kind: &TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Keyword(Keyword::And) => Some(Operator::And),
        TokenKind::Keyword(Keyword::Or) => Some(Operator::Or),
        _ => None,
    }
}

/// Converts a token to a comparison operator.
#[must_use]
pub const fn token_to_comparison(kind: &TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Eq => Some(Operator::Equals),
        TokenKind::Gt => Some(Operator::GreaterThan),
        TokenKind::GtEq => Some(Operator::GreaterEqualsThan),
        TokenKind::Lt => Some(Operator::LesserThan),
        TokenKind::LtEq => Some(Operator::LesserEqualsThan),
        TokenKind::Keyword(Keyword::Like) => Some(Operator::Like),
        _ => None,
    }
}

/// Returns true if the token can start a value.
#[must_use]
pub const fn starts_value(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Float(_)
            | TokenKind::Minus
            | TokenKind::Parameter(_)
            | TokenKind::LeftBrace
            | TokenKind::LeftBracket
            | TokenKind::LeftParen
            | TokenKind::Keyword(Keyword::True | Keyword::False | Keyword::Null)
    )
}
