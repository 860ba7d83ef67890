//! Query lexer.
//!
//! A hand-written single-pass tokenizer producing a stream of spanned
//! tokens.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
