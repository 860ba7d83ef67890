//! Single-pass scanner turning query text into spanned tokens.

use super::{Keyword, Span, Token, TokenKind};

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Scanner over query text.
///
/// Iterating a `Lexer` yields every token up to and including
/// [`TokenKind::Eof`]. Malformed input becomes a [`TokenKind::Error`]
/// token; the parser decides how to report it.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    // Offset where the token being scanned began.
    token_start: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            token_start: 0,
            done: false,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn bump_if(&mut self, expected: char) -> bool {
        let matched = self.peek() == Some(expected);
        if matched {
            self.pos += expected.len_utf8();
        }
        matched
    }

    fn bump_while(&mut self, keep: impl Fn(char) -> bool) {
        let len = self
            .rest()
            .find(|c: char| !keep(c))
            .unwrap_or_else(|| self.rest().len());
        self.pos += len;
    }

    fn starts_with(&self, pair: &str) -> bool {
        self.rest().starts_with(pair)
    }

    fn skip_trivia(&mut self) {
        loop {
            self.bump_while(char::is_whitespace);
            if self.starts_with("--") {
                self.bump_while(|c| c != '\n');
            } else if self.starts_with("/*") {
                self.pos += 2;
                match self.rest().find("*/") {
                    Some(end) => self.pos += end + 2,
                    None => self.pos = self.input.len(),
                }
            } else {
                return;
            }
        }
    }

    fn emit(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.token_start, self.pos))
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.emit(TokenKind::Error(message.into()))
    }

    /// Consumes a name with optional `.segment` suffixes.
    fn dotted_name(&mut self) -> &'a str {
        let start = self.pos;
        loop {
            self.bump_while(is_name_char);
            if self.peek() == Some('.') && self.peek_second().is_some_and(is_name_start) {
                self.pos += 1;
            } else {
                return &self.input[start..self.pos];
            }
        }
    }

    fn word(&mut self) -> Token {
        let text = self.dotted_name();
        match Keyword::from_str(text) {
            Some(keyword) => self.emit(TokenKind::Keyword(keyword)),
            None => self.emit(TokenKind::Identifier(String::from(text))),
        }
    }

    /// `` `name` ``, where a doubled backtick stands for itself.
    fn quoted_name(&mut self) -> Token {
        self.pos += 1;
        let mut name = String::new();
        loop {
            match self.bump() {
                Some('`') if self.bump_if('`') => name.push('`'),
                Some('`') => break,
                Some(c) => name.push(c),
                None => return self.error("Unterminated quoted identifier"),
            }
        }
        if name.is_empty() {
            self.error("Empty quoted identifier")
        } else {
            self.emit(TokenKind::Identifier(name))
        }
    }

    fn parameter(&mut self) -> Token {
        self.pos += 1;
        if !self.peek().is_some_and(is_name_start) {
            return self.error("Expected parameter name after '@'");
        }
        let name = String::from(self.dotted_name());
        self.emit(TokenKind::Parameter(name))
    }

    /// A number, with its sign when `-` directly precedes the digits so
    /// that `i64::MIN` is readable.
    fn number(&mut self) -> Token {
        self.bump_if('-');
        self.bump_while(|c| c.is_ascii_digit());
        let mut float = false;
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            float = true;
            self.pos += 1;
            self.bump_while(|c| c.is_ascii_digit());
        }
        if self.bump_if('e') || self.bump_if('E') {
            float = true;
            if !self.bump_if('+') {
                self.bump_if('-');
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return self.error("Expected digits in float exponent");
            }
            self.bump_while(|c| c.is_ascii_digit());
        }

        let text = &self.input[self.token_start..self.pos];
        let kind = if float {
            match text.parse::<f64>() {
                Ok(x) if x.is_finite() => Ok(TokenKind::Float(x)),
                Ok(_) => Err(String::from("Float literal out of range")),
                Err(e) => Err(format!("Invalid float: {e}")),
            }
        } else {
            text.parse()
                .map(TokenKind::Integer)
                .map_err(|e| format!("Invalid integer: {e}"))
        };
        self.emit(kind.unwrap_or_else(TokenKind::Error))
    }

    fn hex4(&mut self) -> Option<u32> {
        (0..4).try_fold(0, |code, _| Some(code * 16 + self.bump()?.to_digit(16)?))
    }

    /// Decodes the digits after `\u`, joining a UTF-16 surrogate pair.
    fn unicode_escape(&mut self) -> Option<char> {
        let high = self.hex4()?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high);
        }
        if !self.starts_with("\\u") {
            return None;
        }
        self.pos += 2;
        let low = self.hex4()?;
        (0xDC00..0xE000)
            .contains(&low)
            .then(|| char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)))
            .flatten()
    }

    fn escape(&mut self) -> Option<char> {
        Some(match self.bump()? {
            c @ ('"' | '\'' | '\\' | '/') => c,
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return self.unicode_escape(),
            _ => return None,
        })
    }

    /// A `"..."` or `'...'` literal with JSON escapes.
    fn string(&mut self, quote: char) -> Token {
        self.pos += 1;
        let mut text = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return self.emit(TokenKind::String(text)),
                Some('\\') => match self.escape() {
                    Some(c) => text.push(c),
                    None => return self.error("Invalid escape sequence in string literal"),
                },
                Some(c) => text.push(c),
                None => return self.error("Unterminated string literal"),
            }
        }
    }

    fn symbol(&mut self, c: char) -> Token {
        self.pos += c.len_utf8();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,
            '-' => TokenKind::Minus,
            '=' => TokenKind::Eq,
            '<' if self.bump_if('=') => TokenKind::LtEq,
            '<' => TokenKind::Lt,
            '>' if self.bump_if('=') => TokenKind::GtEq,
            '>' => TokenKind::Gt,
            other => TokenKind::Error(format!("Unexpected character: {other}")),
        };
        self.emit(kind)
    }

    /// Scans the next token. At the end of input this keeps returning
    /// [`TokenKind::Eof`].
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.token_start = self.pos;
        match self.peek() {
            None => self.emit(TokenKind::Eof),
            Some(quote @ ('"' | '\'')) => self.string(quote),
            Some('`') => self.quoted_name(),
            Some('@') => self.parameter(),
            Some(c) if c.is_ascii_digit() => self.number(),
            Some('-') if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => self.number(),
            Some(c) if is_name_start(c) => self.word(),
            Some(c) => self.symbol(c),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        self.done = token.is_eof();
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(String::from(name))
    }

    #[test]
    fn test_blank_input_is_eof() {
        assert_eq!(kinds("   \n\t  "), vec![TokenKind::Eof]);
        let mut lexer = Lexer::new("");
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("get -- trailing\n \"a\" /* block */ \"b\""),
            vec![
                TokenKind::Keyword(Keyword::Get),
                TokenKind::String(String::from("a")),
                TokenKind::String(String::from("b")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_case() {
        assert_eq!(
            kinds("DEL Put gEt"),
            vec![
                TokenKind::Keyword(Keyword::Del),
                TokenKind::Keyword(Keyword::Put),
                TokenKind::Keyword(Keyword::Get),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_dotted_identifier() {
        assert_eq!(
            kinds("address.city name_2"),
            vec![ident("address.city"), ident("name_2"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_quoted_identifier() {
        assert_eq!(
            kinds("`limit` `a``b`"),
            vec![ident("limit"), ident("a`b"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_parameters() {
        assert_eq!(
            kinds("@id @user.name"),
            vec![
                TokenKind::Parameter(String::from("id")),
                TokenKind::Parameter(String::from("user.name")),
                TokenKind::Eof,
            ]
        );
        assert!(matches!(&kinds("@ id")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 0 2.5 1e3 - 7"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Integer(0),
                TokenKind::Float(2.5),
                TokenKind::Float(1000.0),
                TokenKind::Minus,
                TokenKind::Integer(7),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_with_escapes() {
        assert_eq!(
            kinds(r#""Diana" 'Hunt' "a\"b\n" "é😀""#),
            vec![
                TokenKind::String(String::from("Diana")),
                TokenKind::String(String::from("Hunt")),
                TokenKind::String(String::from("a\"b\n")),
                TokenKind::String(String::from("\u{e9}\u{1F600}")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let kinds = kinds("\"abc");
        assert_eq!(
            kinds[0],
            TokenKind::Error(String::from("Unterminated string literal"))
        );
    }

    #[test]
    fn test_operators_and_delimiters() {
        assert_eq!(
            kinds("= < <= > >= * ( ) { } [ ] , : ;"),
            vec![
                TokenKind::Eq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Star,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_put_statement_tokens() {
        assert_eq!(
            kinds("put {\"Diana\", @value, 10 second}"),
            vec![
                TokenKind::Keyword(Keyword::Put),
                TokenKind::LeftBrace,
                TokenKind::String(String::from("Diana")),
                TokenKind::Comma,
                TokenKind::Parameter(String::from("value")),
                TokenKind::Comma,
                TokenKind::Integer(10),
                ident("second"),
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens: Vec<Token> = Lexer::new("del @id").collect();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 7));
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(kinds("get /* never closed"), vec![TokenKind::Keyword(Keyword::Get), TokenKind::Eof]);
    }

    #[test]
    fn test_bad_escape_and_exponent() {
        assert!(matches!(&kinds(r#""a\q""#)[0], TokenKind::Error(_)));
        assert!(matches!(&kinds("1e+")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_signed_numbers() {
        assert_eq!(
            kinds("-9223372036854775808 -2.5 -0"),
            vec![
                TokenKind::Integer(i64::MIN),
                TokenKind::Float(-2.5),
                TokenKind::Integer(0),
                TokenKind::Eof,
            ]
        );
        assert!(matches!(&kinds("9223372036854775808")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_float_overflow_is_an_error() {
        assert_eq!(
            kinds("1e400")[0],
            TokenKind::Error(String::from("Float literal out of range"))
        );
        assert!(matches!(&kinds("-1e400")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            kinds("!")[0],
            TokenKind::Error(String::from("Unexpected character: !"))
        );
    }
}
