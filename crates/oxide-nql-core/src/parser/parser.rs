//! Statement parser implementation.

use core::time::Duration;

use super::error::SyntaxError;
use super::pratt::{
    connective_binding_power, starts_value, token_to_comparison, token_to_connective,
};
use crate::ast::{
    Condition, DelStatement, DeleteStatement, GetStatement, InsertStatement, Operator, Payload,
    PutStatement, QueryValue, SelectStatement, Sort, SortDirection, Statement, UpdateStatement,
};
use crate::error::Result;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::params::Params;
use crate::value::Value;

/// Query parser.
///
/// Every `@name` met while parsing registers a slot in the parser's
/// [`Params`], available afterwards through [`Parser::into_params`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
    params: Params,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
            params: Params::new(),
        }
    }

    /// Parses a single statement, optionally terminated by `;`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::QueryError::Syntax`] if the input is not a valid
    /// statement or has trailing tokens, and [`crate::QueryError::Semantic`]
    /// if it is well-formed but breaks a statement rule.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        let statement = self.parse_statement_body()?;
        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.current.is_eof() {
            return Err(self.unexpected("end of input").into());
        }
        Ok(statement)
    }

    /// Parses a script of statements separated by `;`.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid statement, as [`Parser::parse_statement`]
    /// does.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>> {
        let mut statements = vec![];
        loop {
            while self.check(&TokenKind::Semicolon) {
                self.advance();
            }
            if self.current.is_eof() {
                break;
            }
            statements.push(self.parse_statement_body()?);
            if !self.check(&TokenKind::Semicolon) && !self.current.is_eof() {
                return Err(self.unexpected("';' or end of input").into());
            }
        }
        Ok(statements)
    }

    /// Returns the parameters registered so far.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Consumes the parser, returning the registered parameters.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.params
    }

    fn parse_statement_body(&mut self) -> Result<Statement> {
        match self.current.as_keyword() {
            Some(Keyword::Select) => Ok(Statement::Select(self.parse_select_statement()?)),
            Some(Keyword::Insert) => Ok(Statement::Insert(self.parse_insert_statement()?)),
            Some(Keyword::Update) => Ok(Statement::Update(self.parse_update_statement()?)),
            Some(Keyword::Delete) => Ok(Statement::Delete(self.parse_delete_statement()?)),
            Some(Keyword::Get) => Ok(Statement::Get(GetStatement {
                keys: self.parse_key_list(Keyword::Get)?,
            })),
            Some(Keyword::Put) => Ok(Statement::Put(self.parse_put_statement()?)),
            Some(Keyword::Del) => Ok(Statement::Del(DelStatement {
                keys: self.parse_key_list(Keyword::Del)?,
            })),
            _ => Err(self
                .unexpected("select, insert, update, delete, get, put or del")
                .into()),
        }
    }

    /// Parses a SELECT statement.
    fn parse_select_statement(&mut self) -> Result<SelectStatement> {
        self.expect_keyword(Keyword::Select)?;
        let fields = self.parse_fields()?;
        self.expect_keyword(Keyword::From)?;
        let entity = self.expect_name()?;
        let condition = self.parse_where()?;

        // ORDER BY clause
        let sorts = if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_sort_list()?
        } else {
            vec![]
        };

        let (skip, limit) = self.parse_paging()?;

        Ok(SelectStatement {
            entity,
            fields,
            condition,
            sorts,
            skip,
            limit,
        })
    }

    /// Parses a DELETE statement.
    fn parse_delete_statement(&mut self) -> Result<DeleteStatement> {
        self.expect_keyword(Keyword::Delete)?;
        let fields = self.parse_fields()?;
        self.expect_keyword(Keyword::From)?;
        let entity = self.expect_name()?;
        let condition = self.parse_where()?;
        Ok(DeleteStatement {
            entity,
            fields,
            condition,
        })
    }

    /// Parses an INSERT statement.
    fn parse_insert_statement(&mut self) -> Result<InsertStatement> {
        self.expect_keyword(Keyword::Insert)?;
        if self.check_keyword(Keyword::Into) {
            self.advance();
        }
        let entity = self.expect_name()?;
        let payload = self.parse_payload()?;
        let ttl = if matches!(self.current.kind, TokenKind::Integer(_)) {
            Some(self.parse_ttl()?)
        } else {
            None
        };
        Ok(InsertStatement {
            entity,
            payload,
            ttl,
        })
    }

    /// Parses an UPDATE statement.
    fn parse_update_statement(&mut self) -> Result<UpdateStatement> {
        self.expect_keyword(Keyword::Update)?;
        let entity = self.expect_name()?;
        let payload = self.parse_payload()?;
        Ok(UpdateStatement { entity, payload })
    }

    /// Parses a PUT statement.
    fn parse_put_statement(&mut self) -> Result<PutStatement> {
        self.expect_keyword(Keyword::Put)?;
        self.expect(&TokenKind::LeftBrace)?;
        let key = self.parse_value()?;
        self.expect(&TokenKind::Comma)?;
        let value = self.parse_value()?;
        let ttl = if self.check(&TokenKind::Comma) {
            self.advance();
            Some(self.parse_ttl()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightBrace)?;
        Ok(PutStatement { key, value, ttl })
    }

    /// Parses the keys of a GET or DEL statement. Commas between keys are
    /// optional.
    fn parse_key_list(&mut self, keyword: Keyword) -> Result<Vec<QueryValue>> {
        self.expect_keyword(keyword)?;
        let mut keys = vec![self.parse_value()?];
        loop {
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else if !starts_value(&self.current.kind) {
                break;
            }
            keys.push(self.parse_value()?);
        }
        Ok(keys)
    }

    /// Parses an optional field list, up to `from`.
    fn parse_fields(&mut self) -> Result<Vec<String>, SyntaxError> {
        if self.check(&TokenKind::Star) {
            self.advance();
            return Ok(vec![]);
        }
        if self.check_keyword(Keyword::From) {
            return Ok(vec![]);
        }
        let mut fields = vec![self.expect_name()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            fields.push(self.expect_name()?);
        }
        Ok(fields)
    }

    /// Parses an optional WHERE clause.
    fn parse_where(&mut self) -> Result<Option<Condition>> {
        if !self.check_keyword(Keyword::Where) {
            return Ok(None);
        }
        self.advance();
        Ok(Some(self.parse_condition(0)?))
    }

    /// Parses the ORDER BY list.
    fn parse_sort_list(&mut self) -> Result<Vec<Sort>, SyntaxError> {
        let mut sorts = vec![];
        loop {
            let name = self.expect_name()?;
            let direction = if self.check_keyword(Keyword::Desc) {
                self.advance();
                SortDirection::Desc
            } else {
                if self.check_keyword(Keyword::Asc) {
                    self.advance();
                }
                SortDirection::Asc
            };
            sorts.push(Sort { name, direction });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(sorts)
    }

    /// Parses SKIP and LIMIT in either order, each at most once.
    fn parse_paging(&mut self) -> Result<(u64, u64), SyntaxError> {
        let mut skip = None;
        let mut limit = None;
        loop {
            if skip.is_none() && self.check_keyword(Keyword::Skip) {
                self.advance();
                skip = Some(self.expect_count()?);
            } else if limit.is_none() && self.check_keyword(Keyword::Limit) {
                self.advance();
                limit = Some(self.expect_count()?);
            } else {
                break;
            }
        }
        Ok((skip.unwrap_or(0), limit.unwrap_or(0)))
    }

    /// Parses a condition chain using binding powers.
    fn parse_condition(&mut self, min_bp: u8) -> Result<Condition> {
        let mut lhs = self.parse_unary_condition()?;

        loop {
            let Some((l_bp, r_bp)) = connective_binding_power(&self.current.kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let connective = token_to_connective(&self.current.kind);
            self.advance();
            let rhs = self.parse_condition(r_bp)?;
            lhs = match connective {
                Some(Operator::Or) => lhs.or(rhs),
                _ => lhs.and(rhs),
            };
        }

        Ok(lhs)
    }

    /// Parses `not`, a parenthesized chain or a predicate.
    fn parse_unary_condition(&mut self) -> Result<Condition> {
        if self.check_keyword(Keyword::Not) {
            self.advance();
            return Ok(self.parse_unary_condition()?.negate());
        }
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            let condition = self.parse_condition(0)?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(condition);
        }
        let name = self.expect_name()?;
        self.parse_predicate(name)
    }

    /// Parses the operator and operands following a field name.
    fn parse_predicate(&mut self, name: String) -> Result<Condition> {
        if self.check_keyword(Keyword::In) {
            self.advance();
            let values = self.parse_in_operand()?;
            return Condition::in_value(name, values);
        }
        if self.check_keyword(Keyword::Between) {
            self.advance();
            let low = self.parse_value()?;
            self.expect_keyword(Keyword::And)?;
            let high = self.parse_value()?;
            return Ok(Condition::Between { name, low, high });
        }
        let Some(operator) = token_to_comparison(&self.current.kind) else {
            return Err(self
                .unexpected("comparison operator, in or between")
                .into());
        };
        self.advance();
        let value = self.parse_value()?;
        Ok(Condition::Compare {
            name,
            operator,
            value,
        })
    }

    /// Parses the operand of `in`: a parenthesized list or sub-query, or
    /// any single value.
    fn parse_in_operand(&mut self) -> Result<QueryValue> {
        if !self.check(&TokenKind::LeftParen) {
            return self.parse_value();
        }
        self.advance();
        if self.check_keyword(Keyword::Select) {
            let select = self.parse_select_statement()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(QueryValue::Statement(Box::new(select)));
        }
        let mut values = vec![self.parse_value()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            values.push(self.parse_value()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(QueryValue::Array(values))
    }

    /// Parses an INSERT or UPDATE payload.
    fn parse_payload(&mut self) -> Result<Payload> {
        let conditions = if self.check(&TokenKind::LeftParen) {
            Some(self.parse_assignments()?)
        } else {
            None
        };
        let json = match &self.current.kind {
            TokenKind::LeftBrace => {
                self.advance();
                Some(QueryValue::Json(self.parse_json_object_body(None)?))
            }
            TokenKind::LeftBracket => Some(QueryValue::Json(self.parse_json_value()?)),
            TokenKind::Parameter(_) => Some(self.parse_value()?),
            _ => None,
        };
        if conditions.is_none() && json.is_none() {
            return Err(self.unexpected("assignments or JSON payload").into());
        }
        Payload::from_parts(conditions, json)
    }

    /// Parses `(name = value, ...)`.
    fn parse_assignments(&mut self) -> Result<Vec<Condition>> {
        self.expect(&TokenKind::LeftParen)?;
        let mut assignments = vec![];
        loop {
            let name = self.expect_name()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_value()?;
            assignments.push(Condition::Compare {
                name,
                operator: Operator::Equals,
                value,
            });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(assignments)
    }

    /// Parses a value.
    fn parse_value(&mut self) -> Result<QueryValue> {
        let value = match &self.current.kind {
            TokenKind::String(s) => QueryValue::Literal(Value::Text(s.clone())),
            TokenKind::Integer(n) => QueryValue::Literal(Value::Int(*n)),
            TokenKind::Float(x) => QueryValue::Literal(Value::Float(*x)),
            TokenKind::Keyword(Keyword::True) => QueryValue::Literal(Value::Bool(true)),
            TokenKind::Keyword(Keyword::False) => QueryValue::Literal(Value::Bool(false)),
            TokenKind::Keyword(Keyword::Null) => QueryValue::Literal(Value::Null),
            TokenKind::Parameter(name) => {
                let handle = self.params.add(name.clone());
                QueryValue::Parameter(String::from(handle.name()))
            }
            TokenKind::Minus => return Ok(QueryValue::Literal(self.parse_negative()?)),
            TokenKind::LeftBrace => return self.parse_brace_value(),
            TokenKind::LeftBracket => return Ok(QueryValue::Json(self.parse_json_value()?)),
            TokenKind::LeftParen => {
                self.advance();
                let select = self.parse_select_statement()?;
                self.expect(&TokenKind::RightParen)?;
                return Ok(QueryValue::Statement(Box::new(select)));
            }
            _ => return Err(self.unexpected("value").into()),
        };
        self.advance();
        Ok(value)
    }

    /// Parses `- number` written with a gap; `-5` is a single token.
    fn parse_negative(&mut self) -> Result<Value, SyntaxError> {
        self.expect(&TokenKind::Minus)?;
        let value = match self.current.kind {
            TokenKind::Integer(n) => match n.checked_neg() {
                Some(n) => Value::Int(n),
                None => return Err(SyntaxError::new("Integer literal out of range", self.current.span)),
            },
            TokenKind::Float(x) => Value::Float(-x),
            _ => return Err(self.unexpected("number")),
        };
        self.advance();
        Ok(value)
    }

    /// Parses a value starting with `{`: a JSON object when the first
    /// member is `"key": ...` or the braces are empty, an array otherwise.
    fn parse_brace_value(&mut self) -> Result<QueryValue> {
        self.expect(&TokenKind::LeftBrace)?;
        let mut items = vec![];
        if let TokenKind::String(key) = &self.current.kind {
            let key = key.clone();
            self.advance();
            if self.check(&TokenKind::Colon) {
                return Ok(QueryValue::Json(self.parse_json_object_body(Some(key))?));
            }
            items.push(QueryValue::Literal(Value::Text(key)));
        } else if self.check(&TokenKind::RightBrace) {
            return Ok(QueryValue::Json(self.parse_json_object_body(None)?));
        } else {
            items.push(self.parse_value()?);
        }
        while self.check(&TokenKind::Comma) {
            self.advance();
            items.push(self.parse_value()?);
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(QueryValue::Array(items))
    }

    /// Parses a JSON object after its opening brace. When `first_key` is
    /// given, that key has already been consumed.
    fn parse_json_object_body(
        &mut self,
        first_key: Option<String>,
    ) -> Result<serde_json::Value, SyntaxError> {
        let mut object = serde_json::Map::new();
        let mut key = match first_key {
            Some(key) => key,
            None if self.check(&TokenKind::RightBrace) => {
                self.advance();
                return Ok(serde_json::Value::Object(object));
            }
            None => self.expect_string()?,
        };
        loop {
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_json_value()?;
            object.insert(key, value);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
            key = self.expect_string()?;
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(serde_json::Value::Object(object))
    }

    /// Parses a JSON value.
    fn parse_json_value(&mut self) -> Result<serde_json::Value, SyntaxError> {
        let value = match &self.current.kind {
            TokenKind::String(s) => serde_json::Value::String(s.clone()),
            TokenKind::Integer(n) => serde_json::Value::from(*n),
            TokenKind::Float(x) => serde_json::Value::from(*x),
            TokenKind::Keyword(Keyword::True) => serde_json::Value::Bool(true),
            TokenKind::Keyword(Keyword::False) => serde_json::Value::Bool(false),
            TokenKind::Keyword(Keyword::Null) => serde_json::Value::Null,
            TokenKind::Minus => return self.parse_negative().map(|value| value.to_json()),
            TokenKind::LeftBrace => {
                self.advance();
                return self.parse_json_object_body(None);
            }
            TokenKind::LeftBracket => {
                self.advance();
                let mut items = vec![];
                if !self.check(&TokenKind::RightBracket) {
                    loop {
                        items.push(self.parse_json_value()?);
                        if !self.check(&TokenKind::Comma) {
                            break;
                        }
                        self.advance();
                    }
                }
                self.expect(&TokenKind::RightBracket)?;
                return Ok(serde_json::Value::Array(items));
            }
            _ => return Err(self.unexpected("JSON value")),
        };
        self.advance();
        Ok(value)
    }

    /// Parses `<integer> <unit>`.
    fn parse_ttl(&mut self) -> Result<Duration, SyntaxError> {
        let amount = self.expect_count()?;
        let TokenKind::Identifier(unit) = &self.current.kind else {
            return Err(self.unexpected("time unit"));
        };
        let unit = unit.to_ascii_lowercase();
        let ttl = match unit.strip_suffix('s').unwrap_or(unit.as_str()) {
            "day" => amount.checked_mul(86_400).map(Duration::from_secs),
            "hour" => amount.checked_mul(3_600).map(Duration::from_secs),
            "minute" => amount.checked_mul(60).map(Duration::from_secs),
            "second" => Some(Duration::from_secs(amount)),
            "millisecond" => Some(Duration::from_millis(amount)),
            "nanosecond" => Some(Duration::from_nanos(amount)),
            _ => return Err(self.unexpected("time unit")),
        };
        let Some(ttl) = ttl else {
            return Err(SyntaxError::new("Time to live is out of range", self.current.span));
        };
        self.advance();
        Ok(ttl)
    }

    // Helper methods

    /// Advances to the next token.
    fn advance(&mut self) {
        self.previous = core::mem::replace(&mut self.current, self.lexer.next_token());
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Builds an error for the current token.
    fn unexpected(&self, expected: &str) -> SyntaxError {
        let span = if self.current.is_eof() {
            self.previous_end()
        } else {
            self.current.span
        };
        SyntaxError::unexpected(expected, self.current.kind.clone(), span)
    }

    /// Returns the position right after the last consumed token.
    const fn previous_end(&self) -> Span {
        if self.current.span.start > self.previous.span.end {
            Span::point(self.previous.span.end)
        } else {
            self.current.span
        }
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), SyntaxError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("{kind:?}")))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), SyntaxError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects and returns a name.
    fn expect_name(&mut self) -> Result<String, SyntaxError> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("name")),
        }
    }

    /// Expects and returns a string literal.
    fn expect_string(&mut self) -> Result<String, SyntaxError> {
        match &self.current.kind {
            TokenKind::String(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(self.unexpected("string")),
        }
    }

    /// Expects and returns a non-negative integer.
    fn expect_count(&mut self) -> Result<u64, SyntaxError> {
        match self.current.kind {
            TokenKind::Integer(n) => {
                let count = u64::try_from(n)
                    .map_err(|_| SyntaxError::new("Expected a non-negative integer", self.current.span))?;
                self.advance();
                Ok(count)
            }
            _ => Err(self.unexpected("integer")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::param;
    use crate::error::QueryError;

    fn parse(input: &str) -> Result<Statement> {
        Parser::new(input).parse_statement()
    }

    #[test]
    fn test_simple_select() {
        let stmt = parse("select * from God").unwrap();
        assert_eq!(stmt, Statement::Select(SelectStatement::new("God")));
    }

    #[test]
    fn test_select_with_where_and_paging() {
        let Statement::Select(select) =
            parse("select name from God where age > 10 limit 5 skip 2").unwrap()
        else {
            panic!("Expected SELECT");
        };
        assert_eq!(select.fields, vec!["name"]);
        assert_eq!(select.condition, Some(Condition::gt("age", 10)));
        assert_eq!((select.skip, select.limit), (2, 5));
    }

    #[test]
    fn test_condition_precedence() {
        let Statement::Select(select) =
            parse("select from T where a = 1 or b = 2 and c = 3").unwrap()
        else {
            panic!("Expected SELECT");
        };
        let expected = Condition::eq("a", 1).or(Condition::eq("b", 2).and(Condition::eq("c", 3)));
        assert_eq!(select.condition, Some(expected));
    }

    #[test]
    fn test_parameters_are_registered() {
        let mut parser = Parser::new("select from T where a = @x or b = @y and c = @x");
        parser.parse_statement().unwrap();
        let params = parser.into_params();
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_put_with_ttl() {
        let stmt = parse("put {\"Diana\", @value, 10 second}").unwrap();
        assert_eq!(
            stmt,
            Statement::Put(PutStatement {
                key: QueryValue::literal("Diana"),
                value: param("value"),
                ttl: Some(Duration::from_secs(10)),
            })
        );
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse("get \"a\" )").unwrap_err();
        let QueryError::Syntax(err) = err else {
            panic!("Expected syntax error");
        };
        assert_eq!(err.found, Some(TokenKind::RightParen));
        assert_eq!(err.span, Span::new(8, 9));
    }

    #[test]
    fn test_payload_exclusivity_is_semantic() {
        let err = parse("insert Person (name = \"Diana\") {\"age\": 10}").unwrap_err();
        assert!(matches!(err, QueryError::Semantic(_)));
    }

    #[test]
    fn test_parse_statements() {
        let statements = Parser::new("get 1; del 2;; put {3, 4};")
            .parse_statements()
            .unwrap();
        assert_eq!(statements.len(), 3);
        assert!(Parser::new("get 1 put {1, 2}").parse_statements().is_err());
    }

    #[test]
    fn test_lexer_error_is_reported() {
        let QueryError::Syntax(err) = parse("get \"open").unwrap_err() else {
            panic!("Expected syntax error");
        };
        assert_eq!(err.message, "Unterminated string literal");
    }

    #[test]
    fn test_integer_extremes() {
        let Statement::Select(select) =
            parse("select * from T where a = -9223372036854775808 or b = - 7").unwrap()
        else {
            panic!("Expected SELECT");
        };
        assert_eq!(
            select.condition,
            Some(Condition::eq("a", i64::MIN).or(Condition::eq("b", -7)))
        );
        assert!(matches!(
            parse("get - -9223372036854775808"),
            Err(QueryError::Syntax(_))
        ));
    }

    #[test]
    fn test_float_out_of_range() {
        let QueryError::Syntax(err) = parse("select * from T where a = 1e400").unwrap_err() else {
            panic!("Expected syntax error");
        };
        assert_eq!(err.message, "Float literal out of range");
    }
}
