//! Error types for parsing, binding and executing statements.

use crate::execution::Capability;
use crate::parser::SyntaxError;

/// An error raised by a backend, passed through unchanged.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while handling a statement.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Malformed query text.
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Well-formed input that violates a statement rule.
    #[error("Semantic error: {0}")]
    Semantic(String),

    /// A value was bound to a parameter the statement never declared.
    #[error("Unknown parameter: @{0}")]
    UnknownParameter(String),

    /// A parameter was read before a value was bound to it.
    #[error("Unresolved parameter: @{0}")]
    UnresolvedParameter(String),

    /// A strict binding targeted a parameter that already has a value.
    #[error("Parameter already bound: @{0}")]
    ParameterAlreadyBound(String),

    /// A single result was requested but several were produced.
    #[error("Expected at most one result, found more")]
    NonUniqueResult,

    /// The backend cannot honor part of the statement.
    #[error("Unsupported capability: {0}")]
    UnsupportedCapability(Capability),

    /// A builder method received an invalid argument.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// A single-use prepared statement was executed again.
    #[error("Prepared statement was already executed")]
    AlreadyExecuted,

    /// No factory is registered for a provider tag.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The process-wide registry was installed twice.
    #[error("Provider registry is already installed")]
    RegistryAlreadyInstalled,

    /// Invalid provider configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Error raised by the backend.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Result type for query operations. The parser's internal helpers
/// name [`SyntaxError`] as the error type instead.
pub type Result<T, E = QueryError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;

    fn scan() -> Result<u64, SyntaxError> {
        Err(SyntaxError::new("bad token", Span::point(3)))
    }

    fn parse_count() -> Result<u64> {
        Ok(scan()? + 1)
    }

    #[test]
    fn test_syntax_errors_lift_into_query_errors() {
        assert!(matches!(
            parse_count(),
            Err(QueryError::Syntax(e)) if e.message == "bad token" && e.span == Span::point(3)
        ));
    }
}
