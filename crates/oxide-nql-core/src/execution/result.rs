//! Execution results.

use core::fmt;

use super::backend::ResultStream;
use crate::entity::{Entity, FromEntity};
use crate::error::{BackendError, QueryError, Result};

/// The outcome of executing a statement.
pub enum ExecutionResult<T> {
    /// A lazy sequence of records (`select`, `get`).
    Stream(ResultStream<T>),
    /// Number of affected records, when the backend reports it.
    Count(u64),
    /// The record written (`insert`, `update`, `put`).
    Echo(T),
    /// Completed without output.
    Done,
}

impl<T> ExecutionResult<T> {
    /// Reduces the result to at most one record.
    ///
    /// A stream is read up to its second item; an echo is its record;
    /// counts and `Done` yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NonUniqueResult`] if the stream holds more than
    /// one record, or the backend error raised while reading it.
    pub fn single_result(self) -> Result<Option<T>> {
        match self {
            Self::Stream(mut stream) => {
                let Some(first) = stream.next().transpose()? else {
                    return Ok(None);
                };
                match stream.next() {
                    None => Ok(Some(first)),
                    Some(Ok(_)) => Err(QueryError::NonUniqueResult),
                    Some(Err(e)) => Err(QueryError::Backend(e)),
                }
            }
            Self::Echo(record) => Ok(Some(record)),
            Self::Count(_) | Self::Done => Ok(None),
        }
    }

    /// Collects every record.
    ///
    /// # Errors
    ///
    /// Returns the first backend error raised by the stream.
    pub fn into_vec(self) -> Result<Vec<T>> {
        match self {
            Self::Stream(stream) => stream
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(QueryError::Backend),
            Self::Echo(record) => Ok(vec![record]),
            Self::Count(_) | Self::Done => Ok(vec![]),
        }
    }

    /// Returns the affected count, if this is a count.
    #[must_use]
    pub const fn count(&self) -> Option<u64> {
        match self {
            Self::Count(count) => Some(*count),
            _ => None,
        }
    }

    /// Returns true for [`ExecutionResult::Done`].
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl<T: Send + 'static> ExecutionResult<T> {
    /// Converts the result into a stream of records.
    #[must_use]
    pub fn into_stream(self) -> ResultStream<T> {
        match self {
            Self::Stream(stream) => stream,
            Self::Echo(record) => Box::new(core::iter::once(Ok::<T, BackendError>(record))),
            Self::Count(_) | Self::Done => {
                Box::new(core::iter::empty::<core::result::Result<T, BackendError>>())
            }
        }
    }
}

impl ExecutionResult<Entity> {
    /// Reduces the result to at most one record, mapped to `M`.
    ///
    /// # Errors
    ///
    /// Fails as [`ExecutionResult::single_result`] does, or when the
    /// record does not map to `M`.
    pub fn single_result_as<M: FromEntity>(self) -> Result<Option<M>> {
        self.single_result()?.map(M::from_entity).transpose()
    }

    /// Collects every record, mapped to `M`.
    ///
    /// # Errors
    ///
    /// Fails as [`ExecutionResult::into_vec`] does, or when a record does
    /// not map to `M`.
    pub fn into_vec_as<M: FromEntity>(self) -> Result<Vec<M>> {
        self.into_vec()?.into_iter().map(M::from_entity).collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for ExecutionResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Count(count) => f.debug_tuple("Count").field(count).finish(),
            Self::Echo(record) => f.debug_tuple("Echo").field(record).finish(),
            Self::Done => f.write_str("Done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn stream(items: Vec<i64>) -> ExecutionResult<Value> {
        ExecutionResult::Stream(Box::new(items.into_iter().map(|n| Ok::<_, BackendError>(Value::Int(n)))))
    }

    #[test]
    fn test_single_result_cardinality() {
        assert_eq!(stream(vec![]).single_result().unwrap(), None);
        assert_eq!(stream(vec![7]).single_result().unwrap(), Some(Value::Int(7)));
        assert!(matches!(
            stream(vec![1, 2]).single_result(),
            Err(QueryError::NonUniqueResult)
        ));
    }

    #[test]
    fn test_single_result_passes_backend_error() {
        let failing: ExecutionResult<Value> = ExecutionResult::Stream(Box::new(
            core::iter::once(Err::<Value, _>(BackendError::from("connection lost"))),
        ));
        let err = failing.single_result().unwrap_err();
        assert_eq!(err.to_string(), "connection lost");
    }

    #[test]
    fn test_echo_count_done() {
        let echo = ExecutionResult::Echo(Value::Bool(true));
        assert_eq!(echo.single_result().unwrap(), Some(Value::Bool(true)));
        let count: ExecutionResult<Value> = ExecutionResult::Count(3);
        assert_eq!(count.count(), Some(3));
        assert!(count.into_vec().unwrap().is_empty());
        let done: ExecutionResult<Value> = ExecutionResult::Done;
        assert!(done.is_done());
        assert_eq!(done.into_stream().count(), 0);
    }

    #[test]
    fn test_into_vec() {
        assert_eq!(
            stream(vec![1, 2]).into_vec().unwrap(),
            vec![Value::Int(1), Value::Int(2)]
        );
    }
}
