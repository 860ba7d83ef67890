//! Canonical query text.
//!
//! Every AST node renders to text that parses back to an equal node.

use core::fmt;
use core::time::Duration;

use super::condition::Condition;
use super::query_value::QueryValue;
use super::statement::{
    DelStatement, DeleteStatement, GetStatement, InsertStatement, Payload, PutStatement,
    SelectStatement, Sort, Statement, UpdateStatement,
};
use crate::lexer::Keyword;

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_plain_name(name: &str) -> bool {
    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars.next().is_some_and(is_name_start) && chars.all(|c| c.is_alphanumeric() || c == '_')
    }) && Keyword::from_str(name).is_none()
}

/// Writes a field or entity name, quoting it when it would not lex back
/// as a single identifier.
pub(crate) fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_name(name) {
        f.write_str(name)
    } else {
        write!(f, "`{}`", name.replace('`', "``"))
    }
}

fn write_names(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_name(f, name)?;
    }
    Ok(())
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

const NANOS_PER_SECOND: u128 = 1_000_000_000;

const TIME_UNITS: [(u128, &str); 6] = [
    (86_400 * NANOS_PER_SECOND, "day"),
    (3_600 * NANOS_PER_SECOND, "hour"),
    (60 * NANOS_PER_SECOND, "minute"),
    (NANOS_PER_SECOND, "second"),
    (1_000_000, "millisecond"),
    (1, "nanosecond"),
];

/// Writes a TTL in the largest unit that represents it exactly.
fn write_ttl(f: &mut fmt::Formatter<'_>, ttl: Duration) -> fmt::Result {
    let nanos = ttl.as_nanos();
    if nanos == 0 {
        return f.write_str("0 second");
    }
    for (size, unit) in TIME_UNITS {
        if nanos % size == 0 {
            return write!(f, "{} {unit}", nanos / size);
        }
    }
    write!(f, "{nanos} nanosecond")
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Parameter(name) => write!(f, "@{name}"),
            Self::Json(json) => write!(f, "{json}"),
            Self::Array(items) => {
                f.write_str("{")?;
                write_list(f, items)?;
                f.write_str("}")
            }
            Self::Statement(select) => write!(f, "({select})"),
        }
    }
}

impl Condition {
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare {
                name,
                operator,
                value,
            } => {
                write_name(f, name)?;
                write!(f, " {operator} {value}")
            }
            Self::In { name, values } => {
                write_name(f, name)?;
                f.write_str(" in ")?;
                match values {
                    QueryValue::Array(items) => {
                        f.write_str("(")?;
                        write_list(f, items)?;
                        f.write_str(")")
                    }
                    other => write!(f, "{other}"),
                }
            }
            Self::Between { name, low, high } => {
                write_name(f, name)?;
                write!(f, " between {low} and {high}")
            }
            Self::And { conditions } => {
                for (i, condition) in conditions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" and ")?;
                    }
                    condition.fmt_operand(f, matches!(condition, Self::Or { .. }))?;
                }
                Ok(())
            }
            Self::Or { conditions } => {
                for (i, condition) in conditions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    condition.fmt_operand(f, false)?;
                }
                Ok(())
            }
            Self::Not { condition } => {
                f.write_str("not ")?;
                condition.fmt_operand(
                    f,
                    matches!(**condition, Self::And { .. } | Self::Or { .. }),
                )
            }
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, &self.name)?;
        write!(f, " {}", self.direction.as_str())
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("select ")?;
        if self.fields.is_empty() {
            f.write_str("*")?;
        } else {
            write_names(f, &self.fields)?;
        }
        f.write_str(" from ")?;
        write_name(f, &self.entity)?;
        if let Some(condition) = &self.condition {
            write!(f, " where {condition}")?;
        }
        if !self.sorts.is_empty() {
            f.write_str(" order by ")?;
            write_list(f, &self.sorts)?;
        }
        if self.skip > 0 {
            write!(f, " skip {}", self.skip)?;
        }
        if self.limit > 0 {
            write!(f, " limit {}", self.limit)?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("delete ")?;
        if !self.fields.is_empty() {
            write_names(f, &self.fields)?;
            f.write_str(" ")?;
        }
        f.write_str("from ")?;
        write_name(f, &self.entity)?;
        if let Some(condition) = &self.condition {
            write!(f, " where {condition}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conditions(conditions) => {
                f.write_str("(")?;
                write_list(f, conditions)?;
                f.write_str(")")
            }
            Self::Json(json) => write!(f, "{json}"),
        }
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("insert ")?;
        write_name(f, &self.entity)?;
        write!(f, " {}", self.payload)?;
        if let Some(ttl) = self.ttl {
            f.write_str(" ")?;
            write_ttl(f, ttl)?;
        }
        Ok(())
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("update ")?;
        write_name(f, &self.entity)?;
        write!(f, " {}", self.payload)
    }
}

impl fmt::Display for GetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("get ")?;
        write_list(f, &self.keys)
    }
}

impl fmt::Display for PutStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "put {{{}, {}", self.key, self.value)?;
        if let Some(ttl) = self.ttl {
            f.write_str(", ")?;
            write_ttl(f, ttl)?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for DelStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("del ")?;
        write_list(f, &self.keys)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Insert(s) => write!(f, "{s}"),
            Self::Update(s) => write!(f, "{s}"),
            Self::Delete(s) => write!(f, "{s}"),
            Self::Get(s) => write!(f, "{s}"),
            Self::Put(s) => write!(f, "{s}"),
            Self::Del(s) => write!(f, "{s}"),
        }
    }
}
