//! Parameter values bound to placeholders.
//!
//! A placeholder is either bound to a plain [`SqlValue`] or to a complete
//! [`Query`] that is inlined as a sub-query when the statement is rendered.

use crate::query::Query;

/// The placeholder character understood by the parser and the driver.
pub const PLACEHOLDER: char = '?';

/// A scalar SQL value bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for i16 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u16 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

/// A value bound to a placeholder marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A plain value handed to the driver as is.
    Value(SqlValue),
    /// A nested statement whose SQL replaces the placeholder and whose
    /// parameters are flattened in its place.
    Subquery(Query),
}

impl Param {
    /// Returns the sub-query if this parameter is inlined.
    #[must_use]
    pub const fn as_subquery(&self) -> Option<&Query> {
        match self {
            Self::Subquery(query) => Some(query),
            Self::Value(_) => None,
        }
    }

    /// Appends the values this parameter binds to `out`.
    pub(crate) fn flatten_into(&self, out: &mut Vec<SqlValue>) {
        match self {
            Self::Value(value) => out.push(value.clone()),
            Self::Subquery(query) => out.extend(query.parameters().iter().cloned()),
        }
    }
}

/// Trait for types that can be bound to a placeholder.
pub trait ToParam {
    /// Converts the value to a `Param`.
    fn to_param(self) -> Param;
}

impl<T: ToSqlValue> ToParam for T {
    fn to_param(self) -> Param {
        Param::Value(self.to_sql_value())
    }
}

impl ToParam for Query {
    fn to_param(self) -> Param {
        Param::Subquery(self)
    }
}

impl ToParam for Param {
    fn to_param(self) -> Param {
        self
    }
}

/// Builds a `Vec<Param>` from values of mixed types.
///
/// ```rust
/// use sqlsplice_core::{params, Param, Query, SqlValue};
///
/// let inner = Query::new("SELECT MAX(id) FROM t WHERE k = ?", vec![SqlValue::Int(3)]);
/// let bound = params![1, "two", inner];
///
/// assert_eq!(bound.len(), 3);
/// assert!(matches!(bound[2], Param::Subquery(_)));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Param>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::ToParam::to_param($value)),+]
    };
}
