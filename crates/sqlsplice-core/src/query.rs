//! The rendered statement.

use crate::value::{SqlValue, ToSqlValue};

/// A rendered SQL statement together with the values for its placeholders.
///
/// Parameters are always flat: sub-queries bound while building the
/// statement have already been inlined into `sql` and their values spliced
/// into `parameters`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    sql: String,
    parameters: Vec<SqlValue>,
}

impl Query {
    /// Creates a query from its parts.
    #[must_use]
    pub fn new(sql: impl Into<String>, parameters: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }

    /// Creates a query, converting each parameter with [`ToSqlValue`].
    #[must_use]
    pub fn create<T: ToSqlValue>(
        sql: impl Into<String>,
        parameters: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::new(
            sql,
            parameters.into_iter().map(ToSqlValue::to_sql_value).collect(),
        )
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the values bound to the placeholders, in textual order.
    #[must_use]
    pub fn parameters(&self) -> &[SqlValue] {
        &self.parameters
    }

    /// Splits the query into its SQL text and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.parameters)
    }
}
