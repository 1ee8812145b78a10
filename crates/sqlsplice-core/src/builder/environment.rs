//! Entry point for building statements.

use super::QueryBuilder;
use crate::error::Result;
use crate::parser::Parser;
use crate::query::Query;
use crate::value::Param;

/// Owns a parser and creates builders from base statements.
#[derive(Debug, Clone, Default)]
pub struct QueryEnvironment<P> {
    parser: P,
}

impl<P: Parser> QueryEnvironment<P> {
    /// Creates an environment backed by `parser`.
    #[must_use]
    pub const fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Returns the parser.
    #[must_use]
    pub const fn parser(&self) -> &P {
        &self.parser
    }

    /// Parses `sql` and returns a builder over its clauses.
    ///
    /// # Errors
    ///
    /// Returns whatever the parser reports for `sql` and `parameters`.
    pub fn builder_from_str(
        &self,
        sql: &str,
        parameters: impl IntoIterator<Item = Param>,
    ) -> Result<QueryBuilder<'_, P>> {
        let sections = self.parser.parse(sql, parameters.into_iter().collect())?;
        Ok(QueryBuilder::new(&self.parser, sections))
    }

    /// Re-parses a rendered query and returns a builder over its clauses.
    ///
    /// # Errors
    ///
    /// Returns whatever the parser reports for the query.
    pub fn builder_from_query(&self, query: &Query) -> Result<QueryBuilder<'_, P>> {
        self.builder_from_str(
            query.sql(),
            query.parameters().iter().cloned().map(Param::Value),
        )
    }
}
