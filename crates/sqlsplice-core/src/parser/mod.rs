//! Turning SQL text into clause fragments.
//!
//! A [`Parser`] splits a statement into one fragment per clause slot and
//! binds the supplied parameters to the placeholders it finds. The crate
//! ships [`ClauseParser`], a lexer driven splitter for SELECT statements, and
//! [`ProfilingParser`], which records how long every parse took.

mod profiler;
mod splitter;

pub use profiler::{ParseTrace, ProfilingParser};
pub use splitter::{ClauseParser, ParseStatus};

use crate::clause_map::ClauseMap;
use crate::error::Result;
use crate::value::Param;

/// Splits SQL text into clause fragments.
pub trait Parser {
    /// Parses `sql`, binding `parameters` to its placeholders in textual
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SpliceError::Parse`] when the statement is rejected,
    /// and [`crate::SpliceError::TooFewParameters`] or
    /// [`crate::SpliceError::TooManyParameters`] when the number of
    /// parameters does not match the number of placeholders.
    fn parse(&self, sql: &str, parameters: Vec<Param>) -> Result<ClauseMap>;
}

impl<F> Parser for F
where
    F: Fn(&str, Vec<Param>) -> Result<ClauseMap>,
{
    fn parse(&self, sql: &str, parameters: Vec<Param>) -> Result<ClauseMap> {
        self(sql, parameters)
    }
}
