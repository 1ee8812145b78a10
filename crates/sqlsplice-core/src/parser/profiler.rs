//! Parse timing.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use tracing::debug;

use super::Parser;
use crate::clause_map::ClauseMap;
use crate::error::Result;
use crate::value::Param;

/// One recorded parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTrace {
    /// The parsed statement.
    pub sql: String,
    /// Wall clock time spent in the wrapped parser.
    pub duration: Duration,
    /// Whether the wrapped parser returned an error.
    pub failed: bool,
}

/// Wraps a parser and records the duration of every call.
///
/// Traces accumulate until [`ProfilingParser::reset`] is called.
#[derive(Debug, Default)]
pub struct ProfilingParser<P> {
    inner: P,
    traces: RefCell<Vec<ParseTrace>>,
}

impl<P> ProfilingParser<P> {
    /// Wraps `inner`.
    #[must_use]
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            traces: RefCell::new(Vec::new()),
        }
    }

    /// Returns the wrapped parser.
    #[must_use]
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwraps the parser, dropping the recorded traces.
    #[must_use]
    pub fn into_inner(self) -> P {
        self.inner
    }

    /// Returns the traces recorded so far, oldest first.
    #[must_use]
    pub fn traces(&self) -> Vec<ParseTrace> {
        self.traces.borrow().clone()
    }

    /// Returns the total time spent parsing.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.traces.borrow().iter().map(|trace| trace.duration).sum()
    }

    /// Drops all recorded traces.
    pub fn reset(&self) {
        self.traces.borrow_mut().clear();
    }
}

impl<P: Parser> Parser for ProfilingParser<P> {
    fn parse(&self, sql: &str, parameters: Vec<Param>) -> Result<ClauseMap> {
        let started = Instant::now();
        let result = self.inner.parse(sql, parameters);
        let duration = started.elapsed();
        let failed = result.is_err();

        debug!(sql = %sql, elapsed = ?duration, failed, "Parsed statement");
        self.traces.borrow_mut().push(ParseTrace {
            sql: sql.to_owned(),
            duration,
            failed,
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::ClauseSlot;
    use crate::error::SpliceError;

    fn stub(sql: &str, _parameters: Vec<Param>) -> Result<ClauseMap> {
        if sql == "SELECT 1" {
            let mut map = ClauseMap::new();
            map.set_section_for(ClauseSlot::Columns, "1");
            Ok(map)
        } else {
            Err(SpliceError::parse(1, "STUB"))
        }
    }

    #[test]
    fn test_records_every_call() {
        let parser = ProfilingParser::new(stub);

        assert!(parser.parse("SELECT 1", vec![]).is_ok());
        assert!(parser.parse("SELECT 2", vec![]).is_err());

        let traces = parser.traces();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].sql, "SELECT 1");
        assert!(!traces[0].failed);
        assert_eq!(traces[1].sql, "SELECT 2");
        assert!(traces[1].failed);
        assert_eq!(
            parser.total_duration(),
            traces[0].duration + traces[1].duration
        );
    }

    #[test]
    fn test_passes_results_through() {
        let parser = ProfilingParser::new(stub);

        let map = parser.parse("SELECT 1", vec![]).unwrap();
        assert_eq!(map.build_sql().unwrap(), "SELECT 1");
        assert_eq!(
            parser.parse("SELECT 2", vec![]).unwrap_err(),
            SpliceError::parse(1, "STUB")
        );
    }

    #[test]
    fn test_reset() {
        let parser = ProfilingParser::new(stub);
        let _ = parser.parse("SELECT 1", vec![]);
        parser.reset();

        assert!(parser.traces().is_empty());
        assert_eq!(parser.total_duration(), Duration::ZERO);
    }
}
