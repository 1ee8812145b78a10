//! Statement building on top of a [`Parser`](crate::Parser).
//!
//! A [`QueryEnvironment`] parses a base statement into a [`ClauseMap`] and
//! hands out [`QueryBuilder`]s that replace or extend its clauses. Clause text
//! passed to a builder is parsed through the same parser, so placeholders
//! and sub-queries work the same way in every clause.
//!
//! # Example
//!
//! ```rust
//! use sqlsplice_core::{params, ClauseParser, QueryEnvironment};
//!
//! let environment = QueryEnvironment::new(ClauseParser::new());
//! let mut builder = environment
//!     .builder_from_str("SELECT id FROM users WHERE active = ?", params![true])
//!     .unwrap();
//!
//! let query = builder
//!     .and_where("age > ?", params![18])
//!     .unwrap()
//!     .left_join("teams t ON t.id = users.team_id", params![])
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     query.sql(),
//!     "SELECT id FROM users  LEFT JOIN teams t ON t.id = users.team_id \
//!      WHERE (active = ?) AND (age > ?)"
//! );
//! assert_eq!(query.parameters().len(), 2);
//! ```
//!
//! [`ClauseMap`]: crate::ClauseMap

mod environment;
mod query_builder;

pub use environment::QueryEnvironment;
pub use query_builder::QueryBuilder;
