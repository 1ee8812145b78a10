//! # sqlsplice-core
//!
//! Composable SELECT statements built from parsed clause fragments.
//!
//! This crate provides:
//! - Fragments: SQL text paired with the byte offsets of its placeholders and
//!   the values bound to them
//! - A clause map holding one fragment per clause of a SELECT statement,
//!   rendering the statement and its flat parameter list
//! - Inline sub-queries: a [`Query`] bound to a placeholder is written into
//!   the statement in parentheses and its parameters take the placeholder's
//!   place
//! - A lexer driven clause splitter and a builder that edits clauses of a
//!   parsed statement
//!
//! ## Editing a statement
//!
//! ```rust
//! use sqlsplice_core::{params, ClauseParser, Query, QueryEnvironment};
//!
//! let environment = QueryEnvironment::new(ClauseParser::new());
//! let mut builder = environment
//!     .builder_from_str("SELECT id FROM article WHERE status = ?", params!["PUBLISHED"])
//!     .unwrap();
//!
//! let authors = Query::create("SELECT id FROM author WHERE premium = ?", [true]);
//! let query = builder
//!     .and_where("author_id IN ?", params![authors])
//!     .unwrap()
//!     .order_by("id DESC", params![])
//!     .unwrap()
//!     .limit(10, None)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     query.sql(),
//!     "SELECT id FROM article \
//!      WHERE (status = ?) AND (author_id IN (SELECT id FROM author WHERE premium = ?)) \
//!      ORDER BY id DESC LIMIT 10"
//! );
//! assert_eq!(query.parameters().len(), 2);
//! ```
//!
//! ## Working with fragments directly
//!
//! ```rust
//! use sqlsplice_core::{ClauseMap, ClauseSlot, Fragment, Marker, Param, SqlValue};
//!
//! let mut map = ClauseMap::new();
//! map.set_section_for(ClauseSlot::Columns, "id");
//! map.set_section_for(ClauseSlot::Tables, "users");
//! map.set_section_for(
//!     ClauseSlot::Where,
//!     Fragment::with_markers("age > ?", vec![Marker::new(Param::Value(SqlValue::Int(18)), 6)]),
//! );
//! map.append_section_to(ClauseSlot::Where, "active = 1", " AND ");
//!
//! assert_eq!(
//!     map.build_sql().unwrap(),
//!     "SELECT id FROM users WHERE (age > ?) AND active = 1"
//! );
//! ```

pub mod builder;
pub mod clause;
pub mod clause_map;
pub mod error;
pub mod fragment;
pub mod lexer;
pub mod parser;
pub mod query;
pub mod value;

pub use builder::{QueryBuilder, QueryEnvironment};
pub use clause::ClauseSlot;
pub use clause_map::ClauseMap;
pub use error::{Result, SpliceError};
pub use fragment::{Fragment, Marker, Section};
pub use parser::{ClauseParser, Parser, ProfilingParser};
pub use query::Query;
pub use value::{Param, SqlValue, ToParam, ToSqlValue, PLACEHOLDER};
