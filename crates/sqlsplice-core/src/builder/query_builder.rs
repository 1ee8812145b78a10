//! Clause level editing of a parsed statement.

use std::fmt;

use tracing::trace;

use crate::clause::ClauseSlot;
use crate::clause_map::ClauseMap;
use crate::error::Result;
use crate::fragment::Fragment;
use crate::parser::Parser;
use crate::query::Query;
use crate::value::{Param, PLACEHOLDER};

/// Join flavours, by the keyword placed before `JOIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

/// Replaces and extends the clauses of a statement.
///
/// Every clause method takes the clause text and the values for its
/// placeholders. Text without placeholders and without values is used
/// verbatim; anything else is parsed as part of a minimal statement and the
/// matching clause is taken from the result. A method that fails leaves the
/// builder unchanged.
///
/// Methods replacing a clause (`select`, `where_clause`, ...) drop what the
/// clause held before. Methods prefixed with `and_` extend it: conditions are
/// joined with `AND`, each wrapped in parentheses, while grouping and
/// ordering terms are joined with a comma. Joins are appended to the `FROM`
/// clause.
pub struct QueryBuilder<'p, P: ?Sized> {
    parser: &'p P,
    sections: ClauseMap,
}

impl<P: ?Sized> Clone for QueryBuilder<'_, P> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser,
            sections: self.sections.clone(),
        }
    }
}

impl<P: ?Sized> fmt::Debug for QueryBuilder<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}

impl<'p, P: Parser + ?Sized> QueryBuilder<'p, P> {
    /// Creates a builder over `sections`, parsing clause text with `parser`.
    #[must_use]
    pub const fn new(parser: &'p P, sections: ClauseMap) -> Self {
        Self { parser, sections }
    }

    /// Returns the clauses built so far.
    #[must_use]
    pub const fn sections(&self) -> &ClauseMap {
        &self.sections
    }

    /// Replaces the selected columns.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `columns` has to be parsed and is rejected.
    pub fn select(&mut self, columns: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        let fragment = self.resolve("SELECT ", columns, parameters, ClauseSlot::Columns)?;
        self.sections.set_section_for(ClauseSlot::Columns, fragment);
        Ok(self)
    }

    /// Replaces the `WHERE` condition.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `condition` has to be parsed and is rejected.
    pub fn where_clause(&mut self, condition: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        let fragment = self.resolve("SELECT 1 WHERE ", condition, parameters, ClauseSlot::Where)?;
        self.sections.set_section_for(ClauseSlot::Where, fragment);
        Ok(self)
    }

    /// Adds a condition to the `WHERE` clause.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `condition` has to be parsed and is rejected.
    pub fn and_where(&mut self, condition: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        let fragment = self.resolve("SELECT 1 WHERE ", condition, parameters, ClauseSlot::Where)?;
        self.sections
            .append_section_to(ClauseSlot::Where, fragment.parenthesized(), " AND ");
        Ok(self)
    }

    /// Replaces the `HAVING` condition.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `condition` has to be parsed and is rejected.
    pub fn having(&mut self, condition: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        let fragment =
            self.resolve("SELECT 1 HAVING ", condition, parameters, ClauseSlot::Having)?;
        self.sections.set_section_for(ClauseSlot::Having, fragment);
        Ok(self)
    }

    /// Adds a condition to the `HAVING` clause.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `condition` has to be parsed and is rejected.
    pub fn and_having(&mut self, condition: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        let fragment =
            self.resolve("SELECT 1 HAVING ", condition, parameters, ClauseSlot::Having)?;
        self.sections
            .append_section_to(ClauseSlot::Having, fragment.parenthesized(), " AND ");
        Ok(self)
    }

    /// Replaces the `GROUP BY` terms.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `group_by` has to be parsed and is rejected.
    pub fn group_by(&mut self, group_by: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        let fragment =
            self.resolve("SELECT 1 GROUP BY ", group_by, parameters, ClauseSlot::GroupBy)?;
        self.sections.set_section_for(ClauseSlot::GroupBy, fragment);
        Ok(self)
    }

    /// Adds terms to the `GROUP BY` clause.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `group_by` has to be parsed and is rejected.
    pub fn and_group_by(&mut self, group_by: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        let fragment =
            self.resolve("SELECT 1 GROUP BY ", group_by, parameters, ClauseSlot::GroupBy)?;
        self.sections
            .append_section_to(ClauseSlot::GroupBy, fragment, ", ");
        Ok(self)
    }

    /// Replaces the `ORDER BY` terms.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `order_by` has to be parsed and is rejected.
    pub fn order_by(&mut self, order_by: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        let fragment =
            self.resolve("SELECT 1 ORDER BY ", order_by, parameters, ClauseSlot::OrderBy)?;
        self.sections.set_section_for(ClauseSlot::OrderBy, fragment);
        Ok(self)
    }

    /// Adds terms to the `ORDER BY` clause.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `order_by` has to be parsed and is rejected.
    pub fn and_order_by(&mut self, order_by: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        let fragment =
            self.resolve("SELECT 1 ORDER BY ", order_by, parameters, ClauseSlot::OrderBy)?;
        self.sections
            .append_section_to(ClauseSlot::OrderBy, fragment, ", ");
        Ok(self)
    }

    /// Appends a `JOIN` to the `FROM` clause.
    ///
    /// `join` is everything after the `JOIN` keyword, e.g. `t ON t.id = k`.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `join` has to be parsed and is rejected.
    pub fn join(&mut self, join: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        self.append_join(JoinKind::Inner, join, parameters)
    }

    /// Appends a `LEFT JOIN` to the `FROM` clause.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `join` has to be parsed and is rejected.
    pub fn left_join(&mut self, join: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        self.append_join(JoinKind::Left, join, parameters)
    }

    /// Appends a `RIGHT JOIN` to the `FROM` clause.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `join` has to be parsed and is rejected.
    pub fn right_join(&mut self, join: &str, parameters: Vec<Param>) -> Result<&mut Self> {
        self.append_join(JoinKind::Right, join, parameters)
    }

    /// Replaces the `LIMIT` clause.
    pub fn limit(&mut self, limit: u64, offset: Option<u64>) -> &mut Self {
        let chunk = match offset {
            Some(offset) => format!("{limit} OFFSET {offset}"),
            None => limit.to_string(),
        };
        self.sections.set_section_for(ClauseSlot::Limit, chunk);
        self
    }

    /// Returns a builder that evolves independently from this one.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Renders the statement.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`ClauseMap::build_sql`].
    pub fn build(&self) -> Result<Query> {
        self.sections.build()
    }

    fn append_join(
        &mut self,
        kind: JoinKind,
        join: &str,
        parameters: Vec<Param>,
    ) -> Result<&mut Self> {
        let keyword = kind.keyword();
        let fragment = if is_literal(join, &parameters) {
            Fragment::literal(format!("  {keyword} JOIN {join}"))
        } else {
            // The parsed table list starts with the single character table
            // `t`, which is blanked out so the offsets stay valid.
            let sql = format!("SELECT 1 FROM t {keyword} JOIN {join}");
            self.parse_slot(&sql, parameters, ClauseSlot::Tables)?
                .join_adapted()
        };

        self.sections
            .append_section_to(ClauseSlot::Tables, fragment, "");
        Ok(self)
    }

    /// Turns clause text into a fragment for `slot`, parsing it as the tail
    /// of a statement starting with `prefix` when needed.
    fn resolve(
        &self,
        prefix: &str,
        text: &str,
        parameters: Vec<Param>,
        slot: ClauseSlot,
    ) -> Result<Fragment> {
        if is_literal(text, &parameters) {
            trace!(slot = %slot, "Using clause text verbatim");
            return Ok(Fragment::literal(text));
        }
        self.parse_slot(&format!("{prefix}{text}"), parameters, slot)
    }

    fn parse_slot(&self, sql: &str, parameters: Vec<Param>, slot: ClauseSlot) -> Result<Fragment> {
        let sections = self.parser.parse(sql, parameters)?;
        sections.section_for(slot).cloned()
    }
}

/// Returns true if `text` can be used without parsing.
fn is_literal(text: &str, parameters: &[Param]) -> bool {
    parameters.is_empty() && !text.contains(PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpliceError;
    use crate::fragment::{Marker, Section};
    use crate::{params, QueryEnvironment};

    fn refuse(_sql: &str, _parameters: Vec<Param>) -> Result<ClauseMap> {
        Err(SpliceError::parse(1, "REFUSED"))
    }

    fn base() -> ClauseMap {
        let mut map = ClauseMap::new();
        map.set_section_for(ClauseSlot::Columns, "a");
        map.set_section_for(ClauseSlot::Tables, "t");
        map
    }

    #[test]
    fn test_literal_clauses_skip_the_parser() {
        let parser = refuse;
        let mut builder = QueryBuilder::new(&parser, base());

        builder
            .where_clause("x = 1", params![])
            .unwrap()
            .and_where("y = 2", params![])
            .unwrap()
            .group_by("a", params![])
            .unwrap()
            .and_group_by("b", params![])
            .unwrap()
            .order_by("c DESC", params![])
            .unwrap();

        assert_eq!(
            builder.build().unwrap().sql(),
            "SELECT a FROM t WHERE (x = 1) AND (y = 2) GROUP BY a, b ORDER BY c DESC"
        );
    }

    #[test]
    fn test_failed_parse_leaves_builder_unchanged() {
        let parser = refuse;
        let mut builder = QueryBuilder::new(&parser, base());
        builder.where_clause("x = 1", params![]).unwrap();

        assert_eq!(
            builder.and_where("y = ?", params![2]).unwrap_err(),
            SpliceError::parse(1, "REFUSED")
        );
        assert!(builder.left_join("u ON u.k = ?", params![3]).is_err());
        assert_eq!(builder.build().unwrap().sql(), "SELECT a FROM t WHERE x = 1");
    }

    #[test]
    fn test_placeholder_without_values_is_parsed() {
        let parser = refuse;
        let mut builder = QueryBuilder::new(&parser, base());

        assert!(builder.select("?", params![]).is_err());
        assert!(builder.select("a", params![1]).is_err());
    }

    #[test]
    fn test_synthetic_statements() {
        let seen = std::cell::RefCell::new(Vec::new());
        let parser = |sql: &str, parameters: Vec<Param>| -> Result<ClauseMap> {
            seen.borrow_mut().push(sql.to_owned());
            let mut map = ClauseMap::new();
            let chunk = "t LEFT JOIN u ON u.k = ?";
            for slot in ClauseSlot::ALL {
                map.set_section_for(
                    slot,
                    Fragment::with_markers(
                        chunk,
                        parameters
                            .iter()
                            .map(|value| Marker::new(value.clone(), chunk.len() - 1))
                            .collect(),
                    ),
                );
            }
            Ok(map)
        };
        let mut builder = QueryBuilder::new(&parser, base());

        builder.select("?", params![1]).unwrap();
        builder.where_clause("?", params![1]).unwrap();
        builder.having("?", params![1]).unwrap();
        builder.group_by("?", params![1]).unwrap();
        builder.order_by("?", params![1]).unwrap();
        builder.join("u ON u.k = ?", params![1]).unwrap();
        builder.right_join("u ON u.k = ?", params![1]).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                "SELECT ?",
                "SELECT 1 WHERE ?",
                "SELECT 1 HAVING ?",
                "SELECT 1 GROUP BY ?",
                "SELECT 1 ORDER BY ?",
                "SELECT 1 FROM t  JOIN u ON u.k = ?",
                "SELECT 1 FROM t RIGHT JOIN u ON u.k = ?",
            ]
        );

        let tables = builder.sections().section_for(ClauseSlot::Tables).unwrap();
        assert_eq!(
            tables.chunk(),
            "t  LEFT JOIN u ON u.k = ?  LEFT JOIN u ON u.k = ?"
        );
        let offsets = tables.markers().iter().map(|m| m.offset).collect::<Vec<_>>();
        assert_eq!(offsets, vec![24, 48]);
        for offset in offsets {
            assert_eq!(&tables.chunk()[offset..=offset], "?");
        }
    }

    #[test]
    fn test_literal_joins() {
        let parser = refuse;
        let mut builder = QueryBuilder::new(&parser, base());

        builder
            .join("u ON u.k = t.k", params![])
            .unwrap()
            .left_join("v ON v.k = t.k", params![])
            .unwrap()
            .right_join("w ON w.k = t.k", params![])
            .unwrap();

        assert_eq!(
            builder.build().unwrap().sql(),
            "SELECT a FROM t   JOIN u ON u.k = t.k  LEFT JOIN v ON v.k = t.k  RIGHT JOIN w ON w.k = t.k"
        );
    }

    #[test]
    fn test_limit() {
        let parser = refuse;
        let mut builder = QueryBuilder::new(&parser, base());

        builder.limit(10, None);
        assert_eq!(builder.build().unwrap().sql(), "SELECT a FROM t LIMIT 10");

        // Keyword and offset are separated by a space, unlike `10OFFSET 20`.
        builder.limit(10, Some(20));
        assert_eq!(
            builder.build().unwrap().sql(),
            "SELECT a FROM t LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_copy_is_independent() {
        let parser = refuse;
        let mut builder = QueryBuilder::new(&parser, base());
        builder.where_clause("x = 1", params![]).unwrap();

        let mut copy = builder.copy();
        copy.and_where("y = 2", params![]).unwrap();
        builder.and_where("z = 3", params![]).unwrap();

        assert_eq!(
            builder.build().unwrap().sql(),
            "SELECT a FROM t WHERE (x = 1) AND (z = 3)"
        );
        assert_eq!(
            copy.build().unwrap().sql(),
            "SELECT a FROM t WHERE (x = 1) AND (y = 2)"
        );
    }

    #[test]
    fn test_builder_over_borrowed_environment_parser() {
        let environment =
            QueryEnvironment::new(|_: &str, _: Vec<Param>| -> Result<ClauseMap> { Ok(base()) });
        let first = environment.builder_from_str("SELECT a FROM t", params![]).unwrap();
        let mut second = first.copy();
        second.limit(1, None);

        assert_eq!(first.build().unwrap().sql(), "SELECT a FROM t");
        assert_eq!(second.build().unwrap().sql(), "SELECT a FROM t LIMIT 1");
        assert!(first.build().unwrap().parameters().is_empty());
    }
}
