//! One fragment per clause slot, rendered into a statement.

use crate::clause::ClauseSlot;
use crate::error::{Result, SpliceError};
use crate::fragment::{CompositeFragment, Fragment, Section};
use crate::query::Query;
use crate::value::{Param, SqlValue};

/// Keyword every rendered statement starts with.
const STATEMENT_KEYWORD: &str = "SELECT";

/// The clauses of a SELECT statement, each held as a fragment.
///
/// A slot moves from absent to a single fragment to a composite, never
/// back. Cloning shares parser-produced leaves and duplicates composites, so
/// a clone and its original can be extended independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseMap {
    sections: [Option<Fragment>; ClauseSlot::COUNT],
}

impl ClauseMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no slot is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Option::is_none)
    }

    /// Returns true if `slot` holds a fragment.
    #[must_use]
    pub fn has_section_for(&self, slot: ClauseSlot) -> bool {
        self.sections[slot.index()].is_some()
    }

    /// Returns the fragment held by `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::SectionNotFound`] when the slot is empty.
    pub fn section_for(&self, slot: ClauseSlot) -> Result<&Fragment> {
        self.sections[slot.index()]
            .as_ref()
            .ok_or(SpliceError::SectionNotFound(slot))
    }

    /// Replaces whatever `slot` holds with `fragment`.
    pub fn set_section_for(&mut self, slot: ClauseSlot, fragment: impl Into<Fragment>) {
        self.sections[slot.index()] = Some(fragment.into());
    }

    /// Appends `fragment` to `slot`, separated from the current content by
    /// `glue`.
    ///
    /// An empty slot simply takes the fragment and the glue is dropped. A
    /// slot holding a single fragment is first turned into a composite; for
    /// `WHERE` and `HAVING` the existing predicate is parenthesized on the
    /// way.
    pub fn append_section_to(
        &mut self,
        slot: ClauseSlot,
        fragment: impl Into<Fragment>,
        glue: &str,
    ) {
        let entry = &mut self.sections[slot.index()];

        let mut composite = match entry.take() {
            None => {
                *entry = Some(fragment.into());
                return;
            }
            Some(Fragment::Composite(composite)) => composite,
            Some(current) if slot.parenthesizes_on_append() => {
                CompositeFragment::new(current.parenthesized())
            }
            Some(current) => CompositeFragment::new(current),
        };

        composite.append(fragment.into(), glue);
        *entry = Some(Fragment::Composite(composite));
    }

    /// Iterates over populated slots in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (ClauseSlot, &Fragment)> {
        ClauseSlot::ALL
            .into_iter()
            .zip(&self.sections)
            .filter_map(|(slot, fragment)| fragment.as_ref().map(|f| (slot, f)))
    }

    /// Renders the statement text.
    ///
    /// Placeholders bound to a sub-query are replaced with the parenthesized
    /// sub-query SQL; all other placeholders are kept for the driver.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::NoSection`] for an empty map and
    /// [`SpliceError::MarkerOutOfBounds`] if a sub-query marker does not
    /// address a character of its chunk.
    pub fn build_sql(&self) -> Result<String> {
        self.ensure_not_empty()?;

        let mut sql = String::from(STATEMENT_KEYWORD);
        for (slot, fragment) in self.iter() {
            if let Some(keyword) = slot.keyword() {
                sql.push(' ');
                sql.push_str(keyword);
            }
            sql.push(' ');
            sql.push_str(&render_chunk(slot, fragment)?);
        }

        Ok(sql)
    }

    /// Returns the values for every placeholder left in the rendered
    /// statement, in textual order.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::NoSection`] for an empty map.
    pub fn build_parameters(&self) -> Result<Vec<SqlValue>> {
        self.ensure_not_empty()?;

        let mut parameters = Vec::new();
        for (_, fragment) in self.iter() {
            for marker in fragment.markers() {
                marker.value.flatten_into(&mut parameters);
            }
        }

        Ok(parameters)
    }

    /// Renders the statement text and its parameters.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`ClauseMap::build_sql`].
    pub fn build(&self) -> Result<Query> {
        Ok(Query::new(self.build_sql()?, self.build_parameters()?))
    }

    /// Returns a map that evolves independently from this one.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(SpliceError::NoSection);
        }
        Ok(())
    }
}

/// Returns the chunk of `fragment` with sub-query placeholders inlined.
fn render_chunk(slot: ClauseSlot, fragment: &Fragment) -> Result<String> {
    let mut chunk = fragment.chunk().into_owned();
    let mut shift = 0;

    for marker in fragment.markers() {
        let Param::Subquery(query) = &marker.value else {
            continue;
        };

        let at = marker.offset + shift;
        if chunk.get(at..=at).is_none() {
            return Err(SpliceError::MarkerOutOfBounds {
                slot,
                offset: marker.offset,
            });
        }

        chunk.replace_range(at..=at, &format!("({})", query.sql()));
        // Two parentheses in, one placeholder out.
        shift += query.sql().len() + 1;
    }

    Ok(chunk)
}
