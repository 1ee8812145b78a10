//! Fragments derived from a single inner fragment.

use std::borrow::Cow;

use super::{Fragment, Marker, Section};

/// Wraps the inner chunk in `(` and `)`.
///
/// The opening parenthesis moves every marker one byte to the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Parenthesized {
    inner: Box<Fragment>,
}

impl Parenthesized {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Fragment) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Returns the wrapped fragment.
    #[must_use]
    pub fn inner(&self) -> &Fragment {
        &self.inner
    }
}

impl Section for Parenthesized {
    fn chunk(&self) -> Cow<'_, str> {
        Cow::Owned(format!("({})", self.inner.chunk()))
    }

    fn markers(&self) -> Vec<Marker> {
        self.inner
            .markers()
            .into_iter()
            .map(|marker| marker.shifted(1))
            .collect()
    }
}

/// Turns the table list of a parsed `SELECT 1 FROM t <TYPE> JOIN ...` into a
/// join that can be appended to an existing table list.
///
/// The leading `t` is overwritten with a space instead of being removed, so
/// the chunk keeps its length and no marker has to move. A chunk that is
/// empty or starts with a multi-byte character is returned unchanged, since
/// blanking it would shift every marker.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinAdapted {
    inner: Box<Fragment>,
}

impl JoinAdapted {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Fragment) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Returns the wrapped fragment.
    #[must_use]
    pub fn inner(&self) -> &Fragment {
        &self.inner
    }
}

impl Section for JoinAdapted {
    fn chunk(&self) -> Cow<'_, str> {
        let mut chunk = self.inner.chunk().into_owned();
        // Only a single-byte character can be swapped without moving markers.
        if chunk.chars().next().is_some_and(|c| c.is_ascii()) {
            chunk.replace_range(..1, " ");
        }
        Cow::Owned(chunk)
    }

    fn markers(&self) -> Vec<Marker> {
        self.inner.markers()
    }
}
