//! SQL fragments: chunks of text with located placeholder markers.
//!
//! Fragments are produced by the parser, by literal text supplied to the
//! builder, or derived from other fragments. Derivation never mutates the
//! source fragment; decorators and composites re-derive marker offsets from
//! their parts every time they are asked.
//!
//! For a chunk `"a = ? AND b = ?"` bound to `[2, 3]` the markers are
//! `[(2, 4), (3, 14)]`: every offset is the byte position of the placeholder
//! inside the chunk.

mod composite;
mod decorator;
mod leaf;

use std::borrow::Cow;
use std::sync::Arc;

pub use composite::CompositeFragment;
pub use decorator::{JoinAdapted, Parenthesized};
pub use leaf::StaticFragment;

use crate::value::Param;

/// A placeholder located inside a chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// The value bound to the placeholder.
    pub value: Param,
    /// Byte offset of the placeholder within the chunk.
    pub offset: usize,
}

impl Marker {
    /// Creates a marker.
    #[must_use]
    pub const fn new(value: Param, offset: usize) -> Self {
        Self { value, offset }
    }

    /// Returns the same marker moved `by` bytes to the right.
    #[must_use]
    pub fn shifted(self, by: usize) -> Self {
        Self {
            value: self.value,
            offset: self.offset + by,
        }
    }
}

/// The capability shared by every fragment kind.
pub trait Section {
    /// Returns the SQL text of the fragment.
    fn chunk(&self) -> Cow<'_, str>;

    /// Returns the markers in textual order.
    fn markers(&self) -> Vec<Marker>;
}

/// Any fragment that can occupy a clause slot.
///
/// Cloning shares static leaves and duplicates everything built on top of
/// them, so a clone can be extended without affecting the original.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Literal or parser produced text.
    Static(Arc<StaticFragment>),
    /// A fragment wrapped in parentheses.
    Parenthesized(Parenthesized),
    /// A parsed `t <TYPE> JOIN ...` table list turned into a bare join.
    JoinAdapted(JoinAdapted),
    /// A concatenation of fragments and glue.
    Composite(CompositeFragment),
}

impl Fragment {
    /// Creates a literal fragment without markers.
    #[must_use]
    pub fn literal(chunk: impl Into<String>) -> Self {
        StaticFragment::new(chunk).into()
    }

    /// Creates a literal fragment with the given markers.
    #[must_use]
    pub fn with_markers(chunk: impl Into<String>, markers: Vec<Marker>) -> Self {
        StaticFragment::with_markers(chunk, markers).into()
    }

    /// Wraps the fragment in parentheses.
    #[must_use]
    pub fn parenthesized(self) -> Self {
        Self::Parenthesized(Parenthesized::new(self))
    }

    /// Blanks the leading `t` of a parsed table list.
    #[must_use]
    pub fn join_adapted(self) -> Self {
        Self::JoinAdapted(JoinAdapted::new(self))
    }

    /// Returns true if appends go straight into this fragment.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }
}

impl Section for Fragment {
    fn chunk(&self) -> Cow<'_, str> {
        match self {
            Self::Static(fragment) => fragment.chunk(),
            Self::Parenthesized(fragment) => fragment.chunk(),
            Self::JoinAdapted(fragment) => fragment.chunk(),
            Self::Composite(fragment) => fragment.chunk(),
        }
    }

    fn markers(&self) -> Vec<Marker> {
        match self {
            Self::Static(fragment) => fragment.markers(),
            Self::Parenthesized(fragment) => fragment.markers(),
            Self::JoinAdapted(fragment) => fragment.markers(),
            Self::Composite(fragment) => fragment.markers(),
        }
    }
}

impl From<StaticFragment> for Fragment {
    fn from(fragment: StaticFragment) -> Self {
        Self::Static(Arc::new(fragment))
    }
}

impl From<Arc<StaticFragment>> for Fragment {
    fn from(fragment: Arc<StaticFragment>) -> Self {
        Self::Static(fragment)
    }
}

impl From<&str> for Fragment {
    fn from(chunk: &str) -> Self {
        Self::literal(chunk)
    }
}

impl From<String> for Fragment {
    fn from(chunk: String) -> Self {
        Self::literal(chunk)
    }
}

impl From<CompositeFragment> for Fragment {
    fn from(fragment: CompositeFragment) -> Self {
        Self::Composite(fragment)
    }
}
