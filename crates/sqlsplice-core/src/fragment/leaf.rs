use std::borrow::Cow;

use super::{Marker, Section};

/// Immutable text with a fixed marker list.
///
/// Used both for literal text supplied by the builder and for the clause
/// chunks handed back by a parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticFragment {
    chunk: String,
    markers: Vec<Marker>,
}

impl StaticFragment {
    /// Creates a fragment without markers.
    #[must_use]
    pub fn new(chunk: impl Into<String>) -> Self {
        Self {
            chunk: chunk.into(),
            markers: Vec::new(),
        }
    }

    /// Creates a fragment with markers, which must already be in textual
    /// order.
    #[must_use]
    pub fn with_markers(chunk: impl Into<String>, markers: Vec<Marker>) -> Self {
        Self {
            chunk: chunk.into(),
            markers,
        }
    }
}

impl Section for StaticFragment {
    fn chunk(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.chunk)
    }

    fn markers(&self) -> Vec<Marker> {
        self.markers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Param, SqlValue};

    #[test]
    fn test_returns_provided_chunk() {
        assert_eq!(StaticFragment::new("foo").chunk(), "foo");
    }

    #[test]
    fn test_empty_markers_when_none_provided() {
        assert!(StaticFragment::new("foo").markers().is_empty());
    }

    #[test]
    fn test_returns_provided_markers() {
        let bar = Param::Value(SqlValue::Text(String::from("bar")));
        let baz = Param::Value(SqlValue::Text(String::from("baz")));
        let fragment = StaticFragment::with_markers(
            "foo",
            vec![Marker::new(bar.clone(), 2), Marker::new(baz.clone(), 5)],
        );

        assert_eq!(
            fragment.markers(),
            vec![Marker::new(bar, 2), Marker::new(baz, 5)]
        );
    }
}
