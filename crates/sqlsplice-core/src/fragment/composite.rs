use std::borrow::Cow;

use super::{Fragment, Marker, Section};

/// An ordered concatenation of fragments separated by literal glue.
///
/// Marker offsets of every part are moved by the byte length of all chunks
/// and glue preceding it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeFragment {
    head: Box<Fragment>,
    tail: Vec<(String, Fragment)>,
}

impl CompositeFragment {
    /// Starts a composite from a single fragment.
    #[must_use]
    pub fn new(head: Fragment) -> Self {
        Self {
            head: Box::new(head),
            tail: Vec::new(),
        }
    }

    /// Appends `fragment`, emitting `glue` verbatim in front of it.
    pub fn append(&mut self, fragment: Fragment, glue: impl Into<String>) {
        self.tail.push((glue.into(), fragment));
    }

    /// Returns the number of fragments in the composite.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Always false: a composite holds at least its first fragment.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Section for CompositeFragment {
    fn chunk(&self) -> Cow<'_, str> {
        if self.tail.is_empty() {
            return self.head.chunk();
        }

        let mut chunk = self.head.chunk().into_owned();
        for (glue, fragment) in &self.tail {
            chunk.push_str(glue);
            chunk.push_str(&fragment.chunk());
        }
        Cow::Owned(chunk)
    }

    fn markers(&self) -> Vec<Marker> {
        let mut markers = self.head.markers();
        let mut offset = self.head.chunk().len();

        for (glue, fragment) in &self.tail {
            offset += glue.len();
            markers.extend(
                fragment
                    .markers()
                    .into_iter()
                    .map(|marker| marker.shifted(offset)),
            );
            offset += fragment.chunk().len();
        }

        markers
    }
}
