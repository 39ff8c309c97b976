//! Tag filter owned by a mapping session.

use indexmap::IndexSet;

use crate::base::TagType;

/// The tag types a collection scans for.
///
/// The filter is enabled once at least one tag has been registered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapperFilter {
    tags: IndexSet<TagType>,
}

impl MapperFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag type. Returns false if it was already registered.
    pub fn register(&mut self, tag: impl Into<TagType>) -> bool {
        self.tags.insert(tag.into())
    }

    pub fn is_enabled(&self) -> bool {
        !self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Registered tag types in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &TagType> {
        self.tags.iter()
    }
}
