//! Tag-filtered collector.
//!
//! Walks an object graph depth-first in declaration order and gathers every
//! terminal member carrying a registered tag. Ordered containers are
//! descended into element by element; maps declare no members and contribute
//! nothing.

use tracing::trace;

use crate::access;
use crate::base::TagType;
use crate::error::{Error, Result};
use crate::metadata::{AttributeSelector, ExtractedMember, extract};
use crate::model::{Category, Classified, ListValue, MemberDescriptor, Object, Value};
use crate::registry::TypeProvider;

use super::filter::MapperFilter;

// ============================================================================
// RESULT SET
// ============================================================================

/// One collected member, filed under the registered tag that selected it.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedMemberEntry<'p> {
    tag_type: TagType,
    member: ExtractedMember<'p>,
}

impl<'p> TaggedMemberEntry<'p> {
    pub fn tag_type(&self) -> &TagType {
        &self.tag_type
    }

    pub fn member(&self) -> &ExtractedMember<'p> {
        &self.member
    }

    pub fn value(&self) -> &Value {
        self.member.value()
    }
}

/// Collected members in discovery order.
///
/// A member carrying several registered tags appears once per tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaggedMemberCollection<'p> {
    entries: Vec<TaggedMemberEntry<'p>>,
}

impl<'p> TaggedMemberCollection<'p> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, tag_type: TagType, member: ExtractedMember<'p>) {
        self.entries.push(TaggedMemberEntry { tag_type, member });
    }

    /// Whether any entry was filed under `tag_type`.
    pub fn contains(&self, tag_type: impl AsRef<str>) -> bool {
        let tag_type = tag_type.as_ref();
        self.entries.iter().any(|e| e.tag_type == *tag_type)
    }

    /// Entries filed under `tag_type`, in discovery order.
    pub fn get(&self, tag_type: impl AsRef<str>) -> Vec<&TaggedMemberEntry<'p>> {
        let tag_type = tag_type.as_ref();
        self.entries
            .iter()
            .filter(|e| e.tag_type == *tag_type)
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedMemberEntry<'p>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'c, 'p> IntoIterator for &'c TaggedMemberCollection<'p> {
    type Item = &'c TaggedMemberEntry<'p>;
    type IntoIter = std::slice::Iter<'c, TaggedMemberEntry<'p>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'p> IntoIterator for TaggedMemberCollection<'p> {
    type Item = TaggedMemberEntry<'p>;
    type IntoIter = std::vec::IntoIter<TaggedMemberEntry<'p>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// COLLECTOR
// ============================================================================

/// One collection walk over a fixed filter.
pub(crate) struct Collector<'p, 'f> {
    provider: &'p dyn TypeProvider,
    filter: &'f MapperFilter,
    selector: &'f AttributeSelector,
}

impl<'p, 'f> Collector<'p, 'f> {
    pub(crate) fn new(
        provider: &'p dyn TypeProvider,
        filter: &'f MapperFilter,
        selector: &'f AttributeSelector,
    ) -> Self {
        Self {
            provider,
            filter,
            selector,
        }
    }

    pub(crate) fn run(&self, source: &Object) -> Result<TaggedMemberCollection<'p>> {
        let mut out = TaggedMemberCollection::new();
        self.collect_object(source, &mut out)?;
        Ok(out)
    }

    fn collect_object(&self, object: &Object, out: &mut TaggedMemberCollection<'p>) -> Result<()> {
        let members = self.provider.members_of(object.type_name().as_str())?;
        for member in members {
            match member.declared_type().category() {
                Category::Terminal(_) => self.collect_terminal(object, member, out)?,
                Category::Ordered => {
                    let value = access::read(object, member)?;
                    match value.classify() {
                        Classified::Ordered(list) => self.collect_list(list, out)?,
                        Classified::Null => {}
                        _ => {
                            return Err(Error::read(
                                object.type_name(),
                                member.name(),
                                format!(
                                    "expected {}, found {}",
                                    member.declared_type(),
                                    value.type_label()
                                ),
                            ));
                        }
                    }
                }
                Category::KeyValue | Category::Composite => {
                    let value = access::read(object, member)?;
                    if let Classified::Composite(nested) = value.classify() {
                        self.collect_object(nested, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn collect_terminal(
        &self,
        object: &Object,
        member: &'p MemberDescriptor,
        out: &mut TaggedMemberCollection<'p>,
    ) -> Result<()> {
        let registered: Vec<&TagType> = member
            .tags()
            .iter()
            .map(|tag| tag.tag_type())
            .filter(|tag_type| self.filter.contains(tag_type.as_str()))
            .collect();
        if registered.is_empty() {
            return Ok(());
        }

        let extracted = extract(object, member, self.selector)?;
        trace!(
            type_name = %object.type_name(),
            member = %member.name(),
            tags = registered.len(),
            "collected member"
        );
        for tag_type in registered {
            out.push(tag_type.clone(), extracted.clone());
        }
        Ok(())
    }

    fn collect_list(&self, list: &ListValue, out: &mut TaggedMemberCollection<'p>) -> Result<()> {
        for item in list {
            match item.classify() {
                Classified::Ordered(nested) => self.collect_list(nested, out)?,
                Classified::Composite(object) => self.collect_object(object, out)?,
                _ => {}
            }
        }
        Ok(())
    }
}
