//! Member metadata extractor.

use smol_str::SmolStr;

use crate::access;
use crate::base::{MemberName, TagType};
use crate::error::Result;
use crate::model::{MemberDescriptor, Object, Tag, Value};

use super::reader::read_attribute;

/// Which attribute to resolve from each tag during extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AttributeSelector {
    /// The tag's first declared attribute, or `Null` for marker tags.
    #[default]
    First,
    /// A named attribute; a tag lacking it is an error.
    Named(SmolStr),
}

impl AttributeSelector {
    pub fn named(name: impl AsRef<str>) -> Self {
        Self::Named(SmolStr::new(name))
    }

    fn resolve(&self, tag: &Tag) -> Result<Value> {
        match self {
            Self::First => Ok(tag
                .first_attribute()
                .map_or(Value::Null, |(_, value)| value.clone())),
            Self::Named(name) => read_attribute(tag, name).cloned(),
        }
    }
}

/// One tag found on a member together with one attribute value read from it.
#[derive(Clone, Debug, PartialEq)]
pub struct TagExtraction<'p> {
    tag: &'p Tag,
    value: Value,
    simple_name: SmolStr,
}

impl<'p> TagExtraction<'p> {
    pub(crate) fn new(tag: &'p Tag, value: Value) -> Self {
        Self {
            tag,
            value,
            simple_name: SmolStr::new(tag.tag_type().simple_name()),
        }
    }

    pub fn tag_type(&self) -> &'p TagType {
        self.tag.tag_type()
    }

    pub fn tag(&self) -> &'p Tag {
        self.tag
    }

    /// The extracted attribute value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Last path segment of the tag type.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }
}

/// A member's value snapshot for one instance plus its tag extractions.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedMember<'p> {
    member: &'p MemberDescriptor,
    value: Value,
    tags: Vec<TagExtraction<'p>>,
}

impl<'p> ExtractedMember<'p> {
    pub fn member(&self) -> &'p MemberDescriptor {
        self.member
    }

    pub fn name(&self) -> &'p MemberName {
        self.member.name()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Tag extractions in the member's tag declaration order.
    pub fn tags(&self) -> &[TagExtraction<'p>] {
        &self.tags
    }

    pub fn tag(&self, tag_type: &str) -> Option<&TagExtraction<'p>> {
        self.tags.iter().find(|t| *t.tag_type() == *tag_type)
    }
}

/// Snapshot a member of `instance` and resolve one attribute per attached tag.
pub fn extract<'p>(
    instance: &Object,
    member: &'p MemberDescriptor,
    selector: &AttributeSelector,
) -> Result<ExtractedMember<'p>> {
    let value = access::read(instance, member)?.into_owned();
    let tags = member
        .tags()
        .iter()
        .map(|tag| Ok(TagExtraction::new(tag, selector.resolve(tag)?)))
        .collect::<Result<Vec<_>>>()?;

    Ok(ExtractedMember {
        member,
        value,
        tags,
    })
}
