//! Type, member and tag descriptors.
//!
//! Descriptors are the explicit introspection surface the engines consume.
//! They are built once, registered with a [`TypeProvider`](crate::registry::TypeProvider)
//! and never mutated afterwards.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{MemberName, TagType, TypeName, names_match};

use super::types::MemberType;
use super::value::Value;

// ============================================================================
// TAGS
// ============================================================================

/// A metadata tag attached to a member, carrying named attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    tag_type: TagType,
    attributes: IndexMap<SmolStr, Value>,
}

impl Tag {
    /// Create a tag with no attributes (a marker).
    pub fn new(tag_type: impl Into<TagType>) -> Self {
        Self {
            tag_type: tag_type.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Declare an attribute. Declaration order is kept.
    pub fn with_attribute(mut self, name: impl AsRef<str>, value: impl Into<Value>) -> Self {
        self.attributes.insert(SmolStr::new(name), value.into());
        self
    }

    pub fn tag_type(&self) -> &TagType {
        &self.tag_type
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// The first declared attribute, if any.
    pub fn first_attribute(&self) -> Option<(&str, &Value)> {
        self.attributes.first().map(|(k, v)| (k.as_str(), v))
    }
}

// ============================================================================
// MEMBERS
// ============================================================================

/// Declared visibility of a member. The member accessor ignores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    #[default]
    Private,
    Protected,
}

/// One declared member of a type.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDescriptor {
    name: MemberName,
    declared: MemberType,
    visibility: Visibility,
    tags: Vec<Tag>,
    declaring_type: TypeName,
}

impl MemberDescriptor {
    /// Create a private member. The declaring type is filled in when the
    /// member is added to a [`TypeDescriptor`].
    pub fn new(name: impl Into<MemberName>, declared: MemberType) -> Self {
        Self {
            name: name.into(),
            declared,
            visibility: Visibility::default(),
            tags: Vec::new(),
            declaring_type: TypeName::new(""),
        }
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Attach a tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn name(&self) -> &MemberName {
        &self.name
    }

    pub fn declared_type(&self) -> &MemberType {
        &self.declared
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Attached tags in declaration order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag(&self, tag_type: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.tag_type == *tag_type)
    }

    pub fn has_tag(&self, tag_type: &str) -> bool {
        self.tag(tag_type).is_some()
    }

    /// The type this member was declared on.
    pub fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }
}

// ============================================================================
// TYPES
// ============================================================================

/// A composite type: its own declared members and whether it can be
/// constructed without arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDescriptor {
    name: TypeName,
    members: Vec<MemberDescriptor>,
    constructible: bool,
}

impl TypeDescriptor {
    /// Create a constructible type with no members.
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            constructible: true,
        }
    }

    /// Declare a member. A member with the exact same name is replaced in place.
    pub fn with_member(mut self, mut member: MemberDescriptor) -> Self {
        member.declaring_type = self.name.clone();
        match self.members.iter_mut().find(|m| m.name == member.name) {
            Some(slot) => *slot = member,
            None => self.members.push(member),
        }
        self
    }

    /// Shorthand for `with_member(MemberDescriptor::new(name, declared))`.
    pub fn field(self, name: impl Into<MemberName>, declared: MemberType) -> Self {
        self.with_member(MemberDescriptor::new(name, declared))
    }

    /// Mark the type as having no reachable zero-argument constructor.
    pub fn without_default_constructor(mut self) -> Self {
        self.constructible = false;
        self
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    /// Own members in declaration order.
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    pub fn is_constructible(&self) -> bool {
        self.constructible
    }

    /// Exact-name lookup.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == *name)
    }

    /// Case-insensitive lookup; the first declared match wins.
    pub fn find_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| names_match(m.name.as_str(), name))
    }
}
