//! By-name and by-tag member lookups over a single instance.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::access;
use crate::base::{MemberName, TagType};
use crate::error::{Error, Result};
use crate::model::{MemberDescriptor, Object, Value};
use crate::registry::TypeProvider;

use super::extract::{AttributeSelector, ExtractedMember, TagExtraction, extract};
use super::reader::read_attribute;

/// Extract the member with exactly this name.
pub fn extract_by_name<'p>(
    provider: &'p dyn TypeProvider,
    instance: &Object,
    name: &str,
) -> Result<ExtractedMember<'p>> {
    let member = provider
        .members_of(instance.type_name().as_str())?
        .iter()
        .find(|m| *m.name() == *name)
        .ok_or_else(|| Error::member_not_found(instance.type_name(), name))?;
    extract(instance, member, &AttributeSelector::First)
}

/// Extract the first declared member carrying `tag`.
pub fn extract_by_tag<'p>(
    provider: &'p dyn TypeProvider,
    instance: &Object,
    tag: &str,
) -> Result<ExtractedMember<'p>> {
    let member = provider
        .members_of(instance.type_name().as_str())?
        .iter()
        .find(|m| m.has_tag(tag))
        .ok_or_else(|| Error::tag_not_found(instance.type_name(), tag))?;
    extract(instance, member, &AttributeSelector::First)
}

/// Resolve one attribute of one tag on one member.
pub fn extract_tag_attribute<'p>(
    member: &'p MemberDescriptor,
    tag: &str,
    attribute: &str,
) -> Result<TagExtraction<'p>> {
    let found = member
        .tag(tag)
        .ok_or_else(|| Error::tag_not_found(member.declaring_type(), tag))?;
    let value = read_attribute(found, attribute)?.clone();
    Ok(TagExtraction::new(found, value))
}

/// Whether any declared member of the type carries `tag`.
pub fn type_has_tag(provider: &dyn TypeProvider, type_name: &str, tag: &str) -> Result<bool> {
    Ok(provider
        .members_of(type_name)?
        .iter()
        .any(|m| m.has_tag(tag)))
}

/// Every declared member's value, keyed by member name in declaration order.
pub fn values_by_name(
    provider: &dyn TypeProvider,
    instance: &Object,
) -> Result<IndexMap<MemberName, Value>> {
    provider
        .members_of(instance.type_name().as_str())?
        .iter()
        .map(|member| {
            let value = access::read(instance, member)?.into_owned();
            Ok((member.name().clone(), value))
        })
        .collect()
}

/// Every declared member's value keyed for export.
///
/// Members carrying `tag` are keyed by the text of the tag's first attribute
/// (an alias); all others keep their member name.
pub fn values_by_alias(
    provider: &dyn TypeProvider,
    instance: &Object,
    tag: &TagType,
) -> Result<IndexMap<SmolStr, Value>> {
    provider
        .members_of(instance.type_name().as_str())?
        .iter()
        .map(|member| {
            let value = access::read(instance, member)?.into_owned();
            let key = member
                .tag(tag.as_str())
                .and_then(|t| t.first_attribute())
                .map(|(_, alias)| SmolStr::new(alias.to_string()))
                .unwrap_or_else(|| SmolStr::new(member.name()));
            Ok((key, value))
        })
        .collect()
}
