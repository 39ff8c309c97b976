//! Structural mapper.
//!
//! Maps a source object onto a freshly constructed instance of a target type
//! by pairing members whose names match case-insensitively. Terminal values
//! are copied as-is, containers are rebuilt element by element and nested
//! objects are mapped recursively.

use smol_str::{SmolStr, format_smolstr};
use tracing::{trace, warn};

use crate::access;
use crate::base::{TypeName, names_match};
use crate::error::{Error, Result};
use crate::model::{
    Category, Classified, ContainerKind, ListValue, MapValue, MemberDescriptor, MemberType,
    Object, Value,
};
use crate::registry::{Materialized, TypeProvider};

use super::diagnostics::Diagnostic;

// ============================================================================
// MEMBER PAIRING
// ============================================================================

/// A target member and the source member it is filled from, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MappedMemberPair<'p> {
    pub source: Option<&'p MemberDescriptor>,
    pub target: &'p MemberDescriptor,
}

impl MappedMemberPair<'_> {
    pub fn is_matched(&self) -> bool {
        self.source.is_some()
    }
}

/// Pair every target member with the first source member whose name matches
/// case-insensitively. Pairs follow the target's declaration order.
pub fn pair_members<'p>(
    source: &'p [MemberDescriptor],
    target: &'p [MemberDescriptor],
) -> Vec<MappedMemberPair<'p>> {
    target
        .iter()
        .map(|target_member| MappedMemberPair {
            source: source
                .iter()
                .find(|s| names_match(s.name().as_str(), target_member.name().as_str())),
            target: target_member,
        })
        .collect()
}

// ============================================================================
// MAPPER
// ============================================================================

/// One mapping walk. Holds the current member path and the diagnostics
/// raised so far.
pub(crate) struct StructuralMapper<'p> {
    provider: &'p dyn TypeProvider,
    path: Vec<SmolStr>,
    diagnostics: Vec<Diagnostic>,
}

impl<'p> StructuralMapper<'p> {
    pub(crate) fn new(provider: &'p dyn TypeProvider) -> Self {
        Self {
            provider,
            path: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Map `source` onto a new instance of `target_type`.
    pub(crate) fn map_object(&mut self, source: &Object, target_type: &TypeName) -> Result<Object> {
        let provider = self.provider;
        let mut target = provider.new_instance(target_type.as_str())?;
        let source_members = provider.members_of(source.type_name().as_str())?;
        let target_members = provider.members_of(target_type.as_str())?;

        for pair in pair_members(source_members, target_members) {
            let Some(source_member) = pair.source else {
                trace!(
                    target_type = %target_type,
                    member = %pair.target.name(),
                    "no matching source member, keeping default"
                );
                continue;
            };

            self.path.push(SmolStr::new(pair.target.name()));
            let mapped = self.map_member(source, source_member, pair.target);
            self.path.pop();

            access::write(&mut target, pair.target, mapped?)?;
        }

        Ok(target)
    }

    /// Produce the value a target member receives, dispatching on the
    /// source member's declared category.
    fn map_member(
        &mut self,
        source: &Object,
        source_member: &MemberDescriptor,
        target_member: &MemberDescriptor,
    ) -> Result<Value> {
        let value = access::read(source, source_member)?;
        let category = source_member.declared_type().category();
        trace!(path = %self.current_path(), ?category, "mapping member");

        match category {
            Category::Terminal(_) => Ok(value.into_owned()),
            Category::Ordered => {
                let list = match value.classify() {
                    Classified::Ordered(list) => Some(list),
                    Classified::Null => None,
                    _ => return Err(read_mismatch(source, source_member, &value)),
                };
                let (container, element) = match target_member.declared_type().list_parts() {
                    Some(parts) => parts,
                    None => (
                        list.map_or(source_container(source_member), ListValue::container),
                        None,
                    ),
                };
                self.map_list(list, container, element).map(Value::List)
            }
            Category::KeyValue => {
                let map = match value.classify() {
                    Classified::KeyValue(map) => Some(map),
                    Classified::Null => None,
                    _ => return Err(read_mismatch(source, source_member, &value)),
                };
                let (container, key, val) = match target_member.declared_type().map_parts() {
                    Some(parts) => parts,
                    None => (
                        map.map_or(source_container(source_member), MapValue::container),
                        None,
                        None,
                    ),
                };
                self.map_map(map, container, key, val).map(Value::Map)
            }
            Category::Composite => match value.classify() {
                Classified::Null => Ok(Value::Null),
                Classified::Composite(object) => {
                    let target_type =
                        target_member.declared_type().composite_name().ok_or_else(|| {
                            Error::instantiation(
                                target_member.declared_type().to_string(),
                                format!(
                                    "member `{}` of `{}` is not a composite type",
                                    target_member.name(),
                                    target_member.declaring_type()
                                ),
                            )
                        })?;
                    self.map_object(object, target_type).map(Value::Object)
                }
                _ => Err(read_mismatch(source, source_member, &value)),
            },
        }
    }

    /// Rebuild an ordered container. Null elements are dropped.
    fn map_list(
        &mut self,
        source: Option<&ListValue>,
        container: &TypeName,
        element: Option<&MemberType>,
    ) -> Result<ListValue> {
        let created = self.provider.new_list(container);
        let mut list = self.materialize(created, ContainerKind::Ordered);
        for (index, item) in source.into_iter().flatten().enumerate() {
            if item.is_null() {
                continue;
            }
            self.path.push(format_smolstr!("[{index}]"));
            let mapped = self.map_element(item, element);
            self.path.pop();
            list.push(mapped?);
        }
        Ok(list)
    }

    /// Rebuild a key-value container. Null keys and values stay null.
    fn map_map(
        &mut self,
        source: Option<&MapValue>,
        container: &TypeName,
        key_type: Option<&MemberType>,
        value_type: Option<&MemberType>,
    ) -> Result<MapValue> {
        let created = self.provider.new_map(container);
        let mut map = self.materialize(created, ContainerKind::KeyValue);
        for (key, value) in source.into_iter().flat_map(|map| map.iter()) {
            self.path.push(format_smolstr!("[{key}]"));
            let mapped = self
                .map_element(key, key_type)
                .and_then(|k| Ok((k, self.map_element(value, value_type)?)));
            self.path.pop();
            let (key, value) = mapped?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Map one container element by its runtime category.
    fn map_element(&mut self, value: &Value, declared: Option<&MemberType>) -> Result<Value> {
        match value.classify() {
            Classified::Null | Classified::Scalar(..) => Ok(value.clone()),
            Classified::Ordered(list) => {
                let (container, element) = declared
                    .and_then(MemberType::list_parts)
                    .unwrap_or((list.container(), None));
                self.map_list(Some(list), container, element).map(Value::List)
            }
            Classified::KeyValue(map) => {
                let (container, key, val) = declared
                    .and_then(MemberType::map_parts)
                    .unwrap_or((map.container(), None, None));
                self.map_map(Some(map), container, key, val).map(Value::Map)
            }
            Classified::Composite(object) => {
                let target_type = declared
                    .and_then(MemberType::composite_name)
                    .unwrap_or(object.type_name());
                self.map_object(object, target_type).map(Value::Object)
            }
        }
    }

    fn materialize<T>(&mut self, materialized: Materialized<T>, kind: ContainerKind) -> T {
        let (value, fallback) = materialized.into_parts();
        if let Some((requested, used)) = fallback {
            let path = self.current_path();
            warn!(%path, %requested, %used, "{kind} cannot be constructed, using default");
            self.diagnostics.push(Diagnostic::ContainerFallback {
                path,
                kind,
                requested,
                used,
            });
        }
        value
    }

    fn current_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.path {
            if !path.is_empty() && !segment.starts_with('[') {
                path.push('.');
            }
            path.push_str(segment);
        }
        path
    }
}

/// Container named by the source member's declared type.
fn source_container(member: &MemberDescriptor) -> &TypeName {
    match member.declared_type() {
        MemberType::List { container, .. } | MemberType::Map { container, .. } => container,
        _ => member.declaring_type(),
    }
}

fn read_mismatch(source: &Object, member: &MemberDescriptor, value: &Value) -> Error {
    Error::read(
        source.type_name(),
        member.name(),
        format!(
            "expected {}, found {}",
            member.declared_type(),
            value.type_label()
        ),
    )
}
