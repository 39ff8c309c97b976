//! Type descriptor provider and instantiation facilities.
//!
//! The engines never inspect types directly. They go through the
//! [`TypeProvider`] trait, which answers three questions:
//!
//! - what members does a type declare (`members_of`)
//! - build me a default instance of a type (`new_instance`)
//! - build me an empty container of a concrete container type (`new_list`, `new_map`)
//!
//! [`TypeRegistry`] is the in-memory implementation.

mod container;

pub use container::{ContainerDescriptor, Materialized};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::base::TypeName;
use crate::error::{Error, Result};
use crate::model::{ContainerKind, ListValue, MapValue, MemberDescriptor, Object, TypeDescriptor};

/// Introspection and instantiation capabilities consumed by the engines.
pub trait TypeProvider {
    /// Look up a registered composite type.
    fn descriptor(&self, type_name: &str) -> Option<&TypeDescriptor>;

    /// Own declared members of a type, in declaration order.
    fn members_of(&self, type_name: &str) -> Result<&[MemberDescriptor]> {
        self.descriptor(type_name)
            .map(TypeDescriptor::members)
            .ok_or_else(|| Error::type_not_found(type_name))
    }

    /// Construct a default instance through the zero-argument constructor.
    fn new_instance(&self, type_name: &str) -> Result<Object>;

    /// Construct an empty ordered container, falling back to the default
    /// ordered container when `container` cannot be constructed.
    fn new_list(&self, container: &TypeName) -> Materialized<ListValue>;

    /// Construct an empty key-value container, falling back to the default
    /// key-value container when `container` cannot be constructed.
    fn new_map(&self, container: &TypeName) -> Materialized<MapValue>;
}

/// In-memory registry of composite and container types.
///
/// A fresh registry knows the built-in containers (`Vec`, `VecDeque`,
/// `LinkedList`, `BTreeSet`, `HashSet`, `IndexMap`, `HashMap`, `BTreeMap`)
/// and the abstract ones (`List`, `Collection`, `Set`, `Map`) that can only be
/// satisfied by fallback.
///
/// Container names are labels only. Every ordered container keeps its
/// elements in insertion order, duplicates included, so a `HashSet` or
/// `BTreeSet` behaves like a `Vec` with a different name.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: IndexMap<TypeName, TypeDescriptor>,
    containers: FxHashMap<TypeName, ContainerDescriptor>,
    default_list: TypeName,
    default_map: TypeName,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self {
            types: IndexMap::new(),
            containers: FxHashMap::default(),
            default_list: TypeName::new("Vec"),
            default_map: TypeName::new("IndexMap"),
        };
        for name in ["Vec", "VecDeque", "LinkedList", "BTreeSet", "HashSet"] {
            registry.register_container(ContainerDescriptor::new(name, ContainerKind::Ordered));
        }
        for name in ["IndexMap", "HashMap", "BTreeMap"] {
            registry.register_container(ContainerDescriptor::new(name, ContainerKind::KeyValue));
        }
        for name in ["List", "Collection", "Set"] {
            registry.register_container(
                ContainerDescriptor::new(name, ContainerKind::Ordered).abstract_only(),
            );
        }
        registry.register_container(
            ContainerDescriptor::new("Map", ContainerKind::KeyValue).abstract_only(),
        );
        registry
    }
}

impl TypeRegistry {
    /// Create a registry with the built-in containers.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ─────────────────────────────────────────────────

    /// Register a composite type (builder form).
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Register a container type (builder form).
    pub fn with_container(mut self, descriptor: ContainerDescriptor) -> Self {
        self.register_container(descriptor);
        self
    }

    /// Register a composite type, replacing any previous descriptor of the
    /// same name.
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        debug!(
            type_name = %descriptor.name(),
            members = descriptor.members().len(),
            "registering type"
        );
        self.types.insert(descriptor.name().clone(), descriptor);
    }

    /// Register a container type.
    pub fn register_container(&mut self, descriptor: ContainerDescriptor) {
        self.containers.insert(descriptor.name().clone(), descriptor);
    }

    /// Change the fallback ordered container. It must be registered and
    /// constructible.
    pub fn set_default_list(&mut self, container: impl Into<TypeName>) -> Result<()> {
        let container = container.into();
        self.expect_constructible(&container, ContainerKind::Ordered)?;
        self.default_list = container;
        Ok(())
    }

    /// Change the fallback key-value container. It must be registered and
    /// constructible.
    pub fn set_default_map(&mut self, container: impl Into<TypeName>) -> Result<()> {
        let container = container.into();
        self.expect_constructible(&container, ContainerKind::KeyValue)?;
        self.default_map = container;
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Registered composite types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    pub fn container(&self, name: &str) -> Option<&ContainerDescriptor> {
        self.containers.get(name)
    }

    pub fn default_list(&self) -> &TypeName {
        &self.default_list
    }

    pub fn default_map(&self) -> &TypeName {
        &self.default_map
    }

    fn expect_constructible(&self, container: &TypeName, kind: ContainerKind) -> Result<()> {
        match self.containers.get(container) {
            Some(descriptor) if descriptor.can_construct(kind) => Ok(()),
            Some(_) => Err(Error::instantiation(
                container,
                format!("not a constructible {kind}"),
            )),
            None => Err(Error::type_not_found(container)),
        }
    }

    /// Decide which concrete container to build for a request.
    fn resolve_container(&self, requested: &TypeName, kind: ContainerKind) -> Option<&TypeName> {
        match self.containers.get(requested) {
            Some(descriptor) if descriptor.can_construct(kind) => None,
            _ => Some(match kind {
                ContainerKind::Ordered => &self.default_list,
                ContainerKind::KeyValue => &self.default_map,
            }),
        }
    }
}

impl TypeProvider for TypeRegistry {
    fn descriptor(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.types.get(type_name)
    }

    fn new_instance(&self, type_name: &str) -> Result<Object> {
        let descriptor = self
            .types
            .get(type_name)
            .ok_or_else(|| Error::instantiation(type_name, "type is not registered"))?;
        if !descriptor.is_constructible() {
            return Err(Error::instantiation(
                type_name,
                "no zero-argument constructor is reachable",
            ));
        }

        let mut object = Object::new(descriptor.name());
        for member in descriptor.members() {
            object.set(member.name().clone(), member.declared_type().default_value());
        }
        trace!(type_name, "instantiated");
        Ok(object)
    }

    fn new_list(&self, container: &TypeName) -> Materialized<ListValue> {
        match self.resolve_container(container, ContainerKind::Ordered) {
            None => Materialized::direct(ListValue::new(container)),
            Some(fallback) => Materialized::fallback(ListValue::new(fallback), container, fallback),
        }
    }

    fn new_map(&self, container: &TypeName) -> Materialized<MapValue> {
        match self.resolve_container(container, ContainerKind::KeyValue) {
            None => Materialized::direct(MapValue::new(container)),
            Some(fallback) => Materialized::fallback(MapValue::new(fallback), container, fallback),
        }
    }
}
