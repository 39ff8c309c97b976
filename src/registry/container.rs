//! Container type descriptors and materialization results.

use crate::base::TypeName;
use crate::model::ContainerKind;

/// A registered container type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerDescriptor {
    name: TypeName,
    kind: ContainerKind,
    constructible: bool,
}

impl ContainerDescriptor {
    /// A constructible container of the given kind.
    pub fn new(name: impl Into<TypeName>, kind: ContainerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            constructible: true,
        }
    }

    /// Mark the container as abstract: requests for it are served by fallback.
    pub fn abstract_only(mut self) -> Self {
        self.constructible = false;
        self
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn is_constructible(&self) -> bool {
        self.constructible
    }

    pub(crate) fn can_construct(&self, kind: ContainerKind) -> bool {
        self.constructible && self.kind == kind
    }
}

/// A freshly constructed container, recording whether the requested concrete
/// type had to be substituted by the default one.
#[derive(Clone, Debug, PartialEq)]
pub struct Materialized<T> {
    pub value: T,
    fallback: Option<(TypeName, TypeName)>,
}

impl<T> Materialized<T> {
    pub(crate) fn direct(value: T) -> Self {
        Self {
            value,
            fallback: None,
        }
    }

    pub(crate) fn fallback(value: T, requested: &TypeName, used: &TypeName) -> Self {
        Self {
            value,
            fallback: Some((requested.clone(), used.clone())),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// The requested container type when a fallback happened.
    pub fn requested(&self) -> Option<&TypeName> {
        self.fallback.as_ref().map(|(requested, _)| requested)
    }

    /// The container type actually built when a fallback happened.
    pub fn used(&self) -> Option<&TypeName> {
        self.fallback.as_ref().map(|(_, used)| used)
    }

    /// Split into the value and the `(requested, used)` fallback record.
    pub fn into_parts(self) -> (T, Option<(TypeName, TypeName)>) {
        (self.value, self.fallback)
    }
}
