//! # remap-base
//!
//! Metadata-driven object transformation over a dynamic object model:
//! structural mapping between shape-compatible types and tag-filtered member
//! collection.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! bridge    → serde lift/lower (feature "serde")
//!   ↓
//! mapper    → Session, structural mapper, tag-filtered collector
//!   ↓
//! metadata  → Tag reader, member metadata extractor, lookups
//!   ↓
//! access    → Member accessor
//!   ↓
//! registry  → TypeProvider, TypeRegistry, container instantiation
//!   ↓
//! model     → Value, Object, MemberType, Category, descriptors
//!   ↓
//! base      → Primitives (TypeName, MemberName, TagType)
//! ```
//!
//! ## Example
//!
//! ```
//! use remap::{MemberType, Object, TypeDescriptor, TypeRegistry, Value, reflect};
//!
//! let registry = TypeRegistry::new()
//!     .with_type(TypeDescriptor::new("UserRow").field("Name", MemberType::text()))
//!     .with_type(TypeDescriptor::new("UserDto").field("name", MemberType::text()));
//!
//! let row = Object::new("UserRow").with("Name", "Ada");
//! let dto = reflect(&registry, &row).map_to("UserDto").unwrap();
//! assert_eq!(dto.get("name"), Some(&Value::from("Ada")));
//! ```

// ============================================================================
// MODULES (dependency order: base → model → registry → access → metadata → mapper)
// ============================================================================

/// Foundation types: TypeName, MemberName, TagType
pub mod base;

/// Error taxonomy and Result alias
pub mod error;

/// Dynamic object model: values, declared types, descriptors
pub mod model;

/// Type descriptor provider and instantiation facilities
pub mod registry;

/// Member accessor: visibility-agnostic reads and writes
pub mod access;

/// Tag reader, member metadata extractor and lookup helpers
pub mod metadata;

/// Structural mapper and tag-filtered collector
pub mod mapper;

/// Serde lift/lower between Rust types and the object model
#[cfg(feature = "serde")]
pub mod bridge;

// Re-export foundation types
pub use base::{MemberName, TagType, TypeName};
pub use error::{Error, Result};

// Re-export the model and the entry points
pub use mapper::{
    Diagnostic, MapOutcome, MapperFilter, Session, TaggedMemberCollection, TaggedMemberEntry,
    reflect,
};
pub use metadata::{AttributeSelector, ExtractedMember, TagExtraction};
pub use model::{
    Category, ListValue, MapValue, MemberDescriptor, MemberType, Object, ScalarKind, Tag,
    TypeDescriptor, Value, Visibility,
};
pub use registry::{ContainerDescriptor, TypeProvider, TypeRegistry};

#[cfg(feature = "serde")]
pub use bridge::{from_object, to_object};
