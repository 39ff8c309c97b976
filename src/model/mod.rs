//! Dynamic object model.
//!
//! Objects are owned trees of [`Value`]s described by [`TypeDescriptor`]s.
//! Because every value is owned by exactly one parent, an object graph built
//! from this model is always finite and acyclic.
//!
//! ```text
//! TypeDescriptor                     Object
//! ├── name: TypeName                 ├── type_name: TypeName
//! ├── members: Vec<MemberDescriptor> └── slots: IndexMap<MemberName, Value>
//! │   ├── declared: MemberType
//! │   └── tags: Vec<Tag>
//! └── constructible: bool
//! ```

mod descriptor;
mod types;
mod value;

pub use descriptor::{MemberDescriptor, Tag, TypeDescriptor, Visibility};
pub use types::{Category, ContainerKind, MemberType, ScalarKind};
pub use value::{Classified, ListValue, MapValue, Object, Value};
