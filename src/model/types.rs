//! Declared member types and the type-category classifier.

use std::fmt;

use crate::base::TypeName;

use super::value::Value;

// ============================================================================
// SCALARS
// ============================================================================

/// The closed set of terminal (copy-as-is) kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Text,
    Date,
    DateTime,
    /// The "no value" marker. Its only value is [`Value::Null`].
    Unit,
}

impl ScalarKind {
    /// Human-readable name used in diagnostics and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Text => "text",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Unit => "unit",
        }
    }

    /// Returns true for kinds that have a primitive (non-nullable) form.
    pub fn has_primitive_form(&self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Char
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Default value of the primitive form. `None` for kinds without one.
    pub fn zero(&self) -> Option<Value> {
        Some(match self {
            Self::Bool => Value::Bool(false),
            Self::Char => Value::Char('\0'),
            Self::Byte => Value::Byte(0),
            Self::Short => Value::Short(0),
            Self::Int => Value::Int(0),
            Self::Long => Value::Long(0),
            Self::Float => Value::Float(0.0),
            Self::Double => Value::Double(0.0),
            Self::Text | Self::Date | Self::DateTime | Self::Unit => return None,
        })
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// CATEGORIES
// ============================================================================

/// Container flavour requested from the container instantiation facility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Ordered,
    KeyValue,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordered => f.write_str("ordered container"),
            Self::KeyValue => f.write_str("key-value container"),
        }
    }
}

/// Dispatch category of a declared type or a runtime value.
///
/// Both engines compute this once and branch on it; nothing downstream
/// re-derives it from the raw type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Copied as-is.
    Terminal(ScalarKind),
    /// Ordered container, re-materialized element by element.
    Ordered,
    /// Key-value container, re-materialized entry by entry.
    KeyValue,
    /// Nested object, mapped recursively.
    Composite,
}

impl Category {
    /// Classify a declared member type.
    pub fn of_type(ty: &MemberType) -> Self {
        match ty {
            MemberType::Primitive(kind) | MemberType::Boxed(kind) => Self::Terminal(*kind),
            MemberType::List { .. } => Self::Ordered,
            MemberType::Map { .. } => Self::KeyValue,
            MemberType::Composite(_) => Self::Composite,
        }
    }

    /// Classify a runtime value. `Null` is the terminal "no value" marker.
    pub fn of_value(value: &Value) -> Self {
        value.classify().category()
    }

    /// The scalar classifier predicate.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }
}

// ============================================================================
// MEMBER TYPES
// ============================================================================

/// Static type of a declared member.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberType {
    /// Non-nullable scalar; defaults to its zero value.
    Primitive(ScalarKind),
    /// Nullable scalar; defaults to null.
    Boxed(ScalarKind),
    /// Ordered container of the named concrete type.
    List {
        container: TypeName,
        element: Option<Box<MemberType>>,
    },
    /// Key-value container of the named concrete type.
    Map {
        container: TypeName,
        key: Option<Box<MemberType>>,
        value: Option<Box<MemberType>>,
    },
    /// Nested object of the named type.
    Composite(TypeName),
}

impl MemberType {
    /// A primitive scalar. Kinds without a primitive form are boxed instead.
    pub fn primitive(kind: ScalarKind) -> Self {
        if kind.has_primitive_form() {
            Self::Primitive(kind)
        } else {
            Self::Boxed(kind)
        }
    }

    /// A nullable scalar.
    pub fn boxed(kind: ScalarKind) -> Self {
        Self::Boxed(kind)
    }

    /// Nullable text.
    pub fn text() -> Self {
        Self::Boxed(ScalarKind::Text)
    }

    /// A list whose elements are classified by their runtime type.
    pub fn list(container: impl Into<TypeName>) -> Self {
        Self::List {
            container: container.into(),
            element: None,
        }
    }

    /// A list with a declared element type.
    pub fn list_of(container: impl Into<TypeName>, element: MemberType) -> Self {
        Self::List {
            container: container.into(),
            element: Some(Box::new(element)),
        }
    }

    /// A map whose keys and values are classified by their runtime type.
    pub fn map(container: impl Into<TypeName>) -> Self {
        Self::Map {
            container: container.into(),
            key: None,
            value: None,
        }
    }

    /// A map with declared key and value types.
    pub fn map_of(container: impl Into<TypeName>, key: MemberType, value: MemberType) -> Self {
        Self::Map {
            container: container.into(),
            key: Some(Box::new(key)),
            value: Some(Box::new(value)),
        }
    }

    /// A nested object.
    pub fn composite(type_name: impl Into<TypeName>) -> Self {
        Self::Composite(type_name.into())
    }

    /// Dispatch category of this type.
    pub fn category(&self) -> Category {
        Category::of_type(self)
    }

    /// Default value a freshly constructed instance holds for this type.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Primitive(kind) => kind.zero().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Whether `null` is an acceptable value.
    pub fn is_nullable(&self) -> bool {
        !matches!(self, Self::Primitive(_))
    }

    /// The composite type name, if this is a composite.
    pub fn composite_name(&self) -> Option<&TypeName> {
        match self {
            Self::Composite(name) => Some(name),
            _ => None,
        }
    }

    /// Container type name and declared element type, if this is a list.
    pub fn list_parts(&self) -> Option<(&TypeName, Option<&MemberType>)> {
        match self {
            Self::List { container, element } => Some((container, element.as_deref())),
            _ => None,
        }
    }

    /// Container type name and declared key/value types, if this is a map.
    pub fn map_parts(&self) -> Option<(&TypeName, Option<&MemberType>, Option<&MemberType>)> {
        match self {
            Self::Map {
                container,
                key,
                value,
            } => Some((container, key.as_deref(), value.as_deref())),
            _ => None,
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Boxed(kind) => write!(f, "{kind}?"),
            Self::List { container, element } => match element {
                Some(element) => write!(f, "{container}<{element}>"),
                None => write!(f, "{container}<_>"),
            },
            Self::Map {
                container,
                key,
                value,
            } => {
                write!(f, "{container}<")?;
                match key {
                    Some(key) => write!(f, "{key}")?,
                    None => f.write_str("_")?,
                }
                f.write_str(", ")?;
                match value {
                    Some(value) => write!(f, "{value}>"),
                    None => f.write_str("_>"),
                }
            }
            Self::Composite(name) => write!(f, "{name}"),
        }
    }
}
