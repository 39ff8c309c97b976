//! Runtime values of the dynamic object model.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use crate::base::{MemberName, TypeName};

use super::types::{Category, ScalarKind};

// ============================================================================
// VALUE
// ============================================================================

/// A runtime value held in a member slot, container element or map entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent value. Also the only value of [`ScalarKind::Unit`].
    Null,
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(Arc<str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    List(ListValue),
    Map(MapValue),
    Object(Object),
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Self::Text(s.into())
    }

    /// The scalar kind of a terminal value. `None` for containers and objects.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        Some(match self {
            Self::Null => ScalarKind::Unit,
            Self::Bool(_) => ScalarKind::Bool,
            Self::Char(_) => ScalarKind::Char,
            Self::Byte(_) => ScalarKind::Byte,
            Self::Short(_) => ScalarKind::Short,
            Self::Int(_) => ScalarKind::Int,
            Self::Long(_) => ScalarKind::Long,
            Self::Float(_) => ScalarKind::Float,
            Self::Double(_) => ScalarKind::Double,
            Self::Text(_) => ScalarKind::Text,
            Self::Date(_) => ScalarKind::Date,
            Self::DateTime(_) => ScalarKind::DateTime,
            Self::List(_) | Self::Map(_) | Self::Object(_) => return None,
        })
    }

    /// Dispatch category of this value.
    pub fn category(&self) -> Category {
        Category::of_value(self)
    }

    /// Split this value by dispatch category, borrowing the payload.
    pub fn classify(&self) -> Classified<'_> {
        match self {
            Self::Null => Classified::Null,
            Self::List(list) => Classified::Ordered(list),
            Self::Map(map) => Classified::KeyValue(map),
            Self::Object(object) => Classified::Composite(object),
            scalar => Classified::Scalar(scalar.scalar_kind().unwrap_or(ScalarKind::Unit), scalar),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Short description of the runtime type, for error messages.
    pub fn type_label(&self) -> Cow<'_, str> {
        match self {
            Self::List(list) => Cow::Owned(format!("{} (ordered container)", list.container)),
            Self::Map(map) => Cow::Owned(format!("{} (key-value container)", map.container)),
            Self::Object(object) => Cow::Borrowed(object.type_name.as_str()),
            Self::Null => Cow::Borrowed("null"),
            scalar => Cow::Borrowed(scalar.scalar_kind().map_or("?", |k| k.name())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Date(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::List(list) => {
                f.write_str("[")?;
                for (i, item) in list.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Object(object) => write!(f, "{} {{ .. }}", object.type_name),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    char => Char,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    ListValue => List,
    MapValue => Map,
    Object => Object,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A value split by dispatch category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Classified<'a> {
    /// The "no value" marker.
    Null,
    Scalar(ScalarKind, &'a Value),
    Ordered(&'a ListValue),
    KeyValue(&'a MapValue),
    Composite(&'a Object),
}

impl Classified<'_> {
    pub fn category(&self) -> Category {
        match self {
            Self::Null => Category::Terminal(ScalarKind::Unit),
            Self::Scalar(kind, _) => Category::Terminal(*kind),
            Self::Ordered(_) => Category::Ordered,
            Self::KeyValue(_) => Category::KeyValue,
            Self::Composite(_) => Category::Composite,
        }
    }
}

// ============================================================================
// CONTAINERS
// ============================================================================

/// An ordered container tagged with its concrete container type.
#[derive(Clone, Debug, PartialEq)]
pub struct ListValue {
    container: TypeName,
    items: Vec<Value>,
}

impl ListValue {
    /// Create an empty list of the given concrete type.
    pub fn new(container: impl Into<TypeName>) -> Self {
        Self {
            container: container.into(),
            items: Vec::new(),
        }
    }

    /// Create a list from items.
    pub fn from_items(
        container: impl Into<TypeName>,
        items: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        Self {
            container: container.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Append an item (builder form).
    pub fn with(mut self, item: impl Into<Value>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn push(&mut self, item: impl Into<Value>) {
        self.items.push(item.into());
    }

    /// The concrete container type.
    pub fn container(&self) -> &TypeName {
        &self.container
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ListValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A key-value container tagged with its concrete container type.
///
/// Entries keep insertion order. Keys are arbitrary values, `Null` included,
/// so lookups are linear.
#[derive(Clone, Debug, PartialEq)]
pub struct MapValue {
    container: TypeName,
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    /// Create an empty map of the given concrete type.
    pub fn new(container: impl Into<TypeName>) -> Self {
        Self {
            container: container.into(),
            entries: Vec::new(),
        }
    }

    /// Insert an entry (builder form).
    pub fn with(mut self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an entry, replacing the value of an equal key in place.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The concrete container type.
    pub fn container(&self) -> &TypeName {
        &self.container
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// OBJECT
// ============================================================================

/// An instance of a composite type.
///
/// Slots are keyed by member name. A slot that was never written reads as the
/// declared default (see [`crate::access::read`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    type_name: TypeName,
    slots: IndexMap<MemberName, Value>,
}

impl Object {
    /// Create an instance with no slots written.
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name: type_name.into(),
            slots: IndexMap::new(),
        }
    }

    /// Set a slot (builder form).
    pub fn with(mut self, name: impl Into<MemberName>, value: impl Into<Value>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    /// The runtime type of this instance.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Raw slot access; `None` when the slot was never written.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }

    /// Iterate written slots in insertion order.
    pub fn slots(&self) -> impl Iterator<Item = (&MemberName, &Value)> {
        self.slots.iter()
    }

    pub(crate) fn set(&mut self, name: MemberName, value: Value) {
        self.slots.insert(name, value);
    }
}
