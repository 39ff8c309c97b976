//! Serde bridge between Rust types and the dynamic object model.
//!
//! Values travel through [`serde_json::Value`]. Lifting interprets the JSON
//! against the registered descriptor of the target type; lowering needs no
//! descriptor at all.
//!
//! | Model            | JSON                         |
//! |------------------|------------------------------|
//! | `Byte`..`Long`   | number, range checked        |
//! | `Float`/`Double` | number                       |
//! | `Char`           | one-character string         |
//! | `Date`           | `"2024-02-29"`               |
//! | `DateTime`       | `"2024-02-29T08:30:00"`      |
//! | `List`           | array                        |
//! | `Map`            | object keyed by key text     |
//! | `Object`         | object keyed by member name  |

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map as JsonMap, Number, Value as Json};
use tracing::warn;

use crate::access;
use crate::error::{Error, Result};
use crate::model::{ListValue, MapValue, MemberType, Object, ScalarKind, Value};
use crate::registry::TypeProvider;

// ============================================================================
// LIFT
// ============================================================================

/// Lift a serializable value into an instance of the registered `type_name`.
///
/// Fields missing from the serialized form keep their declared default.
/// Fields with no matching member are ignored.
pub fn to_object<T>(provider: &dyn TypeProvider, type_name: &str, value: &T) -> Result<Object>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_value(value).map_err(|e| Error::conversion(e.to_string()))?;
    lift_object(provider, type_name, &json)
}

fn lift_object(provider: &dyn TypeProvider, type_name: &str, json: &Json) -> Result<Object> {
    let Json::Object(fields) = json else {
        return Err(Error::conversion(format!(
            "`{type_name}` expects a JSON object, found {}",
            json_kind(json)
        )));
    };

    let mut object = provider.new_instance(type_name)?;
    for member in provider.members_of(type_name)? {
        let Some(field) = fields.get(member.name().as_str()) else {
            continue;
        };
        let value = lift(provider, member.declared_type(), field).map_err(|err| match err {
            Error::Conversion(reason) => {
                Error::conversion(format!("{type_name}.{}: {reason}", member.name()))
            }
            other => other,
        })?;
        access::write(&mut object, member, value)?;
    }
    Ok(object)
}

fn lift(provider: &dyn TypeProvider, declared: &MemberType, json: &Json) -> Result<Value> {
    if json.is_null() {
        return if declared.is_nullable() {
            Ok(Value::Null)
        } else {
            Err(Error::conversion(format!("null is not a valid {declared}")))
        };
    }

    match declared {
        MemberType::Primitive(kind) | MemberType::Boxed(kind) => lift_scalar(*kind, json),
        MemberType::List { container, element } => {
            let Json::Array(items) = json else {
                return Err(mismatch(declared, json));
            };
            let (mut list, fallback) = provider.new_list(container).into_parts();
            if let Some((requested, used)) = fallback {
                warn!(%requested, %used, "ordered container cannot be constructed, using default");
            }
            for item in items {
                list.push(match element.as_deref() {
                    Some(element) => lift(provider, element, item)?,
                    None => lift_untyped(item)?,
                });
            }
            Ok(Value::List(list))
        }
        MemberType::Map {
            container,
            key,
            value,
        } => {
            let Json::Object(entries) = json else {
                return Err(mismatch(declared, json));
            };
            let (mut map, fallback) = provider.new_map(container).into_parts();
            if let Some((requested, used)) = fallback {
                warn!(
                    %requested,
                    %used,
                    "key-value container cannot be constructed, using default"
                );
            }
            for (k, v) in entries {
                let lifted_key = lift_key(key.as_deref(), k)?;
                let lifted_value = match value.as_deref() {
                    Some(value) => lift(provider, value, v)?,
                    None => lift_untyped(v)?,
                };
                map.insert(lifted_key, lifted_value);
            }
            Ok(Value::Map(map))
        }
        MemberType::Composite(name) => {
            lift_object(provider, name.as_str(), json).map(Value::Object)
        }
    }
}

fn lift_scalar(kind: ScalarKind, json: &Json) -> Result<Value> {
    let fail = || Error::conversion(format!("expected {kind}, found {}", json_kind(json)));
    let out_of_range = |n: i64| Error::conversion(format!("{n} is out of range for {kind}"));

    Ok(match kind {
        ScalarKind::Bool => Value::Bool(json.as_bool().ok_or_else(fail)?),
        ScalarKind::Char => {
            let s = json.as_str().ok_or_else(fail)?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => return Err(Error::conversion(format!("`{s}` is not a single char"))),
            }
        }
        ScalarKind::Byte => {
            let n = json.as_i64().ok_or_else(fail)?;
            Value::Byte(i8::try_from(n).map_err(|_| out_of_range(n))?)
        }
        ScalarKind::Short => {
            let n = json.as_i64().ok_or_else(fail)?;
            Value::Short(i16::try_from(n).map_err(|_| out_of_range(n))?)
        }
        ScalarKind::Int => {
            let n = json.as_i64().ok_or_else(fail)?;
            Value::Int(i32::try_from(n).map_err(|_| out_of_range(n))?)
        }
        ScalarKind::Long => Value::Long(json.as_i64().ok_or_else(fail)?),
        ScalarKind::Float => {
            let n = json.as_f64().ok_or_else(fail)?;
            let narrowed = n as f32;
            if !narrowed.is_finite() {
                return Err(Error::conversion(format!("{n} is out of range for {kind}")));
            }
            Value::Float(narrowed)
        }
        ScalarKind::Double => Value::Double(json.as_f64().ok_or_else(fail)?),
        ScalarKind::Text => Value::text(json.as_str().ok_or_else(fail)?),
        ScalarKind::Date => {
            let s = json.as_str().ok_or_else(fail)?;
            Value::Date(
                s.parse::<NaiveDate>()
                    .map_err(|e| Error::conversion(format!("invalid date `{s}`: {e}")))?,
            )
        }
        ScalarKind::DateTime => {
            let s = json.as_str().ok_or_else(fail)?;
            Value::DateTime(
                s.parse::<NaiveDateTime>()
                    .map_err(|e| Error::conversion(format!("invalid datetime `{s}`: {e}")))?,
            )
        }
        ScalarKind::Unit => return Err(fail()),
    })
}

/// JSON object keys are always strings; numeric and boolean keys are parsed
/// back from their text.
fn lift_key(declared: Option<&MemberType>, key: &str) -> Result<Value> {
    let kind = match declared {
        Some(MemberType::Primitive(kind) | MemberType::Boxed(kind)) => *kind,
        Some(other) => {
            return Err(Error::conversion(format!(
                "map keys of type {other} cannot be lifted"
            )));
        }
        None => return Ok(Value::text(key)),
    };

    let numeric = matches!(
        kind,
        ScalarKind::Bool
            | ScalarKind::Byte
            | ScalarKind::Short
            | ScalarKind::Int
            | ScalarKind::Long
            | ScalarKind::Float
            | ScalarKind::Double
    );
    if numeric {
        let parsed: Json = serde_json::from_str(key)
            .map_err(|_| Error::conversion(format!("map key `{key}` is not a valid {kind}")))?;
        lift_scalar(kind, &parsed)
    } else {
        lift_scalar(kind, &Json::String(key.to_owned()))
    }
}

/// Lift a container element with no declared type.
fn lift_untyped(json: &Json) -> Result<Value> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Long(i),
            None => Value::Double(n.as_f64().ok_or_else(|| {
                Error::conversion(format!("number {n} cannot be represented"))
            })?),
        },
        Json::String(s) => Value::text(s.as_str()),
        Json::Array(_) | Json::Object(_) => {
            return Err(Error::conversion(format!(
                "nested {} needs a declared element type",
                json_kind(json)
            )));
        }
    })
}

// ============================================================================
// LOWER
// ============================================================================

/// Lower an object into any deserializable type.
pub fn from_object<T: DeserializeOwned>(object: &Object) -> Result<T> {
    let json = lower_object(object)?;
    serde_json::from_value(json).map_err(|e| {
        Error::conversion(format!("cannot lower `{}`: {e}", object.type_name()))
    })
}

fn lower_object(object: &Object) -> Result<Json> {
    let mut fields = JsonMap::new();
    for (name, value) in object.slots() {
        fields.insert(name.to_string(), lower(value)?);
    }
    Ok(Json::Object(fields))
}

fn lower(value: &Value) -> Result<Json> {
    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Char(c) => Json::String(c.to_string()),
        Value::Byte(n) => Json::from(*n),
        Value::Short(n) => Json::from(*n),
        Value::Int(n) => Json::from(*n),
        Value::Long(n) => Json::from(*n),
        Value::Float(n) => lower_float(f64::from(*n))?,
        Value::Double(n) => lower_float(*n)?,
        Value::Text(s) => Json::String(s.to_string()),
        Value::Date(_) | Value::DateTime(_) => Json::String(value.to_string()),
        Value::List(list) => lower_list(list)?,
        Value::Map(map) => lower_map(map)?,
        Value::Object(object) => lower_object(object)?,
    })
}

fn lower_float(n: f64) -> Result<Json> {
    Number::from_f64(n)
        .map(Json::Number)
        .ok_or_else(|| Error::conversion(format!("{n} has no JSON representation")))
}

fn lower_list(list: &ListValue) -> Result<Json> {
    list.iter().map(lower).collect::<Result<Vec<_>>>().map(Json::Array)
}

fn lower_map(map: &MapValue) -> Result<Json> {
    let mut entries = JsonMap::new();
    for (key, value) in map.iter() {
        let key = if key.is_null() {
            return Err(Error::conversion(format!(
                "`{}` has a null key",
                map.container()
            )));
        } else if key.category().is_terminal() {
            key.to_string()
        } else {
            return Err(Error::conversion(format!(
                "`{}` key {} cannot be used as a JSON key",
                map.container(),
                key.type_label()
            )));
        };
        if entries.contains_key(&key) {
            return Err(Error::conversion(format!(
                "`{}` has more than one key rendered as `{key}`",
                map.container()
            )));
        }
        entries.insert(key, lower(value)?);
    }
    Ok(Json::Object(entries))
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn mismatch(declared: &MemberType, json: &Json) -> Error {
    Error::conversion(format!("expected {declared}, found {}", json_kind(json)))
}
