//! Member accessor: raw reads and writes of member slots.
//!
//! Visibility is not enforced; a private member is as readable and writable as
//! a public one. Writes are checked against the member's declared type with no
//! coercion, so an `int` slot only ever accepts an `int` value.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::model::{MemberDescriptor, MemberType, Object, Value};

/// Read a member's current value.
///
/// A slot that was never written yields the declared type's default.
pub fn read<'a>(instance: &'a Object, member: &MemberDescriptor) -> Result<Cow<'a, Value>> {
    expect_declaring_type(instance, member)
        .map_err(|reason| Error::read(instance.type_name(), member.name(), reason))?;

    Ok(match instance.get(member.name().as_str()) {
        Some(value) => Cow::Borrowed(value),
        None => Cow::Owned(member.declared_type().default_value()),
    })
}

/// Write a value into a member slot.
pub fn write(instance: &mut Object, member: &MemberDescriptor, value: Value) -> Result<()> {
    expect_declaring_type(instance, member)
        .and_then(|()| conforms(member.declared_type(), &value))
        .map_err(|reason| Error::write(instance.type_name(), member.name(), reason))?;

    instance.set(member.name().clone(), value);
    Ok(())
}

/// Copy one member's value from `source` into another member of `target`.
pub fn transfer(
    source: &Object,
    source_member: &MemberDescriptor,
    target: &mut Object,
    target_member: &MemberDescriptor,
) -> Result<()> {
    let value = read(source, source_member)?.into_owned();
    write(target, target_member, value)
}

fn expect_declaring_type(instance: &Object, member: &MemberDescriptor) -> Result<(), String> {
    if instance.type_name() == member.declaring_type() {
        Ok(())
    } else {
        Err(format!(
            "member is declared on `{}`, not on this instance",
            member.declaring_type()
        ))
    }
}

/// Check that `value` may be stored in a slot of type `declared`.
fn conforms(declared: &MemberType, value: &Value) -> Result<(), String> {
    if value.is_null() {
        return if declared.is_nullable() {
            Ok(())
        } else {
            Err(format!("null cannot be assigned to primitive {declared}"))
        };
    }

    let ok = match declared {
        MemberType::Primitive(kind) | MemberType::Boxed(kind) => value.scalar_kind() == Some(*kind),
        MemberType::List { .. } => matches!(value, Value::List(_)),
        MemberType::Map { .. } => matches!(value, Value::Map(_)),
        MemberType::Composite(name) => {
            matches!(value, Value::Object(object) if object.type_name() == name)
        }
    };

    if ok {
        Ok(())
    } else {
        Err(format!("expected {declared}, found {}", value.type_label()))
    }
}
