//! Metadata tag reader.

use crate::error::{Error, Result};
use crate::model::{Tag, Value};

/// Read a named attribute from a tag.
pub fn read_attribute<'t>(tag: &'t Tag, attribute: &str) -> Result<&'t Value> {
    tag.attribute(attribute)
        .ok_or_else(|| Error::attribute_not_found(tag.tag_type(), attribute))
}
