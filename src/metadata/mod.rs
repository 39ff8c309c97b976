//! Member metadata: tag reading, extraction and lookups.
//!
//! - [`read_attribute`] - Tag reader
//! - [`extract`] - Value snapshot plus one [`TagExtraction`] per attached tag
//! - [`extract_by_name`], [`extract_by_tag`], [`values_by_alias`] and friends -
//!   single-instance lookups built on the two above

mod extract;
mod lookup;
mod reader;

pub use extract::{AttributeSelector, ExtractedMember, TagExtraction, extract};
pub use lookup::{
    extract_by_name, extract_by_tag, extract_tag_attribute, type_has_tag, values_by_alias,
    values_by_name,
};
pub use reader::read_attribute;
