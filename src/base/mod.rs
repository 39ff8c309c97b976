//! Foundation types for the remap crate.
//!
//! This module provides the names every other layer speaks in:
//! - [`TypeName`] - Composite and container type names
//! - [`MemberName`] - Declared member names
//! - [`TagType`] - Metadata tag identities
//! - [`names_match`] - Case-insensitive member name matching
//!
//! This module has NO dependencies on other remap modules.

mod name;

pub use name::{MemberName, TagType, TypeName, names_match};
