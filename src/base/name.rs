//! Names of types, members and tags.
//!
//! All three are thin wrappers over [`SmolStr`] so short identifiers stay
//! inline and clones are cheap. They hash like `str`, which lets ordered maps
//! keyed by them be queried with plain string slices.

use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(SmolStr);

        impl $name {
            /// Create a new name.
            pub fn new(name: impl AsRef<str>) -> Self {
                Self(SmolStr::new(name))
            }

            /// Get the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(SmolStr::from(s))
            }
        }

        impl From<&$name> for $name {
            fn from(name: &$name) -> Self {
                name.clone()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

name_type! {
    /// Name of a composite or container type, e.g. `Customer` or `VecDeque`.
    TypeName
}

name_type! {
    /// Name of a declared member. Unique within its declaring type.
    MemberName
}

name_type! {
    /// Identity of a metadata tag, e.g. `audit::Sensitive`.
    TagType
}

impl TagType {
    /// The last path segment of the tag type (`audit::Sensitive` -> `Sensitive`).
    pub fn simple_name(&self) -> &str {
        let full = self.as_str();
        let after_path = full.rsplit("::").next().unwrap_or(full);
        after_path.rsplit('.').next().unwrap_or(after_path)
    }
}

/// Case-insensitive name comparison used for member matching.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
