//! Error types for mapping and extraction operations.

use std::fmt;

use thiserror::Error;

use crate::base::{MemberName, TagType, TypeName};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Which side of the member accessor failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOp {
    Read,
    Write,
}

impl fmt::Display for AccessOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// Top-level operation a [`Error::Mapping`] wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Structural mapping onto a target type.
    Map,
    /// Tag-filtered member collection.
    Collect,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map => f.write_str("mapping"),
            Self::Collect => f.write_str("collection"),
        }
    }
}

/// Errors that can occur while introspecting, mapping or collecting.
#[derive(Debug, Error)]
pub enum Error {
    /// The collector was invoked before any tag was registered.
    #[error("scan configuration required: {0}")]
    Configuration(String),

    /// A target or container type could not be constructed.
    #[error("cannot instantiate `{type_name}`: {reason}")]
    Instantiation { type_name: TypeName, reason: String },

    /// Reading or writing a member failed.
    #[error("cannot {op} member `{member}` of `{type_name}`: {reason}")]
    Access {
        op: AccessOp,
        type_name: TypeName,
        member: MemberName,
        reason: String,
    },

    /// A tag present on a member does not declare the requested attribute.
    #[error("attribute `{attribute}` not found on tag `{tag}`")]
    AttributeNotFound { tag: TagType, attribute: String },

    /// A by-name or by-tag lookup found nothing.
    #[error("no {kind} matching `{name}` on `{type_name}`")]
    NotFound {
        kind: &'static str,
        name: String,
        type_name: TypeName,
    },

    /// Lifting or lowering through serde failed.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// A collaborator failure that aborted a whole mapping or collection call.
    #[error("{operation} of `{type_name}` failed")]
    Mapping {
        operation: Operation,
        type_name: TypeName,
        #[source]
        cause: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an instantiation error.
    pub fn instantiation(type_name: impl Into<TypeName>, reason: impl Into<String>) -> Self {
        Self::Instantiation {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a read access error.
    pub fn read(
        type_name: impl Into<TypeName>,
        member: impl Into<MemberName>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Access {
            op: AccessOp::Read,
            type_name: type_name.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }

    /// Create a write access error.
    pub fn write(
        type_name: impl Into<TypeName>,
        member: impl Into<MemberName>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Access {
            op: AccessOp::Write,
            type_name: type_name.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }

    /// Create an attribute-not-found error.
    pub fn attribute_not_found(tag: impl Into<TagType>, attribute: impl Into<String>) -> Self {
        Self::AttributeNotFound {
            tag: tag.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a not-found error for a member looked up by name.
    pub fn member_not_found(type_name: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "member",
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a not-found error for a member looked up by tag.
    pub fn tag_not_found(type_name: impl Into<TypeName>, tag: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "tag",
            name: tag.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a not-found error for an unregistered type.
    pub fn type_not_found(type_name: impl Into<TypeName>) -> Self {
        let type_name = type_name.into();
        Self::NotFound {
            kind: "type",
            name: type_name.to_string(),
            type_name,
        }
    }

    /// Create a conversion error.
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion(message.into())
    }

    /// Wrap a failure as the single fatal error of a top-level call.
    pub fn mapping(operation: Operation, type_name: impl Into<TypeName>, cause: Error) -> Self {
        Self::Mapping {
            operation,
            type_name: type_name.into(),
            cause: Box::new(cause),
        }
    }

    /// The originating failure beneath any [`Error::Mapping`] wrappers.
    pub fn root(&self) -> &Error {
        let mut current = self;
        while let Self::Mapping { cause, .. } = current {
            current = cause;
        }
        current
    }
}
