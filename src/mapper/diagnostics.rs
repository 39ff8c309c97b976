//! Non-fatal signals raised while mapping.

use std::fmt;

use crate::base::TypeName;
use crate::model::{ContainerKind, Object};

/// Something the mapper tolerated instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The requested concrete container could not be constructed and the
    /// registry's default container was used instead.
    ContainerFallback {
        /// Dotted member path from the mapping root.
        path: String,
        kind: ContainerKind,
        requested: TypeName,
        used: TypeName,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerFallback {
                path,
                kind,
                requested,
                used,
            } => write!(
                f,
                "{path}: {kind} `{requested}` cannot be constructed, used `{used}`"
            ),
        }
    }
}

/// A mapped object together with the diagnostics raised while building it.
#[derive(Clone, Debug, PartialEq)]
pub struct MapOutcome {
    pub object: Object,
    pub diagnostics: Vec<Diagnostic>,
}

impl MapOutcome {
    pub fn has_fallbacks(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::ContainerFallback { .. }))
    }
}
