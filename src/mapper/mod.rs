//! Mapping engines and the session that drives them.
//!
//! ```text
//! reflect(provider, source) -> Session
//!     .scan_by(tag)*          -> Session      (MapperFilter)
//!     .map_to(target)         -> Object       (structural mapper)
//!     .map_to_report(target)  -> MapOutcome   (object + diagnostics)
//!     .collect()              -> TaggedMemberCollection
//! ```

mod collect;
mod diagnostics;
mod filter;
mod session;
mod structural;

pub use collect::{TaggedMemberCollection, TaggedMemberEntry};
pub use diagnostics::{Diagnostic, MapOutcome};
pub use filter::MapperFilter;
pub use session::{Session, reflect};
pub use structural::{MappedMemberPair, pair_members};
