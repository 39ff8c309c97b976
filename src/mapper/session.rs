//! Mapping session: one source object, one filter, one owner.

use tracing::debug;

use crate::base::{TagType, TypeName};
use crate::error::{Error, Operation, Result};
use crate::metadata::AttributeSelector;
use crate::model::Object;
use crate::registry::TypeProvider;

use super::collect::{Collector, TaggedMemberCollection};
use super::diagnostics::MapOutcome;
use super::filter::MapperFilter;
use super::structural::StructuralMapper;

/// Start a session over `source`.
pub fn reflect<'p, 's>(provider: &'p dyn TypeProvider, source: &'s Object) -> Session<'p, 's> {
    Session::new(provider, source)
}

/// A session bound to one source object.
///
/// Configuration methods consume and return the session, so a configured
/// session is never shared while it is still being built.
///
/// ```text
/// reflect(&registry, &customer)
///     .scan_by("audit::Sensitive")
///     .scan_by("audit::Loggable")
///     .collect()?
/// ```
#[derive(Clone)]
pub struct Session<'p, 's> {
    provider: &'p dyn TypeProvider,
    source: &'s Object,
    filter: MapperFilter,
    selector: AttributeSelector,
}

impl<'p, 's> Session<'p, 's> {
    pub fn new(provider: &'p dyn TypeProvider, source: &'s Object) -> Self {
        Self {
            provider,
            source,
            filter: MapperFilter::new(),
            selector: AttributeSelector::default(),
        }
    }

    /// Register a tag type for collection.
    pub fn scan_by(mut self, tag: impl Into<TagType>) -> Self {
        self.filter.register(tag);
        self
    }

    /// Choose which tag attribute collection resolves.
    pub fn with_attribute(mut self, selector: AttributeSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn source(&self) -> &'s Object {
        self.source
    }

    pub fn filter(&self) -> &MapperFilter {
        &self.filter
    }

    /// Map the source onto a new instance of `target`.
    pub fn map_to(&self, target: impl Into<TypeName>) -> Result<Object> {
        self.map_to_report(target).map(|outcome| outcome.object)
    }

    /// Map the source onto a new instance of `target`, also returning the
    /// diagnostics raised on the way.
    pub fn map_to_report(&self, target: impl Into<TypeName>) -> Result<MapOutcome> {
        let target = target.into();
        debug!(source = %self.source.type_name(), target = %target, "mapping");

        let mut mapper = StructuralMapper::new(self.provider);
        let object = mapper
            .map_object(self.source, &target)
            .map_err(|cause| Error::mapping(Operation::Map, target.clone(), cause))?;
        let diagnostics = mapper.into_diagnostics();
        debug!(target = %target, diagnostics = diagnostics.len(), "mapped");

        Ok(MapOutcome {
            object,
            diagnostics,
        })
    }

    /// Collect every terminal member carrying a registered tag.
    pub fn collect(&self) -> Result<TaggedMemberCollection<'p>> {
        if !self.filter.is_enabled() {
            return Err(Error::configuration(
                "register at least one tag with `scan_by` before collecting",
            ));
        }

        let source_type = self.source.type_name();
        debug!(source = %source_type, "collecting tagged members");
        let collected = Collector::new(self.provider, &self.filter, &self.selector)
            .run(self.source)
            .map_err(|cause| Error::mapping(Operation::Collect, source_type, cause))?;
        debug!(source = %source_type, entries = collected.len(), "collected");
        Ok(collected)
    }
}
