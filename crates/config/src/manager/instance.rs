//! Loaded configuration values.

use std::ops::Deref;

use serde::de::DeserializeOwned;

use crate::loader::SourceMap;
use crate::report::SourceReport;
use crate::schema::Schema;

/// A configuration struct that can be loaded from env files.
///
/// `schema()` must declare one field per struct field, using the same names;
/// nested groups map to nested structs.
pub trait Settings: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> Schema;
}

/// Validated settings plus where each value came from.
///
/// Never mutated after construction; a reload produces a new instance.
#[derive(Debug)]
pub struct ConfigInstance<S> {
    settings: S,
    sources: SourceMap,
    report: SourceReport,
}

impl<S> ConfigInstance<S> {
    pub(crate) fn new(settings: S, sources: SourceMap, report: SourceReport) -> Self {
        Self {
            settings,
            sources,
            report,
        }
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Lower-case key → file snapshot taken at load time.
    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn source_report(&self) -> &SourceReport {
        &self.report
    }
}

impl<S> Deref for ConfigInstance<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.settings
    }
}
