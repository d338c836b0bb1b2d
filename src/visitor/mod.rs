//! Read-only module visitors.
//!
//! Visitors run after a build has resolved every module, once per module
//! reached, and observe modules without changing them. A visitor error
//! aborts the build.

mod summary;

use tracing::info;

use crate::error::VisitError;
use crate::module::Module;

pub use summary::{ModuleSummary, ProviderSummary, SummaryVisitor};

/// Observer invoked once per module during a build.
pub trait ModuleVisitor {
    fn visit(&mut self, module: &Module) -> Result<(), VisitError>;
}

impl<F> ModuleVisitor for F
where
    F: FnMut(&Module) -> Result<(), VisitError>,
{
    fn visit(&mut self, module: &Module) -> Result<(), VisitError> {
        self(module)
    }
}

/// Emits one `tracing` event per visited module.
#[derive(Debug, Default)]
pub struct TracingVisitor {
    visited: usize,
}

impl TracingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of modules visited so far.
    pub fn visited(&self) -> usize {
        self.visited
    }
}

impl ModuleVisitor for TracingVisitor {
    fn visit(&mut self, module: &Module) -> Result<(), VisitError> {
        self.visited += 1;
        info!(
            module = module.name(),
            target = %module.target(),
            providers = module.providers().len(),
            exports = module.exports().len(),
            imports = module.imports().len(),
            resolved = module.is_resolved(),
            "module"
        );
        Ok(())
    }
}
