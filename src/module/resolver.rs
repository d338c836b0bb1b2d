//! Import graph resolution.
//!
//! Walks the import graph depth-first from a root module. Imported modules
//! are fully processed before the module importing them, so by the time a
//! module links the exports of an import, that import's container already
//! holds everything it exports, including re-exports from its own imports.
//!
//! Only exported tokens cross a module boundary. They are propagated as
//! linked bindings: the importer's container resolves the token through the
//! exporter's container, so every importer shares one instance.
//!
//! Imports are linked before the module binds its own providers. With
//! first-write-wins binding this means an imported export takes precedence
//! over a local provider declared for the same token.

use std::collections::HashSet;
use std::rc::Rc;

use tracing::debug;

use super::module::Module;
use super::registry::ModuleRegistry;
use crate::config::BuilderConfig;
use crate::container::Token;
use crate::error::ModuleError;

/// Import graph walker shared by all roots of one build.
pub struct ImportGraph<'r> {
    registry: &'r ModuleRegistry,
    config: BuilderConfig,
    /// Fully processed modules
    visited: HashSet<Token>,
    /// Currently resolving stack (for cycle detection)
    resolving: Vec<Token>,
    /// Modules in the order they were first reached
    discovered: Vec<Rc<Module>>,
}

impl<'r> ImportGraph<'r> {
    pub fn new(registry: &'r ModuleRegistry, config: BuilderConfig) -> Self {
        ImportGraph {
            registry,
            config,
            visited: HashSet::new(),
            resolving: Vec::new(),
            discovered: Vec::new(),
        }
    }

    /// Process `root` and everything it imports transitively.
    pub fn resolve(&mut self, root: Token) -> Result<Rc<Module>, ModuleError> {
        self.process(root)
    }

    /// Modules reached so far, each once, in discovery order.
    pub fn discovered(&self) -> &[Rc<Module>] {
        &self.discovered
    }

    pub fn into_discovered(self) -> Vec<Rc<Module>> {
        self.discovered
    }

    fn process(&mut self, target: Token) -> Result<Rc<Module>, ModuleError> {
        // Check for an import cycle
        if let Some(pos) = self.resolving.iter().position(|t| *t == target) {
            let cycle: Vec<String> = self.resolving[pos..]
                .iter()
                .chain(std::iter::once(&target))
                .map(|t| self.display_name(*t))
                .collect();
            return Err(ModuleError::CyclicImport(cycle));
        }

        let module = self.registry.module_or_create(target)?;
        if self.visited.contains(&target) {
            return Ok(module);
        }
        if !self.discovered.iter().any(|m| m.target() == target) {
            self.discovered.push(Rc::clone(&module));
        }

        self.resolving.push(target);
        let result = self.link_imports(&module);
        self.resolving.pop();
        result?;

        if self.config.instantiate_imports {
            module.resolve()?;
        } else {
            module.bind_declared()?;
        }

        if self.config.validate_exports {
            if let Some(token) = module.unbound_exports().first() {
                return Err(ModuleError::UnboundExport {
                    token: token.short_name(),
                    module: module.name().to_string(),
                });
            }
        }

        self.visited.insert(target);
        Ok(module)
    }

    fn link_imports(&mut self, module: &Module) -> Result<(), ModuleError> {
        for import in module.imports() {
            let imported = self.process(*import)?;
            let linked = link_exports(module, &imported);
            debug!(
                module = module.name(),
                import = imported.name(),
                linked,
                "linked exports"
            );
        }
        Ok(())
    }

    fn display_name(&self, target: Token) -> String {
        self.registry
            .declaration(target)
            .map(|declaration| declaration.name().to_string())
            .unwrap_or_else(|| target.short_name())
    }
}

/// Link every export of `imported` into the container of `importer`.
/// Returns how many new bindings were made.
fn link_exports(importer: &Module, imported: &Module) -> usize {
    imported
        .exports()
        .iter()
        .filter(|token| importer.container().link(**token, imported.container()))
        .count()
}
