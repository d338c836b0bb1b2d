//! Builder that resolves one or more root modules and runs visitors over them.

use std::rc::Rc;

use tracing::debug;

use super::module::Module;
use super::registry::ModuleRegistry;
use super::resolver::ImportGraph;
use crate::config::BuilderConfig;
use crate::container::Token;
use crate::error::ModuleError;
use crate::visitor::ModuleVisitor;

/// Assembles root modules and visitors, then builds them in one call.
///
/// ```ignore
/// let app = ModuleBuilder::new(&registry)
///     .add_module::<AppModule>()
///     .add_module_visitor(&mut summary)
///     .build()?;
/// ```
pub struct ModuleBuilder<'a> {
    registry: &'a ModuleRegistry,
    config: BuilderConfig,
    modules: Vec<Token>,
    visitors: Vec<&'a mut dyn ModuleVisitor>,
}

impl<'a> ModuleBuilder<'a> {
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        ModuleBuilder {
            registry,
            config: BuilderConfig::default(),
            modules: Vec::new(),
            visitors: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Add the module declared on `M` as a root.
    pub fn add_module<M: ?Sized + 'static>(self) -> Self {
        self.add_module_token(Token::of::<M>())
    }

    pub fn add_module_token(mut self, target: Token) -> Self {
        self.modules.push(target);
        self
    }

    pub fn add_modules(mut self, targets: impl IntoIterator<Item = Token>) -> Self {
        self.modules.extend(targets);
        self
    }

    /// Register a visitor. Visitors run in registration order.
    pub fn add_module_visitor(mut self, visitor: &'a mut dyn ModuleVisitor) -> Self {
        self.visitors.push(visitor);
        self
    }

    /// Resolve every added module with its imports, then run the visitors
    /// over every module reached.
    ///
    /// Returns the first added module. Any error aborts the build.
    pub fn build(self) -> Result<Rc<Module>, ModuleError> {
        let ModuleBuilder {
            registry,
            config,
            modules,
            mut visitors,
        } = self;

        if modules.is_empty() {
            return Err(ModuleError::NoModules);
        }

        let mut graph = ImportGraph::new(registry, config);
        let mut roots = Vec::with_capacity(modules.len());
        for target in modules {
            let module = graph.resolve(target)?;
            // The graph only wires modules when imports are not instantiated
            if !config.instantiate_imports {
                module.resolve()?;
            }
            roots.push(module);
        }

        let touched = graph.into_discovered();
        debug!(
            roots = roots.len(),
            modules = touched.len(),
            visitors = visitors.len(),
            "built"
        );

        for visitor in visitors.iter_mut() {
            for module in &touched {
                module.accept(&mut **visitor)?;
            }
        }

        Ok(roots.swap_remove(0))
    }
}
