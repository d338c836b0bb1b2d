//! A declared module and its private container.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::declaration::ModuleDeclaration;
use super::registry::ModuleRegistry;
use crate::container::{Container, Instance, Token};
use crate::error::ModuleError;
use crate::provider::{bind_into, ProviderSpec};
use crate::visitor::ModuleVisitor;

/// Runtime side of a module declaration.
///
/// Owns exactly one container holding the module's own providers plus the
/// exports inherited from its imports. Modules are created once per target
/// type by the registry and reused by every later build.
pub struct Module {
    target: Token,
    target_provider: ProviderSpec,
    declaration: Rc<ModuleDeclaration>,
    container: Rc<Container>,
    /// Set once the declared providers are in the container
    bound: Cell<bool>,
}

impl Module {
    pub(crate) fn new(
        target: Token,
        target_provider: ProviderSpec,
        declaration: Rc<ModuleDeclaration>,
    ) -> Self {
        let container = Rc::new(Container::new(declaration.name()));
        Module {
            target,
            target_provider,
            declaration,
            container,
            bound: Cell::new(false),
        }
    }

    /// The module for `target`, creating it from its declaration if needed.
    ///
    /// Fails with `MissingDeclaration` if `target` was never declared.
    pub fn for_target(registry: &ModuleRegistry, target: Token) -> Result<Rc<Module>, ModuleError> {
        registry.module_or_create(target)
    }

    /// Bind the target type, providers, exports, reducers and sagas, then
    /// construct the target type.
    pub fn resolve(&self) -> Result<Instance, ModuleError> {
        self.bind_declared()?;
        let instance = self.container.get(self.target)?;
        debug!(module = self.name(), "resolved");
        Ok(instance)
    }

    /// Typed [`resolve`](Self::resolve).
    pub fn resolve_as<T: 'static>(&self) -> Result<Rc<T>, ModuleError> {
        let instance = self.resolve()?;
        instance.downcast::<T>().ok_or_else(|| ModuleError::TypeMismatch {
            token: Token::of::<T>().short_name(),
            found: instance.token().short_name(),
            module: self.name().to_string(),
        })
    }

    /// The singleton for `token`, constructed on first request.
    pub fn get_provider(&self, token: Token) -> Result<Instance, ModuleError> {
        self.container.get(token)
    }

    pub fn get<T: ?Sized + 'static>(&self) -> Result<Rc<T>, ModuleError> {
        self.container.resolve::<T>()
    }

    pub fn accept(&self, visitor: &mut dyn ModuleVisitor) -> Result<(), ModuleError> {
        visitor.visit(self).map_err(|source| ModuleError::Visitor {
            module: self.name().to_string(),
            source,
        })
    }

    /// Whether the target type has been constructed.
    pub fn is_resolved(&self) -> bool {
        self.container.is_materialized(self.target)
    }

    /// Exported tokens that have no binding in this module's container.
    pub fn unbound_exports(&self) -> Vec<Token> {
        self.exports()
            .iter()
            .copied()
            .filter(|token| !self.container.has(*token))
            .collect()
    }

    /// Bind the declared providers. Runs at most once per module, so
    /// container callbacks fire once however often the module is resolved.
    pub(crate) fn bind_declared(&self) -> Result<(), ModuleError> {
        if self.bound.get() {
            return Ok(());
        }
        let declaration = &self.declaration;
        let specs = std::iter::once(&self.target_provider)
            .chain(declaration.provider_specs())
            .chain(declaration.implicit_bindings());

        for spec in specs {
            bind_into(&self.container, spec)?;
        }
        self.bound.set(true);
        Ok(())
    }

    pub fn target(&self) -> Token {
        self.target
    }

    pub fn container(&self) -> &Rc<Container> {
        &self.container
    }

    pub fn declaration(&self) -> &ModuleDeclaration {
        &self.declaration
    }

    pub fn name(&self) -> &str {
        self.declaration.name()
    }

    pub fn providers(&self) -> &[ProviderSpec] {
        self.declaration.provider_specs()
    }

    pub fn exports(&self) -> &[Token] {
        self.declaration.export_tokens()
    }

    pub fn imports(&self) -> &[Token] {
        self.declaration.import_tokens()
    }

    pub fn reducers(&self) -> &[Token] {
        self.declaration.reducer_tokens()
    }

    pub fn sagas(&self) -> &[Token] {
        self.declaration.saga_tokens()
    }

    pub fn components(&self) -> &[Token] {
        self.declaration.component_tokens()
    }

    pub fn bootstrap(&self) -> Option<Token> {
        self.declaration.bootstrap_token()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name())
            .field("target", &self.target)
            .field("container", &self.container)
            .finish()
    }
}
