//! Declaration registry and module cache.
//!
//! Maps module target types to their declarations, and once built, to their
//! `Module`. One registry is created by the program and handed to every
//! builder; nothing is stored globally.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::RandomState;
use indexmap::IndexMap;
use tracing::debug;

use super::declaration::ModuleDeclaration;
use super::module::Module;
use crate::container::{Injectable, Instance, Token};
use crate::error::ModuleError;
use crate::provider::ProviderSpec;

struct Declared {
    declaration: Rc<ModuleDeclaration>,
    /// Binding of the target type to itself
    target: ProviderSpec,
}

/// Registry of module declarations and the modules built from them.
pub struct ModuleRegistry {
    declarations: IndexMap<Token, Declared, RandomState>,
    modules: RefCell<IndexMap<Token, Rc<Module>, RandomState>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        ModuleRegistry {
            declarations: IndexMap::with_hasher(RandomState::new()),
            modules: RefCell::new(IndexMap::with_hasher(RandomState::new())),
        }
    }

    /// Attach `declaration` to the module type `M`.
    ///
    /// A type can be declared once; the name must not be empty.
    pub fn declare<M: Injectable>(
        &mut self,
        declaration: ModuleDeclaration,
    ) -> Result<(), ModuleError> {
        let target = Token::of::<M>();
        if self.declarations.contains_key(&target) {
            return Err(ModuleError::DuplicateDeclaration {
                target: target.short_name(),
            });
        }
        if declaration.name().trim().is_empty() {
            return Err(ModuleError::invalid_declaration(
                target.short_name(),
                "module name must not be empty",
            ));
        }

        debug!(module = declaration.name(), %target, "declared");
        self.declarations.insert(
            target,
            Declared {
                declaration: Rc::new(declaration),
                target: ProviderSpec::class::<M>(),
            },
        );
        Ok(())
    }

    /// The declaration attached to `target`, if any.
    pub fn declaration(&self, target: Token) -> Option<Rc<ModuleDeclaration>> {
        self.declarations
            .get(&target)
            .map(|declared| Rc::clone(&declared.declaration))
    }

    pub fn is_declared(&self, target: Token) -> bool {
        self.declarations.contains_key(&target)
    }

    pub fn declared_count(&self) -> usize {
        self.declarations.len()
    }

    /// The module built for `target`, or `None` if it was never built.
    ///
    /// A module is cached as soon as a build first reaches it. If that build
    /// fails, the module stays cached with whatever was wired so far, and a
    /// later build picks it up from there.
    pub fn module(&self, target: Token) -> Option<Rc<Module>> {
        self.modules.borrow().get(&target).cloned()
    }

    pub fn module_of<M: ?Sized + 'static>(&self) -> Option<Rc<Module>> {
        self.module(Token::of::<M>())
    }

    /// Every module built so far, in creation order.
    pub fn modules(&self) -> Vec<Rc<Module>> {
        self.modules.borrow().values().cloned().collect()
    }

    /// Get `token` from the module built for `target`.
    pub fn provider_by_module(&self, target: Token, token: Token) -> Result<Instance, ModuleError> {
        self.module(target)
            .ok_or_else(|| ModuleError::not_a_module(target.short_name()))?
            .get_provider(token)
    }

    /// Typed [`provider_by_module`](Self::provider_by_module).
    pub fn provider_of<M, T>(&self) -> Result<Rc<T>, ModuleError>
    where
        M: ?Sized + 'static,
        T: ?Sized + 'static,
    {
        let target = Token::of::<M>();
        self.module(target)
            .ok_or_else(|| ModuleError::not_a_module(target.short_name()))?
            .get::<T>()
    }

    /// The module for `target`, created on first request.
    pub(crate) fn module_or_create(&self, target: Token) -> Result<Rc<Module>, ModuleError> {
        if let Some(module) = self.module(target) {
            return Ok(module);
        }

        let declared = self
            .declarations
            .get(&target)
            .ok_or_else(|| ModuleError::MissingDeclaration {
                target: target.short_name(),
            })?;

        let module = Rc::new(Module::new(
            target,
            declared.target.clone(),
            Rc::clone(&declared.declaration),
        ));
        debug!(module = module.name(), %target, "created module");
        self.modules.borrow_mut().insert(target, Rc::clone(&module));
        Ok(module)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
