//! Singleton-scoped binding container.
//!
//! Each module owns one container. A container maps tokens to bindings and
//! caches the instance a binding produces on first `get`, so every token
//! resolves to exactly one instance for the container's lifetime.
//!
//! Binding is first-write-wins: binding a token that is already bound is a
//! silent no-op.

mod instance;
mod token;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::{AHashMap, RandomState};
use indexmap::IndexMap;
use tracing::trace;

use crate::error::ModuleError;

pub use instance::{Implements, Injectable, Instance};
pub use token::Token;

/// Constructor stored by class and factory bindings.
pub type Factory = Rc<dyn Fn(&Container) -> Result<Instance, ModuleError>>;

/// How a token is satisfied inside a container.
#[derive(Clone)]
pub enum Binding {
    /// Constructed on first request, then cached.
    Factory(Factory),
    /// A constant, returned as is.
    Value(Instance),
    /// Delegates to the same token in another container and shares its instance.
    Linked(Rc<Container>),
}

impl Binding {
    /// Construct `Impl` and store it under the token type `Tok`.
    pub fn class<Tok, Impl>() -> Self
    where
        Tok: ?Sized + 'static,
        Impl: Injectable + Implements<Tok>,
    {
        Binding::Factory(Rc::new(|container: &Container| {
            let value = Rc::new(Impl::construct(container)?);
            Ok(Instance::new::<Tok>(
                <Impl as Implements<Tok>>::upcast(value),
            ))
        }))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Binding::Factory(_) => "factory",
            Binding::Value(_) => "value",
            Binding::Linked(_) => "linked",
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Linked(source) => write!(f, "Linked({})", source.label),
            other => f.write_str(other.kind()),
        }
    }
}

/// Token to binding store with cached singletons.
pub struct Container {
    label: String,
    bindings: RefCell<IndexMap<Token, Binding, RandomState>>,
    instances: RefCell<AHashMap<Token, Instance>>,
    /// Tokens currently being constructed (for cycle detection)
    resolving: RefCell<Vec<Token>>,
}

impl Container {
    /// Create an empty container. The label names it in errors and logs.
    pub fn new(label: impl Into<String>) -> Self {
        Container {
            label: label.into(),
            bindings: RefCell::new(IndexMap::with_hasher(RandomState::new())),
            instances: RefCell::new(AHashMap::new()),
            resolving: RefCell::new(Vec::new()),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Bind `token` unless it is already bound. Returns whether a binding was added.
    pub fn bind(&self, token: Token, binding: Binding) -> bool {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.contains_key(&token) {
            return false;
        }
        trace!(container = %self.label, %token, kind = binding.kind(), "bind");
        bindings.insert(token, binding);
        true
    }

    /// Bind `T` to itself.
    pub fn bind_class<T: Injectable>(&self) -> bool {
        self.bind(Token::of::<T>(), Binding::class::<T, T>())
    }

    /// Bind the token `Tok` to the implementation `Impl`.
    pub fn bind_to<Tok, Impl>(&self) -> bool
    where
        Tok: ?Sized + 'static,
        Impl: Injectable + Implements<Tok>,
    {
        self.bind(Token::of::<Tok>(), Binding::class::<Tok, Impl>())
    }

    pub fn bind_value<T: 'static>(&self, value: T) -> bool {
        self.bind(
            Token::of::<T>(),
            Binding::Value(Instance::new(Rc::new(value))),
        )
    }

    /// Bind `T` to a factory called once, on first request.
    pub fn bind_factory<T, F>(&self, factory: F) -> bool
    where
        T: ?Sized + 'static,
        F: Fn(&Container) -> Result<Rc<T>, ModuleError> + 'static,
    {
        self.bind(
            Token::of::<T>(),
            Binding::Factory(Rc::new(move |container: &Container| {
                factory(container).map(Instance::new::<T>)
            })),
        )
    }

    /// Resolve `token` through `source`, sharing its instance.
    pub fn link(&self, token: Token, source: &Rc<Container>) -> bool {
        self.bind(token, Binding::Linked(Rc::clone(source)))
    }

    pub fn has(&self, token: Token) -> bool {
        self.bindings.borrow().contains_key(&token)
    }

    /// Whether the instance for `token` has already been constructed.
    pub fn is_materialized(&self, token: Token) -> bool {
        self.instances.borrow().contains_key(&token)
    }

    /// Bound tokens, in binding order.
    pub fn tokens(&self) -> Vec<Token> {
        self.bindings.borrow().keys().copied().collect()
    }

    /// Get the instance for `token`, constructing it on first request.
    pub fn get(&self, token: Token) -> Result<Instance, ModuleError> {
        if let Some(instance) = self.instances.borrow().get(&token) {
            return Ok(instance.clone());
        }

        let binding = self
            .bindings
            .borrow()
            .get(&token)
            .cloned()
            .ok_or_else(|| ModuleError::missing_binding(token.short_name(), &self.label))?;

        if let Some(pos) = self.resolving.borrow().iter().position(|t| *t == token) {
            let chain = self.resolving.borrow()[pos..]
                .iter()
                .chain(std::iter::once(&token))
                .map(Token::short_name)
                .collect();
            return Err(ModuleError::CyclicDependency {
                module: self.label.clone(),
                chain,
            });
        }

        self.resolving.borrow_mut().push(token);
        let result = match &binding {
            Binding::Factory(factory) => factory(self),
            Binding::Value(value) => Ok(value.clone()),
            Binding::Linked(source) => source.get(token),
        };
        self.resolving.borrow_mut().pop();

        let instance = result?;
        trace!(container = %self.label, %token, kind = binding.kind(), "materialized");
        self.instances
            .borrow_mut()
            .entry(token)
            .or_insert_with(|| instance.clone());
        Ok(instance)
    }

    /// Typed [`get`](Self::get).
    pub fn resolve<T: ?Sized + 'static>(&self) -> Result<Rc<T>, ModuleError> {
        let token = Token::of::<T>();
        let instance = self.get(token)?;
        instance
            .downcast::<T>()
            .ok_or_else(|| ModuleError::TypeMismatch {
                token: token.short_name(),
                found: instance.token().short_name(),
                module: self.label.clone(),
            })
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("label", &self.label)
            .field("bindings", &self.tokens())
            .finish()
    }
}
