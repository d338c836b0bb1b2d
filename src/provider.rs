//! Provider declarations and how they are bound into a container.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::container::{Binding, Container, Implements, Injectable, Instance, Token};
use crate::error::ModuleError;

/// Callback of a [`ProviderSpec::Container`] provider.
pub type RegisterFn = Rc<dyn Fn(&Container) -> Result<(), ModuleError>>;

/// A declared way of satisfying a token inside a module.
#[derive(Clone)]
pub enum ProviderSpec {
    /// Construct `implementation` whenever `token` is requested.
    Class {
        token: Token,
        implementation: Token,
        binding: Binding,
    },
    /// Resolve `token` to a constant value.
    Value { token: Token, value: Instance },
    /// Hand the raw container to caller code.
    Container { token: Token, register: RegisterFn },
}

impl ProviderSpec {
    /// Bare class provider: `T` is both the token and the implementation.
    pub fn class<T: Injectable>() -> Self {
        Self::use_class::<T, T>()
    }

    /// Provide `Tok` with an instance of `Impl`.
    pub fn use_class<Tok, Impl>() -> Self
    where
        Tok: ?Sized + 'static,
        Impl: Injectable + Implements<Tok>,
    {
        ProviderSpec::Class {
            token: Token::of::<Tok>(),
            implementation: Token::of::<Impl>(),
            binding: Binding::class::<Tok, Impl>(),
        }
    }

    pub fn use_value<T: 'static>(value: T) -> Self {
        Self::use_shared(Rc::new(value))
    }

    /// Provide an already shared value, e.g. a trait object.
    pub fn use_shared<T: ?Sized + 'static>(value: Rc<T>) -> Self {
        ProviderSpec::Value {
            token: Token::of::<T>(),
            value: Instance::new(value),
        }
    }

    /// Let `register` bind `token` (or anything else) on the raw container.
    pub fn use_container<F>(token: Token, register: F) -> Self
    where
        F: Fn(&Container) -> Result<(), ModuleError> + 'static,
    {
        ProviderSpec::Container {
            token,
            register: Rc::new(register),
        }
    }

    pub fn token(&self) -> Token {
        match self {
            ProviderSpec::Class { token, .. }
            | ProviderSpec::Value { token, .. }
            | ProviderSpec::Container { token, .. } => *token,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProviderSpec::Class { .. } => "class",
            ProviderSpec::Value { .. } => "value",
            ProviderSpec::Container { .. } => "container",
        }
    }
}

impl fmt::Debug for ProviderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSpec::Class {
                token,
                implementation,
                ..
            } if token != implementation => write!(f, "{} => {}", token, implementation),
            other => write!(f, "{}({})", other.kind(), other.token()),
        }
    }
}

/// Bind `spec` into `container`. Already bound tokens are left untouched.
///
/// Returns whether the container was changed by this call.
pub fn bind_into(container: &Container, spec: &ProviderSpec) -> Result<bool, ModuleError> {
    let token = spec.token();
    if container.has(token) {
        trace!(container = container.label(), %token, "already bound");
        return Ok(false);
    }

    match spec {
        ProviderSpec::Class { binding, .. } => Ok(container.bind(token, binding.clone())),
        ProviderSpec::Value { value, .. } => {
            Ok(container.bind(token, Binding::Value(value.clone())))
        }
        ProviderSpec::Container { register, .. } => {
            register(container)?;
            Ok(container.has(token))
        }
    }
}
