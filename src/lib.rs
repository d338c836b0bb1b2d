//! remodule: module composition on top of a singleton dependency-injection container.
//!
//! A program declares named modules on marker types. Each module owns a set of
//! providers and a private container; modules compose through imports and
//! exports so that only exported providers cross a module boundary.
//!
//! # Building
//!
//! - Declare modules once in a [`ModuleRegistry`]
//! - Add root modules (and optional visitors) to a [`ModuleBuilder`]
//! - `build()` resolves the import graph, binds providers and constructs
//!   every module, then returns the first root [`Module`]

#![allow(clippy::module_inception)]
#![allow(clippy::type_complexity)]

pub mod config;
pub mod container;
pub mod error;
pub mod module;
pub mod provider;
pub mod visitor;

pub use config::BuilderConfig;
pub use container::{Binding, Container, Implements, Injectable, Instance, Token};
pub use error::{ModuleError, VisitError};
pub use module::{ImportGraph, Module, ModuleBuilder, ModuleDeclaration, ModuleRegistry};
pub use provider::{bind_into, ProviderSpec};
pub use visitor::{ModuleSummary, ModuleVisitor, SummaryVisitor, TracingVisitor};

/// Declare `M`, build it as the only root and return the module.
pub fn build<M: Injectable>(
    registry: &mut ModuleRegistry,
    declaration: ModuleDeclaration,
) -> Result<std::rc::Rc<Module>, ModuleError> {
    registry.declare::<M>(declaration)?;
    ModuleBuilder::new(registry).add_module::<M>().build()
}
