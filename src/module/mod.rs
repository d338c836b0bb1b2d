//! Module system.
//!
//! This module provides:
//! - Module declarations and the registry they are attached to
//! - Per-module containers holding own providers and imported exports
//! - Import graph resolution with cycle detection
//! - The builder that ties resolution and visitors together

mod builder;
mod declaration;
mod module;
mod registry;
mod resolver;


pub use builder::ModuleBuilder;
pub use declaration::ModuleDeclaration;
pub use module::Module;
pub use registry::ModuleRegistry;
pub use resolver::ImportGraph;
