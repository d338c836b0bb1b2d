//! Error types for declaration, graph resolution and injection.

use thiserror::Error;

/// Error type returned by a [`ModuleVisitor`](crate::visitor::ModuleVisitor).
pub type VisitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while declaring, building or resolving modules.
///
/// Every error is fatal to the call that produced it. Nothing is retried or
/// downgraded internally; a failing build returns no module graph.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Module declaration applied more than once to '{target}'")]
    DuplicateDeclaration { target: String },

    #[error("Missing module declaration for '{target}'")]
    MissingDeclaration { target: String },

    #[error("Invalid module declaration for '{target}': {message}")]
    InvalidDeclaration { target: String, message: String },

    #[error("'{target}' is not a module")]
    NotAModule { target: String },

    #[error("No binding for '{token}' in module '{module}'")]
    MissingBinding { token: String, module: String },

    #[error("Cyclic import: {}", .0.join(" -> "))]
    CyclicImport(Vec<String>),

    #[error("Cyclic dependency in module '{module}': {}", .chain.join(" -> "))]
    CyclicDependency { module: String, chain: Vec<String> },

    #[error("Provider for '{token}' in module '{module}' holds a '{found}'")]
    TypeMismatch {
        token: String,
        found: String,
        module: String,
    },

    #[error("Module '{module}' exports '{token}' but nothing provides it")]
    UnboundExport { token: String, module: String },

    #[error("No modules were added to the builder")]
    NoModules,

    #[error("Visitor failed on module '{module}': {source}")]
    Visitor {
        module: String,
        #[source]
        source: VisitError,
    },
}

impl ModuleError {
    pub fn missing_binding(token: impl Into<String>, module: impl Into<String>) -> Self {
        Self::MissingBinding {
            token: token.into(),
            module: module.into(),
        }
    }

    pub fn not_a_module(target: impl Into<String>) -> Self {
        Self::NotAModule {
            target: target.into(),
        }
    }

    pub fn invalid_declaration(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDeclaration {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Whether this error means a token could not be resolved.
    pub fn is_missing_binding(&self) -> bool {
        matches!(self, Self::MissingBinding { .. })
    }
}
