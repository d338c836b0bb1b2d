//! Module declarations.

use crate::container::{Injectable, Token};
use crate::provider::ProviderSpec;

/// The static description of a module, attached once to its target type.
///
/// ```ignore
/// ModuleDeclaration::new("todo")
///     .import::<StorageModule>()
///     .provider(ProviderSpec::class::<TodoService>())
///     .export::<TodoService>()
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleDeclaration {
    name: String,
    providers: Vec<ProviderSpec>,
    exports: Vec<Token>,
    imports: Vec<Token>,
    reducers: Vec<Token>,
    sagas: Vec<Token>,
    components: Vec<Token>,
    bootstrap: Option<Token>,
    /// Self bindings for exports, reducers and sagas given as concrete types
    implicit: Vec<ProviderSpec>,
}

impl ModuleDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        ModuleDeclaration {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn provider(mut self, provider: ProviderSpec) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn providers(mut self, providers: impl IntoIterator<Item = ProviderSpec>) -> Self {
        self.providers.extend(providers);
        self
    }

    /// Export `T`. If nothing else provides it, `T` is bound to itself.
    pub fn export<T: Injectable>(mut self) -> Self {
        self.exports.push(Token::of::<T>());
        self.implicit.push(ProviderSpec::class::<T>());
        self
    }

    /// Export a token that some provider or import must satisfy.
    pub fn export_token(mut self, token: Token) -> Self {
        self.exports.push(token);
        self
    }

    /// Import the module declared on `M`.
    pub fn import<M: ?Sized + 'static>(mut self) -> Self {
        self.imports.push(Token::of::<M>());
        self
    }

    pub fn import_token(mut self, module: Token) -> Self {
        self.imports.push(module);
        self
    }

    pub fn reducer<T: Injectable>(mut self) -> Self {
        self.reducers.push(Token::of::<T>());
        self.implicit.push(ProviderSpec::class::<T>());
        self
    }

    pub fn saga<T: Injectable>(mut self) -> Self {
        self.sagas.push(Token::of::<T>());
        self.implicit.push(ProviderSpec::class::<T>());
        self
    }

    pub fn component<T: ?Sized + 'static>(mut self) -> Self {
        self.components.push(Token::of::<T>());
        self
    }

    pub fn bootstrap<T: ?Sized + 'static>(mut self) -> Self {
        self.bootstrap = Some(Token::of::<T>());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider_specs(&self) -> &[ProviderSpec] {
        &self.providers
    }

    pub fn export_tokens(&self) -> &[Token] {
        &self.exports
    }

    pub fn import_tokens(&self) -> &[Token] {
        &self.imports
    }

    pub fn reducer_tokens(&self) -> &[Token] {
        &self.reducers
    }

    pub fn saga_tokens(&self) -> &[Token] {
        &self.sagas
    }

    pub fn component_tokens(&self) -> &[Token] {
        &self.components
    }

    pub fn bootstrap_token(&self) -> Option<Token> {
        self.bootstrap
    }

    pub(crate) fn implicit_bindings(&self) -> &[ProviderSpec] {
        &self.implicit
    }
}
