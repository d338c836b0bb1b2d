//! Builder configuration.

use serde::{Deserialize, Serialize};

/// Environment variable enabling eager export validation.
pub const ENV_VALIDATE_EXPORTS: &str = "REMODULE_VALIDATE_EXPORTS";
/// Environment variable controlling construction of imported modules.
pub const ENV_INSTANTIATE_IMPORTS: &str = "REMODULE_INSTANTIATE_IMPORTS";

/// Options for a [`ModuleBuilder`](crate::ModuleBuilder) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Fail the build when a module exports a token nothing binds.
    /// When off, such exports only fail once an importer asks for them.
    pub validate_exports: bool,
    /// Construct the target type of every imported module during the build,
    /// not only the roots.
    pub instantiate_imports: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            validate_exports: false,
            instantiate_imports: true,
        }
    }
}

impl BuilderConfig {
    /// Parse a JSON object. Missing fields keep their defaults.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Read `REMODULE_VALIDATE_EXPORTS` and `REMODULE_INSTANTIATE_IMPORTS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        BuilderConfig {
            validate_exports: lookup(ENV_VALIDATE_EXPORTS)
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.validate_exports),
            instantiate_imports: lookup(ENV_INSTANTIATE_IMPORTS)
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.instantiate_imports),
        }
    }
}

// Anything but "false"/"0"/"no"/"off" (or empty) enables a flag.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "0" | "no" | "off"
    )
}
