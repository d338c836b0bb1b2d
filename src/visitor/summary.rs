//! Serializable module summaries for tooling.

use colored::Colorize;
use serde::Serialize;

use super::ModuleVisitor;
use crate::container::Token;
use crate::error::VisitError;
use crate::module::Module;

/// A provider as declared in a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    pub token: String,
    pub kind: String,
}

/// Snapshot of one module taken at visit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub name: String,
    pub target: String,
    pub providers: Vec<ProviderSummary>,
    pub exports: Vec<String>,
    pub imports: Vec<String>,
    pub reducers: Vec<String>,
    pub sagas: Vec<String>,
    pub components: Vec<String>,
    pub bootstrap: Option<String>,
    pub resolved: bool,
}

impl ModuleSummary {
    pub fn of(module: &Module) -> Self {
        ModuleSummary {
            name: module.name().to_string(),
            target: module.target().short_name(),
            providers: module
                .providers()
                .iter()
                .map(|spec| ProviderSummary {
                    token: spec.token().short_name(),
                    kind: spec.kind().to_string(),
                })
                .collect(),
            exports: names(module.exports()),
            imports: names(module.imports()),
            reducers: names(module.reducers()),
            sagas: names(module.sagas()),
            components: names(module.components()),
            bootstrap: module.bootstrap().map(|token| token.short_name()),
            resolved: module.is_resolved(),
        }
    }
}

fn names(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(Token::short_name).collect()
}

/// Collects a [`ModuleSummary`] for every visited module.
#[derive(Debug, Default)]
pub struct SummaryVisitor {
    summaries: Vec<ModuleSummary>,
}

impl SummaryVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summaries(&self) -> &[ModuleSummary] {
        &self.summaries
    }

    pub fn get(&self, name: &str) -> Option<&ModuleSummary> {
        self.summaries.iter().find(|s| s.name == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.summaries)
    }

    /// Human readable listing, one block per module.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for summary in &self.summaries {
            out.push_str(&format!(
                "{} {}\n",
                summary.name.bold(),
                format!("({})", summary.target).dimmed()
            ));
            for provider in &summary.providers {
                out.push_str(&format!(
                    "  {} {} {}\n",
                    "provides".green(),
                    provider.token,
                    format!("[{}]", provider.kind).dimmed()
                ));
            }
            for export in &summary.exports {
                out.push_str(&format!("  {} {}\n", "exports".cyan(), export));
            }
            for import in &summary.imports {
                out.push_str(&format!("  {} {}\n", "imports".yellow(), import));
            }
        }
        out
    }
}

impl ModuleVisitor for SummaryVisitor {
    fn visit(&mut self, module: &Module) -> Result<(), VisitError> {
        self.summaries.push(ModuleSummary::of(module));
        Ok(())
    }
}
