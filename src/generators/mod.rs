//! File generators. Each generator owns one family of artifacts and turns a
//! [`Configuration`] into a [`GeneratedFileSet`] without touching the disk.

mod backend_node;
mod backend_python;
mod common;
mod context;
mod database;
mod deployment;
mod frontend;
mod stylesheet;
mod ui_library;

pub use backend_node::NodeBackendGenerator;
pub use backend_python::PythonBackendGenerator;
pub use common::CommonGenerator;
pub use context::{ScriptLine, SummaryRow, TemplateContext};
pub use database::DatabaseGenerator;
pub use deployment::DeploymentGenerator;
pub use frontend::FrontendGenerator;
pub use stylesheet::StylesheetGenerator;
pub use ui_library::UiLibraryGenerator;

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::fileset::GeneratedFileSet;
use crate::manifest::Manifest;
use crate::renderer::{merge_context, TemplateRenderer};

/// A pure function from configuration to generated files.
pub trait Generator {
    /// Stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Axes whose selected value this generator is responsible for rendering.
    fn axes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether the generator has anything to contribute for `config`.
    fn applies(&self, config: &Configuration) -> bool;

    fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedFileSet>;
}

/// Everything a generator may read while producing its files.
pub struct GenerationContext<'a> {
    pub config: &'a Configuration,
    pub manifest: &'a Manifest,
    renderer: &'a dyn TemplateRenderer,
    vars: serde_json::Value,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        config: &'a Configuration,
        manifest: &'a Manifest,
        renderer: &'a dyn TemplateRenderer,
    ) -> Result<Self> {
        let vars = serde_json::to_value(TemplateContext::new(config, manifest))?;
        Ok(Self { config, manifest, renderer, vars })
    }

    /// Renders a registered template with the shared variables.
    pub fn render(&self, template: &str) -> Result<String> {
        self.renderer.render_named(template, &self.vars)
    }

    /// Renders a registered template with extra variables layered on top.
    pub fn render_with(&self, template: &str, extra: serde_json::Value) -> Result<String> {
        self.renderer.render_named(template, &merge_context(&self.vars, &extra))
    }
}

/// Error for a generator asked to render something it has no template for.
pub(crate) fn unsupported(generator: &dyn Generator, reason: impl Into<String>) -> Error {
    Error::UnsupportedCombination { generator: generator.name().to_string(), reason: reason.into() }
}

/// Pretty printed JSON with a trailing newline.
pub(crate) fn json_file(value: &serde_json::Value) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// All generators in the order their outputs are layered.
pub fn default_generators() -> Vec<Box<dyn Generator>> {
    vec![
        Box::new(CommonGenerator),
        Box::new(FrontendGenerator),
        Box::new(StylesheetGenerator),
        Box::new(UiLibraryGenerator),
        Box::new(NodeBackendGenerator),
        Box::new(PythonBackendGenerator),
        Box::new(DatabaseGenerator),
        Box::new(DeploymentGenerator),
    ]
}
