//! Drives the generators for a configuration and layers their output.
//!
//! Generation is pure up to [`GenerationOrchestrator::generate`]; only
//! [`GenerationOrchestrator::run`] hands the result to a [`FileWriter`].

use crate::config::{Configuration, Database, Deployment};
use crate::envfile::EnvMerger;
use crate::error::{Error, Result};
use crate::fileset::GeneratedFileSet;
use crate::generators::{default_generators, GenerationContext, Generator};
use crate::manifest::DependencyManifestBuilder;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::templates::TEMPLATES;
use crate::writer::FileWriter;

/// One planned generator call.
pub struct GeneratorInvocation<'a> {
    pub generator: &'a dyn Generator,
    /// The generator is the only handler of a mandatory axis, so it may not be skipped.
    pub required: bool,
}

impl GeneratorInvocation<'_> {
    pub fn name(&self) -> &'static str {
        self.generator.name()
    }
}

pub struct GenerationOrchestrator {
    generators: Vec<Box<dyn Generator>>,
    renderer: Box<dyn TemplateRenderer>,
    merger: EnvMerger,
}

impl GenerationOrchestrator {
    /// Orchestrator over the default generators and the bundled templates.
    pub fn new() -> Result<Self> {
        let renderer = MiniJinjaRenderer::with_templates(TEMPLATES)?;
        Ok(Self::with_generators(default_generators(), Box::new(renderer)))
    }

    pub fn with_generators(
        generators: Vec<Box<dyn Generator>>,
        renderer: Box<dyn TemplateRenderer>,
    ) -> Self {
        Self { generators, renderer, merger: EnvMerger::new() }
    }

    /// Selects the generators that apply to `config`, in layering order.
    ///
    /// Fails with [`Error::GenerationAborted`] when a mandatory axis has no
    /// applicable handler.
    pub fn plan(&self, config: &Configuration) -> Result<Vec<GeneratorInvocation<'_>>> {
        let applicable: Vec<&dyn Generator> = self
            .generators
            .iter()
            .map(Box::as_ref)
            .filter(|generator| generator.applies(config))
            .collect();

        let mut required: Vec<&'static str> = Vec::new();
        for axis in mandatory_axes(config) {
            let handlers: Vec<_> =
                applicable.iter().filter(|generator| generator.axes().contains(&axis)).collect();
            match handlers.as_slice() {
                [] => {
                    return Err(Error::GenerationAborted {
                        generator: axis.to_string(),
                        source: Box::new(Error::UnsupportedCombination {
                            generator: axis.to_string(),
                            reason: "no generator handles the selected value".to_string(),
                        }),
                    })
                }
                [only] => required.push(only.name()),
                _ => {}
            }
        }

        let plan: Vec<GeneratorInvocation> = applicable
            .into_iter()
            .map(|generator| GeneratorInvocation {
                generator,
                required: required.contains(&generator.name()),
            })
            .collect();
        log::debug!(
            "Generation plan: {}",
            plan.iter().map(GeneratorInvocation::name).collect::<Vec<_>>().join(", ")
        );
        Ok(plan)
    }

    /// Runs the plan and layers every contribution into one file set.
    pub fn generate(&self, config: &Configuration) -> Result<GeneratedFileSet> {
        let plan = self.plan(config)?;
        let manifest = DependencyManifestBuilder::new(config).build();
        let ctx = GenerationContext::new(config, &manifest, self.renderer.as_ref())?;

        let mut files = GeneratedFileSet::new();
        for invocation in plan {
            match invocation.generator.generate(&ctx) {
                Ok(contribution) => {
                    log::debug!(
                        "Generator '{}' produced {} file(s)",
                        invocation.name(),
                        contribution.len()
                    );
                    files.layer(contribution, &self.merger);
                }
                Err(err @ Error::UnsupportedCombination { .. }) if !invocation.required => {
                    log::warn!("Skipping generator '{}': {err}", invocation.name());
                }
                Err(err) => {
                    return Err(Error::GenerationAborted {
                        generator: invocation.name().to_string(),
                        source: Box::new(err),
                    })
                }
            }
        }
        Ok(files)
    }

    /// Generates the project and writes it through `writer`.
    pub fn run(&self, config: &Configuration, writer: &FileWriter) -> Result<GeneratedFileSet> {
        let files = self.generate(config)?;
        writer.write_all(&files)?;
        Ok(files)
    }
}

/// Axes whose selected value must be rendered by some generator.
fn mandatory_axes(config: &Configuration) -> Vec<&'static str> {
    let mut axes = Vec::new();
    if config.has_frontend() {
        axes.push("frontendFramework");
    }
    if config.backend().is_selected() {
        axes.push("backend");
    }
    if config.has_python_backend() {
        axes.push("pythonFramework");
    }
    if config.database() != Database::None {
        axes.push("database");
    }
    if config.deployment() != Deployment::None {
        axes.push("deployment");
    }
    axes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Answers;
    use crate::generators::{CommonGenerator, StylesheetGenerator};

    fn config(json: &str) -> Configuration {
        Answers::from_json(json).unwrap().with_defaults().resolve().unwrap()
    }

    struct Failing {
        axes: &'static [&'static str],
        error: fn() -> Error,
    }

    impl Generator for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn axes(&self) -> &'static [&'static str] {
            self.axes
        }

        fn applies(&self, _config: &Configuration) -> bool {
            true
        }

        fn generate(&self, _ctx: &GenerationContext) -> Result<GeneratedFileSet> {
            Err((self.error)())
        }
    }

    fn unsupported() -> Error {
        Error::UnsupportedCombination {
            generator: "failing".to_string(),
            reason: "not rendered".to_string(),
        }
    }

    fn orchestrator(generators: Vec<Box<dyn Generator>>) -> GenerationOrchestrator {
        let renderer = MiniJinjaRenderer::with_templates(TEMPLATES).unwrap();
        GenerationOrchestrator::with_generators(generators, Box::new(renderer))
    }

    #[test]
    fn plan_follows_layering_order() {
        let orchestrator = GenerationOrchestrator::new().unwrap();
        let plan = orchestrator
            .plan(&config(r#"{"name":"demo","database":"sqlite"}"#))
            .unwrap();
        let names: Vec<_> = plan.iter().map(GeneratorInvocation::name).collect();
        assert_eq!(
            names,
            vec!["common", "frontend", "stylesheet", "backend-node", "database", "deployment"]
        );
        assert!(plan.iter().find(|step| step.name() == "common").is_some_and(|step| !step.required));
        assert!(plan.iter().find(|step| step.name() == "frontend").is_some_and(|step| step.required));
    }

    #[test]
    fn backend_only_plan_has_no_frontend_generators() {
        let orchestrator = GenerationOrchestrator::new().unwrap();
        let plan = orchestrator
            .plan(&config(
                r#"{"name":"svc","frontendFramework":"skip","backend":"python","deployment":"none"}"#,
            ))
            .unwrap();
        let names: Vec<_> = plan.iter().map(GeneratorInvocation::name).collect();
        assert_eq!(names, vec!["common", "backend-python"]);
    }

    #[test]
    fn unhandled_mandatory_axis_aborts() {
        let orchestrator = orchestrator(vec![Box::new(CommonGenerator)]);
        let err = orchestrator.plan(&config(r#"{"name":"demo"}"#)).err().unwrap();
        assert!(matches!(err, Error::GenerationAborted { ref generator, .. } if generator == "frontendFramework"));
    }

    #[test]
    fn optional_unsupported_generator_is_skipped() {
        let orchestrator = orchestrator(vec![
            Box::new(CommonGenerator),
            Box::new(Failing { axes: &[], error: unsupported }),
        ]);
        let files = orchestrator
            .generate(&config(r#"{"name":"demo","frontendFramework":"skip","backend":"none","deployment":"none"}"#))
            .unwrap();
        assert!(files.contains("package.json"));
    }

    #[test]
    fn sole_handler_of_mandatory_axis_aborts() {
        let orchestrator = orchestrator(vec![
            Box::new(CommonGenerator),
            Box::new(Failing { axes: &["deployment"], error: unsupported }),
        ]);
        let err = orchestrator
            .generate(&config(r#"{"name":"demo","frontendFramework":"skip","backend":"none"}"#))
            .unwrap_err();
        match err {
            Error::GenerationAborted { generator, source } => {
                assert_eq!(generator, "failing");
                assert!(matches!(*source, Error::UnsupportedCombination { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn other_errors_always_abort() {
        let orchestrator = orchestrator(vec![
            Box::new(StylesheetGenerator),
            Box::new(Failing {
                axes: &[],
                error: || Error::UnknownAxis { axis: "colour".to_string() },
            }),
        ]);
        let err = orchestrator
            .generate(&config(r#"{"name":"demo","frontendFramework":"skip","backend":"none","deployment":"none"}"#))
            .unwrap_err();
        assert!(matches!(err, Error::GenerationAborted { ref generator, .. } if generator == "failing"));
    }

    #[test]
    fn env_contributions_are_merged_under_the_marker() {
        let files = GenerationOrchestrator::new()
            .unwrap()
            .generate(&config(r#"{"name":"shop","database":"postgresql","deployment":"none"}"#))
            .unwrap();
        let env = files.get(".env").unwrap();
        assert!(env.starts_with("NODE_ENV=development\nPORT=5000\n"));
        assert!(env.contains(crate::constants::ENV_MARKER));
        assert_eq!(env.matches("DATABASE_URL=").count(), 1);
        assert!(env.contains("DB_PASSWORD=yoursecurepassword\n"));
        assert_eq!(files.get(".env"), files.get(".env.example"));
    }

    #[test]
    fn ignore_files_accumulate_lines() {
        let files = GenerationOrchestrator::new()
            .unwrap()
            .generate(&config(r#"{"name":"s","database":"sqlite","deployment":"vercel"}"#))
            .unwrap();
        let gitignore = files.get(".gitignore").unwrap();
        assert!(gitignore.contains("node_modules"));
        assert!(gitignore.contains("\nserver/data/\n"));
        assert!(gitignore.ends_with(".vercel\n"));
    }
}
