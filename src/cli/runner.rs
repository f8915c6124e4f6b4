use crate::{
    cli::Args,
    config::{Answers, Configuration, Deployment},
    constants::STDIN_INDICATOR,
    error::Result,
    installer::{CommandRunner, InstallRunner, ShellCommandRunner},
    ioutils::{prepare_output_dir, read_from},
    manifest::{DependencyManifestBuilder, Manifest},
    orchestrator::GenerationOrchestrator,
    prompt::{
        dialoguer::DialoguerPrompter, DefaultsPrompter, InteractivePrompter, Prompter,
        DEFAULT_PROJECT_NAME,
    },
    writer::FileWriter,
};
use std::path::{Path, PathBuf};

/// Main CLI runner that drives one project generation from answers to install
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete workflow with the terminal prompter and a shell.
    pub fn run(self) -> Result<()> {
        let prompter: Box<dyn Prompter> = if self.args.non_interactive {
            Box::new(DefaultsPrompter)
        } else {
            Box::new(InteractivePrompter::new(DialoguerPrompter::new()))
        };
        self.run_with(prompter.as_ref(), ShellCommandRunner)?;
        Ok(())
    }

    /// Executes the workflow with the given collaborators.
    ///
    /// Returns the project root, or `None` when the user cancelled at the summary.
    pub fn run_with<R: CommandRunner>(
        &self,
        prompter: &dyn Prompter,
        command_runner: R,
    ) -> Result<Option<PathBuf>> {
        let answers = self.collect_answers()?;
        let Some(config) = prompter.configuration(answers)? else {
            println!("Setup cancelled.");
            return Ok(None);
        };

        let output_dir = self.args.output_dir.clone().unwrap_or_else(|| PathBuf::from(config.name()));
        let root = prepare_output_dir(&output_dir, self.args.dry_run)?;

        let orchestrator = GenerationOrchestrator::new()?;
        let writer = FileWriter::new(&root, self.args.dry_run);
        let files = orchestrator.run(&config, &writer)?;

        if self.args.dry_run {
            println!(
                "[DRY RUN] {} file(s) would be written to {}.",
                files.len(),
                writer.root().display()
            );
            return Ok(Some(root));
        }

        let install = !self.args.skip_install;
        if install {
            InstallRunner::new(command_runner).install(&config, writer.root())?;
        }

        let manifest = DependencyManifestBuilder::new(&config).build();
        println!("Project '{}' created in {}.", config.name(), writer.root().display());
        println!("\nNext steps:");
        for step in next_steps(&config, &manifest, writer.root(), install) {
            println!("  {step}");
        }
        Ok(Some(root))
    }

    /// Merges answers from the command line: answers text or file, then the
    /// positional name, then the quick preset for whatever is still open.
    fn collect_answers(&self) -> Result<Answers> {
        let mut answers = match (&self.args.answers, &self.args.answers_file) {
            (Some(text), _) if text == STDIN_INDICATOR => {
                Answers::from_json(&read_from(std::io::stdin())?)?
            }
            (Some(text), _) => Answers::from_json(text)?,
            (None, Some(path)) => load_answers_file(path)?,
            (None, None) => Answers::default(),
        };

        if let Some(name) = &self.args.name {
            answers.name = Some(name.clone());
        }
        if self.args.quick {
            let name = answers.name.clone().unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
            answers = answers.or(Answers::quick(&name));
        }
        log::debug!("Answers from the command line: {answers:?}");
        Ok(answers)
    }
}

fn load_answers_file(path: &Path) -> Result<Answers> {
    let text = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => Answers::from_yaml(&text),
        _ => Answers::from_json(&text),
    }
}

/// Follow-up commands printed after a successful generation.
pub fn next_steps(
    config: &Configuration,
    manifest: &Manifest,
    root: &Path,
    installed: bool,
) -> Vec<String> {
    let uses_npm = config.has_frontend() || config.has_node_backend();
    let mut steps = vec![format!("cd {}", root.display())];
    if !installed {
        if uses_npm {
            steps.push("npm install".to_string());
        }
        if config.has_python_backend() {
            steps.push(
                "(cd server && python3 -m venv .venv && .venv/bin/pip install -r requirements.txt)"
                    .to_string(),
            );
        }
    }
    if config.has_python_backend() {
        steps.push("source server/.venv/bin/activate".to_string());
    }
    if manifest.scripts.contains_key("dev") {
        steps.push("npm run dev".to_string());
    }
    if config.deployment() == Deployment::Docker {
        steps.push("docker-compose up --build".to_string());
    }
    steps
}

/// Entry point used by the binary.
pub fn run(args: Args) -> Result<()> {
    Runner::new(args).run()
}
