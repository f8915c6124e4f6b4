//! Collection of the project configuration from the user.
//!
//! The module is structured in layers:
//! - `interface`: Pure abstract interfaces independent of any UI library
//! - `dialoguer`: Concrete implementation using the dialoguer library
//! - this module: the [`Prompter`] boundary that turns answers into a [`Configuration`]

pub mod dialoguer;
pub mod interface;

pub use interface::*;

use crate::config::{Answers, ConfigSchema, Configuration};
use crate::error::Result;

pub const DEFAULT_PROJECT_NAME: &str = "my-fullstack-app";

const QUICK_SETUP: &str = "Quick setup (React + TypeScript + Vite + Tailwind + Express + Docker)";
const CUSTOM_SETUP: &str = "Custom setup";

/// Supplies a resolved configuration to the generator core.
pub trait Prompter {
    /// Completes `answers` and resolves them.
    ///
    /// Returns `Ok(None)` when the user declines the final confirmation.
    fn configuration(&self, answers: Answers) -> Result<Option<Configuration>>;
}

/// Non-interactive prompter: every open answer takes its schema default.
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn configuration(&self, mut answers: Answers) -> Result<Option<Configuration>> {
        if answers.name.is_none() {
            answers.name = Some(DEFAULT_PROJECT_NAME.to_string());
        }
        answers.with_defaults().resolve().map(Some)
    }
}

/// Asks for every open answer through a [`PromptProvider`].
pub struct InteractivePrompter<P: PromptProvider> {
    provider: P,
}

impl<P: PromptProvider> InteractivePrompter<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fills the open answers, offering the quick preset when nothing was preset.
    pub fn collect(&self, mut answers: Answers) -> Result<Answers> {
        if answers.name.is_none() {
            let name = self.provider.prompt_text(&TextPromptConfig {
                prompt: "Project name".to_string(),
                default: Some(DEFAULT_PROJECT_NAME.to_string()),
            })?;
            answers.name = Some(name);
        }

        let untouched = ConfigSchema::axes().iter().all(|axis| answers.get(axis.name).is_none());
        if untouched && self.ask_quick_setup()? {
            let name = answers.name.clone().unwrap_or_default();
            return Ok(answers.or(Answers::quick(&name)));
        }

        while let Some(axis_name) = answers.next_unanswered() {
            let axis = ConfigSchema::axis(axis_name)?;
            let choices = axis
                .options
                .iter()
                .map(|option| format!("{} - {}", option.display_name, option.description))
                .collect();
            let index = self.provider.prompt_single_choice(&SingleChoiceConfig {
                prompt: axis.title.to_string(),
                choices,
                default_index: axis.position(axis.default),
            })?;
            let key = axis.options.get(index).map_or(axis.default, |option| option.key);
            log::debug!("Selected '{key}' for '{axis_name}'");
            answers.set(axis_name, key)?;
        }
        Ok(answers)
    }

    fn ask_quick_setup(&self) -> Result<bool> {
        let index = self.provider.prompt_single_choice(&SingleChoiceConfig {
            prompt: "Setup mode".to_string(),
            choices: vec![QUICK_SETUP.to_string(), CUSTOM_SETUP.to_string()],
            default_index: Some(0),
        })?;
        Ok(index == 0)
    }
}

impl<P: PromptProvider> Prompter for InteractivePrompter<P> {
    fn configuration(&self, answers: Answers) -> Result<Option<Configuration>> {
        let config = self.collect(answers)?.resolve()?;

        println!("\nConfiguration summary:");
        for (label, value) in config.summary() {
            println!("  {label:<18} {value}");
        }
        let confirmed = self.provider.prompt_confirmation(&ConfirmationConfig {
            prompt: "Create project with this configuration?".to_string(),
            default: true,
        })?;
        Ok(confirmed.then_some(config))
    }
}
