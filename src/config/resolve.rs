//! Raw answers and their resolution into an immutable [`Configuration`].

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::schema::ConfigSchema;
use super::types::{
    Backend, Bundler, Database, Deployment, FrontendFramework, Language, PythonFramework,
    StateManagement, Styling, UiLibrary,
};
use crate::error::{Error, Result};

/// Lowercases the name and replaces every character outside `[a-z0-9-]` with `-`.
pub fn sanitize_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' { c } else { '-' })
        .collect()
}

/// Answers as collected from a prompt, an answers file or the command line.
///
/// Every field is an unvalidated schema key; [`Answers::resolve`] turns them
/// into a [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answers {
    pub name: Option<String>,
    #[serde(alias = "jsFramework")]
    pub frontend_framework: Option<String>,
    pub language: Option<String>,
    pub bundler: Option<String>,
    pub styling: Option<String>,
    pub ui_library: Option<String>,
    pub state_management: Option<String>,
    pub backend: Option<String>,
    pub python_framework: Option<String>,
    pub database: Option<String>,
    pub deployment: Option<String>,
}

impl Answers {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// React + TypeScript + Vite + Tailwind + Express + Docker.
    pub fn quick(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            frontend_framework: Some("react".into()),
            language: Some("typescript".into()),
            bundler: Some("vite".into()),
            styling: Some("tailwind".into()),
            ui_library: Some("none".into()),
            state_management: Some("none".into()),
            backend: Some("express".into()),
            python_framework: None,
            database: Some("none".into()),
            deployment: Some("docker".into()),
        }
    }

    /// Fills every answer left open by `self` from `other`.
    pub fn or(mut self, other: Answers) -> Self {
        for axis in ConfigSchema::axes() {
            if let (Ok(slot), Some(value)) = (self.slot_mut(axis.name), other.get(axis.name)) {
                if slot.is_none() {
                    *slot = Some(value.to_string());
                }
            }
        }
        if self.name.is_none() {
            self.name = other.name;
        }
        self
    }

    pub fn get(&self, axis: &str) -> Option<&str> {
        let slot = match axis {
            "frontendFramework" => &self.frontend_framework,
            "language" => &self.language,
            "bundler" => &self.bundler,
            "styling" => &self.styling,
            "uiLibrary" => &self.ui_library,
            "stateManagement" => &self.state_management,
            "backend" => &self.backend,
            "pythonFramework" => &self.python_framework,
            "database" => &self.database,
            "deployment" => &self.deployment,
            _ => return None,
        };
        slot.as_deref()
    }

    pub fn set(&mut self, axis: &str, value: impl Into<String>) -> Result<()> {
        *self.slot_mut(axis)? = Some(value.into());
        Ok(())
    }

    fn slot_mut(&mut self, axis: &str) -> Result<&mut Option<String>> {
        Ok(match axis {
            "frontendFramework" => &mut self.frontend_framework,
            "language" => &mut self.language,
            "bundler" => &mut self.bundler,
            "styling" => &mut self.styling,
            "uiLibrary" => &mut self.ui_library,
            "stateManagement" => &mut self.state_management,
            "backend" => &mut self.backend,
            "pythonFramework" => &mut self.python_framework,
            "database" => &mut self.database,
            "deployment" => &mut self.deployment,
            _ => return Err(Error::UnknownAxis { axis: axis.to_string() }),
        })
    }

    fn frontend(&self) -> Option<FrontendFramework> {
        self.frontend_framework.as_deref().and_then(FrontendFramework::from_key)
    }

    fn backend_value(&self) -> Option<Backend> {
        self.backend.as_deref().and_then(Backend::from_key)
    }

    /// Whether `axis` is meaningful given the answers collected so far.
    pub fn applies(&self, axis: &str) -> bool {
        let frontend = self.frontend();
        let frontend_selected = frontend.is_some_and(FrontendFramework::is_selected);
        match axis {
            "language" => {
                if frontend_selected {
                    frontend != Some(FrontendFramework::Angular)
                } else {
                    self.backend_value().is_some_and(Backend::is_node)
                }
            }
            "bundler" => frontend_selected && frontend != Some(FrontendFramework::Angular),
            "styling" => frontend_selected,
            "uiLibrary" | "stateManagement" => {
                frontend.is_some_and(FrontendFramework::supports_component_libraries)
            }
            "pythonFramework" => self.backend_value() == Some(Backend::Python),
            _ => true,
        }
    }

    /// The next axis that applies and has no answer yet, in schema order.
    pub fn next_unanswered(&self) -> Option<&'static str> {
        ConfigSchema::axes()
            .iter()
            .map(|axis| axis.name)
            .find(|axis| self.applies(axis) && self.get(axis).is_none())
    }

    /// Fills every applicable, unanswered axis with its schema default.
    pub fn with_defaults(mut self) -> Self {
        while let Some(axis) = self.next_unanswered() {
            let default = ConfigSchema::default_of(axis).unwrap_or("none");
            log::debug!("Using default '{default}' for '{axis}'");
            // `next_unanswered` only yields registered axes.
            let _ = self.set(axis, default);
        }
        self
    }

    /// Validates the answers and applies the cross-axis rules.
    pub fn resolve(&self) -> Result<Configuration> {
        let name = match &self.name {
            Some(raw) => sanitize_name(raw),
            None => String::new(),
        };
        if name.is_empty() {
            return Err(Error::InvalidConfiguration {
                field: "name".to_string(),
                reason: "project name cannot be empty".to_string(),
            });
        }

        let frontend_framework: FrontendFramework = required(self, "frontendFramework")?;
        let backend: Backend = required(self, "backend")?;
        let database: Database = required(self, "database")?;
        let deployment: Deployment = required(self, "deployment")?;

        let language: Language = if self.applies("language") {
            required(self, "language")?
        } else if frontend_framework == FrontendFramework::Angular {
            forced(self, "language", Language::TypeScript, frontend_framework)?
        } else {
            optional(self, "language")?.unwrap_or(Language::TypeScript)
        };

        let bundler = if self.applies("bundler") {
            required(self, "bundler")?
        } else {
            forced(self, "bundler", Bundler::None, frontend_framework)?
        };

        let styling = if self.applies("styling") {
            required(self, "styling")?
        } else {
            forced(self, "styling", Styling::Css, frontend_framework)?
        };

        let (ui_library, state_management) = if self.applies("uiLibrary") {
            (
                optional(self, "uiLibrary")?.unwrap_or(UiLibrary::None),
                optional(self, "stateManagement")?.unwrap_or(StateManagement::None),
            )
        } else {
            (
                forced(self, "uiLibrary", UiLibrary::None, frontend_framework)?,
                forced(self, "stateManagement", StateManagement::None, frontend_framework)?,
            )
        };

        let python_framework = if backend == Backend::Python {
            Some(required(self, "pythonFramework")?)
        } else {
            if self.python_framework.is_some() {
                log::warn!("Ignoring pythonFramework: backend '{backend}' is not python");
            }
            None
        };

        Ok(Configuration {
            name,
            frontend_framework,
            language,
            bundler,
            styling,
            ui_library,
            state_management,
            backend,
            python_framework,
            database,
            deployment,
        })
    }
}

trait AxisValue: Sized + Copy + PartialEq + Display {
    fn parse(key: &str) -> Option<Self>;
}

macro_rules! impl_axis_value {
    ($($ty:ty),+) => {
        $(impl AxisValue for $ty {
            fn parse(key: &str) -> Option<Self> {
                <$ty>::from_key(key)
            }
        })+
    };
}

impl_axis_value!(
    FrontendFramework,
    Language,
    Bundler,
    Styling,
    UiLibrary,
    StateManagement,
    Backend,
    PythonFramework,
    Database,
    Deployment
);

fn optional<T: AxisValue>(answers: &Answers, axis: &str) -> Result<Option<T>> {
    let Some(raw) = answers.get(axis) else {
        return Ok(None);
    };
    match T::parse(raw) {
        Some(value) => Ok(Some(value)),
        None => {
            let expected: Vec<&str> =
                ConfigSchema::list_axis(axis)?.iter().map(|option| option.key).collect();
            Err(Error::InvalidConfiguration {
                field: axis.to_string(),
                reason: format!(
                    "unknown value '{raw}', expected one of: {}",
                    expected.join(", ")
                ),
            })
        }
    }
}

fn required<T: AxisValue>(answers: &Answers, axis: &str) -> Result<T> {
    optional(answers, axis)?.ok_or_else(|| Error::InvalidConfiguration {
        field: axis.to_string(),
        reason: "a value is required".to_string(),
    })
}

/// Returns `value`, warning when the answers asked for something else.
fn forced<T: AxisValue>(
    answers: &Answers,
    axis: &str,
    value: T,
    frontend: FrontendFramework,
) -> Result<T> {
    if let Some(requested) = optional::<T>(answers, axis)? {
        if requested != value {
            log::warn!(
                "'{axis}' is fixed to '{value}' for frontend '{frontend}'; ignoring '{requested}'"
            );
        }
    }
    Ok(value)
}

/// A fully resolved project configuration.
///
/// Only [`Answers::resolve`] builds one, so every value satisfies the cross-axis
/// rules: `python_framework` is set iff the backend is Python, UI library and
/// state management are `none` outside React/Vue, and a skipped frontend has no
/// bundler and plain CSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    name: String,
    frontend_framework: FrontendFramework,
    language: Language,
    bundler: Bundler,
    styling: Styling,
    ui_library: UiLibrary,
    state_management: StateManagement,
    backend: Backend,
    python_framework: Option<PythonFramework>,
    database: Database,
    deployment: Deployment,
}

impl Configuration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frontend_framework(&self) -> FrontendFramework {
        self.frontend_framework
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn bundler(&self) -> Bundler {
        self.bundler
    }

    pub fn styling(&self) -> Styling {
        self.styling
    }

    pub fn ui_library(&self) -> UiLibrary {
        self.ui_library
    }

    pub fn state_management(&self) -> StateManagement {
        self.state_management
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn python_framework(&self) -> Option<PythonFramework> {
        self.python_framework
    }

    pub fn database(&self) -> Database {
        self.database
    }

    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    pub fn is_typescript(&self) -> bool {
        self.language.is_typescript()
    }

    pub fn has_frontend(&self) -> bool {
        self.frontend_framework.is_selected()
    }

    pub fn has_node_backend(&self) -> bool {
        self.backend.is_node()
    }

    pub fn has_python_backend(&self) -> bool {
        self.backend == Backend::Python
    }

    /// Human readable `label: value` rows describing the selection.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("Project Name", self.name.clone())];
        if self.has_frontend() {
            rows.push(("Frontend", self.frontend_framework.to_string()));
            rows.push(("Language", self.language.to_string()));
            rows.push(("Bundler", self.bundler.to_string()));
            rows.push(("Styling", self.styling.to_string()));
            if self.ui_library != UiLibrary::None {
                rows.push(("UI Library", self.ui_library.to_string()));
            }
            if self.state_management != StateManagement::None {
                rows.push(("State Mgmt", self.state_management.to_string()));
            }
        }
        if self.backend.is_selected() {
            rows.push(("Backend", self.backend.to_string()));
            if let Some(framework) = self.python_framework {
                rows.push(("Python Framework", framework.to_string()));
            }
        }
        rows.push(("Database", self.database.to_string()));
        rows.push(("Deployment", self.deployment.to_string()));
        rows
    }
}
