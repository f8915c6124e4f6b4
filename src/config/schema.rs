//! Static registry of configuration axes, their allowed values and defaults.

use crate::error::{Error, Result};

/// One selectable value of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisOption {
    pub key: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// A configuration dimension such as `bundler` or `database`.
#[derive(Debug, Clone, Copy)]
pub struct Axis {
    pub name: &'static str,
    pub title: &'static str,
    pub default: &'static str,
    pub options: &'static [AxisOption],
}

impl Axis {
    pub fn position(&self, key: &str) -> Option<usize> {
        self.options.iter().position(|option| option.key == key)
    }
}

const fn opt(
    key: &'static str,
    display_name: &'static str,
    description: &'static str,
) -> AxisOption {
    AxisOption { key, display_name, description }
}

/// Axes in the order they are asked for.
static AXES: &[Axis] = &[
    Axis {
        name: "frontendFramework",
        title: "JavaScript Frontend Framework",
        default: "react",
        options: &[
            opt("react", "React", "Popular UI library by Meta"),
            opt("vue", "Vue.js", "Progressive framework"),
            opt("angular", "Angular", "Full-featured framework by Google"),
            opt("svelte", "Svelte", "Compile-time framework"),
            opt("solid", "SolidJS", "Fast reactive framework"),
            opt("vanilla", "Vanilla JS", "No framework, pure JavaScript"),
            opt("skip", "Skip Frontend", "Backend-only project"),
        ],
    },
    Axis {
        name: "language",
        title: "Language Choice",
        default: "typescript",
        options: &[
            opt("typescript", "TypeScript", "Type-safe JavaScript superset"),
            opt("javascript", "JavaScript", "Standard JavaScript"),
        ],
    },
    Axis {
        name: "bundler",
        title: "Build Tool / Bundler",
        default: "vite",
        options: &[
            opt("vite", "Vite", "Fast build tool with HMR"),
            opt("webpack", "Webpack", "Popular module bundler"),
            opt("rollup", "Rollup", "Efficient ES module bundler"),
            opt("parcel", "Parcel", "Zero-configuration bundler"),
            opt("esbuild", "ESBuild", "Extremely fast bundler"),
            opt("none", "None", "No bundler (for Node.js projects)"),
        ],
    },
    Axis {
        name: "styling",
        title: "CSS Framework / Styling",
        default: "tailwind",
        options: &[
            opt("tailwind", "Tailwind CSS", "Utility-first CSS framework"),
            opt("bootstrap", "Bootstrap", "Popular CSS framework"),
            opt("bulma", "Bulma", "Modern CSS framework"),
            opt("styled-components", "Styled Components", "CSS-in-JS library"),
            opt("emotion", "Emotion", "CSS-in-JS library"),
            opt("sass", "Sass/SCSS", "CSS preprocessor"),
            opt("css", "Plain CSS", "Vanilla CSS"),
        ],
    },
    Axis {
        name: "uiLibrary",
        title: "UI Component Library (Optional)",
        default: "none",
        options: &[
            opt("none", "None", "Build custom components"),
            opt("mui", "Material-UI", "React Material Design components"),
            opt("antd", "Ant Design", "Enterprise UI components"),
            opt("chakra", "Chakra UI", "Simple, modular React components"),
            opt("mantine", "Mantine", "Full-featured React components"),
            opt("shadcn", "shadcn/ui", "Copy-paste React components"),
        ],
    },
    Axis {
        name: "stateManagement",
        title: "State Management (Frontend)",
        default: "none",
        options: &[
            opt("none", "Built-in State", "Use framework's built-in state"),
            opt("redux", "Redux Toolkit", "Predictable state container"),
            opt("zustand", "Zustand", "Lightweight state management"),
            opt("jotai", "Jotai", "Atomic state management"),
            opt("recoil", "Recoil", "Facebook's state management"),
            opt("mobx", "MobX", "Reactive state management"),
        ],
    },
    Axis {
        name: "backend",
        title: "Backend Framework",
        default: "express",
        options: &[
            opt("none", "No Backend", "Frontend-only project"),
            opt("express", "Express.js", "Minimal Node.js framework"),
            opt("fastify", "Fastify", "Fast Node.js framework"),
            opt("koa", "Koa.js", "Next-gen Node.js framework"),
            opt("nest", "NestJS", "Enterprise Node.js framework"),
            opt("hapi", "Hapi.js", "Rich Node.js framework"),
            opt("python", "Python Backend", "Choose Python framework"),
        ],
    },
    Axis {
        name: "pythonFramework",
        title: "Python Backend Framework",
        default: "fastapi",
        options: &[
            opt("fastapi", "FastAPI", "Modern, fast Python API framework"),
            opt("django", "Django", "Full-featured Python framework"),
            opt("flask", "Flask", "Lightweight Python framework"),
            opt("quart", "Quart", "Async Python framework"),
        ],
    },
    Axis {
        name: "database",
        title: "Database",
        default: "none",
        options: &[
            opt("none", "No Database", "Use mock data or external APIs"),
            opt("sqlite", "SQLite", "Lightweight file database"),
            opt("postgresql", "PostgreSQL", "Advanced relational database"),
            opt("mysql", "MySQL", "Popular relational database"),
            opt("mongodb", "MongoDB", "NoSQL document database"),
            opt("redis", "Redis", "In-memory data store"),
        ],
    },
    Axis {
        name: "deployment",
        title: "Deployment & DevOps",
        default: "docker",
        options: &[
            opt("none", "No Deployment Setup", "Manual deployment"),
            opt("docker", "Docker", "Containerization setup"),
            opt("vercel", "Vercel", "Frontend deployment config"),
            opt("netlify", "Netlify", "JAMstack deployment"),
            opt("heroku", "Heroku", "Cloud platform deployment"),
            opt("aws", "AWS", "Amazon Web Services setup"),
        ],
    },
];

/// Read-only lookup over the registered axes.
pub struct ConfigSchema;

impl ConfigSchema {
    /// All axes, in prompt order.
    pub fn axes() -> &'static [Axis] {
        AXES
    }

    pub fn axis(axis_name: &str) -> Result<&'static Axis> {
        AXES.iter()
            .find(|axis| axis.name == axis_name)
            .ok_or_else(|| Error::UnknownAxis { axis: axis_name.to_string() })
    }

    /// Ordered options of an axis.
    pub fn list_axis(axis_name: &str) -> Result<&'static [AxisOption]> {
        Ok(Self::axis(axis_name)?.options)
    }

    /// Default option key of an axis.
    pub fn default_of(axis_name: &str) -> Result<&'static str> {
        Ok(Self::axis(axis_name)?.default)
    }
}
