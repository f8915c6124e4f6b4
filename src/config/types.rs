//! Axis value enums for a project configuration

use serde::{Deserialize, Serialize};

/// Declares a closed axis enum whose variants serialize to their schema key.
macro_rules! axis_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $key)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Key of this value as registered in the schema.
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

axis_enum!(
    /// Frontend framework, or `Skip` for backend-only projects
    FrontendFramework {
        React => "react",
        Vue => "vue",
        Angular => "angular",
        Svelte => "svelte",
        Solid => "solid",
        Vanilla => "vanilla",
        Skip => "skip",
    }
);

axis_enum!(Language { TypeScript => "typescript", JavaScript => "javascript" });

axis_enum!(Bundler {
    Vite => "vite",
    Webpack => "webpack",
    Rollup => "rollup",
    Parcel => "parcel",
    Esbuild => "esbuild",
    None => "none",
});

axis_enum!(Styling {
    Tailwind => "tailwind",
    Bootstrap => "bootstrap",
    Bulma => "bulma",
    StyledComponents => "styled-components",
    Emotion => "emotion",
    Sass => "sass",
    Css => "css",
});

axis_enum!(UiLibrary {
    None => "none",
    Mui => "mui",
    Antd => "antd",
    Chakra => "chakra",
    Mantine => "mantine",
    Shadcn => "shadcn",
});

axis_enum!(StateManagement {
    None => "none",
    Redux => "redux",
    Zustand => "zustand",
    Jotai => "jotai",
    Recoil => "recoil",
    Mobx => "mobx",
});

axis_enum!(
    /// Backend framework; everything except `Python` runs on Node
    Backend {
        None => "none",
        Express => "express",
        Fastify => "fastify",
        Koa => "koa",
        Nest => "nest",
        Hapi => "hapi",
        Python => "python",
    }
);

axis_enum!(PythonFramework {
    FastApi => "fastapi",
    Django => "django",
    Flask => "flask",
    Quart => "quart",
});

axis_enum!(Database {
    None => "none",
    Sqlite => "sqlite",
    Postgresql => "postgresql",
    Mysql => "mysql",
    Mongodb => "mongodb",
    Redis => "redis",
});

axis_enum!(Deployment {
    None => "none",
    Docker => "docker",
    Vercel => "vercel",
    Netlify => "netlify",
    Heroku => "heroku",
    Aws => "aws",
});

impl FrontendFramework {
    pub fn is_selected(self) -> bool {
        self != FrontendFramework::Skip
    }

    /// UI libraries and state managers only apply to React and Vue.
    pub fn supports_component_libraries(self) -> bool {
        matches!(self, FrontendFramework::React | FrontendFramework::Vue)
    }

    /// React and Solid sources use JSX.
    pub fn uses_jsx(self) -> bool {
        matches!(self, FrontendFramework::React | FrontendFramework::Solid)
    }
}

impl Language {
    pub fn is_typescript(self) -> bool {
        self == Language::TypeScript
    }

    /// Script extension without JSX.
    pub fn ext(self) -> &'static str {
        match self {
            Language::TypeScript => "ts",
            Language::JavaScript => "js",
        }
    }
}

impl Backend {
    pub fn is_node(self) -> bool {
        !matches!(self, Backend::None | Backend::Python)
    }

    pub fn is_selected(self) -> bool {
        self != Backend::None
    }
}

impl PythonFramework {
    pub fn is_async(self) -> bool {
        matches!(self, PythonFramework::FastApi | PythonFramework::Quart)
    }
}

impl Database {
    pub fn is_relational(self) -> bool {
        matches!(self, Database::Sqlite | Database::Postgresql | Database::Mysql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_key() {
        for styling in Styling::ALL {
            assert_eq!(Styling::from_key(styling.key()), Some(*styling));
        }
        assert_eq!(Styling::from_key("less"), None);
    }

    #[test]
    fn serde_uses_schema_keys() {
        let value = serde_json::to_value(Styling::StyledComponents).unwrap();
        assert_eq!(value, serde_json::json!("styled-components"));
        let parsed: PythonFramework = serde_json::from_str("\"fastapi\"").unwrap();
        assert_eq!(parsed, PythonFramework::FastApi);
    }

    #[test]
    fn node_backends_exclude_python_and_none() {
        let node: Vec<_> = Backend::ALL.iter().filter(|b| b.is_node()).collect();
        assert_eq!(node.len(), 5);
        assert!(!Backend::Python.is_node());
        assert!(!Backend::None.is_node());
    }
}
