//! Derivation of the `package.json` manifest from a [`Configuration`].
//!
//! Each axis contributes scripts and dependencies independently. Contributions
//! are folded in a fixed axis order; a later axis may overwrite a script or a
//! version range but never removes an entry. When two axes disagree on the
//! version range of a package, the later axis wins and a [`VersionConflict`]
//! is recorded and logged.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{
    Backend, Bundler, Configuration, Database, FrontendFramework, PythonFramework,
    StateManagement, Styling, UiLibrary,
};
use crate::constants::{ports, MANIFEST_VERSION};
use crate::error::Result;
use crate::layout::{self, server_dist_entry, server_entry};

/// Value of the manifest `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Module,
    Commonjs,
}

/// The generated `package.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub private: bool,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    pub scripts: IndexMap<String, String>,
    pub dependencies: IndexMap<String, String>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: IndexMap<String, String>,
}

impl Manifest {
    /// Pretty printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn all_packages(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().chain(self.dev_dependencies.keys()).map(String::as_str)
    }
}

/// Two axes asked for different version ranges of the same package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConflict {
    pub package: String,
    pub previous: String,
    pub replacement: String,
    pub axis: &'static str,
}

/// Scripts and dependencies one axis adds to the manifest.
#[derive(Debug, Default)]
struct Contribution {
    scripts: Vec<(String, String)>,
    dependencies: Vec<(&'static str, &'static str)>,
    dev_dependencies: Vec<(&'static str, &'static str)>,
    module_type: Option<ModuleType>,
}

impl Contribution {
    fn script(&mut self, name: &str, command: impl Into<String>) -> &mut Self {
        self.scripts.push((name.to_string(), command.into()));
        self
    }

    fn dep(&mut self, package: &'static str, version: &'static str) -> &mut Self {
        self.dependencies.push((package, version));
        self
    }

    fn dev(&mut self, package: &'static str, version: &'static str) -> &mut Self {
        self.dev_dependencies.push((package, version));
        self
    }
}

/// Builds a [`Manifest`] from a configuration.
pub struct DependencyManifestBuilder<'a> {
    config: &'a Configuration,
    scripts: IndexMap<String, String>,
    dependencies: IndexMap<String, String>,
    dev_dependencies: IndexMap<String, String>,
    module_type: ModuleType,
    conflicts: Vec<VersionConflict>,
}

impl<'a> DependencyManifestBuilder<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        let module_type = if config.is_typescript() || config.bundler() == Bundler::Vite {
            ModuleType::Module
        } else {
            ModuleType::Commonjs
        };
        Self {
            config,
            scripts: IndexMap::new(),
            dependencies: IndexMap::new(),
            dev_dependencies: IndexMap::new(),
            module_type,
            conflicts: Vec::new(),
        }
    }

    /// Builds the manifest, logging every version conflict as a warning.
    pub fn build(self) -> Manifest {
        let (manifest, conflicts) = self.build_with_conflicts();
        for conflict in &conflicts {
            log::warn!(
                "Dependency '{}' requested as '{}' and '{}'; keeping '{}' from {}",
                conflict.package,
                conflict.previous,
                conflict.replacement,
                conflict.replacement,
                conflict.axis
            );
        }
        manifest
    }

    pub fn build_with_conflicts(mut self) -> (Manifest, Vec<VersionConflict>) {
        let config = self.config;
        let axes: [(&'static str, Contribution); 8] = [
            ("bundler", bundler_contribution(config)),
            ("frontendFramework", framework_contribution(config)),
            ("language", language_contribution(config)),
            ("styling", styling_contribution(config)),
            ("uiLibrary", ui_library_contribution(config)),
            ("stateManagement", state_management_contribution(config)),
            ("backend", backend_contribution(config)),
            ("database", database_contribution(config)),
        ];
        for (axis, contribution) in axes {
            self.apply(axis, contribution);
        }
        self.apply_composite_dev_script();

        if config.has_frontend() && !config.backend().is_selected() && !self.scripts.contains_key("start")
        {
            let fallback =
                self.scripts.get("preview").or_else(|| self.scripts.get("dev")).cloned();
            if let Some(command) = fallback {
                self.scripts.insert("start".to_string(), command);
            }
        }

        self.dependencies.sort_keys();
        self.dev_dependencies.sort_keys();

        let main = config.has_node_backend().then(|| server_dist_entry(config));
        let manifest = Manifest {
            name: config.name().to_string(),
            version: MANIFEST_VERSION.to_string(),
            private: true,
            module_type: self.module_type,
            main,
            scripts: self.scripts,
            dependencies: self.dependencies,
            dev_dependencies: self.dev_dependencies,
        };
        (manifest, self.conflicts)
    }

    fn apply(&mut self, axis: &'static str, contribution: Contribution) {
        for (name, command) in contribution.scripts {
            self.scripts.insert(name, command);
        }
        for (package, version) in contribution.dependencies {
            insert_version(&mut self.dependencies, &mut self.conflicts, axis, package, version);
        }
        for (package, version) in contribution.dev_dependencies {
            insert_version(
                &mut self.dev_dependencies,
                &mut self.conflicts,
                axis,
                package,
                version,
            );
        }
        if let Some(module_type) = contribution.module_type {
            self.module_type = module_type;
        }
    }

    /// Replaces separate frontend and backend dev commands with one concurrent `dev`.
    fn apply_composite_dev_script(&mut self) {
        let Some(server) = self.scripts.get("dev:server").cloned() else {
            return;
        };
        let frontend = match self.scripts.get("dev") {
            Some(frontend) if self.config.has_frontend() => frontend.clone(),
            _ => {
                self.scripts.insert("dev".to_string(), server);
                return;
            }
        };
        let frontend = if self.config.frontend_framework() == FrontendFramework::Angular {
            "ng serve --open".to_string()
        } else {
            frontend
        };
        self.scripts.insert("dev:client".to_string(), frontend.clone());
        self.scripts.insert("dev".to_string(), format!("concurrently '{server}' '{frontend}'"));
        insert_version(
            &mut self.dev_dependencies,
            &mut self.conflicts,
            "composite",
            "concurrently",
            "^8.2.2",
        );
    }
}

fn insert_version(
    target: &mut IndexMap<String, String>,
    conflicts: &mut Vec<VersionConflict>,
    axis: &'static str,
    package: &str,
    version: &str,
) {
    if let Some(previous) = target.insert(package.to_string(), version.to_string()) {
        if previous != version {
            conflicts.push(VersionConflict {
                package: package.to_string(),
                previous,
                replacement: version.to_string(),
                axis,
            });
        }
    }
}

fn bundler_contribution(config: &Configuration) -> Contribution {
    let mut c = Contribution::default();
    if !config.has_frontend() || config.frontend_framework() == FrontendFramework::Angular {
        return c;
    }
    let ts = config.is_typescript();
    match config.bundler() {
        Bundler::Vite => {
            c.script("dev", "vite")
                .script("build", "vite build")
                .script("preview", "vite preview")
                .dev("vite", "^5.2.0");
        }
        Bundler::Webpack => {
            c.script("dev", "webpack serve --mode development")
                .script("build", "webpack --mode production")
                .dev("webpack", "^5.90.0")
                .dev("webpack-cli", "^5.1.4")
                .dev("webpack-dev-server", "^4.15.1")
                .dev("html-webpack-plugin", "^5.6.0")
                .dev("style-loader", "^3.3.4")
                .dev("css-loader", "^6.10.0")
                .dev("sass-loader", "^14.1.1")
                .dev("sass", "^1.71.1")
                .dev("file-loader", "^6.2.0")
                .dev("babel-loader", "^9.1.3")
                .dev("@babel/core", "^7.23.9")
                .dev("@babel/preset-env", "^7.23.9");
            if config.frontend_framework() == FrontendFramework::React {
                c.dev("@babel/preset-react", "^7.23.3");
            }
            if ts {
                c.dev("ts-loader", "^9.5.1");
            }
        }
        Bundler::Rollup => {
            c.script("dev", "rollup -c -w")
                .script("build", "rollup -c")
                .dev("rollup", "^4.9.0")
                .dev("@rollup/plugin-node-resolve", "^15.2.3")
                .dev("@rollup/plugin-commonjs", "^25.0.7")
                .dev("rollup-plugin-postcss", "^4.0.2")
                .dev("postcss", "^8.4.35")
                .dev("sass", "^1.71.1")
                .dev("@rollup/plugin-image", "^3.0.3");
            if ts {
                c.dev("@rollup/plugin-typescript", "^11.1.6");
            }
        }
        Bundler::Parcel => {
            c.script("dev", "parcel index.html")
                .script("build", "parcel build index.html")
                .dev("parcel", "^2.11.0");
        }
        Bundler::Esbuild => {
            let entry = layout::frontend_entry(config).unwrap_or_default();
            let bundle = layout::STATIC_BUNDLE;
            c.script(
                "dev",
                format!(
                    "esbuild {entry} --bundle --outfile={bundle} --servedir=public --serve=localhost:{}",
                    ports::FRONTEND_DEV
                ),
            )
            .script("build", format!("esbuild {entry} --bundle --outfile={bundle} --minify --sourcemap"))
            .dev("esbuild", "^0.20.0");
        }
        Bundler::None => {
            c.script("dev", format!("serve -l {} .", ports::FRONTEND_DEV))
                .dev("serve", "^14.2.1");
        }
    }
    c
}

fn framework_contribution(config: &Configuration) -> Contribution {
    let mut c = Contribution::default();
    let ts = config.is_typescript();
    let vite = config.bundler() == Bundler::Vite;
    match config.frontend_framework() {
        FrontendFramework::React => {
            c.dep("react", "^18.2.0").dep("react-dom", "^18.2.0");
            if vite {
                c.dev("@vitejs/plugin-react", "^4.2.0");
            }
            if ts {
                c.dev("@types/react", "^18.2.0").dev("@types/react-dom", "^18.2.0");
            }
        }
        FrontendFramework::Vue => {
            c.dep("vue", "^3.4.0");
            if vite {
                c.dev("@vitejs/plugin-vue", "^5.0.0");
            }
            if ts {
                c.dev("vue-tsc", "^1.8.27");
            }
        }
        FrontendFramework::Angular => {
            c.script("ng", "ng")
                .script("dev", "ng serve")
                .script("start", "ng serve")
                .script("build", "ng build")
                .script("watch", "ng build --watch --configuration development")
                .script("test", "ng test")
                .dep("@angular/animations", "~17.1.0")
                .dep("@angular/common", "~17.1.0")
                .dep("@angular/compiler", "~17.1.0")
                .dep("@angular/core", "~17.1.0")
                .dep("@angular/forms", "~17.1.0")
                .dep("@angular/platform-browser", "~17.1.0")
                .dep("@angular/platform-browser-dynamic", "~17.1.0")
                .dep("@angular/router", "~17.1.0")
                .dep("rxjs", "~7.8.0")
                .dep("tslib", "^2.6.2")
                .dep("zone.js", "~0.14.3")
                .dev("@angular-devkit/build-angular", "~17.1.0")
                .dev("@angular/cli", "~17.1.0")
                .dev("@angular/compiler-cli", "~17.1.0")
                .dev("typescript", "~5.3.0");
            c.module_type = Some(ModuleType::Module);
        }
        FrontendFramework::Svelte => {
            c.dep("svelte", "^4.2.9");
            if vite {
                c.dev("@sveltejs/vite-plugin-svelte", "^3.0.0");
            }
            if ts {
                c.dev("@tsconfig/svelte", "^5.0.2").dev("svelte-check", "^3.6.2");
            }
        }
        FrontendFramework::Solid => {
            c.dep("solid-js", "^1.8.11");
            if vite {
                c.dev("vite-plugin-solid", "^2.8.2");
            }
        }
        FrontendFramework::Vanilla | FrontendFramework::Skip => {}
    }
    c
}

fn language_contribution(config: &Configuration) -> Contribution {
    let mut c = Contribution::default();
    let writes_js = config.has_frontend() || config.has_node_backend();
    if config.is_typescript() && writes_js {
        // Angular pins its own compiler version.
        if config.frontend_framework() != FrontendFramework::Angular {
            c.dev("typescript", "^5.3.0");
        }
        c.dev("@types/node", "^20.11.0");
    }
    c
}

fn styling_contribution(config: &Configuration) -> Contribution {
    let mut c = Contribution::default();
    if !config.has_frontend() {
        return c;
    }
    match config.styling() {
        Styling::Tailwind => {
            c.dev("tailwindcss", "^4.0.0-alpha.17").dev("postcss", "^8.4.33");
            if config.bundler() == Bundler::Vite {
                c.dev("@tailwindcss/vite", "^4.0.0-alpha.17");
            } else {
                c.dev("@tailwindcss/postcss", "^4.0.0-alpha.17");
            }
        }
        Styling::Bootstrap => {
            c.dep("bootstrap", "^5.3.2");
        }
        Styling::Bulma => {
            c.dep("bulma", "^0.9.4");
        }
        Styling::StyledComponents => {
            c.dep("styled-components", "^6.1.8")
                .dev("babel-plugin-styled-components", "^2.1.4");
            if config.is_typescript() {
                c.dev("@types/styled-components", "^5.1.34");
            }
        }
        Styling::Emotion => {
            c.dep("@emotion/react", "^11.11.3")
                .dep("@emotion/styled", "^11.11.0")
                .dev("@emotion/babel-plugin", "^11.11.0");
        }
        Styling::Sass => {
            c.dev("sass", "^1.70.0");
        }
        Styling::Css => {}
    }
    c
}

fn ui_library_contribution(config: &Configuration) -> Contribution {
    let mut c = Contribution::default();
    match config.ui_library() {
        UiLibrary::None => {}
        UiLibrary::Mui => {
            c.dep("@mui/material", "^5.15.4")
                .dep("@mui/icons-material", "^5.15.4")
                .dep("@emotion/react", "^11.11.3")
                .dep("@emotion/styled", "^11.11.0");
        }
        UiLibrary::Antd => {
            c.dep("antd", "^5.13.0");
        }
        UiLibrary::Chakra => {
            c.dep("@chakra-ui/react", "^2.8.2")
                .dep("@emotion/react", "^11.11.3")
                .dep("@emotion/styled", "^11.11.0")
                .dep("framer-motion", "^10.18.0");
        }
        UiLibrary::Mantine => {
            c.dep("@mantine/core", "^7.4.2")
                .dep("@mantine/hooks", "^7.4.2")
                .dev("postcss-preset-mantine", "^1.12.3")
                .dev("postcss-simple-vars", "^7.0.1");
        }
        UiLibrary::Shadcn => {
            if config.styling() != Styling::Tailwind {
                log::warn!("shadcn/ui is designed for Tailwind CSS; styling is '{}'", config.styling());
            }
            c.dep("class-variance-authority", "^0.7.0")
                .dep("clsx", "^2.1.0")
                .dep("tailwind-merge", "^2.2.0")
                .dep("lucide-react", "^0.309.0");
        }
    }
    c
}

fn state_management_contribution(config: &Configuration) -> Contribution {
    let mut c = Contribution::default();
    match config.state_management() {
        StateManagement::None => {}
        StateManagement::Redux => {
            c.dep("@reduxjs/toolkit", "^2.0.1").dep("react-redux", "^9.1.0");
        }
        StateManagement::Zustand => {
            c.dep("zustand", "^4.4.7");
        }
        StateManagement::Jotai => {
            c.dep("jotai", "^2.6.4");
        }
        StateManagement::Recoil => {
            c.dep("recoil", "^0.7.7");
        }
        StateManagement::Mobx => {
            c.dep("mobx", "^6.12.0").dep("mobx-react-lite", "^4.0.5");
        }
    }
    c
}

fn backend_contribution(config: &Configuration) -> Contribution {
    let mut c = Contribution::default();
    let ts = config.is_typescript();
    match config.backend() {
        Backend::None => return c,
        Backend::Python => {
            let package = layout::python_package(config);
            let dev = if config.python_framework() == Some(PythonFramework::Django) {
                format!("python server/manage.py runserver {}", ports::PYTHON_BACKEND)
            } else {
                "python server/main.py".to_string()
            };
            c.script("dev:server", dev)
                .script(
                    "install:python:venv",
                    "python3 -m venv server/.venv && server/.venv/bin/pip install -r server/requirements.txt",
                )
                .script(
                    "lint:python",
                    format!("flake8 {package} && black {package} --check && mypy {package}"),
                )
                .script("format:python", format!("black {package}"));
            return c;
        }
        _ => {}
    }

    let entry = server_entry(config);
    if ts {
        c.script("dev:server", format!("nodemon --exec \"node --loader ts-node/esm {entry}\""))
            .script("build:server", "tsc -p tsconfig.server.json");
    } else {
        c.script("dev:server", format!("nodemon {entry}"))
            .script("build:server", "echo \"No build step needed for JavaScript backend\"");
    }
    c.script("start", format!("node {}", server_dist_entry(config)));

    match config.backend() {
        Backend::Express => {
            c.dep("express", "^4.18.2").dep("cors", "^2.8.5").dep("dotenv", "^16.3.1");
            if ts {
                c.dev("@types/express", "^4.17.21").dev("@types/cors", "^2.8.17");
            }
        }
        Backend::Fastify => {
            c.dep("fastify", "^4.25.0")
                .dep("@fastify/cors", "^9.0.1")
                .dep("@fastify/sensible", "^5.5.0")
                .dep("dotenv", "^16.3.1");
        }
        Backend::Koa => {
            c.dep("koa", "^2.15.0")
                .dep("@koa/cors", "^5.0.0")
                .dep("koa-router", "^12.0.1")
                .dep("koa-bodyparser", "^4.4.1")
                .dep("dotenv", "^16.3.1");
            if ts {
                c.dev("@types/koa", "^2.14.0")
                    .dev("@types/koa-router", "^7.4.8")
                    .dev("@types/koa-bodyparser", "^4.3.12")
                    .dev("@types/koa__cors", "^5.0.0");
            }
        }
        Backend::Nest => {
            c.dep("@nestjs/common", "^10.3.0")
                .dep("@nestjs/core", "^10.3.0")
                .dep("@nestjs/platform-express", "^10.3.0")
                .dep("reflect-metadata", "^0.2.1")
                .dep("dotenv", "^16.3.1")
                .dep("rxjs", "^7.8.1")
                .dev("@nestjs/cli", "^10.3.0")
                .dev("@nestjs/schematics", "^10.1.0")
                .dev("@nestjs/testing", "^10.3.0")
                .dev("@types/express", "^4.17.21")
                .dev("ts-loader", "^9.5.1")
                .dev("tsconfig-paths", "^4.2.0")
                .script("start", "nest start")
                .script("dev:server", "nest start --watch")
                .script("build:server", "nest build");
            // Nest sources are TypeScript whatever the frontend language is.
            if !ts {
                c.dev("typescript", "^5.3.0").dev("@types/node", "^20.11.0");
            }
            c.module_type = Some(ModuleType::Commonjs);
        }
        Backend::Hapi => {
            c.dep("@hapi/hapi", "^21.3.3").dep("dotenv", "^16.3.1");
            if ts {
                c.dev("@types/hapi__hapi", "^20.0.16");
            }
        }
        Backend::None | Backend::Python => {}
    }

    c.dev("nodemon", "^3.0.2");
    if ts {
        c.dev("ts-node", "^10.9.2");
    }
    c
}

fn database_contribution(config: &Configuration) -> Contribution {
    let mut c = Contribution::default();
    // Python drivers live in server/requirements.txt.
    if !config.has_node_backend() {
        return c;
    }
    match config.database() {
        Database::None => {}
        Database::Sqlite => {
            c.dep("sqlite3", "^5.1.7").dep("sqlite", "^5.1.1");
        }
        Database::Postgresql => {
            c.dep("pg", "^8.11.3");
            if config.is_typescript() {
                c.dev("@types/pg", "^8.10.9");
            }
        }
        Database::Mysql => {
            c.dep("mysql2", "^3.7.0");
        }
        Database::Mongodb => {
            c.dep("mongodb", "^6.3.0");
        }
        Database::Redis => {
            c.dep("redis", "^4.6.12");
        }
    }
    c
}
