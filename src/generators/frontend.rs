use serde::Serialize;
use serde_json::{json, Value};

use super::{json_file, unsupported, GenerationContext, Generator};
use crate::config::{Bundler, Configuration, FrontendFramework, Styling, UiLibrary};
use crate::constants::ports;
use crate::error::Result;
use crate::fileset::GeneratedFileSet;
use crate::layout;

const VUE_SHIM: &str = "declare module '*.vue' {
  import type { DefineComponent } from 'vue';
  const component: DefineComponent<object, object, unknown>;
  export default component;
}
";

const SVELTE_CONFIG: &str = "import { vitePreprocess } from '@sveltejs/vite-plugin-svelte';

export default {
  preprocess: vitePreprocess(),
};
";

/// CSS classes the demo markup uses for the selected styling.
#[derive(Debug, Serialize)]
struct Classes {
    container: &'static str,
    title: &'static str,
    text: &'static str,
    button: &'static str,
}

impl Classes {
    fn for_styling(styling: Styling) -> Self {
        match styling {
            Styling::Tailwind => Classes {
                container: "min-h-screen flex flex-col items-center justify-center gap-4 p-8",
                title: "text-4xl font-bold",
                text: "text-gray-600",
                button: "px-4 py-2 rounded-lg bg-indigo-600 text-white hover:bg-indigo-500",
            },
            Styling::Bootstrap => Classes {
                container: "container py-5 text-center",
                title: "display-5 fw-bold",
                text: "lead",
                button: "btn btn-primary",
            },
            Styling::Bulma => Classes {
                container: "section has-text-centered",
                title: "title is-2",
                text: "subtitle",
                button: "button is-primary",
            },
            _ => Classes {
                container: "app",
                title: "app__title",
                text: "app__text",
                button: "app__button",
            },
        }
    }
}

/// Framework entry point, root component and host page.
pub struct FrontendGenerator;

impl Generator for FrontendGenerator {
    fn name(&self) -> &'static str {
        "frontend"
    }

    fn axes(&self) -> &'static [&'static str] {
        &["frontendFramework"]
    }

    fn applies(&self, config: &Configuration) -> bool {
        config.has_frontend()
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedFileSet> {
        let config = ctx.config;
        let Some(entry) = layout::frontend_entry(config) else {
            return Err(unsupported(self, "no frontend framework selected"));
        };
        let extra = self.markup_vars(config);
        let render = |template: &str| ctx.render_with(template, extra.clone());

        let mut files = GeneratedFileSet::new();
        if let Some(page) = layout::index_html(config) {
            files.insert(page, render("frontend/index.html.j2")?);
        }

        let cext = layout::component_ext(config);
        match config.frontend_framework() {
            FrontendFramework::React => {
                files.insert(entry, render("frontend/react/main.j2")?);
                files.insert(format!("src/App.{cext}"), render("frontend/react/App.j2")?);
            }
            FrontendFramework::Vue => {
                files.insert(entry, render("frontend/vue/main.j2")?);
                files.insert("src/App.vue", render("frontend/vue/App.vue.j2")?);
                if config.is_typescript() {
                    files.insert("src/shims-vue.d.ts", VUE_SHIM);
                }
            }
            FrontendFramework::Svelte => {
                files.insert(entry, render("frontend/svelte/main.j2")?);
                files.insert("src/App.svelte", render("frontend/svelte/App.svelte.j2")?);
                if config.bundler() == Bundler::Vite {
                    files.insert("svelte.config.js", SVELTE_CONFIG);
                }
            }
            FrontendFramework::Solid => {
                files.insert(entry, render("frontend/solid/index.j2")?);
                files.insert(format!("src/App.{cext}"), render("frontend/solid/App.j2")?);
            }
            FrontendFramework::Vanilla => {
                files.insert(entry, render("frontend/vanilla/main.j2")?);
            }
            FrontendFramework::Angular => {
                files.insert(entry, render("frontend/angular/main.ts.j2")?);
                files.insert(
                    "src/app/app.component.ts",
                    render("frontend/angular/app.component.ts.j2")?,
                );
                self.angular_workspace(config, &mut files)?;
            }
            FrontendFramework::Skip => {}
        }
        Ok(files)
    }
}

impl FrontendGenerator {
    /// Variables for the host page and the demo markup.
    fn markup_vars(&self, config: &Configuration) -> Value {
        let framework = config.frontend_framework();
        let entry = layout::frontend_entry(config).unwrap_or_default();
        let (script_src, module_script) = match (framework, config.bundler()) {
            (FrontendFramework::Angular, _) | (_, Bundler::Webpack) => (None, false),
            (_, Bundler::Esbuild | Bundler::Rollup) => (Some("/build/bundle.js".to_string()), false),
            _ => (Some(format!("/{entry}")), true),
        };
        let link_stylesheet = match (framework, config.bundler()) {
            (FrontendFramework::Angular, _) => None,
            (_, Bundler::Esbuild | Bundler::Rollup) => Some("/build/bundle.css".to_string()),
            (_, Bundler::None) => layout::stylesheet(config)
                .map(|sheet| format!("/{sheet}"))
                .or_else(|| layout::package_stylesheet(config).map(|sheet| format!("/node_modules/{sheet}"))),
            _ => None,
        };
        let styled = matches!(config.styling(), Styling::StyledComponents | Styling::Emotion);
        json!({
            "classes": Classes::for_styling(config.styling()),
            "wrapper": if styled && framework == FrontendFramework::React { "Wrapper" } else { "main" },
            "button": if config.ui_library() == UiLibrary::Shadcn { "Button" } else { "button" },
            "script_src": script_src,
            "module_script": module_script,
            "link_stylesheet": link_stylesheet,
        })
    }

    fn angular_workspace(&self, config: &Configuration, files: &mut GeneratedFileSet) -> Result<()> {
        let name = config.name();
        let styles: Vec<String> = layout::stylesheet(config)
            .map(str::to_string)
            .into_iter()
            .chain(layout::package_stylesheet(config).map(|sheet| format!("node_modules/{sheet}")))
            .collect();
        let mut serve_options = json!({
            "buildTarget": format!("{name}:build:development"),
            "port": ports::FRONTEND_DEV
        });
        if let Some(port) = layout::backend_port(config) {
            serve_options["proxyConfig"] = json!("proxy.conf.json");
            files.insert(
                "proxy.conf.json",
                json_file(&json!({
                    "/api": { "target": format!("http://localhost:{port}"), "secure": false }
                }))?,
            );
        }
        let workspace = json!({
            "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
            "version": 1,
            "newProjectRoot": "projects",
            "projects": {
                name: {
                    "projectType": "application",
                    "root": "",
                    "sourceRoot": "src",
                    "prefix": "app",
                    "architect": {
                        "build": {
                            "builder": "@angular-devkit/build-angular:application",
                            "options": {
                                "outputPath": "dist",
                                "index": "src/index.html",
                                "browser": "src/main.ts",
                                "polyfills": ["zone.js"],
                                "tsConfig": "tsconfig.app.json",
                                "styles": styles
                            },
                            "configurations": {
                                "production": { "outputHashing": "all" },
                                "development": {
                                    "optimization": false,
                                    "extractLicenses": false,
                                    "sourceMap": true
                                }
                            },
                            "defaultConfiguration": "production"
                        },
                        "serve": {
                            "builder": "@angular-devkit/build-angular:dev-server",
                            "options": serve_options
                        }
                    }
                }
            }
        });
        files.insert("angular.json", json_file(&workspace)?);
        files.insert(
            "tsconfig.json",
            json_file(&json!({
                "compileOnSave": false,
                "compilerOptions": {
                    "outDir": "./dist/out-tsc",
                    "strict": true,
                    "noImplicitOverride": true,
                    "noImplicitReturns": true,
                    "noFallthroughCasesInSwitch": true,
                    "skipLibCheck": true,
                    "esModuleInterop": true,
                    "experimentalDecorators": true,
                    "moduleResolution": "node",
                    "importHelpers": true,
                    "target": "ES2022",
                    "module": "ES2022",
                    "useDefineForClassFields": false,
                    "lib": ["ES2022", "dom"]
                },
                "angularCompilerOptions": {
                    "strictInjectionParameters": true,
                    "strictInputAccessModifiers": true,
                    "strictTemplates": true
                }
            }))?,
        );
        files.insert(
            "tsconfig.app.json",
            json_file(&json!({
                "extends": "./tsconfig.json",
                "compilerOptions": {
                    "outDir": "./out-tsc/app",
                    "types": []
                },
                "files": ["src/main.ts"],
                "include": ["src/**/*.d.ts"]
            }))?,
        );
        Ok(())
    }
}
