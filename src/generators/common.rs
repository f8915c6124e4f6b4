use serde_json::{json, Value};

use super::{json_file, GenerationContext, Generator};
use crate::config::{
    Backend, Bundler, Configuration, Database, FrontendFramework, Styling, UiLibrary,
};
use crate::error::Result;
use crate::fileset::GeneratedFileSet;

/// Root level project files: manifest, ignore and env files, README and the
/// toolchain configuration for the selected bundler and language.
pub struct CommonGenerator;

impl Generator for CommonGenerator {
    fn name(&self) -> &'static str {
        "common"
    }

    fn applies(&self, _config: &Configuration) -> bool {
        true
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedFileSet> {
        let config = ctx.config;
        let mut files = GeneratedFileSet::new();

        files.insert("package.json", ctx.manifest.to_json()?);
        files.insert(".gitignore", ctx.render("common/gitignore.j2")?);
        files.insert("README.md", ctx.render("common/README.md.j2")?);

        if config.backend().is_selected() || config.database() != Database::None {
            let env = ctx.render("common/env.j2")?;
            files.insert(".env", env.clone());
            files.insert(".env.example", env);
        }

        if config.has_frontend() && config.frontend_framework() != FrontendFramework::Angular {
            self.bundler_files(ctx, &mut files)?;
            if config.is_typescript() {
                files.insert("tsconfig.json", json_file(&frontend_tsconfig(config))?);
            }
        } else if !config.has_frontend() && config.is_typescript() && config.has_node_backend() {
            files.insert("tsconfig.json", json_file(&node_tsconfig())?);
        }

        let plugins = postcss_plugins(config);
        if !plugins.is_empty() {
            files.insert(
                "postcss.config.mjs",
                ctx.render_with("stylesheet/postcss.config.j2", json!({ "postcss_plugins": plugins }))?,
            );
        }

        if config.has_node_backend() && (config.is_typescript() || config.backend() == Backend::Nest)
        {
            files.insert("tsconfig.server.json", json_file(&server_tsconfig(config))?);
        }
        if config.backend() == Backend::Nest {
            files.insert(
                "nest-cli.json",
                json_file(&json!({
                    "$schema": "https://json.schemastore.org/nest-cli",
                    "collection": "@nestjs/schematics",
                    "sourceRoot": "server/src",
                    "compilerOptions": {
                        "tsConfigPath": "tsconfig.server.json",
                        "deleteOutDir": true
                    }
                }))?,
            );
        }

        Ok(files)
    }
}

impl CommonGenerator {
    fn bundler_files(&self, ctx: &GenerationContext, files: &mut GeneratedFileSet) -> Result<()> {
        let config = ctx.config;
        match config.bundler() {
            Bundler::Vite => {
                let path = format!("vite.config.{}", config.language().ext());
                files.insert(
                    path,
                    ctx.render_with("common/vite.config.j2", json!({ "plugins": vite_plugins(config) }))?,
                );
            }
            Bundler::Webpack => {
                files.insert("webpack.config.js", ctx.render("common/webpack.config.j2")?);
                if config.frontend_framework() == FrontendFramework::React {
                    files.insert(".babelrc", json_file(&babelrc(config))?);
                }
            }
            Bundler::Rollup => {
                files.insert("rollup.config.js", ctx.render("common/rollup.config.j2")?);
            }
            Bundler::Parcel | Bundler::Esbuild | Bundler::None => {}
        }
        Ok(())
    }
}

fn vite_plugins(config: &Configuration) -> Vec<&'static str> {
    let mut plugins = Vec::new();
    match config.frontend_framework() {
        FrontendFramework::React => plugins.push("react()"),
        FrontendFramework::Vue => plugins.push("vue()"),
        FrontendFramework::Svelte => plugins.push("svelte()"),
        FrontendFramework::Solid => plugins.push("solidPlugin()"),
        _ => {}
    }
    if config.styling() == Styling::Tailwind {
        plugins.push("tailwindcss()");
    }
    plugins
}

/// PostCSS plugins needed outside of the vite tailwind plugin.
fn postcss_plugins(config: &Configuration) -> Vec<&'static str> {
    let mut plugins = Vec::new();
    if !config.has_frontend() {
        return plugins;
    }
    if config.styling() == Styling::Tailwind && config.bundler() != Bundler::Vite {
        plugins.push("@tailwindcss/postcss");
    }
    if config.ui_library() == UiLibrary::Mantine {
        plugins.extend(["postcss-preset-mantine", "postcss-simple-vars"]);
    }
    plugins
}

fn babelrc(config: &Configuration) -> Value {
    let mut plugins = Vec::new();
    match config.styling() {
        Styling::StyledComponents => plugins.push("babel-plugin-styled-components"),
        Styling::Emotion => plugins.push("@emotion/babel-plugin"),
        _ => {}
    }
    json!({
        "presets": [
            "@babel/preset-env",
            ["@babel/preset-react", { "runtime": "automatic" }]
        ],
        "plugins": plugins
    })
}

fn frontend_tsconfig(config: &Configuration) -> Value {
    let mut options = json!({
        "target": "ES2020",
        "useDefineForClassFields": true,
        "lib": ["ES2020", "DOM", "DOM.Iterable"],
        "module": "ESNext",
        "skipLibCheck": true,
        "moduleResolution": "bundler",
        "resolveJsonModule": true,
        "isolatedModules": true,
        "esModuleInterop": true,
        "noEmit": true,
        "strict": true,
        "noFallthroughCasesInSwitch": true
    });
    match config.frontend_framework() {
        FrontendFramework::React => {
            options["jsx"] = json!("react-jsx");
        }
        FrontendFramework::Solid => {
            options["jsx"] = json!("preserve");
            options["jsxImportSource"] = json!("solid-js");
        }
        _ => {}
    }
    json!({
        "compilerOptions": options,
        "include": ["src"]
    })
}

fn node_tsconfig() -> Value {
    json!({
        "compilerOptions": {
            "target": "ES2020",
            "module": "NodeNext",
            "moduleResolution": "NodeNext",
            "strict": true,
            "esModuleInterop": true,
            "skipLibCheck": true,
            "resolveJsonModule": true
        }
    })
}

fn server_tsconfig(config: &Configuration) -> Value {
    if config.backend() == Backend::Nest {
        return json!({
            "compilerOptions": {
                "module": "commonjs",
                "target": "ES2021",
                "declaration": false,
                "emitDecoratorMetadata": true,
                "experimentalDecorators": true,
                "esModuleInterop": true,
                "strict": true,
                "strictPropertyInitialization": false,
                "skipLibCheck": true,
                "sourceMap": true,
                "outDir": "./server/dist",
                "rootDir": "./server/src"
            },
            "include": ["server/src/**/*.ts"]
        });
    }
    json!({
        "extends": "./tsconfig.json",
        "compilerOptions": {
            "module": "NodeNext",
            "moduleResolution": "NodeNext",
            "lib": ["ES2020"],
            "noEmit": false,
            "esModuleInterop": true,
            "outDir": "./server/dist",
            "rootDir": "./server/src"
        },
        "include": ["server/src/**/*.ts"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{config, run};
    use crate::constants::ENV_MARKER;

    #[test]
    fn quick_preset_gets_vite_and_typescript_configs() {
        let files = run(&CommonGenerator, &config(r#"{"name":"demo"}"#)).unwrap();
        let vite = files.get("vite.config.ts").unwrap();
        assert!(vite.contains("plugins: [react(), tailwindcss()]"));
        assert!(vite.contains("target: 'http://localhost:5000'"));
        assert!(files.contains("tsconfig.json"));
        assert!(files.contains("tsconfig.server.json"));
        assert!(!files.contains("postcss.config.mjs"));
        assert!(files.get(".env").unwrap().contains("PORT=5000\n"));
    }

    #[test]
    fn env_is_only_written_with_backend_or_database() {
        let files = run(
            &CommonGenerator,
            &config(r#"{"name":"web","frontendFramework":"vue","backend":"none"}"#),
        )
        .unwrap();
        assert!(!files.contains(".env"));
        assert!(!files.contains(".env.example"));
    }

    #[test]
    fn python_env_uses_python_port() {
        let files = run(
            &CommonGenerator,
            &config(
                r#"{"name":"svc","frontendFramework":"skip","backend":"python","pythonFramework":"flask","database":"postgresql"}"#,
            ),
        )
        .unwrap();
        let env = files.get(".env").unwrap();
        assert!(env.contains("PYTHON_PORT=8000\n"));
        assert!(env.contains("FLASK_APP=server/main.py\n"));
        assert!(env.contains("DATABASE_URL=postgresql://"));
        assert!(!env.contains(ENV_MARKER));
        assert!(!env.contains("\nPORT="));
    }

    #[test]
    fn webpack_react_gets_babelrc_and_postcss_for_tailwind() {
        let files = run(
            &CommonGenerator,
            &config(r#"{"name":"w","frontendFramework":"react","bundler":"webpack","backend":"none"}"#),
        )
        .unwrap();
        let webpack = files.get("webpack.config.js").unwrap();
        assert!(webpack.contains("entry: './src/main.tsx'"));
        assert!(webpack.contains("export default {"));
        assert!(files.contains(".babelrc"));
        assert!(files.get("postcss.config.mjs").unwrap().contains("'@tailwindcss/postcss': {}"));
    }

    #[test]
    fn commonjs_webpack_config_uses_require() {
        let files = run(
            &CommonGenerator,
            &config(
                r#"{"name":"w","frontendFramework":"vanilla","language":"javascript","bundler":"webpack","styling":"css","backend":"none"}"#,
            ),
        )
        .unwrap();
        assert!(files.get("webpack.config.js").unwrap().contains("module.exports = {"));
        assert!(!files.contains("tsconfig.json"));
    }

    #[test]
    fn nest_gets_cli_and_decorator_tsconfig() {
        let files = run(
            &CommonGenerator,
            &config(r#"{"name":"n","frontendFramework":"react","language":"javascript","backend":"nest"}"#),
        )
        .unwrap();
        let tsconfig: Value = serde_json::from_str(files.get("tsconfig.server.json").unwrap()).unwrap();
        assert_eq!(tsconfig["compilerOptions"]["experimentalDecorators"], true);
        assert!(files.contains("nest-cli.json"));
        assert!(!files.contains("tsconfig.json"));
    }

    #[test]
    fn readme_lists_scripts_and_configuration() {
        let files = run(&CommonGenerator, &config(r#"{"name":"demo"}"#)).unwrap();
        let readme = files.get("README.md").unwrap();
        assert!(readme.starts_with("# demo\n"));
        assert!(readme.contains("- **Frontend**: react\n"));
        assert!(readme.contains("- `npm run dev`: `concurrently "));
    }

    #[test]
    fn server_tsconfig_does_not_inherit_unused_checks() {
        // Route handlers keep Express' full `(req, res, next)` signatures.
        let files = run(&CommonGenerator, &config(r#"{"name":"demo"}"#)).unwrap();
        let server: Value = serde_json::from_str(files.get("tsconfig.server.json").unwrap()).unwrap();
        assert_eq!(server["extends"], "./tsconfig.json");
        for path in ["tsconfig.json", "tsconfig.server.json"] {
            let tsconfig: Value = serde_json::from_str(files.get(path).unwrap()).unwrap();
            let options = &tsconfig["compilerOptions"];
            assert!(options.get("noUnusedParameters").is_none(), "{path}");
            assert!(options.get("noUnusedLocals").is_none(), "{path}");
        }
    }

    #[test]
    fn angular_leaves_tsconfig_to_the_frontend() {
        let files = run(
            &CommonGenerator,
            &config(r#"{"name":"ng","frontendFramework":"angular","backend":"none"}"#),
        )
        .unwrap();
        assert!(!files.contains("tsconfig.json"));
        assert!(!files.contains("vite.config.ts"));
    }
}
