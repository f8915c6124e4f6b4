use serde_json::{json, Value};

use super::{json_file, GenerationContext, Generator};
use crate::config::{Backend, Configuration, Database, Deployment, PythonFramework};
use crate::constants::ports;
use crate::error::Result;
use crate::fileset::GeneratedFileSet;
use crate::layout;

const PYTHON_RUNTIME: &str = "python-3.11.9\n";

/// Manifests for the selected hosting target.
pub struct DeploymentGenerator;

impl Generator for DeploymentGenerator {
    fn name(&self) -> &'static str {
        "deployment"
    }

    fn axes(&self) -> &'static [&'static str] {
        &["deployment"]
    }

    fn applies(&self, config: &Configuration) -> bool {
        config.deployment() != Deployment::None
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedFileSet> {
        let config = ctx.config;
        let mut files = GeneratedFileSet::new();
        match config.deployment() {
            Deployment::Docker => self.docker(ctx, &mut files)?,
            Deployment::Vercel => {
                files.insert("vercel.json", json_file(&vercel_json(config))?);
                files.insert(".gitignore", ".vercel\n");
            }
            Deployment::Netlify => self.netlify(ctx, &mut files)?,
            Deployment::Heroku => {
                if let Some(procfile) = procfile(config) {
                    files.insert("Procfile", procfile);
                }
                files.insert("app.json", json_file(&heroku_app_json(config))?);
                if config.has_python_backend() {
                    files.insert("runtime.txt", PYTHON_RUNTIME);
                }
            }
            Deployment::Aws => self.aws(ctx, &mut files)?,
            Deployment::None => {}
        }
        Ok(files)
    }
}

impl DeploymentGenerator {
    fn docker(&self, ctx: &GenerationContext, files: &mut GeneratedFileSet) -> Result<()> {
        let config = ctx.config;
        files.insert(".dockerignore", ctx.render("deployment/dockerignore.j2")?);
        if config.has_frontend() {
            files.insert("Dockerfile.frontend", ctx.render("deployment/Dockerfile.frontend.j2")?);
            files.insert("nginx.conf", ctx.render("deployment/nginx.conf.j2")?);
        }

        let backend_dockerfile = if config.has_node_backend() {
            files.insert(
                "Dockerfile.backend.node",
                ctx.render("deployment/Dockerfile.backend.node.j2")?,
            );
            Some("Dockerfile.backend.node")
        } else if config.has_python_backend() {
            files.insert(
                "Dockerfile.backend.python",
                ctx.render_with(
                    "deployment/Dockerfile.backend.python.j2",
                    json!({ "serve_command": serve_command(config, &ports::PYTHON_BACKEND.to_string()) }),
                )?,
            );
            Some("Dockerfile.backend.python")
        } else {
            None
        };

        let (db_image, db_volume) = database_service(config.database()).unzip();
        files.insert(
            "docker-compose.yml",
            ctx.render_with(
                "deployment/docker-compose.yml.j2",
                json!({
                    "backend_dockerfile": backend_dockerfile,
                    "compose_database_url": compose_database_url(config),
                    "db_image": db_image,
                    "db_volume": db_volume,
                }),
            )?,
        );
        Ok(())
    }

    fn netlify(&self, ctx: &GenerationContext, files: &mut GeneratedFileSet) -> Result<()> {
        let config = ctx.config;
        let function_name = if config.has_python_backend() { "main" } else { "api" };
        files.insert(
            "netlify.toml",
            ctx.render_with("deployment/netlify.toml.j2", json!({ "function_name": function_name }))?,
        );
        if config.has_python_backend() {
            files.insert("netlify/functions/main.py", ctx.render("deployment/netlify_function.py.j2")?);
        } else if config.backend().is_selected() {
            files.insert(
                format!("netlify/functions/api.{}", config.language().ext()),
                ctx.render("deployment/netlify_function.j2")?,
            );
        }
        files.insert(".gitignore", ".netlify\n");
        Ok(())
    }

    fn aws(&self, ctx: &GenerationContext, files: &mut GeneratedFileSet) -> Result<()> {
        let config = ctx.config;
        if config.has_node_backend() {
            files.insert(
                ".ebextensions/nodecommands.config",
                ctx.render("deployment/nodecommands.config.j2")?,
            );
        } else if config.has_python_backend() {
            files.insert(
                ".ebextensions/python.config",
                ctx.render_with(
                    "deployment/python.config.j2",
                    json!({ "wsgi_path": wsgi_path(config) }),
                )?,
            );
        }
        if config.has_frontend() {
            files.insert("deploy_frontend_s3.sh", ctx.render("deployment/deploy_frontend_s3.sh.j2")?);
        }
        Ok(())
    }
}

/// Production command of a Python backend, run from inside `server/`.
fn serve_command(config: &Configuration, port: &str) -> Vec<String> {
    let bind = format!("0.0.0.0:{port}");
    let args: Vec<&str> = match config.python_framework() {
        Some(PythonFramework::FastApi) | None => {
            vec!["uvicorn", "main:app", "--host", "0.0.0.0", "--port", port]
        }
        Some(PythonFramework::Flask) => vec!["gunicorn", "--bind", bind.as_str(), "main:app"],
        Some(PythonFramework::Quart) => vec!["hypercorn", "main:app", "--bind", bind.as_str()],
        Some(PythonFramework::Django) => {
            vec!["gunicorn", "--bind", bind.as_str(), "config.wsgi:application"]
        }
    };
    args.into_iter().map(str::to_string).collect()
}

fn wsgi_path(config: &Configuration) -> &'static str {
    match config.python_framework() {
        Some(PythonFramework::Django) => "config.wsgi:application",
        _ => "main:app",
    }
}

/// Image and data directory of the compose database service.
fn database_service(database: Database) -> Option<(&'static str, &'static str)> {
    match database {
        Database::Postgresql => Some(("postgres:15-alpine", "/var/lib/postgresql/data")),
        Database::Mysql => Some(("mysql:8.0", "/var/lib/mysql")),
        Database::Mongodb => Some(("mongo:7", "/data/db")),
        Database::Redis => Some(("redis:7-alpine", "/data")),
        Database::None | Database::Sqlite => None,
    }
}

/// Connection string as seen from the backend container.
fn compose_database_url(config: &Configuration) -> Option<String> {
    let url = layout::database_url(config)?;
    if database_service(config.database()).is_some() {
        let url = url.replacen("@localhost:", "@database:", 1);
        return Some(url.replacen("//localhost:", "//database:", 1));
    }
    Some(url)
}

fn procfile(config: &Configuration) -> Option<String> {
    let line = if config.has_python_backend() {
        format!("web: cd server && {}", serve_command(config, "$PORT").join(" "))
    } else if config.backend().is_selected() {
        "web: npm start".to_string()
    } else if config.has_frontend() {
        format!("web: npx serve -s {} -l $PORT", layout::build_dir(config))
    } else {
        return None;
    };
    Some(format!("{line}\n"))
}

fn heroku_app_json(config: &Configuration) -> Value {
    let python = config.has_python_backend();
    let mut buildpacks = vec![json!({ "url": "heroku/nodejs" })];
    if python {
        buildpacks.push(json!({ "url": "heroku/python" }));
    }
    let addons: Vec<&str> = match config.database() {
        Database::Postgresql => vec!["heroku-postgresql"],
        Database::Redis => vec!["heroku-redis"],
        _ => Vec::new(),
    };
    let keywords: Vec<String> = [
        config.frontend_framework().is_selected().then(|| config.frontend_framework().to_string()),
        config.backend().is_selected().then(|| config.backend().to_string()),
        Some(config.language().to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();
    json!({
        "name": config.name(),
        "description": format!("{} full-stack application", config.name()),
        "keywords": keywords,
        "buildpacks": buildpacks,
        "env": { "NODE_ENV": { "value": "production" } },
        "addons": addons
    })
}

fn vercel_json(config: &Configuration) -> Value {
    let mut builds = Vec::new();
    let mut routes = Vec::new();
    let api = match config.backend() {
        Backend::None => None,
        Backend::Python => Some((python_entry(config), "@vercel/python")),
        _ => Some((layout::server_entry(config), "@vercel/node")),
    };
    if let Some((entry, builder)) = api {
        routes.push(json!({ "src": "/api/(.*)", "dest": entry }));
        builds.push(json!({ "src": entry, "use": builder }));
    }
    if config.has_frontend() {
        builds.push(json!({
            "src": "package.json",
            "use": "@vercel/static-build",
            "config": { "distDir": layout::build_dir(config) }
        }));
        routes.push(json!({ "handle": "filesystem" }));
        routes.push(json!({ "src": "/.*", "dest": "/index.html" }));
    }
    let mut env = json!({ "NODE_ENV": "production" });
    if let Some(key) = layout::database_url_var(config) {
        env[key] = json!("@db_url");
    }
    json!({
        "version": 2,
        "name": config.name(),
        "builds": builds,
        "routes": routes,
        "env": env
    })
}

fn python_entry(config: &Configuration) -> String {
    match config.python_framework() {
        Some(PythonFramework::Django) => "server/config/wsgi.py".to_string(),
        _ => "server/main.py".to_string(),
    }
}
