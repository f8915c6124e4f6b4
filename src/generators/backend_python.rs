use serde_json::json;

use super::{unsupported, GenerationContext, Generator};
use crate::config::{Configuration, Database, Deployment, PythonFramework};
use crate::error::Result;
use crate::fileset::GeneratedFileSet;

const FASTAPI_SOURCES: &[(&str, &str)] = &[
    ("server/main.py", "backend_python/fastapi/main.py.j2"),
    ("server/app/core/config.py", "backend_python/fastapi/config.py.j2"),
    ("server/app/models/todo.py", "backend_python/fastapi/todo.py.j2"),
    ("server/app/routers/todos.py", "backend_python/fastapi/todos.py.j2"),
];

const BLUEPRINT_SOURCES: &[(&str, &str)] = &[
    ("server/main.py", "backend_python/blueprint/main.py.j2"),
    ("server/app/__init__.py", "backend_python/blueprint/init.py.j2"),
    ("server/app/core/config.py", "backend_python/blueprint/config.py.j2"),
    ("server/app/routes/main.py", "backend_python/blueprint/routes_main.py.j2"),
    ("server/app/routes/todos.py", "backend_python/blueprint/routes_todos.py.j2"),
];

const DJANGO_SOURCES: &[(&str, &str)] = &[
    ("server/manage.py", "backend_python/django/manage.py.j2"),
    ("server/config/settings.py", "backend_python/django/settings.py.j2"),
    ("server/config/urls.py", "backend_python/django/urls.py.j2"),
    ("server/config/wsgi.py", "backend_python/django/wsgi.py.j2"),
    ("server/config/asgi.py", "backend_python/django/asgi.py.j2"),
    ("server/api/apps.py", "backend_python/django/apps.py.j2"),
    ("server/api/urls.py", "backend_python/django/api_urls.py.j2"),
    ("server/api/views.py", "backend_python/django/views.py.j2"),
];

// Packages whose `__init__.py` carries no code.
const FASTAPI_PACKAGES: &[&str] =
    &["server/app", "server/app/core", "server/app/models", "server/app/routers"];
const BLUEPRINT_PACKAGES: &[&str] = &["server/app/core", "server/app/routes"];
const DJANGO_PACKAGES: &[&str] = &["server/config", "server/api"];

/// Python server tree, requirements and launcher script.
pub struct PythonBackendGenerator;

impl Generator for PythonBackendGenerator {
    fn name(&self) -> &'static str {
        "backend-python"
    }

    fn axes(&self) -> &'static [&'static str] {
        &["backend", "pythonFramework"]
    }

    fn applies(&self, config: &Configuration) -> bool {
        config.has_python_backend()
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedFileSet> {
        let config = ctx.config;
        let Some(framework) = config.python_framework() else {
            return Err(unsupported(self, "python backend without a python framework"));
        };

        let mut files = GeneratedFileSet::new();
        files.insert("server/requirements.txt", requirements(config, framework));
        files.insert("server/requirements-dev.txt", dev_requirements());
        files.insert("server/.gitignore", ctx.render("backend_python/gitignore.j2")?);
        files.insert("server/start_server.sh", ctx.render("backend_python/start_server.sh.j2")?);

        let (sources, packages) = match framework {
            PythonFramework::FastApi => (FASTAPI_SOURCES, FASTAPI_PACKAGES),
            PythonFramework::Flask | PythonFramework::Quart => {
                (BLUEPRINT_SOURCES, BLUEPRINT_PACKAGES)
            }
            PythonFramework::Django => (DJANGO_SOURCES, DJANGO_PACKAGES),
        };

        let is_async = framework.is_async();
        let extra = json!({
            "web_module": if framework == PythonFramework::Quart { "quart" } else { "flask" },
            "async_kw": if is_async { "async " } else { "" },
            "await_kw": if is_async { "await " } else { "" },
        });
        for package in packages {
            files.insert(format!("{package}/__init__.py"), "");
        }
        for (path, template) in sources {
            files.insert(*path, ctx.render_with(template, extra.clone())?);
        }
        Ok(files)
    }
}

/// Pinned lower bounds for the runtime requirements of `framework`.
fn requirements(config: &Configuration, framework: PythonFramework) -> String {
    let mut lines: Vec<&str> = match framework {
        PythonFramework::FastApi => {
            vec!["fastapi>=0.110.0", "uvicorn[standard]>=0.29.0", "pydantic-settings>=2.2.0"]
        }
        PythonFramework::Flask => vec!["flask>=3.0.0", "flask-cors>=4.0.0"],
        PythonFramework::Quart => vec!["quart>=0.19.0", "quart-cors>=0.7.0", "hypercorn>=0.16.0"],
        PythonFramework::Django => {
            vec!["django>=5.0", "djangorestframework>=3.15.0", "django-cors-headers>=4.3.0"]
        }
    };
    lines.push("python-dotenv>=1.0.0");

    let django = framework == PythonFramework::Django;
    match config.database() {
        Database::Sqlite if !django => lines.push("sqlalchemy>=2.0.0"),
        Database::Postgresql => {
            if !django {
                lines.push("sqlalchemy>=2.0.0");
            }
            lines.push("psycopg2-binary>=2.9.9");
        }
        Database::Mysql if django => lines.push("mysqlclient>=2.2.0"),
        Database::Mysql => lines.extend(["sqlalchemy>=2.0.0", "pymysql>=1.1.0"]),
        Database::Mongodb => lines.push("pymongo>=4.6.0"),
        Database::Redis => lines.push("redis>=5.0.0"),
        Database::Sqlite | Database::None => {}
    }

    let hosted = matches!(config.deployment(), Deployment::Docker | Deployment::Heroku | Deployment::Aws);
    if hosted && matches!(framework, PythonFramework::Flask | PythonFramework::Django) {
        lines.push("gunicorn>=21.2.0");
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn dev_requirements() -> String {
    ["-r requirements.txt", "pytest>=8.0.0", "flake8>=7.0.0", "black>=24.0.0", "mypy>=1.8.0", ""]
        .join("\n")
}
