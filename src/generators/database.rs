use super::{unsupported, GenerationContext, Generator};
use crate::config::{Configuration, Database, PythonFramework};
use crate::envfile::EnvVariable;
use crate::error::Result;
use crate::fileset::GeneratedFileSet;
use crate::layout;

/// Placeholder password written for database servers.
const DB_PASSWORD: &str = "yoursecurepassword";

/// Connection lifecycle modules and the env entries they read.
pub struct DatabaseGenerator;

impl Generator for DatabaseGenerator {
    fn name(&self) -> &'static str {
        "database"
    }

    fn axes(&self) -> &'static [&'static str] {
        &["database"]
    }

    fn applies(&self, config: &Configuration) -> bool {
        config.database() != Database::None
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedFileSet> {
        let config = ctx.config;
        let mut files = GeneratedFileSet::new();

        let env = env_contributions(config)
            .iter()
            .map(|var| format!("{var}\n"))
            .collect::<String>();
        files.insert(".env", env.clone());
        files.insert(".env.example", env);

        if config.database() == Database::Sqlite {
            files.insert(".gitignore", "server/data/\n*.sqlite\n");
        }

        if config.has_node_backend() {
            let engine = config.database().key();
            let ext = layout::server_ext(config);
            files.insert(
                format!("server/src/database/index.{ext}"),
                ctx.render("database/node/index.j2")?,
            );
            files.insert(
                format!("server/src/database/{engine}.{ext}"),
                ctx.render(&format!("database/node/{engine}.j2"))?,
            );
        } else if config.has_python_backend() {
            let template = match (config.python_framework(), config.database()) {
                (Some(PythonFramework::Django), db) if db.is_relational() => {
                    "database/python/django.py.j2"
                }
                (_, db) if db.is_relational() => "database/python/sqlalchemy.py.j2",
                (_, Database::Mongodb) => "database/python/mongodb.py.j2",
                (_, Database::Redis) => "database/python/redis.py.j2",
                (_, other) => {
                    return Err(unsupported(self, format!("no python module for '{other}'")))
                }
            };
            files.insert(
                format!("{}/database.py", layout::python_package(config)),
                ctx.render(template)?,
            );
        } else {
            log::debug!("No backend selected, only writing database env entries");
        }
        Ok(files)
    }
}

/// Env entries the database modules and compose services read.
fn env_contributions(config: &Configuration) -> Vec<EnvVariable> {
    let mut vars = Vec::new();
    if let (Some(port), Some(user)) = (layout::db_port(config), layout::db_user(config)) {
        vars.push(EnvVariable::new("DB_HOST", "localhost"));
        vars.push(EnvVariable::new("DB_PORT", port.to_string()));
        vars.push(EnvVariable::new("DB_USER", user));
        vars.push(EnvVariable::new("DB_PASSWORD", DB_PASSWORD));
        vars.push(EnvVariable::new("DB_NAME", layout::db_name(config)));
    }
    if let (Some(key), Some(url)) = (layout::database_url_var(config), layout::database_url(config)) {
        vars.push(EnvVariable::new(key, url));
    }
    vars
}
