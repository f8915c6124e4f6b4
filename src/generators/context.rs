use serde::Serialize;

use crate::config::{
    Backend, Bundler, Configuration, Database, Deployment, FrontendFramework, Language,
    PythonFramework, StateManagement, Styling, UiLibrary,
};
use crate::constants::ports;
use crate::layout;
use crate::manifest::{Manifest, ModuleType};

#[derive(Debug, Clone, Serialize)]
pub struct ScriptLine {
    pub name: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

/// Variables every template can read.
///
/// Everything here is derived from the [`Configuration`] and the manifest, so
/// two renders of the same configuration always see identical values.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub name: String,
    pub python_module: String,
    pub db_name: String,

    pub frontend: FrontendFramework,
    pub language: Language,
    pub bundler: Bundler,
    pub styling: Styling,
    pub ui_library: UiLibrary,
    pub state_management: StateManagement,
    pub backend: Backend,
    pub python_framework: Option<PythonFramework>,
    pub database: Database,
    pub deployment: Deployment,

    pub is_ts: bool,
    pub ext: &'static str,
    pub component_ext: &'static str,
    pub server_ext: &'static str,
    /// The project runs as native ES modules.
    pub esm: bool,
    /// Node backend sources are TypeScript.
    pub server_ts: bool,
    /// Node backend sources use `import`/`export` rather than `require`.
    pub es_syntax: bool,
    /// Prefix for exported functions in Node backend sources.
    pub export_kw: &'static str,
    /// Suffix for relative imports between server modules.
    pub import_suffix: &'static str,
    pub is_async: bool,

    pub has_frontend: bool,
    pub has_backend: bool,
    pub has_node_backend: bool,
    pub has_python_backend: bool,
    pub has_database: bool,
    pub is_relational: bool,

    pub frontend_port: u16,
    pub backend_port: Option<u16>,
    pub port_var: Option<&'static str>,
    pub database_url_var: Option<&'static str>,
    pub database_url: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<&'static str>,

    pub frontend_entry: Option<String>,
    pub root_id: &'static str,
    pub stylesheet: Option<&'static str>,
    pub style_import: Option<String>,
    pub index_html: Option<&'static str>,
    pub build_dir: &'static str,
    pub static_bundle: &'static str,
    pub server_entry: Option<String>,
    pub server_dist_entry: Option<String>,
    pub python_package: &'static str,

    pub scripts: Vec<ScriptLine>,
    pub summary: Vec<SummaryRow>,
}

impl TemplateContext {
    pub fn new(config: &Configuration, manifest: &Manifest) -> Self {
        let node = config.has_node_backend();
        let esm = manifest.module_type == ModuleType::Module;
        let server_ts = layout::server_ext(config) == "ts";
        let es_syntax = esm || server_ts;
        Self {
            name: config.name().to_string(),
            python_module: layout::python_module(config),
            db_name: layout::db_name(config),

            frontend: config.frontend_framework(),
            language: config.language(),
            bundler: config.bundler(),
            styling: config.styling(),
            ui_library: config.ui_library(),
            state_management: config.state_management(),
            backend: config.backend(),
            python_framework: config.python_framework(),
            database: config.database(),
            deployment: config.deployment(),

            is_ts: config.is_typescript(),
            ext: config.language().ext(),
            component_ext: layout::component_ext(config),
            server_ext: layout::server_ext(config),
            esm,
            server_ts,
            es_syntax,
            export_kw: if es_syntax { "export " } else { "" },
            import_suffix: if esm { ".js" } else { "" },
            is_async: config.python_framework().is_some_and(PythonFramework::is_async),

            has_frontend: config.has_frontend(),
            has_backend: config.backend().is_selected(),
            has_node_backend: node,
            has_python_backend: config.has_python_backend(),
            has_database: config.database() != Database::None,
            is_relational: config.database().is_relational(),

            frontend_port: ports::FRONTEND_DEV,
            backend_port: layout::backend_port(config),
            port_var: layout::port_var(config),
            database_url_var: layout::database_url_var(config),
            database_url: layout::database_url(config),
            db_port: layout::db_port(config),
            db_user: layout::db_user(config),

            frontend_entry: layout::frontend_entry(config),
            root_id: layout::root_element_id(config),
            stylesheet: layout::stylesheet(config),
            style_import: layout::style_import(config),
            index_html: layout::index_html(config),
            build_dir: layout::build_dir(config),
            static_bundle: layout::STATIC_BUNDLE,
            server_entry: node.then(|| layout::server_entry(config)),
            server_dist_entry: node.then(|| layout::server_dist_entry(config)),
            python_package: layout::python_package(config),

            scripts: manifest
                .scripts
                .iter()
                .map(|(name, command)| ScriptLine { name: name.clone(), command: command.clone() })
                .collect(),
            summary: config
                .summary()
                .into_iter()
                .map(|(label, value)| SummaryRow { label, value })
                .collect(),
        }
    }
}
