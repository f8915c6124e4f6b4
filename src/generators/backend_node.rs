use super::{unsupported, GenerationContext, Generator};
use crate::config::{Backend, Configuration};
use crate::error::Result;
use crate::fileset::GeneratedFileSet;
use crate::layout;

const NEST_SOURCES: &[(&str, &str)] = &[
    ("server/src/app.module.ts", "backend_node/nest/app.module.ts.j2"),
    ("server/src/app.controller.ts", "backend_node/nest/app.controller.ts.j2"),
    ("server/src/app.service.ts", "backend_node/nest/app.service.ts.j2"),
    ("server/src/dto/todo.dto.ts", "backend_node/nest/todo.dto.ts.j2"),
];

/// Server sources for the Node frameworks.
pub struct NodeBackendGenerator;

impl Generator for NodeBackendGenerator {
    fn name(&self) -> &'static str {
        "backend-node"
    }

    fn axes(&self) -> &'static [&'static str] {
        &["backend"]
    }

    fn applies(&self, config: &Configuration) -> bool {
        config.has_node_backend()
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedFileSet> {
        let config = ctx.config;
        let entry = layout::server_entry(config);
        let mut files = GeneratedFileSet::new();

        let template = match config.backend() {
            Backend::Express => "backend_node/express/server.j2",
            Backend::Fastify => "backend_node/fastify/server.j2",
            Backend::Koa => "backend_node/koa/server.j2",
            Backend::Hapi => "backend_node/hapi/server.j2",
            Backend::Nest => {
                files.insert(entry, ctx.render("backend_node/nest/main.ts.j2")?);
                for (path, template) in NEST_SOURCES {
                    files.insert(*path, ctx.render(template)?);
                }
                return Ok(files);
            }
            other => return Err(unsupported(self, format!("'{other}' is not a Node backend"))),
        };
        log::debug!("Rendering {} server entry at '{entry}'", config.backend());
        files.insert(entry, ctx.render(template)?);
        Ok(files)
    }
}
