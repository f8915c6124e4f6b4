use serde_json::json;

use super::{json_file, unsupported, GenerationContext, Generator};
use crate::config::{Configuration, FrontendFramework, Styling, UiLibrary};
use crate::error::Result;
use crate::fileset::GeneratedFileSet;
use crate::layout;

/// Source files a component library needs beyond its npm packages.
pub struct UiLibraryGenerator;

impl Generator for UiLibraryGenerator {
    fn name(&self) -> &'static str {
        "ui-library"
    }

    fn applies(&self, config: &Configuration) -> bool {
        matches!(config.ui_library(), UiLibrary::Shadcn | UiLibrary::Mantine)
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedFileSet> {
        let config = ctx.config;
        if config.frontend_framework() != FrontendFramework::React {
            return Err(unsupported(
                self,
                format!(
                    "'{}' ships React components only, frontend is '{}'",
                    config.ui_library(),
                    config.frontend_framework()
                ),
            ));
        }

        let ext = config.language().ext();
        let mut files = GeneratedFileSet::new();
        match config.ui_library() {
            UiLibrary::Shadcn => {
                if config.styling() != Styling::Tailwind {
                    log::warn!("shadcn components are styled with tailwind classes");
                }
                files.insert("components.json", json_file(&components_json(config))?);
                files.insert(format!("src/lib/utils.{ext}"), ctx.render("ui/utils.j2")?);
                files.insert(
                    format!("src/components/ui/button.{}", layout::component_ext(config)),
                    ctx.render("ui/button.j2")?,
                );
            }
            UiLibrary::Mantine => {
                files.insert(format!("src/theme.{ext}"), ctx.render("ui/theme.j2")?);
            }
            _ => {}
        }
        Ok(files)
    }
}

fn components_json(config: &Configuration) -> serde_json::Value {
    json!({
        "$schema": "https://ui.shadcn.com/schema.json",
        "style": "default",
        "rsc": false,
        "tsx": config.is_typescript(),
        "tailwind": {
            "config": "",
            "css": layout::stylesheet(config).unwrap_or("src/index.css"),
            "baseColor": "slate",
            "cssVariables": true
        },
        "aliases": {
            "components": "src/components",
            "utils": "src/lib/utils"
        }
    })
}
