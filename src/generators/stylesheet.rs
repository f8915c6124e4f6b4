use super::{unsupported, GenerationContext, Generator};
use crate::config::{Configuration, Styling};
use crate::error::Result;
use crate::fileset::GeneratedFileSet;
use crate::layout;

/// The single global stylesheet required by the chosen styling.
pub struct StylesheetGenerator;

impl Generator for StylesheetGenerator {
    fn name(&self) -> &'static str {
        "stylesheet"
    }

    // Package stylesheets are imported by the entry instead.
    fn applies(&self, config: &Configuration) -> bool {
        config.has_frontend() && !matches!(config.styling(), Styling::Bootstrap | Styling::Bulma)
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedFileSet> {
        let config = ctx.config;
        let template = match config.styling() {
            Styling::Tailwind => "stylesheet/tailwind.css.j2",
            Styling::Sass => "stylesheet/style.scss.j2",
            Styling::Css => "stylesheet/style.css.j2",
            other => {
                return Err(unsupported(
                    self,
                    format!("'{other}' styles live in components, no global stylesheet written"),
                ))
            }
        };
        let Some(path) = layout::stylesheet(config) else {
            return Err(unsupported(self, "no stylesheet location for this frontend"));
        };
        let mut files = GeneratedFileSet::new();
        files.insert(path, ctx.render(template)?);
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generators::test_support::{config, run};

    #[test]
    fn exactly_one_tailwind_stylesheet() {
        let files = run(&StylesheetGenerator, &config(r#"{"name":"demo"}"#)).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files.get("src/index.css").unwrap().starts_with("@import \"tailwindcss\";"));
    }

    #[test]
    fn sass_writes_scss_with_bem_blocks() {
        let files = run(
            &StylesheetGenerator,
            &config(r#"{"name":"s","frontendFramework":"vue","styling":"sass"}"#),
        )
        .unwrap();
        let scss = files.get("src/style.scss").unwrap();
        assert!(scss.contains("&__button {"));
    }

    #[test]
    fn css_in_js_is_unsupported() {
        let err = run(
            &StylesheetGenerator,
            &config(r#"{"name":"e","frontendFramework":"react","styling":"emotion"}"#),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedCombination { ref generator, .. } if generator == "stylesheet"));
    }

    #[test]
    fn package_styles_do_not_apply() {
        let bulma = config(r#"{"name":"b","frontendFramework":"react","styling":"bulma"}"#);
        assert!(!StylesheetGenerator.applies(&bulma));
        let api = config(r#"{"name":"b","frontendFramework":"skip"}"#);
        assert!(!StylesheetGenerator.applies(&api));
    }
}
