use super::filters::*;
use crate::{error::Result, renderer::interface::TemplateRenderer};
use minijinja::{AutoEscape, Environment};
use serde_json::json;

/// MiniJinja-based template rendering engine.
///
/// Generated files are source code, not HTML, so auto escaping is disabled
/// for every template. Block tags swallow their own line.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("screaming_snake_case", to_screaming_snake_case);
        env.add_filter("snake_case", to_snake_case);
        env.add_filter("train_case", to_train_case);
        env.add_filter("plural", to_plural);
        env.add_filter("singular", to_singular);

        Self { env }
    }

    /// Creates a renderer with every `(name, source)` pair registered.
    pub fn with_templates(templates: &[(&str, &str)]) -> Result<Self> {
        let mut renderer = Self::new();
        for (name, source) in templates {
            renderer.add_template(name, source)?;
        }
        Ok(renderer)
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlays the keys of `overlay` on `base`. A non-object on either side
/// leaves `overlay` as the result.
pub fn merge_context(base: &serde_json::Value, overlay: &serde_json::Value) -> serde_json::Value {
    if let (Some(base_obj), Some(overlay_obj)) = (base.as_object(), overlay.as_object()) {
        let mut result = base_obj.clone();
        for (key, value) in overlay_obj {
            result.insert(key.clone(), value.clone());
        }
        json!(result)
    } else {
        overlay.clone()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn add_template(&mut self, name: &str, template: &str) -> Result<()> {
        // Normalize the template name for cross-platform compatibility
        let normalized_name = name.replace('\\', "/");
        self.env.add_template_owned(normalized_name, template.to_string())?;
        Ok(())
    }

    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        let mut env = self.env.clone();
        let name = template_name.unwrap_or("temp");
        env.add_template(name, template)?;
        let tmpl = env.get_template(name)?;
        Ok(tmpl.render(context)?)
    }

    fn render_named(&self, name: &str, context: &serde_json::Value) -> Result<String> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_template(template: &str, expected: &str) {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer.render(template, &json!({}), None).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_string_conversion_filters() {
        test_template("{{ 'hello world' | camel_case }}", "helloWorld");
        test_template("{{ 'hello world' | kebab_case }}", "hello-world");
        test_template("{{ 'hello world' | pascal_case }}", "HelloWorld");
        test_template("{{ 'hello world' | screaming_snake_case }}", "HELLO_WORLD");
        test_template("{{ 'my-app' | snake_case }}", "my_app");
        test_template("{{ 'hello world' | train_case }}", "Hello-World");
        test_template("{{ 'todo' | plural }}", "todos");
        test_template("{{ 'todos' | singular }}", "todo");
    }

    #[test]
    fn html_is_not_escaped() {
        test_template("{{ '<div id=\"root\"></div>' }}", "<div id=\"root\"></div>");
    }

    #[test]
    fn block_tags_do_not_leave_blank_lines() {
        let renderer = MiniJinjaRenderer::new();
        let rendered = renderer
            .render(
                "a\n{% if flag %}\nb\n{% endif %}\nc\n",
                &json!({ "flag": true }),
                None,
            )
            .unwrap();
        assert_eq!(rendered, "a\nb\nc\n");
    }

    #[test]
    fn registered_templates_can_include_each_other() {
        let renderer = MiniJinjaRenderer::with_templates(&[
            ("partial", "hello {{ name }}"),
            ("page", "{% include \"partial\" %}!\n"),
        ])
        .unwrap();
        let rendered = renderer.render_named("page", &json!({ "name": "forge" })).unwrap();
        assert_eq!(rendered, "hello forge!\n");
    }

    #[test]
    fn merge_context_prefers_overlay_keys() {
        let merged = merge_context(&json!({ "a": 1, "b": 2 }), &json!({ "b": 3 }));
        assert_eq!(merged, json!({ "a": 1, "b": 3 }));
        assert_eq!(merge_context(&json!({ "a": 1 }), &json!(42)), json!(42));
    }
}
