use crate::error::Result;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Registers a named template that later renders can refer to, including
    /// through `{% include %}`.
    fn add_template(&mut self, name: &str, template: &str) -> Result<()>;

    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    /// * `template_name` - Optional name for the template (used in error messages)
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String>;

    /// Renders a previously registered template.
    fn render_named(&self, name: &str, context: &serde_json::Value) -> Result<String>;
}
