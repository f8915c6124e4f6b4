#[cfg(test)]
mod tests {
    use serde_json::json;
    use stackforge::renderer::{MiniJinjaRenderer, TemplateRenderer};
    use stackforge::templates::TEMPLATES;
    use test_log::test;

    fn test_template(template: &str, expected: &str) {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer.render(template, &json!({}), None).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_camel_case_filter() {
        test_template("{{ 'hello world' | camel_case }}", "helloWorld");
    }

    #[test]
    fn test_kebab_case_filter() {
        test_template("{{ 'hello world' | kebab_case }}", "hello-world");
    }

    #[test]
    fn test_pascal_case_filter() {
        test_template("{{ 'my app' | pascal_case }}", "MyApp");
    }

    #[test]
    fn test_screaming_snake_case_filter() {
        test_template("{{ 'hello world' | screaming_snake_case }}", "HELLO_WORLD");
    }

    #[test]
    fn test_snake_case_filter() {
        test_template("{{ 'my-app' | snake_case }}", "my_app");
    }

    #[test]
    fn test_train_case_filter() {
        test_template("{{ 'hello world' | train_case }}", "Hello-World");
    }

    #[test]
    fn test_plural_and_singular_filters() {
        test_template("{{ 'todo' | plural }}", "todos");
        test_template("{{ 'todos' | singular }}", "todo");
    }

    #[test]
    fn test_generated_code_is_not_escaped() {
        test_template("{{ '<App />' }}", "<App />");
    }

    #[test]
    fn test_block_tags_do_not_leave_blank_lines() {
        test_template("{% if true %}\nline\n{% endif %}\n", "line\n");
    }

    #[test]
    fn test_undefined_values_render_empty() {
        test_template("[{{ missing }}]", "[]");
    }

    #[test]
    fn test_every_bundled_template_is_registered() {
        assert!(MiniJinjaRenderer::with_templates(TEMPLATES).is_ok());
        for (name, source) in TEMPLATES {
            assert!(name.ends_with(".j2"), "{name} is not a template");
            assert!(!source.is_empty(), "{name} is empty");
        }
    }
}
