mod filters;
mod interface;
mod minijinja;

pub use self::interface::TemplateRenderer;
pub use self::minijinja::{merge_context, MiniJinjaRenderer};
