//! Project configuration: the axis schema, the axis enums and the resolved,
//! immutable [`Configuration`] every generator reads.

pub mod resolve;
pub mod schema;
pub mod types;

pub use resolve::{sanitize_name, Answers, Configuration};
pub use schema::{Axis, AxisOption, ConfigSchema};
pub use types::{
    Backend, Bundler, Database, Deployment, FrontendFramework, Language, PythonFramework,
    StateManagement, Styling, UiLibrary,
};
