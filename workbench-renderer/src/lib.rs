//! # workbench-renderer
//!
//! Token-substitution engine that turns a [`Template`] plus a
//! [`VariableSet`] into materialisable project files. Tokens take the fixed
//! form `{{.Name}}` — pure variable substitution, no expressions or control
//! flow. Rendering is a pure function: no filesystem access, no logging, no
//! partial output on error.
//!
//! ## Usage
//!
//! ```rust
//! use workbench_core::types::{Template, TemplateFile, VariableSet};
//! use workbench_renderer::Renderer;
//!
//! let template = Template::new(
//!     "hello",
//!     vec![TemplateFile::new("main.txt", "Hello {{.ProjectName}}, owner {{.Owner}}.")],
//! );
//! let vars: VariableSet = [("ProjectName", "Atlas"), ("Owner", "Jane")]
//!     .into_iter()
//!     .collect();
//!
//! let output = Renderer::new().render(&template, &vars).unwrap();
//! assert_eq!(output.files()[0].content, "Hello Atlas, owner Jane.");
//! ```
//!
//! [`Template`]: workbench_core::types::Template
//! [`VariableSet`]: workbench_core::types::VariableSet

pub mod builtin;
pub mod engine;
pub mod error;
pub mod plan;
pub mod scanner;

pub use engine::Renderer;
pub use error::{PlanError, RenderError};
pub use plan::{ScaffoldPlan, ScaffoldPlanner};
