//! genui - declarative tool-call to UI component mapping
//!
//! A backend emits structured tool calls; a frontend needs matching widgets.
//! Build a [`Resolver`] once, then turn each context into [`RenderNode`]s:
//!
//! ```
//! use genui::create_builder;
//! use serde_json::{json, Value};
//!
//! let ui = create_builder::<Value, &str>()
//!     .extract(|ctx: &Value| serde_json::from_value(ctx["tools"].clone()).unwrap_or_default())
//!     .on_tool("greet")
//!     .component("Greeting")
//!     .map(|args, _ctx| json!({ "name": args["name"].as_str().unwrap_or("").to_uppercase() }))
//!     .end()?
//!     .fallback("UnknownTool")
//!     .done()?;
//!
//! let nodes = ui.resolve(&json!({ "tools": [{ "tool": "greet", "args": { "name": "World" } }] }))?;
//! assert_eq!(nodes[0].key, "greet:0");
//! assert_eq!(nodes[0].component, "Greeting");
//! assert_eq!(nodes[0].props, json!({ "name": "WORLD" }));
//! # Ok::<(), genui::GenUiError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod render;
pub mod resolver;
pub mod types;

pub use builder::{GenerativeUiBuilder, ToolBuilder};
pub use config::ResolverConfig;
pub use error::{BoxError, FixSuggestion, GenUiError, Result};
pub use render::{render_nodes, with_identity_key, Render};
pub use resolver::Resolver;
pub use types::{RenderNode, ToolBinding, ToolCall};

/// Create an empty builder for contexts of type `Ctx` and component references of type `C`
pub fn create_builder<Ctx, C>() -> GenerativeUiBuilder<Ctx, C> {
    GenerativeUiBuilder::new()
}
