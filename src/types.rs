//! Shared data model: tool calls in, render nodes out
//!
//! Args and props are opaque `serde_json::Value`s; component references are a
//! caller-chosen type `C` that is stored and forwarded but never inspected.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BoxError;

pub(crate) type ExtractFn<Ctx> =
    Arc<dyn Fn(&Ctx) -> Result<Option<Vec<ToolCall>>, BoxError> + Send + Sync>;
pub(crate) type MapFn<Ctx> = Arc<dyn Fn(&Value, &Ctx) -> Result<Value, BoxError> + Send + Sync>;
pub(crate) type KeyFn<Ctx> = Arc<dyn Fn(&Value, &Ctx) -> Result<String, BoxError> + Send + Sync>;

// ============================================================================
// TOOL CALL
// ============================================================================

/// A named invocation with its arguments, as extracted from a context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier (e.g. "create_task")
    pub tool: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub args: Value,
}

impl ToolCall {
    pub fn new(tool: impl Into<String>, args: Value) -> Self {
        Self {
            tool: tool.into(),
            args,
        }
    }
}

// ============================================================================
// RENDER NODE
// ============================================================================

/// Render-ready node: identity key, component reference, mapped props and original args
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode<C> {
    /// Original tool name
    pub tool: String,
    /// Identity key for list reconciliation (unique enough, not globally unique)
    pub key: String,
    /// Component reference bound to the tool (or the fallback)
    pub component: C,
    /// Props for the component
    pub props: Value,
    /// Original unmapped arguments
    pub raw_args: Value,
}

impl<C> RenderNode<C> {
    /// Convert the component reference, keeping identity and data untouched
    pub fn map_component<D>(self, f: impl FnOnce(C) -> D) -> RenderNode<D> {
        RenderNode {
            tool: self.tool,
            key: self.key,
            component: f(self.component),
            props: self.props,
            raw_args: self.raw_args,
        }
    }
}

// ============================================================================
// TOOL BINDING
// ============================================================================

/// Committed configuration for one tool name
///
/// Only ever built by [`ToolBuilder::end`](crate::ToolBuilder::end), so a
/// binding always carries a component.
pub struct ToolBinding<Ctx, C> {
    pub(crate) tool: String,
    pub(crate) component: C,
    pub(crate) map: Option<MapFn<Ctx>>,
    pub(crate) key: Option<KeyFn<Ctx>>,
}

impl<Ctx, C> ToolBinding<Ctx, C> {
    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    /// Whether a prop-mapping function is set (otherwise props are the raw args)
    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    /// Whether a key function is set (otherwise keys are `tool:index`)
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }
}

impl<Ctx, C: Clone> Clone for ToolBinding<Ctx, C> {
    fn clone(&self) -> Self {
        Self {
            tool: self.tool.clone(),
            component: self.component.clone(),
            map: self.map.clone(),
            key: self.key.clone(),
        }
    }
}

impl<Ctx, C: fmt::Debug> fmt::Debug for ToolBinding<Ctx, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolBinding")
            .field("tool", &self.tool)
            .field("component", &self.component)
            .field("map", &self.map.is_some())
            .field("key", &self.key.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_call_args_default_to_null() {
        let call: ToolCall = serde_json::from_value(json!({ "tool": "ping" })).unwrap();
        assert_eq!(call, ToolCall::new("ping", Value::Null));
    }

    #[test]
    fn render_node_serializes_raw_args_camel_case() {
        let node = RenderNode {
            tool: "greet".to_string(),
            key: "greet:0".to_string(),
            component: "Greeting",
            props: json!({ "name": "WORLD" }),
            raw_args: json!({ "name": "World" }),
        };

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "tool": "greet",
                "key": "greet:0",
                "component": "Greeting",
                "props": { "name": "WORLD" },
                "rawArgs": { "name": "World" }
            })
        );
    }

    #[test]
    fn map_component_keeps_identity() {
        let node = RenderNode {
            tool: "t".to_string(),
            key: "k".to_string(),
            component: 7u8,
            props: json!(1),
            raw_args: json!(2),
        };

        let mapped = node.map_component(|c| format!("widget-{c}"));
        assert_eq!(mapped.component, "widget-7");
        assert_eq!(mapped.key, "k");
        assert_eq!(mapped.props, json!(1));
        assert_eq!(mapped.raw_args, json!(2));
    }
}
