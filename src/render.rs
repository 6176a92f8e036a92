//! Render adapter boundary
//!
//! Turns resolved [`RenderNode`]s into whatever a view layer produces.
//! Unlike the resolver, rendering is lenient: a node whose component the
//! renderer cannot materialize is skipped with a warning instead of failing
//! the whole pass.

use serde_json::{Map, Value};
use tracing::warn;

use crate::types::RenderNode;

/// A view layer that can instantiate component references
pub trait Render<C> {
    type Output;

    /// Build one element from a component and its props (identity key already merged in).
    /// `None` means the component is absent or unknown to this renderer.
    fn instantiate(&self, component: &C, props: Value) -> Option<Self::Output>;
}

/// Merge the identity key into props
///
/// Objects get a `"key"` field (replacing any existing one), `null` becomes
/// `{"key": key}` and any other value is wrapped as `{"value": props, "key": key}`.
pub fn with_identity_key(props: Value, key: &str) -> Value {
    let mut object = match props {
        Value::Object(object) => object,
        Value::Null => Map::new(),
        other => {
            let mut object = Map::new();
            object.insert("value".to_string(), other);
            object
        }
    };
    object.insert("key".to_string(), Value::String(key.to_string()));
    Value::Object(object)
}

/// Render nodes in order, skipping the ones the renderer cannot instantiate
pub fn render_nodes<C, R>(renderer: &R, nodes: &[RenderNode<C>]) -> Vec<R::Output>
where
    R: Render<C> + ?Sized,
{
    nodes
        .iter()
        .filter_map(|node| {
            let props = with_identity_key(node.props.clone(), &node.key);
            let rendered = renderer.instantiate(&node.component, props);
            if rendered.is_none() {
                warn!(tool = %node.tool, key = %node.key, "missing component for tool, skipping node");
            }
            rendered
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Pairs `Some(name)` components with their final props
    struct PairRenderer;

    impl Render<Option<&'static str>> for PairRenderer {
        type Output = (&'static str, Value);

        fn instantiate(&self, component: &Option<&'static str>, props: Value) -> Option<Self::Output> {
            component.map(|name| (name, props))
        }
    }

    fn node(tool: &str, key: &str, component: Option<&'static str>, props: Value) -> RenderNode<Option<&'static str>> {
        RenderNode {
            tool: tool.to_string(),
            key: key.to_string(),
            component,
            props: props.clone(),
            raw_args: props,
        }
    }

    #[test]
    fn identity_key_merges_into_objects() {
        assert_eq!(
            with_identity_key(json!({ "name": "World", "key": "old" }), "greet:0"),
            json!({ "name": "World", "key": "greet:0" })
        );
    }

    #[test]
    fn identity_key_on_null_and_scalars() {
        assert_eq!(with_identity_key(Value::Null, "k"), json!({ "key": "k" }));
        assert_eq!(
            with_identity_key(json!([1, 2]), "k"),
            json!({ "value": [1, 2], "key": "k" })
        );
    }

    #[test]
    fn empty_input_renders_nothing() {
        let nodes: Vec<RenderNode<Option<&'static str>>> = Vec::new();
        assert!(render_nodes(&PairRenderer, &nodes).is_empty());
    }

    #[test]
    fn missing_components_are_skipped() {
        let nodes = vec![
            node("greet", "greet:0", Some("Greeting"), json!({ "name": "A" })),
            node("ghost", "ghost:1", None, json!({})),
            node("greet", "greet:2", Some("Greeting"), json!({ "name": "B" })),
        ];

        let rendered = render_nodes(&PairRenderer, &nodes);
        assert_eq!(
            rendered,
            vec![
                ("Greeting", json!({ "key": "greet:0", "name": "A" })),
                ("Greeting", json!({ "key": "greet:2", "name": "B" })),
            ]
        );
    }
}
