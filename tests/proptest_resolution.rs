//! Property-Based Testing for resolution
//!
//! Uses proptest to check the resolver's structural guarantees over
//! arbitrary tool-call sequences:
//! - default keys are `tool:index`
//! - fallback keys are `unknown:index` with `{tool, args}` props
//! - output order and length mirror extraction
//! - resolving twice gives the same output

use genui::{create_builder, Resolver, ToolCall};
use proptest::prelude::*;
use serde_json::{json, Value};

const BOUND: [&str; 3] = ["alpha", "beta", "gamma"];

prop_compose! {
    /// Tool names drawn from the bound set
    fn arb_bound_tool()(index in 0..BOUND.len()) -> String {
        BOUND[index].to_string()
    }
}

prop_compose! {
    /// Tool names that never collide with the bound set
    fn arb_unbound_tool()(name in r"zz_[a-z0-9_]{0,12}") -> String {
        name
    }
}

prop_compose! {
    fn arb_args()(n in any::<i64>(), label in "[ -~]{0,16}") -> Value {
        json!({ "n": n, "label": label })
    }
}

fn arb_call() -> impl Strategy<Value = ToolCall> {
    (prop_oneof![arb_bound_tool(), arb_unbound_tool()], arb_args())
        .prop_map(|(tool, args)| ToolCall::new(tool, args))
}

fn resolver(with_fallback: bool) -> Resolver<Vec<ToolCall>, &'static str> {
    let mut builder = create_builder::<Vec<ToolCall>, &'static str>()
        .extract(|calls: &Vec<ToolCall>| calls.clone());
    for tool in BOUND {
        builder = builder.on_tool(tool).component(tool).end().unwrap();
    }
    if with_fallback {
        builder = builder.fallback("Fallback");
    }
    builder.done().unwrap()
}

proptest! {
    /// Property: Empty extraction yields an empty list, never an error
    #[test]
    fn empty_extraction_is_empty(with_fallback in any::<bool>()) {
        let nodes = resolver(with_fallback).resolve(&Vec::new()).unwrap();
        prop_assert!(nodes.is_empty());
    }

    /// Property: Bound tools without a key function get `tool:index`
    #[test]
    fn default_keys_use_index(calls in prop::collection::vec(arb_call(), 0..24)) {
        let nodes = resolver(true).resolve(&calls).unwrap();
        for (index, node) in nodes.iter().enumerate() {
            if BOUND.contains(&node.tool.as_str()) {
                prop_assert_eq!(&node.key, &format!("{}:{}", node.tool, index));
                prop_assert_eq!(&node.props, &calls[index].args);
            }
        }
    }

    /// Property: Unbound tools with a fallback get `unknown:index` and `{tool, args}` props
    #[test]
    fn fallback_keys_use_index(calls in prop::collection::vec(arb_call(), 0..24)) {
        let nodes = resolver(true).resolve(&calls).unwrap();
        for (index, node) in nodes.iter().enumerate() {
            if !BOUND.contains(&node.tool.as_str()) {
                prop_assert_eq!(&node.key, &format!("unknown:{}", index));
                prop_assert_eq!(node.component, "Fallback");
                prop_assert_eq!(
                    &node.props,
                    &json!({ "tool": calls[index].tool, "args": calls[index].args })
                );
                prop_assert_eq!(&node.raw_args, &calls[index].args);
            }
        }
    }

    /// Property: Output mirrors extraction order and length
    #[test]
    fn order_is_preserved(calls in prop::collection::vec(arb_call(), 0..24)) {
        let nodes = resolver(true).resolve(&calls).unwrap();
        let out: Vec<&str> = nodes.iter().map(|n| n.tool.as_str()).collect();
        let input: Vec<&str> = calls.iter().map(|c| c.tool.as_str()).collect();
        prop_assert_eq!(out, input);
    }

    /// Property: Without a fallback, any unbound tool fails the whole call
    #[test]
    fn unbound_without_fallback_fails(calls in prop::collection::vec(arb_call(), 1..24)) {
        let result = resolver(false).resolve(&calls);
        let first_unbound = calls.iter().find(|c| !BOUND.contains(&c.tool.as_str()));
        match first_unbound {
            Some(call) => {
                let err = result.unwrap_err();
                prop_assert_eq!(err.tool(), Some(call.tool.as_str()));
            }
            None => prop_assert_eq!(result.unwrap().len(), calls.len()),
        }
    }

    /// Property: Resolving the same context twice is idempotent
    #[test]
    fn resolve_is_idempotent(calls in prop::collection::vec(arb_call(), 0..24)) {
        let resolver = resolver(true);
        prop_assert_eq!(resolver.resolve(&calls).unwrap(), resolver.resolve(&calls).unwrap());
    }
}
