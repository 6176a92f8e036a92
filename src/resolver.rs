//! Resolver - turns a context into render nodes
//!
//! Holds the finalized extraction function, binding table and fallback.
//! Immutable after construction: the table sits behind an `Arc` and is only
//! read, so one resolver can serve concurrent `resolve` calls.
//!
//! Resolution is all-or-nothing: the first unregistered tool (without a
//! fallback) or user-function error aborts the call and no nodes are returned.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::{json, Value};
use tracing::{instrument, trace};

use crate::config::ResolverConfig;
use crate::error::{GenUiError, Result};
use crate::types::{ExtractFn, RenderNode, ToolBinding, ToolCall};

/// Finalized, reusable mapping from tool calls to render nodes
pub struct Resolver<Ctx, C> {
    extract: ExtractFn<Ctx>,
    bindings: Arc<FxHashMap<String, ToolBinding<Ctx, C>>>,
    fallback: Option<C>,
    config: ResolverConfig,
}

impl<Ctx, C> Resolver<Ctx, C> {
    pub(crate) fn new(
        extract: ExtractFn<Ctx>,
        bindings: FxHashMap<String, ToolBinding<Ctx, C>>,
        fallback: Option<C>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            extract,
            bindings: Arc::new(bindings),
            fallback,
            config,
        }
    }

    /// Registered tool names, sorted
    pub fn tools(&self) -> Vec<&str> {
        let mut tools: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        tools.sort_unstable();
        tools
    }

    pub fn binding(&self, tool: &str) -> Option<&ToolBinding<Ctx, C>> {
        self.bindings.get(tool)
    }

    pub fn has_binding(&self, tool: &str) -> bool {
        self.bindings.contains_key(tool)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn fallback(&self) -> Option<&C> {
        self.fallback.as_ref()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl<Ctx, C: Clone> Resolver<Ctx, C> {
    /// Extract tool calls from `ctx` and resolve each into a render node
    ///
    /// Output order and length match the extraction result exactly.
    #[instrument(level = "debug", skip_all, fields(calls = tracing::field::Empty))]
    pub fn resolve(&self, ctx: &Ctx) -> Result<Vec<RenderNode<C>>> {
        let calls = (self.extract)(ctx)
            .map_err(GenUiError::Callback)?
            .unwrap_or_default();
        tracing::Span::current().record("calls", calls.len());

        calls
            .into_iter()
            .enumerate()
            .map(|(index, call)| self.resolve_call(index, call, ctx))
            .collect()
    }

    fn resolve_call(&self, index: usize, call: ToolCall, ctx: &Ctx) -> Result<RenderNode<C>> {
        let Some(binding) = self.bindings.get(&call.tool) else {
            return self.resolve_unknown(index, call);
        };

        let props = match &binding.map {
            Some(map) => map(&call.args, ctx).map_err(GenUiError::Callback)?,
            None => call.args.clone(),
        };
        let key = match &binding.key {
            Some(key_fn) => key_fn(&call.args, ctx).map_err(GenUiError::Callback)?,
            None => self.config.default_key(&call.tool, index),
        };

        trace!(tool = %call.tool, index, key = %key, "tool call resolved");

        Ok(RenderNode {
            tool: call.tool,
            key,
            component: binding.component.clone(),
            props,
            raw_args: call.args,
        })
    }

    fn resolve_unknown(&self, index: usize, call: ToolCall) -> Result<RenderNode<C>> {
        let Some(fallback) = &self.fallback else {
            return Err(GenUiError::UnregisteredTool { tool: call.tool });
        };

        trace!(tool = %call.tool, index, "unregistered tool, using fallback");

        let props: Value = json!({ "tool": call.tool, "args": call.args });
        Ok(RenderNode {
            key: self.config.fallback_key(index),
            component: fallback.clone(),
            props,
            tool: call.tool,
            raw_args: call.args,
        })
    }
}

impl<Ctx, C: Clone> Clone for Resolver<Ctx, C> {
    fn clone(&self) -> Self {
        Self {
            extract: Arc::clone(&self.extract),
            bindings: Arc::clone(&self.bindings),
            fallback: self.fallback.clone(),
            config: self.config.clone(),
        }
    }
}

impl<Ctx, C: fmt::Debug> fmt::Debug for Resolver<Ctx, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("tools", &self.tools())
            .field("fallback", &self.fallback)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
