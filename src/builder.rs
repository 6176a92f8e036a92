//! Fluent builder for tool-to-component bindings
//!
//! Two scopes linked by ownership:
//! - [`GenerativeUiBuilder`]: root scope (extraction, fallback, config, binding table)
//! - [`ToolBuilder`]: per-tool scope; owns the root and hands it back from [`ToolBuilder::end`]
//!
//! ```text
//! empty ──extract──▶ extract-set ──on_tool…end / fallback / config──▶ extract-set
//!   │                    │
//!   └──done──▶ Err       └──done──▶ Resolver (builder consumed)
//! ```
//!
//! Builders are single-owner values and are not meant to be shared across
//! threads while being configured. `done` consumes the builder, so a
//! finalized resolver can never observe later mutations; clone the builder
//! first to derive several resolvers from one configuration.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::{BoxError, GenUiError, Result};
use crate::resolver::Resolver;
use crate::types::{ExtractFn, KeyFn, MapFn, ToolBinding, ToolCall};

// ============================================================================
// ROOT BUILDER
// ============================================================================

/// Root configuration scope: accumulates bindings and produces a [`Resolver`]
pub struct GenerativeUiBuilder<Ctx, C> {
    extract: Option<ExtractFn<Ctx>>,
    bindings: FxHashMap<String, ToolBinding<Ctx, C>>,
    fallback: Option<C>,
    config: ResolverConfig,
}

impl<Ctx, C> GenerativeUiBuilder<Ctx, C> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            extract: None,
            bindings: FxHashMap::default(),
            fallback: None,
            config: ResolverConfig::default(),
        }
    }

    /// Define how to extract tool calls from the context (last call wins)
    pub fn extract<F>(mut self, f: F) -> Self
    where
        Ctx: 'static,
        F: Fn(&Ctx) -> Vec<ToolCall> + Send + Sync + 'static,
    {
        self.extract = Some(lift_extract(f));
        self
    }

    /// Fallible extraction; `Ok(None)` is treated as no tool calls
    pub fn try_extract<F>(mut self, f: F) -> Self
    where
        F: Fn(&Ctx) -> std::result::Result<Option<Vec<ToolCall>>, BoxError> + Send + Sync + 'static,
    {
        self.extract = Some(Arc::new(f));
        self
    }

    /// Start a binding for `tool`; finish it with [`ToolBuilder::end`]
    pub fn on_tool(self, tool: impl Into<String>) -> ToolBuilder<Ctx, C> {
        ToolBuilder {
            parent: self,
            tool: tool.into(),
            component: None,
            map: None,
            key: None,
        }
    }

    /// Configure a binding through a closure and commit it
    pub fn with_tool<F>(self, tool: impl Into<String>, f: F) -> Result<Self>
    where
        F: FnOnce(ToolBuilder<Ctx, C>) -> ToolBuilder<Ctx, C>,
    {
        f(self.on_tool(tool)).end()
    }

    /// Component used for tool calls without a binding (last call wins)
    pub fn fallback(mut self, component: C) -> Self {
        self.fallback = Some(component);
        self
    }

    /// Key formatting settings for the resolver
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether `extract` (or `try_extract`) has been called
    pub fn has_extract(&self) -> bool {
        self.extract.is_some()
    }

    /// Number of committed bindings
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Finalize into a resolver
    pub fn done(self) -> Result<Resolver<Ctx, C>> {
        let extract = self.extract.ok_or(GenUiError::MissingExtract)?;
        self.config.validate()?;

        debug!(
            bindings = self.bindings.len(),
            fallback = self.fallback.is_some(),
            "generative UI resolver built"
        );

        Ok(Resolver::new(
            extract,
            self.bindings,
            self.fallback,
            self.config,
        ))
    }

    fn commit(&mut self, binding: ToolBinding<Ctx, C>) {
        if self.bindings.contains_key(&binding.tool) {
            debug!(tool = %binding.tool, "replacing existing tool binding");
        } else {
            debug!(tool = %binding.tool, "tool binding committed");
        }
        self.bindings.insert(binding.tool.clone(), binding);
    }
}

impl<Ctx, C> Default for GenerativeUiBuilder<Ctx, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, C: Clone> Clone for GenerativeUiBuilder<Ctx, C> {
    fn clone(&self) -> Self {
        Self {
            extract: self.extract.clone(),
            bindings: self.bindings.clone(),
            fallback: self.fallback.clone(),
            config: self.config.clone(),
        }
    }
}

impl<Ctx, C: fmt::Debug> fmt::Debug for GenerativeUiBuilder<Ctx, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerativeUiBuilder")
            .field("extract", &self.extract.is_some())
            .field("bindings", &self.bindings)
            .field("fallback", &self.fallback)
            .field("config", &self.config)
            .finish()
    }
}

// ============================================================================
// TOOL BUILDER
// ============================================================================

/// Per-tool configuration scope
pub struct ToolBuilder<Ctx, C> {
    parent: GenerativeUiBuilder<Ctx, C>,
    tool: String,
    component: Option<C>,
    map: Option<MapFn<Ctx>>,
    key: Option<KeyFn<Ctx>>,
}

impl<Ctx, C> ToolBuilder<Ctx, C> {
    /// Set the component to render for this tool (required)
    pub fn component(mut self, component: C) -> Self {
        self.component = Some(component);
        self
    }

    /// Map tool arguments to component props; without it props are the raw args
    pub fn map<F>(mut self, f: F) -> Self
    where
        Ctx: 'static,
        F: Fn(&Value, &Ctx) -> Value + Send + Sync + 'static,
    {
        self.map = Some(lift_map(f));
        self
    }

    pub fn try_map<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Ctx) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.map = Some(Arc::new(f));
        self
    }

    /// Generate the node key; without it the key is `tool:index`
    pub fn key<F>(mut self, f: F) -> Self
    where
        Ctx: 'static,
        F: Fn(&Value, &Ctx) -> String + Send + Sync + 'static,
    {
        self.key = Some(lift_key(f));
        self
    }

    pub fn try_key<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Ctx) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
    {
        self.key = Some(Arc::new(f));
        self
    }

    /// Validate and commit the binding, returning to the root builder
    pub fn end(self) -> Result<GenerativeUiBuilder<Ctx, C>> {
        let Self {
            mut parent,
            tool,
            component,
            map,
            key,
        } = self;

        let component = component.ok_or_else(|| GenUiError::MissingComponent { tool: tool.clone() })?;

        parent.commit(ToolBinding {
            tool,
            component,
            map,
            key,
        });
        Ok(parent)
    }
}

// Kept outside the builder impls so the boxed closures only capture `Ctx` and `F`.

fn lift_extract<Ctx, F>(f: F) -> ExtractFn<Ctx>
where
    Ctx: 'static,
    F: Fn(&Ctx) -> Vec<ToolCall> + Send + Sync + 'static,
{
    Arc::new(
        move |ctx: &Ctx| -> std::result::Result<Option<Vec<ToolCall>>, BoxError> {
            Ok(Some(f(ctx)))
        },
    )
}

fn lift_map<Ctx, F>(f: F) -> MapFn<Ctx>
where
    Ctx: 'static,
    F: Fn(&Value, &Ctx) -> Value + Send + Sync + 'static,
{
    Arc::new(
        move |args: &Value, ctx: &Ctx| -> std::result::Result<Value, BoxError> { Ok(f(args, ctx)) },
    )
}

fn lift_key<Ctx, F>(f: F) -> KeyFn<Ctx>
where
    Ctx: 'static,
    F: Fn(&Value, &Ctx) -> String + Send + Sync + 'static,
{
    Arc::new(
        move |args: &Value, ctx: &Ctx| -> std::result::Result<String, BoxError> { Ok(f(args, ctx)) },
    )
}
