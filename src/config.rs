//! Resolver configuration
//!
//! Controls how default identity keys are formatted:
//! - bound tools without a key function: `{tool}{key_separator}{index}`
//! - fallback nodes: `{fallback_key_prefix}{key_separator}{index}`

use serde::Deserialize;

use crate::error::{GenUiError, Result};

/// Key formatting settings captured by a resolver at build time
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Separator between the tool name (or fallback prefix) and the index
    pub key_separator: String,

    /// Prefix used for keys of nodes rendered by the fallback component
    pub fallback_key_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            key_separator: ":".to_string(),
            fallback_key_prefix: "unknown".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Parse a config from TOML; missing fields take their defaults
    ///
    /// ```toml
    /// key_separator = "#"
    /// fallback_key_prefix = "fallback"
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fallback_key_prefix.is_empty() {
            return Err(GenUiError::Config {
                details: "fallback_key_prefix cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn default_key(&self, tool: &str, index: usize) -> String {
        format!("{}{}{}", tool, self.key_separator, index)
    }

    pub(crate) fn fallback_key(&self, index: usize) -> String {
        format!("{}{}{}", self.fallback_key_prefix, self.key_separator, index)
    }
}
