//! Error types with fix suggestions
//!
//! Error codes:
//! - GENUI-001: builder finalized without an extraction function
//! - GENUI-002: tool binding committed without a component
//! - GENUI-003: tool call with no binding and no fallback
//! - GENUI-004: invalid resolver configuration
//!
//! Errors raised by caller-supplied functions pass through untouched as
//! [`GenUiError::Callback`].

use thiserror::Error;

/// Boxed error returned by fallible user functions (`try_extract`, `try_map`, `try_key`).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, GenUiError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum GenUiError {
    #[error("[GENUI-001] Missing extract() call: define how to extract tool calls from context")]
    MissingExtract,

    #[error("[GENUI-002] Missing component for tool \"{tool}\": call .component() before .end()")]
    MissingComponent { tool: String },

    #[error("[GENUI-003] Unregistered tool \"{tool}\": register it with .on_tool(\"{tool}\") or add a .fallback() component")]
    UnregisteredTool { tool: String },

    #[error("[GENUI-004] Invalid resolver config: {details}")]
    Config { details: String },

    /// Failure raised by a user-supplied extract, map or key function.
    #[error(transparent)]
    Callback(BoxError),
}

impl GenUiError {
    /// Tool name carried by the error, if any.
    pub fn tool(&self) -> Option<&str> {
        match self {
            GenUiError::MissingComponent { tool } | GenUiError::UnregisteredTool { tool } => {
                Some(tool)
            }
            _ => None,
        }
    }

    /// Downcast a [`GenUiError::Callback`] to the concrete user error type.
    pub fn callback_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            GenUiError::Callback(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for GenUiError {
    fn from(err: toml::de::Error) -> Self {
        GenUiError::Config {
            details: err.to_string(),
        }
    }
}

impl FixSuggestion for GenUiError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            GenUiError::MissingExtract => Some("Call .extract() before .done()"),
            GenUiError::MissingComponent { .. } => {
                Some("Call .component() on the tool builder before .end()")
            }
            GenUiError::UnregisteredTool { .. } => {
                Some("Register the tool with .on_tool() or configure a .fallback() component")
            }
            GenUiError::Config { .. } => {
                Some("Check key_separator and fallback_key_prefix in the resolver config")
            }
            GenUiError::Callback(_) => None,
        }
    }
}
