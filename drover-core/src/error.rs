//! Configuration errors

use thiserror::Error;

/// A required static setting is missing or malformed
///
/// Raised at startup or when a workload spec is built. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Setting is absent or empty
    #[error("required setting `{0}` is missing or empty")]
    Missing(&'static str),

    /// Setting is present but unusable
    #[error("setting `{name}` is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigurationError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            reason: reason.into(),
        }
    }
}
