//! Orchestrator boundary wrapper

use crate::error::ErrorInfo;

/// A successful provider answer together with the provider that gave it
///
/// `error` carries the last failure seen from a higher-priority provider
/// before this one succeeded. It exists for logging only.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult<T> {
    pub data: T,
    pub provider: String,
    pub error: Option<ErrorInfo>,
}

impl<T> ProviderResult<T> {
    pub fn new(data: T, provider: impl Into<String>) -> Self {
        Self {
            data,
            provider: provider.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: Option<ErrorInfo>) -> Self {
        self.error = error;
        self
    }

    /// Transforms the payload, keeping provider and diagnostics
    pub fn map<U, F>(self, f: F) -> ProviderResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ProviderResult {
            data: f(self.data),
            provider: self.provider,
            error: self.error,
        }
    }
}
