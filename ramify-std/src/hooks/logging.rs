//! Logging hooks for request observation.

use ramify_core::{AfterHook, Hook, HookResult, Params, Value};

/// A hook that logs the parameter pool and passes it through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct LoggingHook {
    name: &'static str,
}

impl LoggingHook {
    /// Create a logging hook that tags its records with `name`.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new("before")
    }
}

impl Hook for LoggingHook {
    fn on_params(&self, params: Params) -> HookResult {
        tracing::info!(hook = self.name, ?params, "Processing request");
        HookResult::Next(params)
    }
}

/// An after-hook that logs the handler output and returns it unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAfterHook;

impl AfterHook for LoggingAfterHook {
    fn on_output(&self, output: Value) -> Value {
        tracing::info!(?output, "Handler returned");
        output
    }
}
