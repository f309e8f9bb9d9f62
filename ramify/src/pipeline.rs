//! Named hooks and error handlers.
//!
//! [`HookRegistry`] owns every before-hook by name plus the single
//! after-hook. [`ErrorRegistry`] maps an error class (405, 406, ...) to the
//! handler producing its payload.
//!
//! Looking up a name that was never registered is not an error: unknown
//! hooks pass the pool through unchanged, unknown error classes return the
//! default message.

use indexmap::IndexMap;
use ramify_core::{AfterHook, ErrorHandler, Hook, HookResult, Params, Value};
use std::{fmt, sync::Arc};

/// Name of the hook that runs before every route's own hooks.
pub const BEFORE: &str = "before";

/// Reserved name of the after-hook slot. It cannot hold a before-hook;
/// register after-hooks with [`HookRegistry::set_after`].
pub const AFTER: &str = "after";

/// Named before-hooks and the optional after-hook.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: IndexMap<String, Arc<dyn Hook>>,
    after: Option<Arc<dyn AfterHook>>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .field("after", &self.after.is_some())
            .finish()
    }
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` under `name`, replacing any previous one.
    ///
    /// Returns `false` and registers nothing when `name` is [`AFTER`].
    pub fn register(&mut self, name: impl Into<String>, hook: impl Hook) -> bool {
        let name = name.into();
        if name == AFTER {
            tracing::warn!(hook = %name, "Reserved hook name; use `after` to set the after-hook");
            return false;
        }
        tracing::debug!(hook = %name, "Registered hook");
        self.hooks.insert(name, Arc::new(hook));
        true
    }

    /// Set the after-hook.
    pub fn set_after(&mut self, hook: impl AfterHook) {
        self.after = Some(Arc::new(hook));
    }

    /// Returns `true` if a hook is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Registered hook names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }

    /// Run the hook registered under `name`.
    ///
    /// An unregistered name forwards `params` unchanged.
    pub fn invoke(&self, name: &str, params: Params) -> HookResult {
        match self.hooks.get(name) {
            Some(hook) => hook.on_params(params),
            None => HookResult::Next(params),
        }
    }

    /// Run [`BEFORE`] followed by `route_hooks`, threading the pool through.
    ///
    /// Stops at the first rejection and returns the rejecting hook's name.
    pub fn run_before<S: AsRef<str>>(
        &self,
        route_hooks: &[S],
        mut params: Params,
    ) -> Result<Params, String> {
        let chain = std::iter::once(BEFORE).chain(route_hooks.iter().map(AsRef::as_ref));
        for name in chain {
            match self.invoke(name, params) {
                HookResult::Next(next) => params = next,
                HookResult::Stop => {
                    tracing::warn!(hook = name, "Hook rejected request");
                    return Err(name.to_owned());
                }
            }
        }
        Ok(params)
    }

    /// Pass the handler output through the after-hook, if any.
    pub fn run_after(&self, output: Value) -> Value {
        match &self.after {
            Some(hook) => hook.on_output(output),
            None => output,
        }
    }
}

/// Error handlers keyed by status class.
#[derive(Clone, Default)]
pub struct ErrorRegistry {
    handlers: IndexMap<u16, Arc<dyn ErrorHandler>>,
}

impl fmt::Debug for ErrorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorRegistry")
            .field("codes", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ErrorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `code`, replacing any previous one.
    pub fn register(&mut self, code: u16, handler: impl ErrorHandler) {
        self.handlers.insert(code, Arc::new(handler));
    }

    /// Returns `true` if a handler is registered for `code`.
    pub fn contains(&self, code: u16) -> bool {
        self.handlers.contains_key(&code)
    }

    /// Produce the payload for `code`.
    ///
    /// Without a registered handler the payload is `message` itself.
    pub fn invoke(&self, code: u16, message: &str) -> Value {
        match self.handlers.get(&code) {
            Some(handler) => handler.on_error(message),
            None => Value::from(message),
        }
    }
}
