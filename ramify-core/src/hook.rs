//! # Interception Layer (Hook)
//!
//! Hooks are named interceptors that run around every dispatch:
//!
//! - A [`Hook`] runs *before* the handler. It receives the parameter pool
//!   and either passes a (possibly modified) pool on, or stops the request.
//!   The conventional `"before"` hook runs first, followed by the hooks
//!   attached to the matched route, each receiving the previous one's output.
//! - An [`AfterHook`] runs *after* the handler and transforms its output.
//!
//! Closures implement both traits directly:
//!
//! ```rust,ignore
//! router.hook("auth", |params: Params| {
//!     if params.contains_key("token") { Some(params) } else { None }
//! });
//! router.after(|out: Value| Value::from(format!("<{out}>")));
//! ```

use crate::{params::Params, response::IntoHookResult, value::Value};

/// Result of a before-hook: continue with a pool, or reject.
#[derive(Debug, Clone, PartialEq)]
pub enum HookResult {
    /// Continue the pipeline with this pool.
    Next(Params),
    /// Reject the request; the dispatcher reports the hook by name.
    Stop,
}

impl HookResult {
    /// Returns `true` for [`HookResult::Stop`].
    pub fn is_stop(&self) -> bool {
        matches!(self, HookResult::Stop)
    }

    /// The forwarded pool, if the hook let the request through.
    pub fn into_params(self) -> Option<Params> {
        match self {
            HookResult::Next(params) => Some(params),
            HookResult::Stop => None,
        }
    }
}

/// An interceptor that runs before the handler.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Hook`",
    label = "missing `Hook` implementation",
    note = "Hooks take the parameter pool and return `HookResult`, `Params` or `Option<Params>`."
)]
pub trait Hook: Send + Sync + 'static {
    /// Inspect or transform the parameter pool.
    fn on_params(&self, params: Params) -> HookResult;
}

impl<F, R> Hook for F
where
    F: Fn(Params) -> R + Send + Sync + 'static,
    R: IntoHookResult,
{
    fn on_params(&self, params: Params) -> HookResult {
        (self)(params).into_hook_result()
    }
}

/// An interceptor that transforms the handler's output.
pub trait AfterHook: Send + Sync + 'static {
    /// Transform the handler output before it is returned to the caller.
    fn on_output(&self, output: Value) -> Value;
}

impl<F> AfterHook for F
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    fn on_output(&self, output: Value) -> Value {
        (self)(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn require_token(params: Params) -> Option<Params> {
        params.contains_key("token").then_some(params)
    }

    #[test]
    fn test_closure_hook_forwards() {
        let hook = |mut params: Params| {
            params.insert("seen", true);
            params
        };
        let out = hook.on_params(Params::new()).into_params().unwrap();
        assert_eq!(out.get("seen"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_option_hook_stops_on_none() {
        assert!(require_token.on_params(Params::new()).is_stop());
        let params = Params::from([("token", "t")]);
        assert_eq!(
            require_token.on_params(params.clone()),
            HookResult::Next(params)
        );
    }

    #[test]
    fn test_after_hook() {
        let upper = |out: Value| Value::from(out.to_string().to_uppercase());
        assert_eq!(upper.on_output(Value::from("ok")), Value::from("OK"));
    }
}
