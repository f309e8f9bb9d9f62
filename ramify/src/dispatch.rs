//! Pool assembly and name-based argument binding.
//!
//! The pool a handler is bound from is built in this order, later entries
//! overwriting earlier ones on key collisions:
//!
//! 1. the resolver's params (seed plus captured segments)
//! 2. the router itself under [`ROUTER_KEY`], when injection is enabled
//! 3. headers, query, body, cookies, session from the request context
//!
//! Before-hooks see the finished pool; the binder then walks the handler's
//! [`Signature`] and picks every declared name from the pool, falling back
//! to the declared default. A pooled `Value::Null` counts as absent.

use crate::config::MissingParamPolicy;
use ramify_core::{Args, Params, RequestContext, Signature, Value};

/// Pool key under which the router injects itself.
pub const ROUTER_KEY: &str = "router";

/// Build the parameter pool for one dispatch.
pub fn merge_pool(resolved: Params, router: Option<Value>, ctx: &RequestContext) -> Params {
    let mut pool = resolved;
    if let Some(router) = router {
        pool.insert(ROUTER_KEY, router);
    }
    for source in ctx.ambient() {
        pool.merge(source);
    }
    pool
}

/// Bind `pool` to `signature`.
///
/// Returns the name of the first parameter that could not be bound when
/// the policy is [`MissingParamPolicy::Reject`].
pub fn bind(
    signature: &Signature,
    pool: &Params,
    policy: MissingParamPolicy,
) -> Result<Args, String> {
    let mut args = Args::new();
    for spec in signature.iter() {
        let value = match pool.get(spec.name()).cloned() {
            Some(value) if !value.is_null() => value,
            _ => match (spec.default_value(), policy) {
                (Some(default), _) => default.clone(),
                (None, MissingParamPolicy::Null) => Value::Null,
                (None, MissingParamPolicy::Reject) => return Err(spec.name().to_owned()),
            },
        };
        args.push(spec.name(), value);
    }
    Ok(args)
}
