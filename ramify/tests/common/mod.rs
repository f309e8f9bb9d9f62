#![allow(dead_code)]

use ramify::{Args, Handler, HandlerError, RequestContext, Router, Signature, Value, handler_fn};
use std::sync::Once;

// ============================================================================
// Logging
// ============================================================================

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Handlers
// ============================================================================

/// A handler without parameters returning `tag`.
pub fn tagged(tag: &'static str) -> impl Handler {
    handler_fn(Signature::new(), move |_| tag)
}

/// A handler returning its arguments as a map keyed by parameter name.
pub fn echo(signature: Signature) -> impl Handler {
    let names: Vec<String> = signature.names().map(str::to_owned).collect();
    handler_fn(signature, move |args: Args| {
        let map = names
            .iter()
            .cloned()
            .zip(args.into_values())
            .collect::<ramify::Params>();
        Ok::<_, HandlerError>(map)
    })
}

// ============================================================================
// Requests
// ============================================================================

pub fn get(path: &str) -> RequestContext {
    RequestContext::builder().method("GET").uri(path).build()
}

pub fn run(router: &Router, method: &str, path: &str) -> Value {
    router
        .dispatch(method, path, &RequestContext::default())
        .unwrap()
}
