//! Snapshot publishing for routers shared across threads.
//!
//! Readers [`load`](SharedRouter::load) the current router without locking.
//! Writers build a new router off to the side and swap it in; requests that
//! already hold a snapshot finish against it.

use crate::router::Router;
use arc_swap::ArcSwap;
use ramify_core::{DispatchError, RequestContext, RouteError, Value};
use std::sync::{Arc, Mutex, PoisonError};

/// A router that can be replaced while requests are being served.
///
/// # Example
///
/// ```rust
/// use ramify::{RequestContext, Router, SharedRouter, Signature, Value, handler_fn};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let shared = SharedRouter::new(Router::new());
/// shared.update(|router| {
///     router.get("/ping", handler_fn(Signature::new(), |_| "pong"), &[])?;
///     Ok(())
/// })?;
///
/// let ctx = RequestContext::builder().method("GET").uri("/ping").build();
/// assert_eq!(shared.execute(&ctx)?, Value::from("pong"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SharedRouter {
    current: Arc<ArcSwap<Router>>,
    writer: Arc<Mutex<()>>,
}

impl SharedRouter {
    /// Publish `router` as the initial snapshot.
    pub fn new(router: Router) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(router)),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<Router> {
        self.current.load_full()
    }

    /// Replace the current snapshot.
    pub fn publish(&self, router: Router) {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.current.store(Arc::new(router));
        tracing::debug!(routes = self.current.load().tree().len(), "Published router");
    }

    /// Apply `f` to a copy of the current snapshot and publish the result.
    ///
    /// Concurrent updates are serialized. If `f` fails, nothing is
    /// published.
    pub fn update<F>(&self, f: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Router) -> Result<(), RouteError>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Router::clone(&self.current.load());
        f(&mut next)?;
        tracing::debug!(routes = next.tree().len(), "Published router");
        self.current.store(Arc::new(next));
        Ok(())
    }

    /// Dispatch against the current snapshot.
    pub fn dispatch(
        &self,
        method: &str,
        path: &str,
        ctx: &RequestContext,
    ) -> Result<Value, DispatchError> {
        self.current.load().dispatch(method, path, ctx)
    }

    /// Dispatch against the current snapshot using the method and URI in
    /// `ctx`.
    pub fn execute(&self, ctx: &RequestContext) -> Result<Value, DispatchError> {
        self.current.load().execute(ctx)
    }
}

impl From<Router> for SharedRouter {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}
