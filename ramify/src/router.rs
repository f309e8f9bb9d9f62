//! The [`Router`] facade: registration, resolution and dispatch.

use crate::{
    config::{DuplicatePolicy, RouterConfig},
    dispatch::{bind, merge_pool},
    pipeline::{BEFORE, ErrorRegistry, HookRegistry},
    routing::{Resolved, Route, RouteTree, SEPARATOR, resolve},
};
use indexmap::IndexSet;
use ramify_core::{
    AfterHook, DispatchError, ErrorHandler, FromValue, Handler, Hook, HookResult, Params,
    RequestContext, ResolveError, RouteError, Value,
};
use std::sync::Arc;

/// A request router.
///
/// Routes, hooks and error handlers live behind `Arc`s. Cloning a router is
/// cheap and yields a snapshot: later registrations on either copy do not
/// affect the other.
///
/// # Example
///
/// ```rust
/// use ramify::{Args, Params, RequestContext, Router, Signature, Value, handler_fn};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = Router::new();
/// router.get(
///     "/users/:id",
///     handler_fn(Signature::new().param("id"), |mut args: Args| {
///         let id: String = args.take(0)?;
///         Ok::<_, ramify::HandlerError>(format!("user {id}"))
///     }),
///     &[],
/// )?;
///
/// let ctx = RequestContext::builder().method("GET").uri("/users/42").build();
/// assert_eq!(router.execute(&ctx)?, Value::from("user 42"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
    tree: Arc<RouteTree>,
    hooks: Arc<HookRegistry>,
    errors: Arc<ErrorRegistry>,
}

impl Router {
    /// Create a router with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router with `config`.
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The router configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The registered routes.
    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    /// Register `handler` for `method` and `path`, with per-route hooks run
    /// after `before` in the given order.
    ///
    /// The method is matched case-insensitively. Re-registering a path
    /// replaces the previous route unless duplicates are rejected.
    pub fn match_route(
        &mut self,
        method: &str,
        path: &str,
        handler: impl Handler,
        hooks: &[&str],
    ) -> Result<&mut Self, RouteError> {
        self.match_methods(&[method], path, handler, hooks)
    }

    /// Register one handler for several methods.
    ///
    /// Methods are normalized before registration, so `GET` and `get` name
    /// the same route. With duplicates rejected, nothing is registered if
    /// any method already has a route for `path`.
    pub fn match_methods(
        &mut self,
        methods: &[&str],
        path: &str,
        handler: impl Handler,
        hooks: &[&str],
    ) -> Result<&mut Self, RouteError> {
        let methods = methods
            .iter()
            .map(|method| normalize_method(method))
            .collect::<Result<IndexSet<_>, _>>()?;

        if self.config.duplicate_routes == DuplicatePolicy::Reject {
            if let Some(method) = methods.iter().find(|m| self.tree.get(m, path).is_some()) {
                return Err(RouteError::Duplicate {
                    method: method.clone(),
                    path: path.to_owned(),
                });
            }
        }

        let route = Route::new(
            Arc::new(handler),
            hooks.iter().map(|h| (*h).to_owned()).collect(),
        );
        let tree = Arc::make_mut(&mut self.tree);
        for method in &methods {
            if tree.insert(method, path, route.clone()).is_some() {
                tracing::warn!(method = %method, path, "Route overwritten");
            } else {
                tracing::debug!(method = %method, path, ?hooks, "Registered route");
            }
        }
        Ok(self)
    }

    /// Register a named before-hook.
    ///
    /// The name `after` is reserved for the after-hook slot; a before-hook
    /// registered under it is ignored with a warning. Use [`Router::after`].
    pub fn hook(&mut self, name: impl Into<String>, hook: impl Hook) -> &mut Self {
        Arc::make_mut(&mut self.hooks).register(name, hook);
        self
    }

    /// Register the hook that runs before every route's own hooks.
    pub fn before(&mut self, hook: impl Hook) -> &mut Self {
        self.hook(BEFORE, hook)
    }

    /// Register the hook that transforms every handler output.
    pub fn after(&mut self, hook: impl AfterHook) -> &mut Self {
        Arc::make_mut(&mut self.hooks).set_after(hook);
        self
    }

    /// Run the hook registered under `name`. Unregistered names pass
    /// `params` through unchanged.
    pub fn invoke_hook(&self, name: &str, params: Params) -> HookResult {
        self.hooks.invoke(name, params)
    }

    /// Run the after-hook on `output`. Without one, `output` is returned
    /// unchanged.
    pub fn invoke_after(&self, output: Value) -> Value {
        self.hooks.run_after(output)
    }

    /// Register the handler producing the payload for error class `code`.
    pub fn error(&mut self, code: u16, handler: impl ErrorHandler) -> &mut Self {
        Arc::make_mut(&mut self.errors).register(code, handler);
        self
    }

    /// Produce the payload for error class `code`. Without a registered
    /// handler the payload is `message`.
    pub fn invoke_error(&self, code: u16, message: &str) -> Value {
        self.errors.invoke(code, message)
    }

    /// Resolve `method` and `path` to a route, seeding the captured
    /// parameters with `seed`.
    pub fn resolve(
        &self,
        method: &str,
        path: &str,
        seed: Params,
    ) -> Result<Resolved<'_>, ResolveError> {
        let method = method.to_ascii_uppercase();
        resolve(&self.tree, &method, path, seed, self.config.resolve_order)
    }

    /// Dispatch using the method and URI carried by `ctx`.
    pub fn execute(&self, ctx: &RequestContext) -> Result<Value, DispatchError> {
        self.dispatch(ctx.method(), ctx.path(), ctx)
    }

    /// Resolve, run the hook pipeline, bind arguments and invoke the handler.
    pub fn dispatch(
        &self,
        method: &str,
        path: &str,
        ctx: &RequestContext,
    ) -> Result<Value, DispatchError> {
        let resolved = match self.resolve(method, path, ctx.params().clone()) {
            Ok(resolved) => resolved,
            Err(source) => {
                let path = path.trim_matches(SEPARATOR);
                tracing::debug!(method, path, error = %source, "Request not resolvable");
                let message = format!("Could not resolve [{method}] {path}");
                return Err(DispatchError::NotResolvable {
                    payload: self.errors.invoke(405, &message),
                    method: method.to_owned(),
                    path: path.to_owned(),
                    source,
                });
            }
        };

        let handler = resolved.handler();
        let hooks = resolved.hooks();
        let router = self
            .config
            .inject_router
            .then(|| Value::extension(self.clone()));
        let pool = merge_pool(resolved.into_params(), router, ctx);

        let pool = self.hooks.run_before(hooks, pool).map_err(|hook| {
            let message = format!("Failed to execute hook: {hook}");
            DispatchError::HookRejected {
                payload: self.errors.invoke(406, &message),
                hook,
            }
        })?;

        let args = bind(handler.signature(), &pool, self.config.missing_params).map_err(|name| {
            let message = format!("Missing required parameter: {name}");
            DispatchError::MissingParameter {
                payload: self.errors.invoke(400, &message),
                name,
            }
        })?;

        let output = handler.invoke(args).inspect_err(|err| {
            tracing::debug!(method, path, error = %err, "Handler failed");
        })?;
        Ok(self.hooks.run_after(output))
    }
}

macro_rules! verb_routes {
    ($($name:ident => $method:literal),+ $(,)?) => {
        impl Router {
            $(
                #[doc = concat!("Register a `", $method, "` route.")]
                pub fn $name(
                    &mut self,
                    path: &str,
                    handler: impl Handler,
                    hooks: &[&str],
                ) -> Result<&mut Self, RouteError> {
                    self.match_route($method, path, handler, hooks)
                }
            )+
        }
    };
}

verb_routes! {
    get => "GET",
    post => "POST",
    put => "PUT",
    patch => "PATCH",
    delete => "DELETE",
    trace => "TRACE",
    connect => "CONNECT",
    options => "OPTIONS",
    head => "HEAD",
}

/// Handlers declaring a `router` parameter receive the dispatching router.
impl FromValue for Router {
    fn expected() -> &'static str {
        "router"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        if let Some(router) = value.downcast_ref::<Router>() {
            return Ok(router.clone());
        }
        Err(value)
    }
}

fn normalize_method(method: &str) -> Result<String, RouteError> {
    if method.is_empty() {
        return Err(RouteError::EmptyMethod);
    }
    Ok(method.to_ascii_uppercase())
}
