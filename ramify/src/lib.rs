//! # ramify - Trie-Based Request Router
//!
//! `ramify` maps an HTTP method and a URL path to a registered handler,
//! rebuilds the handler's arguments by name from route parameters and the
//! request context, and runs a before/after hook pipeline around the call.
//!
//! ## Path syntax
//!
//! Paths are split on `/`; a `.` counts as a separator too, and leading or
//! trailing separators are ignored. A segment starting with `:` is a
//! parameter and captures the request segment under its name.
//!
//! ## Matching
//!
//! Routes form one trie per method. At each level a literal segment equal
//! to the request segment is preferred and commits: if its subtree has no
//! match, the request fails rather than falling back to a parameter.
//! Parameter siblings are tried in registration order, with backtracking.
//!
//! ## Quick Start
//!
//! ```rust
//! use ramify::{Params, RequestContext, Router, Value};
//!
//! #[ramify::handler(default(limit = 10))]
//! fn list_posts(user: String, limit: i64) -> String {
//!     format!("{limit} posts by {user}")
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router
//!     .hook("auth", |params: Params| params.contains_key("token").then_some(params))
//!     .get("/users/:user/posts", list_posts, &["auth"])?;
//!
//! let ctx = RequestContext::builder()
//!     .method("GET")
//!     .uri("/users/ada/posts?token=t")
//!     .query(Params::from([("token", "t")]))
//!     .build();
//! assert_eq!(router.execute(&ctx)?, Value::from("10 posts by ada"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Dispatch failures
//!
//! Every failure is a [`DispatchError`] carrying an HTTP status class.
//! Unresolvable requests (405), hook rejections (406) and, when configured,
//! missing parameters (400) carry the payload produced by the error handler
//! registered with [`Router::error`] for that class, or the default message.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

extern crate self as ramify;

mod config;
mod dispatch;
mod pipeline;
mod router;
mod shared;

pub mod routing;

pub use config::{DuplicatePolicy, MissingParamPolicy, ResolveOrder, RouterConfig};
pub use dispatch::{ROUTER_KEY, bind, merge_pool};
pub use pipeline::{AFTER, BEFORE, ErrorRegistry, HookRegistry};
pub use router::Router;
pub use shared::SharedRouter;

pub use ramify_core::{
    // Handler
    AfterHook,
    Args,
    // Error types
    BoxError,
    BoxHandler,
    DispatchError,
    ErrorHandler,
    FnHandler,
    // Values
    FromValue,
    Handler,
    HandlerError,
    // Hook
    Hook,
    HookResult,
    IntoHookResult,
    IntoResponse,
    MethodHandler,
    ParamSpec,
    Params,
    // Context
    RequestContext,
    ResolveError,
    RouteError,
    Signature,
    Value,
    handler_fn,
    method_handler,
};

/// Standard hook implementations.
pub mod hooks {
    pub use ramify_std::hooks::{LoggingAfterHook, LoggingHook, RequireParams};
}

/// Testing utilities.
pub mod testing {
    pub use ramify_std::testing::{CountingHandler, RecordingHook};
}

/// Prelude module - common imports for ramify.
///
/// # Usage
///
/// ```rust
/// use ramify::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Args, DispatchError, FromValue, Handler, HandlerError, Hook, HookResult, IntoResponse,
        Params, RequestContext, Router, RouterConfig, Signature, Value, handler_fn,
    };
}

#[cfg(feature = "macros")]
pub use ramify_macros::handler;
