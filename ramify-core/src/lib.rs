//! # ramify-core
//!
//! Core types and traits for the ramify request router.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! hook and handler libraries that don't need the routing engine itself.
//!
//! # Building Blocks
//!
//! ## Values ([`Value`], [`Params`])
//!
//! Everything that flows through a dispatch is a [`Value`]: captured path
//! segments, query and header entries, handler arguments and handler output.
//! [`Params`] is the ordered name-to-value pool threaded through hooks.
//!
//! ## Hooks ([`Hook`], [`AfterHook`])
//!
//! Named interceptors around a dispatch. A [`Hook`] receives the parameter
//! pool and either hands it on ([`HookResult::Next`]) or rejects the request
//! ([`HookResult::Stop`]). An [`AfterHook`] transforms the handler's output.
//!
//! ## Handlers ([`Handler`])
//!
//! The terminal endpoint. A handler declares an ordered [`Signature`] of
//! named parameters (with optional defaults); the router builds positional
//! [`Args`] from the pool by name and invokes it.
//!
//! - [`FnHandler`] adapts a plain function or closure
//! - [`MethodHandler`] binds a shared receiver to a method
//!
//! ## Request context ([`RequestContext`])
//!
//! The ambient request supplied by the surrounding server: method, URI,
//! seed params, query, body, headers, cookies and session.
//!
//! # Error Types
//!
//! - [`ResolveError`] - Path resolution outcomes
//! - [`RouteError`] - Registration failures
//! - [`HandlerError`] - Handler invocation failures
//! - [`DispatchError`] - Everything `dispatch` can report

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod handler;
mod hook;
mod params;
mod response;
mod value;

// Re-exports
pub use context::RequestContext;
pub use error::{BoxError, DispatchError, HandlerError, ResolveError, RouteError};
pub use handler::{
    Args, BoxHandler, ErrorHandler, FnHandler, Handler, MethodHandler, ParamSpec, Signature,
    handler_fn, method_handler,
};
pub use hook::{AfterHook, Hook, HookResult};
pub use params::Params;
pub use response::{IntoHookResult, IntoResponse};
pub use value::{FromValue, Value};
