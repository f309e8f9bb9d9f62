//! Error types for ramify.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`ResolveError`] - The resolver could not find a terminal route
//! - [`RouteError`] - A route could not be registered
//! - [`HandlerError`] - A handler failed while binding or running
//! - [`DispatchError`] - Top-level error returned by a dispatch

use crate::value::Value;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a method/path pair did not resolve to a handler.
///
/// Resolution failure is an ordinary outcome, not a fault: the dispatcher
/// turns it into a 405-class [`DispatchError::NotResolvable`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No route was ever registered for this method.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// The tokens ran out before a terminal node, or no child matched.
    #[error("no route matches [{method}] {path}")]
    NoRouteMatch {
        /// The requested method.
        method: String,
        /// The requested path.
        path: String,
    },
}

/// Errors that can occur while registering routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The route already has a handler and duplicates are rejected.
    #[error("route already registered: [{method}] {path}")]
    Duplicate {
        /// The method of the existing route.
        method: String,
        /// The path as given to the rejected registration.
        path: String,
    },

    /// The method string was empty.
    #[error("route method must not be empty")]
    EmptyMethod,
}

/// Errors raised by a handler invocation.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// A pooled value could not be converted into the declared argument type.
    #[error("parameter `{param}` expects {expected}, found {found}")]
    Conversion {
        /// The declared parameter name.
        param: String,
        /// The Rust-side type the handler asked for.
        expected: &'static str,
        /// The kind of value that was supplied.
        found: &'static str,
    },

    /// A custom error returned by the handler body.
    #[error(transparent)]
    Custom(BoxError),
}

impl From<BoxError> for HandlerError {
    fn from(err: BoxError) -> Self {
        HandlerError::Custom(err)
    }
}

/// Top-level error returned by `Router::dispatch`.
///
/// The variants carrying a `payload` hold whatever the error handler
/// registered for their status class returned, or the default message as a
/// [`Value::Str`] when none is registered.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The request did not resolve to a handler (405 class).
    #[error("Could not resolve [{method}] {path}")]
    NotResolvable {
        /// The requested method.
        method: String,
        /// The requested path.
        path: String,
        /// The underlying resolution outcome.
        #[source]
        source: ResolveError,
        /// The error handler's output.
        payload: Value,
    },

    /// A hook in the pipeline rejected the request (406 class).
    #[error("Failed to execute hook: {hook}")]
    HookRejected {
        /// The name of the rejecting hook.
        hook: String,
        /// The error handler's output.
        payload: Value,
    },

    /// A declared parameter had neither a pool value nor a default (400
    /// class). Only raised under the rejecting missing-parameter policy.
    #[error("Missing required parameter: {name}")]
    MissingParameter {
        /// The parameter name.
        name: String,
        /// The error handler's output.
        payload: Value,
    },

    /// The handler itself failed (500 class).
    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),
}

impl DispatchError {
    /// The HTTP status class this error is reported under.
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::NotResolvable { .. } => 405,
            DispatchError::HookRejected { .. } => 406,
            DispatchError::MissingParameter { .. } => 400,
            DispatchError::Handler(_) => 500,
        }
    }

    /// The error payload surfaced to the caller, if this class carries one.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            DispatchError::NotResolvable { payload, .. }
            | DispatchError::HookRejected { payload, .. }
            | DispatchError::MissingParameter { payload, .. } => Some(payload),
            DispatchError::Handler(_) => None,
        }
    }

    /// Consume the error and return its payload.
    pub fn into_payload(self) -> Option<Value> {
        match self {
            DispatchError::NotResolvable { payload, .. }
            | DispatchError::HookRejected { payload, .. }
            | DispatchError::MissingParameter { payload, .. } => Some(payload),
            DispatchError::Handler(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        let err = DispatchError::NotResolvable {
            method: "GET".into(),
            path: "x".into(),
            source: ResolveError::UnknownMethod("GET".into()),
            payload: Value::Null,
        };
        assert_eq!(err.status(), 405);
        assert_eq!(err.to_string(), "Could not resolve [GET] x");

        let err = DispatchError::HookRejected {
            hook: "auth".into(),
            payload: Value::from("nope"),
        };
        assert_eq!(err.status(), 406);
        assert_eq!(err.payload(), Some(&Value::from("nope")));
    }

    #[test]
    fn test_handler_error_has_no_payload() {
        let err = DispatchError::from(HandlerError::Custom("boom".into()));
        assert_eq!(err.status(), 500);
        assert!(err.into_payload().is_none());
    }
}
