//! Testing utilities for ramify.
//!
//! This module provides utilities to make testing hooks and handlers easier.
//!
//! # Features
//!
//! - [`RecordingHook`]: A hook that records every pool it receives
//! - [`CountingHandler`]: A handler that counts calls and records its arguments

use ramify_core::{Args, Handler, HandlerError, Hook, HookResult, Params, Signature, Value};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Hook
// ============================================================================

/// A hook that records all parameter pools it receives.
///
/// Useful for verifying pipeline order and what each hook saw.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHook::new();
/// router.hook("audit", recorder.clone());
///
/// router.dispatch("GET", "users/42", &ctx)?;
///
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Clone)]
pub struct RecordingHook {
    seen: Arc<Mutex<Vec<Params>>>,
    reject: bool,
}

impl RecordingHook {
    /// Create a recording hook that lets requests through.
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            reject: false,
        }
    }

    /// Create a recording hook that rejects every request.
    pub fn rejecting() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            reject: true,
        }
    }

    /// Get a clone of the recorded pools.
    pub fn seen(&self) -> Vec<Params> {
        self.seen.lock().unwrap().clone()
    }

    /// Get the number of recorded pools.
    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Clear all recorded pools.
    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }
}

impl Default for RecordingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for RecordingHook {
    fn on_params(&self, params: Params) -> HookResult {
        self.seen.lock().unwrap().push(params.clone());
        if self.reject {
            HookResult::Stop
        } else {
            HookResult::Next(params)
        }
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations, records bound arguments and returns a
/// fixed value.
#[derive(Clone)]
pub struct CountingHandler {
    signature: Signature,
    output: Value,
    calls: Arc<AtomicUsize>,
    args: Arc<Mutex<Vec<Args>>>,
}

impl CountingHandler {
    /// Create a counting handler with the given signature and output.
    pub fn new(signature: Signature, output: impl Into<Value>) -> Self {
        Self {
            signature,
            output: output.into(),
            calls: Arc::new(AtomicUsize::new(0)),
            args: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of invocations.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The arguments of the most recent invocation.
    pub fn last_args(&self) -> Option<Args> {
        self.args.lock().unwrap().last().cloned()
    }
}

impl Handler for CountingHandler {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn invoke(&self, args: Args) -> Result<Value, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.args.lock().unwrap().push(args);
        Ok(self.output.clone())
    }
}
