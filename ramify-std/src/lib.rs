//! # ramify-std
//!
//! Standard implementations for the ramify request router.
//!
//! This crate provides:
//! - **Standard hooks**: [`hooks::LoggingHook`], [`hooks::RequireParams`]
//! - **Testing utilities**: [`testing::RecordingHook`], [`testing::CountingHandler`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use ramify_core;

// Modules
pub mod hooks;
pub mod testing;
