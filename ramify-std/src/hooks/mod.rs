//! Standard hook implementations.

mod guard;
mod logging;

pub use guard::RequireParams;
pub use logging::{LoggingAfterHook, LoggingHook};
