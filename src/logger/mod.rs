//! The `logger` module is a simple utility that requires manual
//! verification. See `bin/engine_demo.rs` for a binary exercising it.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
