//! The `settings` module is a simple utility that requires manual
//! verification. See `bin/engine_demo.rs` for a binary exercising it.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
