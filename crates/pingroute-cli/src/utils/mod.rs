//! Shared CLI plumbing.

pub mod cli_args;
pub mod logging;
pub mod settings;

pub use logging::initialize_logging;
