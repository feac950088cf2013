//! CLI subcommand implementations.

pub mod categories;
pub mod log;
pub mod status;
pub mod summary;
pub mod timer;
