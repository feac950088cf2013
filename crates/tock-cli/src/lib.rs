//! tock CLI library.
//!
//! This crate provides the terminal front end for the tock timer.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
