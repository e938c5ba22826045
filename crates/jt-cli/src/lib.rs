//! Time journal CLI library.
//!
//! This crate provides the CLI interface for the time journal.

mod cli;
pub mod commands;
mod config;
pub mod day_file;

pub use cli::{Cli, Commands};
pub use config::Config;
