//! CLI subcommand implementations.

pub mod gaps;
pub mod init;
pub mod parse;
pub mod place;
pub mod util;
