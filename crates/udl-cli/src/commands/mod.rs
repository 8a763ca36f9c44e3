//! Subcommand implementations.

pub mod classify;
pub mod init;
pub mod lint;
pub mod list_linters;
pub mod output;
pub mod styles;
