//! Subcommand implementations.

pub mod init;
pub mod locate;
pub mod output;
pub mod run;
