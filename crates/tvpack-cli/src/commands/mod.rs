//! Command handlers, one module per subcommand family.

pub mod completions;
pub mod config;
pub mod init;
pub mod pack;
