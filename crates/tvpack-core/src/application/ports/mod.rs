//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `tvpack-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File and directory primitives
//!   - `TemplateRenderer`: Template expansion
//!   - `InputProvider`: Operator prompts
//!   - `CommandExecutor`: External process execution
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `PlatformAdapter` / `PackagingService` (see `crate::application::services`)

pub mod output;

pub use output::{
    CommandExecutor, CommandLine, CommandOutput, DirEntry, Filesystem, InputProvider,
    TemplateRenderer,
};

#[cfg(test)]
pub use output::{MockCommandExecutor, MockInputProvider};
