//! Infrastructure adapters for tvpack.
//!
//! This crate implements the ports defined in `tvpack-core::application::ports`.
//! It contains all direct filesystem and process I/O.

pub mod filesystem;
pub mod process;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::LocalFilesystem;
pub use process::SystemCommandExecutor;
pub use renderer::SimpleRenderer;
