//! Application layer for tvpack.
//!
//! This layer contains:
//! - **Services**: the pipeline stages and the platform adapters that compose them
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! metadata rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    AdapterSettings, BuildOutcome, ConfigurationStore, FileTreeComposer, OrsayAdapter,
    PackageOutcome, PackageRequest, PackagingService, PlatformAdapter, Ports, PrepareOutcome,
    PrepareRequest, TemplateStage, ToolchainRunner, ToolchainStep, WebOsAdapter, adapter_for,
};

pub use ports::{CommandExecutor, Filesystem, InputProvider, TemplateRenderer};

pub use error::ApplicationError;
