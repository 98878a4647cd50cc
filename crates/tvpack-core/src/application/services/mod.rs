//! Application services - orchestrate the packaging pipeline.
//!
//! The stage services (composer, templates, store, toolchain) each own one
//! kind of side effect; the platform adapters compose them, and
//! `PackagingService` is the entry point the CLI drives.

pub mod composer;
pub mod configuration_store;
pub mod packaging_service;
pub mod platform;
pub mod template_stage;
pub mod toolchain;

#[cfg(test)]
pub(crate) mod testing;

pub use composer::FileTreeComposer;
pub use configuration_store::{ConfigurationStore, PersistedConfig};
pub use packaging_service::PackagingService;
pub use platform::{
    AdapterSettings, BuildOutcome, OrsayAdapter, PackageOutcome, PackageRequest, PlatformAdapter,
    Ports, PrepareOutcome, PrepareRequest, WebOsAdapter, adapter_for,
};
pub use template_stage::TemplateStage;
pub use toolchain::{ToolchainRunner, ToolchainStep};
