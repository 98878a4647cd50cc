//! Platform adapters: one pipeline per TV platform.
//!
//! Each adapter composes the shared stages (configuration store, file tree
//! composer, template stage, toolchain runner) into the operations a platform
//! supports. Failures are tagged with the [`PipelineStage`](crate::error::PipelineStage)
//! that aborted; nothing is rolled back, so a failed run leaves the destination
//! as the last completed stage produced it.

mod orsay;
mod webos;

pub use orsay::OrsayAdapter;
pub use webos::{BUILD_RESULT_DIR, WebOsAdapter};

use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use crate::{
    application::ports::{CommandExecutor, Filesystem, InputProvider, TemplateRenderer},
    domain::{ApplicationMetadata, Platform, ProjectDefaults},
    error::PackResult,
};

/// Shared handles to every driven port.
#[derive(Clone)]
pub struct Ports {
    pub filesystem: Arc<dyn Filesystem>,
    pub renderer: Arc<dyn TemplateRenderer>,
    pub input: Arc<dyn InputProvider>,
    pub executor: Arc<dyn CommandExecutor>,
}

/// Settings that do not change between operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSettings {
    /// JSON state file holding the last metadata per platform.
    pub state_file: PathBuf,
    /// SDK executable driven by the webOS packaging steps.
    pub sdk_command: String,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("platforms/userconf.json"),
            sdk_command: "tizen".into(),
        }
    }
}

/// Inputs to `prepare`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareRequest {
    /// Application source tree.
    pub www_src: PathBuf,
    /// Destination tree for this platform.
    pub dest: PathBuf,
    /// Platform repository; its `www/` is overlaid onto `dest`.
    pub platform_repos: PathBuf,
    /// Extra single files copied into `dest` (dest-relative name → source).
    pub scripts: BTreeMap<String, PathBuf>,
    pub defaults: ProjectDefaults,
}

/// Inputs to `package`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Prepared tree handed to the SDK.
    pub www: PathBuf,
    /// Directory receiving the signed artifact.
    pub dest: PathBuf,
    /// Directory holding the SDK signing profiles.
    pub profile_path: PathBuf,
    pub profile_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareOutcome {
    pub dest: PathBuf,
    pub metadata: ApplicationMetadata,
    /// A stored entry was reused rather than asked for again.
    pub reused: bool,
    /// Files written by template expansion.
    pub rendered: Vec<PathBuf>,
    /// Non-fatal advisories raised along the way.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    pub artifact: PathBuf,
    /// First line printed by the SDK version probe.
    pub sdk_version: String,
}

/// What `build` produced; depends on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Prepared(PrepareOutcome),
    Packaged(PackageOutcome),
}

/// The operations every platform exposes.
pub trait PlatformAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    /// Resolve metadata and compose the platform tree.
    fn prepare(&self, request: &PrepareRequest) -> PackResult<PrepareOutcome>;

    /// The platform's full build.
    fn build(&self, prepare: &PrepareRequest, package: &PackageRequest) -> PackResult<BuildOutcome>;

    /// Produce a signed installable artifact.
    fn package(&self, request: &PackageRequest) -> PackResult<PackageOutcome>;
}

/// Construct the adapter for `platform`.
pub fn adapter_for(
    platform: Platform,
    ports: &Ports,
    settings: &AdapterSettings,
) -> Box<dyn PlatformAdapter> {
    match platform {
        Platform::Orsay => Box::new(OrsayAdapter::new(ports, settings)),
        Platform::WebOs => Box::new(WebOsAdapter::new(ports, settings)),
    }
}
