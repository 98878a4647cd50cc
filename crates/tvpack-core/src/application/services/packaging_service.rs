//! Packaging Service - main application entry point.
//!
//! This service picks the platform adapter for each request and runs one
//! operation on it:
//! 1. `prepare`: resolve metadata, compose and render the platform tree
//! 2. `build`: the platform's full build (prepare for Orsay, package for webOS)
//! 3. `package`: drive the SDK to produce a signed artifact
//!
//! It implements the driving port (incoming) and hands the driven ports to
//! the adapters it creates.

use tracing::{info, instrument};

use crate::{
    application::services::platform::{
        AdapterSettings, BuildOutcome, PackageOutcome, PackageRequest, PlatformAdapter, Ports,
        PrepareOutcome, PrepareRequest, adapter_for,
    },
    domain::Platform,
    error::PackResult,
};

/// Main packaging service.
pub struct PackagingService {
    ports: Ports,
    settings: AdapterSettings,
}

impl PackagingService {
    /// Create a new packaging service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tvpack_core::application::{AdapterSettings, PackagingService, Ports};
    ///
    /// let service = PackagingService::new(
    ///     Ports { filesystem, renderer, input, executor },
    ///     AdapterSettings::default(),
    /// );
    /// ```
    pub fn new(ports: Ports, settings: AdapterSettings) -> Self {
        Self { ports, settings }
    }

    pub fn settings(&self) -> &AdapterSettings {
        &self.settings
    }

    /// The adapter that handles `platform`.
    pub fn adapter(&self, platform: Platform) -> Box<dyn PlatformAdapter> {
        adapter_for(platform, &self.ports, &self.settings)
    }

    /// Compose the platform tree for `platform`.
    #[instrument(skip_all, fields(%platform))]
    pub fn prepare(&self, platform: Platform, request: &PrepareRequest) -> PackResult<PrepareOutcome> {
        info!("Preparing {}", platform.display_name());
        let outcome = self.adapter(platform).prepare(request)?;
        info!(
            app = %outcome.metadata,
            rendered = outcome.rendered.len(),
            warnings = outcome.warnings.len(),
            "Prepare completed successfully"
        );
        Ok(outcome)
    }

    /// Run the platform's full build.
    #[instrument(skip_all, fields(%platform))]
    pub fn build(
        &self,
        platform: Platform,
        prepare: &PrepareRequest,
        package: &PackageRequest,
    ) -> PackResult<BuildOutcome> {
        info!("Building {}", platform.display_name());
        let outcome = self.adapter(platform).build(prepare, package)?;
        info!("Build completed successfully");
        Ok(outcome)
    }

    /// Produce a signed package for `platform`.
    #[instrument(skip_all, fields(%platform))]
    pub fn package(&self, platform: Platform, request: &PackageRequest) -> PackResult<PackageOutcome> {
        info!("Packaging {}", platform.display_name());
        let outcome = self.adapter(platform).package(request)?;
        info!(artifact = %outcome.artifact.display(), "Package completed successfully");
        Ok(outcome)
    }
}
