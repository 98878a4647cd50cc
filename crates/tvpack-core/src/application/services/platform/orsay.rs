use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::{
    AdapterSettings, BuildOutcome, PackageOutcome, PackageRequest, PlatformAdapter, Ports,
    PrepareOutcome, PrepareRequest,
};
use crate::{
    application::{
        ApplicationError,
        ports::InputProvider,
        services::{ConfigurationStore, FileTreeComposer, TemplateStage},
    },
    domain::{ApplicationMetadata, OrsayMetadata, Platform, orsay_fields},
    error::{PackResult, PipelineStage, StageExt},
};

/// Manifest rendered in place after the overlay.
pub const ORSAY_MANIFEST: &str = "config.xml";

/// Samsung Orsay (legacy Smart TV) pipeline.
///
/// Orsay has no SDK step: `build` produces the prepared widget tree and
/// `package` is not available.
pub struct OrsayAdapter {
    composer: FileTreeComposer,
    templates: TemplateStage,
    store: ConfigurationStore,
    input: Arc<dyn InputProvider>,
}

impl OrsayAdapter {
    pub fn new(ports: &Ports, settings: &AdapterSettings) -> Self {
        Self {
            composer: FileTreeComposer::new(ports.filesystem.clone()),
            templates: TemplateStage::new(ports.filesystem.clone(), ports.renderer.clone()),
            store: ConfigurationStore::new(ports.filesystem.clone(), &settings.state_file),
            input: ports.input.clone(),
        }
    }

    /// Resolve the metadata. The state file only seeds defaults here: when it
    /// is corrupt the returned warning says so and the file must not be
    /// rewritten.
    fn configure(&self, request: &PrepareRequest) -> PackResult<(OrsayMetadata, Option<String>)> {
        let (document, state_warning) = match self.store.load() {
            Ok(document) => (document, None),
            Err(e) if matches!(e.as_application(), Some(ApplicationError::CorruptState { .. })) => {
                warn!(error = %e, "Ignoring unreadable state file");
                let warning = format!("{e}; using project defaults and leaving it untouched");
                (None, Some(warning))
            }
            Err(e) => return Err(e),
        };
        let stored = document.and_then(|document| {
            match ConfigurationStore::validate(Platform::Orsay, &document) {
                Some(ApplicationMetadata::Orsay(m)) => Some(m),
                _ => None,
            }
        });

        let fields = orsay_fields(&request.defaults, stored.as_ref());
        let answers = self.input.ask(&fields)?;
        Ok((OrsayMetadata::from_answers(&answers)?, state_warning))
    }

    fn compose(&self, request: &PrepareRequest) -> PackResult<()> {
        let dest = &request.dest;
        self.composer.clean(dest)?;
        self.composer.ensure_dir(dest)?;
        self.composer.copy_app_source(&request.www_src, dest)?;
        self.composer
            .promote_entry_file(dest, &request.defaults.content_src)?;
        self.composer
            .overlay_platform_files(&request.platform_repos, dest)?;
        Ok(())
    }
}

impl PlatformAdapter for OrsayAdapter {
    fn platform(&self) -> Platform {
        Platform::Orsay
    }

    #[instrument(skip_all, fields(platform = "orsay", dest = %request.dest.display()))]
    fn prepare(&self, request: &PrepareRequest) -> PackResult<PrepareOutcome> {
        info!("Configuring");
        let (metadata, state_warning) = self
            .configure(request)
            .in_stage(PipelineStage::Configuring)?;

        info!("Composing");
        self.compose(request).in_stage(PipelineStage::Composing)?;

        info!("Rendering");
        let manifest = request.dest.join(ORSAY_MANIFEST);
        self.templates
            .render_single(&manifest, &manifest, &metadata.render_context())
            .in_stage(PipelineStage::Rendering)?;

        let metadata = ApplicationMetadata::from(metadata);
        if state_warning.is_none() {
            self.store
                .persist(&metadata)
                .in_stage(PipelineStage::Persisting)?;
        }

        Ok(PrepareOutcome {
            dest: request.dest.clone(),
            metadata,
            reused: false,
            rendered: vec![manifest],
            warnings: state_warning.into_iter().collect(),
        })
    }

    fn build(&self, prepare: &PrepareRequest, _package: &PackageRequest) -> PackResult<BuildOutcome> {
        self.prepare(prepare).map(BuildOutcome::Prepared)
    }

    fn package(&self, _request: &PackageRequest) -> PackResult<PackageOutcome> {
        Err(ApplicationError::Unsupported {
            platform: Platform::Orsay.to_string(),
            operation: "package",
        }
        .into())
    }
}
