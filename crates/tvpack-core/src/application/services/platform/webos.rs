use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{info, instrument, warn};

use super::{
    AdapterSettings, BuildOutcome, PackageOutcome, PackageRequest, PlatformAdapter, Ports,
    PrepareOutcome, PrepareRequest,
};
use crate::{
    application::{
        ApplicationError,
        ports::{CommandLine, InputProvider},
        services::{
            ConfigurationStore, FileTreeComposer, TemplateStage, ToolchainRunner, ToolchainStep,
            composer::CANONICAL_ENTRY_FILE, toolchain::PACKAGE_LOCATION,
        },
    },
    domain::{ApplicationMetadata, Platform, WebOsMetadata, webos_fields, webos_version_field},
    error::{PackResult, PipelineStage, StageExt},
};

/// Scratch directory the SDK builds into, inside the prepared tree.
pub const BUILD_RESULT_DIR: &str = ".buildResult";

/// LG webOS TV pipeline, packaged and signed through the SDK CLI.
pub struct WebOsAdapter {
    composer: FileTreeComposer,
    templates: TemplateStage,
    store: ConfigurationStore,
    toolchain: ToolchainRunner,
    input: Arc<dyn InputProvider>,
    sdk_command: String,
}

impl WebOsAdapter {
    pub fn new(ports: &Ports, settings: &AdapterSettings) -> Self {
        Self {
            composer: FileTreeComposer::new(ports.filesystem.clone()),
            templates: TemplateStage::new(ports.filesystem.clone(), ports.renderer.clone()),
            store: ConfigurationStore::new(ports.filesystem.clone(), &settings.state_file),
            toolchain: ToolchainRunner::new(ports.executor.clone(), ports.filesystem.clone()),
            input: ports.input.clone(),
            sdk_command: settings.sdk_command.clone(),
        }
    }

    /// Reuse the stored entry with a new version, or ask for everything.
    fn configure(&self, request: &PrepareRequest) -> PackResult<(WebOsMetadata, bool)> {
        let stored = self.store.load()?.and_then(|document| {
            match ConfigurationStore::validate(Platform::WebOs, &document) {
                Some(ApplicationMetadata::WebOs(m)) => Some(m),
                _ => None,
            }
        });

        if let Some(existing) = stored {
            let summary = ApplicationMetadata::from(existing.clone());
            if self.store.decide_reuse(self.input.as_ref(), &summary)? {
                let answers = self.input.ask(&[webos_version_field(&existing)])?;
                let metadata = existing.with_version(answers.require("version")?)?;
                return Ok((metadata, true));
            }
        }

        let answers = self.input.ask(&webos_fields(&request.defaults))?;
        Ok((WebOsMetadata::from_answers(&answers)?, false))
    }

    fn compose(&self, request: &PrepareRequest) -> PackResult<()> {
        let dest = &request.dest;
        self.composer.ensure_dir(dest)?;
        self.composer.copy_auxiliary_scripts(&request.scripts, dest)?;
        self.composer.copy_app_source(&request.www_src, dest)?;
        self.composer
            .overlay_platform_files(&request.platform_repos, dest)?;
        Ok(())
    }

    fn sdk(&self) -> CommandLine {
        CommandLine::new(&self.sdk_command)
    }

    fn steps(&self, www: &Path, build_result: &Path, request: &PackageRequest) -> PackResult<Vec<ToolchainStep>> {
        let profile_path = absolute(&request.profile_path)?;
        Ok(vec![
            ToolchainStep::new(
                "configure signing profiles",
                self.sdk().arg("cli-config").arg(format!(
                    "default.profiles.path={}",
                    profile_path.display()
                )),
            ),
            ToolchainStep::new(
                "build",
                self.sdk()
                    .args(["build-web", "-out", BUILD_RESULT_DIR, "--"])
                    .arg(www.display().to_string())
                    .current_dir(www),
            ),
            ToolchainStep::new(
                "package",
                self.sdk()
                    .args(["package", "--type", "wgt", "--sign"])
                    .arg(&request.profile_name)
                    .arg("--")
                    .arg(build_result.display().to_string())
                    .current_dir(www),
            )
            .capturing(PACKAGE_LOCATION.clone()),
        ])
    }
}

fn absolute(path: &Path) -> PackResult<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("Failed to resolve absolute path: {e}"),
        }
        .into()
    })
}

impl PlatformAdapter for WebOsAdapter {
    fn platform(&self) -> Platform {
        Platform::WebOs
    }

    #[instrument(skip_all, fields(platform = "webos", dest = %request.dest.display()))]
    fn prepare(&self, request: &PrepareRequest) -> PackResult<PrepareOutcome> {
        info!("Configuring");
        let (metadata, reused) = self.configure(request).in_stage(PipelineStage::Configuring)?;

        info!("Composing");
        self.compose(request).in_stage(PipelineStage::Composing)?;

        info!("Rendering");
        let rendered = self
            .templates
            .render_all(&request.dest, &metadata.render_context())
            .in_stage(PipelineStage::Rendering)?;

        let mut warnings = Vec::new();
        if let Some(warning) = self
            .templates
            .check_security_policy(&request.dest.join(CANONICAL_ENTRY_FILE))
        {
            warn!("{warning}");
            warnings.push(warning);
        }

        let metadata = ApplicationMetadata::from(metadata);
        self.store
            .persist(&metadata)
            .in_stage(PipelineStage::Persisting)?;

        Ok(PrepareOutcome {
            dest: request.dest.clone(),
            metadata,
            reused,
            rendered,
            warnings,
        })
    }

    fn build(&self, _prepare: &PrepareRequest, package: &PackageRequest) -> PackResult<BuildOutcome> {
        self.package(package).map(BuildOutcome::Packaged)
    }

    #[instrument(skip_all, fields(platform = "webos", www = %request.www.display()))]
    fn package(&self, request: &PackageRequest) -> PackResult<PackageOutcome> {
        let sdk_version = self
            .toolchain
            .preflight(&self.sdk().arg("version"))
            .in_stage(PipelineStage::Preflight)?;
        info!(%sdk_version, "Toolchain found");

        let www = absolute(&request.www).in_stage(PipelineStage::Invoking)?;
        let build_result = www.join(BUILD_RESULT_DIR);
        let steps = self
            .steps(&www, &build_result, request)
            .in_stage(PipelineStage::Invoking)?;

        let artifact = self
            .toolchain
            .run(&steps)
            .and_then(|artifact| {
                artifact.ok_or_else(|| {
                    ApplicationError::ArtifactNotFound {
                        step: "package".into(),
                        output: String::new(),
                    }
                    .into()
                })
            })
            .in_stage(PipelineStage::Invoking)?;

        let artifact = self
            .toolchain
            .finalize_artifact(&artifact, &request.dest, &build_result)
            .in_stage(PipelineStage::Finalizing)?;

        Ok(PackageOutcome {
            artifact,
            sdk_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        CommandOutput, Filesystem, MockCommandExecutor, MockInputProvider,
    };
    use crate::application::services::testing::{MemoryFilesystem, PlainRenderer};
    use crate::domain::{Answers, ProjectDefaults};
    use crate::error::PackError;
    use mockall::{Sequence, predicate::function};

    const STATE: &str = "/app/platforms/userconf.json";

    fn full_answers() -> Answers {
        Answers::new()
            .with("name", "Demo")
            .with("version", "1.0.0")
            .with("vendor", "Acme")
            .with("icon", "img/logo.png")
            .with("largeicon", "img/big.png")
    }

    fn prepare_request() -> PrepareRequest {
        PrepareRequest {
            www_src: "/app/www".into(),
            dest: "/app/platforms/webos/www".into(),
            platform_repos: "/app/platforms/webos".into(),
            scripts: [("webOSTVjs/webOSTV.js".to_string(), PathBuf::from("/lib/webOSTV.js"))]
                .into_iter()
                .collect(),
            defaults: ProjectDefaults::default(),
        }
    }

    fn package_request() -> PackageRequest {
        PackageRequest {
            www: "/app/platforms/webos/www".into(),
            dest: "/app/platforms/webos/build".into(),
            profile_path: "/home/dev/profiles".into(),
            profile_name: "release".into(),
        }
    }

    fn project() -> MemoryFilesystem {
        MemoryFilesystem::new()
            .with_file("/app/www/index.html", "<html></html>")
            .with_file("/lib/webOSTV.js", "lib")
            .with_file(
                "/app/platforms/webos/www/appinfo.json.tmpl",
                r#"{"title":"{{name}}","version":"{{version}}","vendor":"{{vendor}}"}"#,
            )
            .with_file("/app/platforms/webos/www/.keep", "")
    }

    fn adapter(
        fs: &MemoryFilesystem,
        input: MockInputProvider,
        executor: MockCommandExecutor,
    ) -> WebOsAdapter {
        let ports = Ports {
            filesystem: fs.shared(),
            renderer: Arc::new(PlainRenderer),
            input: Arc::new(input),
            executor: Arc::new(executor),
        };
        WebOsAdapter::new(&ports, &AdapterSettings {
            state_file: STATE.into(),
            ..AdapterSettings::default()
        })
    }

    #[test]
    fn prepare_asks_all_fields_without_state() {
        let fs = project();
        let mut input = MockInputProvider::new();
        input.expect_confirm().never();
        input
            .expect_ask()
            .withf(|fields| fields.len() == 5)
            .times(1)
            .returning(|_| Ok(full_answers()));

        let outcome = adapter(&fs, input, MockCommandExecutor::new())
            .prepare(&prepare_request())
            .unwrap();

        assert!(!outcome.reused);
        assert_eq!(
            fs.read("/app/platforms/webos/www/appinfo.json").as_deref(),
            Some(r#"{"title":"Demo","version":"1.0.0","vendor":"Acme"}"#)
        );
        assert!(!fs.exists(Path::new("/app/platforms/webos/www/appinfo.json.tmpl")));
        assert_eq!(
            fs.read("/app/platforms/webos/www/webOSTVjs/webOSTV.js").as_deref(),
            Some("lib")
        );
        assert!(fs.read(STATE).unwrap().contains("\"largeicon\": \"img/big.png\""));
    }

    #[test]
    fn prepare_reuses_stored_entry_with_next_revision() {
        let fs = project().with_file(
            STATE,
            r#"{"webos": {"name": "Demo", "version": "1.2.3", "vendor": "Acme", "icon": "a.png", "largeicon": "b.png"}, "orsay": {"name": "Keep"}}"#,
        );
        let mut input = MockInputProvider::new();
        input.expect_show().times(1).returning(|_| Ok(()));
        input.expect_confirm().times(1).returning(|_, _| Ok(true));
        input
            .expect_ask()
            .withf(|fields| fields.len() == 1 && fields[0].default.as_deref() == Some("1.2.4"))
            .times(1)
            .returning(|_| Ok(Answers::new().with("version", "1.2.4")));

        let outcome = adapter(&fs, input, MockCommandExecutor::new())
            .prepare(&prepare_request())
            .unwrap();

        assert!(outcome.reused);
        assert_eq!(outcome.metadata.version(), "1.2.4");
        let state = fs.read(STATE).unwrap();
        assert!(state.contains("\"version\": \"1.2.4\""));
        assert!(state.contains("\"Keep\""));
    }

    #[test]
    fn declining_reuse_asks_everything() {
        let fs = project().with_file(
            STATE,
            r#"{"webos": {"name": "Demo", "version": "1.2.3", "vendor": "Acme", "icon": "a.png", "largeicon": "b.png"}}"#,
        );
        let mut input = MockInputProvider::new();
        input.expect_show().returning(|_| Ok(()));
        input.expect_confirm().returning(|_, _| Ok(false));
        input
            .expect_ask()
            .withf(|fields| fields.len() == 5)
            .times(1)
            .returning(|_| Ok(full_answers()));

        let outcome = adapter(&fs, input, MockCommandExecutor::new())
            .prepare(&prepare_request())
            .unwrap();
        assert!(!outcome.reused);
        assert_eq!(outcome.metadata.version(), "1.0.0");
    }

    #[test]
    fn corrupt_state_aborts_configuring() {
        let fs = project().with_file(STATE, "not json");
        let mut input = MockInputProvider::new();
        input.expect_ask().never();

        let err = adapter(&fs, input, MockCommandExecutor::new())
            .prepare(&prepare_request())
            .unwrap_err();
        assert_eq!(err.stage(), Some(PipelineStage::Configuring));
        assert!(matches!(
            err.as_application(),
            Some(ApplicationError::CorruptState { .. })
        ));
    }

    #[test]
    fn csp_meta_produces_warning() {
        let fs = project().with_file(
            "/app/www/index.html",
            r#"<meta http-equiv="Content-Security-Policy" content="default-src 'self'">"#,
        );
        let mut input = MockInputProvider::new();
        input.expect_ask().returning(|_| Ok(full_answers()));

        let outcome = adapter(&fs, input, MockCommandExecutor::new())
            .prepare(&prepare_request())
            .unwrap();
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn package_runs_sdk_and_moves_artifact() {
        let fs = project();
        let www = std::path::absolute("/app/platforms/webos/www").unwrap();
        let built = www.join(".buildResult/Demo.wgt");
        fs.create_dir_all(&www.join(".buildResult")).unwrap();
        fs.write_file(&built, "signed").unwrap();

        let mut executor = MockCommandExecutor::new();
        let mut seq = Sequence::new();
        executor
            .expect_execute()
            .withf(|c| c.args == ["version"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandOutput::success("2.5.25")));
        executor
            .expect_execute()
            .withf(|c| c.args[0] == "cli-config" && c.args[1] == "default.profiles.path=/home/dev/profiles")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandOutput::success("")));
        executor
            .expect_execute()
            .withf(|c| c.args[..4] == ["build-web", "-out", ".buildResult", "--"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandOutput::success("built")));
        let location = built.display().to_string();
        executor
            .expect_execute()
            .withf(|c| c.args.contains(&"release".to_string()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| {
                Ok(CommandOutput::success(format!("Package File Location: {location}")))
            });

        let outcome = adapter(&fs, MockInputProvider::new(), executor)
            .package(&package_request())
            .unwrap();

        assert_eq!(outcome.sdk_version, "2.5.25");
        assert_eq!(outcome.artifact, PathBuf::from("/app/platforms/webos/build/Demo.wgt"));
        assert_eq!(fs.read(&outcome.artifact).as_deref(), Some("signed"));
        assert!(!fs.exists(&www.join(".buildResult")));
    }

    #[test]
    fn failed_preflight_runs_nothing_else() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .times(1)
            .returning(|_| Ok(CommandOutput::failure(127, "command not found")));

        let fs = MemoryFilesystem::new();
        let err = adapter(&fs, MockInputProvider::new(), executor)
            .build(&prepare_request(), &package_request())
            .unwrap_err();

        assert_eq!(err.stage(), Some(PipelineStage::Preflight));
        assert!(matches!(err.root(), PackError::Application(ApplicationError::PreflightFailure { .. })));
    }

    #[test]
    fn build_failure_surfaces_step_and_output() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .with(function(|c: &CommandLine| c.args == ["version"]))
            .returning(|_| Ok(CommandOutput::success("2.5.25")));
        executor
            .expect_execute()
            .with(function(|c: &CommandLine| c.args[0] == "cli-config"))
            .returning(|_| Ok(CommandOutput::success("")));
        executor
            .expect_execute()
            .with(function(|c: &CommandLine| c.args[0] == "build-web"))
            .times(1)
            .returning(|_| Ok(CommandOutput::failure(1, "syntax error in app.js")));
        executor
            .expect_execute()
            .with(function(|c: &CommandLine| c.args[0] == "package"))
            .never();

        let fs = MemoryFilesystem::new();
        let err = adapter(&fs, MockInputProvider::new(), executor)
            .package(&package_request())
            .unwrap_err();

        assert_eq!(err.stage(), Some(PipelineStage::Invoking));
        assert!(err.suggestions().iter().any(|s| s.contains("syntax error")));
    }
}
