//! `tvpack prepare | build | package`.
//!
//! Responsibility: turn CLI arguments and configuration into pipeline
//! requests, call the core packaging service, and display results. No
//! packaging logic lives here.

use std::sync::Arc;

use tracing::{info, instrument};
use tvpack_adapters::{LocalFilesystem, SimpleRenderer, SystemCommandExecutor};
use tvpack_core::application::{
    AdapterSettings, BuildOutcome, PackageOutcome, PackageRequest, PackagingService, Ports,
    PrepareOutcome, PrepareRequest,
};
use tvpack_core::domain::{Platform, ProjectDefaults};

use crate::{
    cli::{GlobalArgs, PathOverrides, PlatformArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    prompt,
};

/// Which pipeline entry point to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Prepare,
    Build,
    Package,
}

impl Operation {
    fn runs_toolchain(self, platform: Platform) -> bool {
        platform == Platform::WebOs && self != Operation::Prepare
    }

    /// Attended runs echo SDK output live, which a spinner would draw over.
    fn shows_spinner(self, platform: Platform, attended: bool) -> bool {
        self.runs_toolchain(platform) && !attended
    }
}

#[instrument(skip_all, fields(operation = ?operation, platform = ?args.platform))]
pub fn execute(
    operation: Operation,
    args: &PlatformArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let platform = Platform::from(args.platform);
    let attended = prompt::attended(global.non_interactive);
    let service = PackagingService::new(
        Ports {
            filesystem: Arc::new(LocalFilesystem::new()),
            renderer: Arc::new(SimpleRenderer::new()),
            input: prompt::select(global.non_interactive),
            executor: Arc::new(SystemCommandExecutor::new().echoing(attended)),
        },
        adapter_settings(&args.paths, &config),
    );

    output.header(&format!(
        "{} {}",
        match operation {
            Operation::Prepare => "Preparing",
            Operation::Build => "Building",
            Operation::Package => "Packaging",
        },
        platform.display_name()
    ))?;

    let spinner = operation
        .shows_spinner(platform, attended)
        .then(|| output.spinner(format!("Running {} toolchain...", platform.display_name())));

    let result = match operation {
        Operation::Prepare => service
            .prepare(platform, &prepare_request(platform, &args.paths, &config))
            .map(BuildOutcome::Prepared),
        Operation::Build => service.build(
            platform,
            &prepare_request(platform, &args.paths, &config),
            &package_request(&args.paths, &config),
        ),
        Operation::Package => service
            .package(platform, &package_request(&args.paths, &config))
            .map(BuildOutcome::Packaged),
    };

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result? {
        BuildOutcome::Prepared(outcome) => report_prepared(&outcome, &output)?,
        BuildOutcome::Packaged(outcome) => report_packaged(&outcome, &output)?,
    }
    info!(platform = %platform, "Command finished");
    Ok(())
}

// ── request construction ─────────────────────────────────────────────────────

fn adapter_settings(paths: &PathOverrides, config: &AppConfig) -> AdapterSettings {
    AdapterSettings {
        state_file: paths
            .state_file
            .clone()
            .unwrap_or_else(|| config.paths.state_file.clone()),
        sdk_command: config.webos.sdk_command.clone(),
    }
}

fn prepare_request(platform: Platform, paths: &PathOverrides, config: &AppConfig) -> PrepareRequest {
    let scripts = match platform {
        Platform::WebOs => config
            .webos
            .scripts
            .iter()
            .map(|s| (s.target.clone(), s.source.clone()))
            .collect(),
        Platform::Orsay => Default::default(),
    };

    PrepareRequest {
        www_src: paths.www.clone().unwrap_or_else(|| config.paths.www.clone()),
        dest: paths
            .dest
            .clone()
            .unwrap_or_else(|| config.dest(platform).to_path_buf()),
        platform_repos: paths
            .platform_repo
            .clone()
            .unwrap_or_else(|| config.platform_repo(platform).to_path_buf()),
        scripts,
        defaults: ProjectDefaults::from(&config.project),
    }
}

/// `package` reads the prepared tree, so `--dest` names its input.
fn package_request(paths: &PathOverrides, config: &AppConfig) -> PackageRequest {
    PackageRequest {
        www: paths.dest.clone().unwrap_or_else(|| config.webos.dest.clone()),
        dest: paths
            .build_dest
            .clone()
            .unwrap_or_else(|| config.webos.build_dest.clone()),
        profile_path: paths
            .profile_path
            .clone()
            .unwrap_or_else(|| config.webos.profile_path.clone()),
        profile_name: paths
            .profile_name
            .clone()
            .unwrap_or_else(|| config.webos.profile_name.clone()),
    }
}

// ── reporting ────────────────────────────────────────────────────────────────

fn report_prepared(outcome: &PrepareOutcome, output: &OutputManager) -> CliResult<()> {
    for warning in &outcome.warnings {
        output.warning(warning)?;
    }
    if outcome.reused {
        output.info("Reused the stored configuration")?;
    }
    for file in &outcome.rendered {
        output.info(&format!("Rendered {}", file.display()))?;
    }
    output.success(&format!(
        "Prepared {} at {}",
        outcome.metadata,
        outcome.dest.display()
    ))?;
    Ok(())
}

fn report_packaged(outcome: &PackageOutcome, output: &OutputManager) -> CliResult<()> {
    output.info(&format!("SDK version: {}", outcome.sdk_version))?;
    output.success(&format!("Package created at {}", outcome.artifact.display()))?;
    Ok(())
}
