//! `tvpack init` — create a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, config_error, io_error},
    output::OutputManager,
};

/// Write the built-in defaults to `./tvpack.toml`, or the per-user file with
/// `--global`. An existing file is left alone unless `--force` is given.
pub fn execute(args: &InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(args.global)?;

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| config_error(format!("Failed to serialise default config: {e}"), e))?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create directory", parent, e))?;
    }
    std::fs::write(&config_path, toml).map_err(|e| io_error("write", &config_path, e))?;

    output.success(&format!("Configuration created at {}", config_path.display()))?;
    Ok(())
}

fn target_path(global: bool) -> CliResult<PathBuf> {
    if !global {
        return Ok(PathBuf::from(LOCAL_CONFIG_FILE));
    }
    AppConfig::user_config_path().ok_or_else(|| CliError::ConfigError {
        message: "No home directory found for a per-user configuration".into(),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_target_is_relative_file() {
        assert_eq!(target_path(false).unwrap(), PathBuf::from("tvpack.toml"));
    }

    #[test]
    fn default_config_is_loadable() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tvpack.toml");
        std::fs::write(&path, toml::to_string_pretty(&AppConfig::default()).unwrap()).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.webos.sdk_command, AppConfig::default().webos.sdk_command);
        assert_eq!(loaded.project, AppConfig::default().project);
    }
}
