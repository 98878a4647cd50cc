//! `tvpack config` — inspect configuration values.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, config_error},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: &ConfigCommands,
    config_file: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised = toml::to_string_pretty(&config)
                .map_err(|e| config_error(format!("Failed to serialise config: {e}"), e))?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path(config_file).display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key. Strings print bare; tables and arrays as TOML.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let root = toml::Value::try_from(config)
        .map_err(|e| config_error(format!("Failed to serialise config: {e}"), e))?;

    let unknown = || CliError::UnknownConfigKey { key: key.into() };
    let mut value = &root;
    for part in key.split('.') {
        value = value.get(part).ok_or_else(unknown)?;
    }

    Ok(match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(table) => toml::to_string_pretty(table)
            .map_err(|e| config_error(format!("Failed to serialise '{key}': {e}"), e))?
            .trim_end()
            .to_string(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_string_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "webos.sdk_command").unwrap(), "tizen");
        assert_eq!(
            get_config_value(&cfg, "paths.state_file").unwrap(),
            "platforms/userconf.json"
        );
    }

    #[test]
    fn get_bool_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }

    #[test]
    fn get_section_prints_its_keys() {
        let cfg = AppConfig::default();
        let section = get_config_value(&cfg, "orsay").unwrap();
        assert!(section.contains("platform_repo"));
        assert!(section.contains("dest"));
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::UnknownConfigKey { .. })
        ));
        assert!(matches!(
            get_config_value(&cfg, "webos.sdk_command.extra"),
            Err(CliError::UnknownConfigKey { .. })
        ));
    }
}
