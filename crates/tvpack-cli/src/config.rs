//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the requests built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `TVPACK_*` environment variables, `__` between section and key
//!    (`TVPACK_WEBOS__SDK_COMMAND=tizen`)
//! 3. Config file: `--config`, else `./tvpack.toml`, else the per-user file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tvpack_core::domain::{Platform, ProjectDefaults};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tvpack.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults offered by the metadata prompts.
    pub project: ProjectSection,
    pub paths: PathsSection,
    pub orsay: OrsaySection,
    pub webos: WebOsSection,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub name: String,
    pub version: String,
    /// Entry file the application declares; promoted to `index.html` on Orsay.
    pub content_src: String,
    pub author_name: String,
    pub author_email: String,
    pub author_href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Application source tree.
    pub www: PathBuf,
    /// Metadata remembered between runs.
    pub state_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrsaySection {
    pub platform_repo: PathBuf,
    pub dest: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebOsSection {
    pub platform_repo: PathBuf,
    /// Prepared tree; also the input of `package`.
    pub dest: PathBuf,
    /// Where the signed package ends up.
    pub build_dest: PathBuf,
    pub profile_path: PathBuf,
    pub profile_name: String,
    pub sdk_command: String,
    /// Single files copied into the prepared tree before the app source.
    pub scripts: Vec<ScriptEntry>,
}

/// `[[webos.scripts]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Name inside the prepared tree.
    pub target: String,
    pub source: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        let defaults = ProjectDefaults::default();
        Self {
            name: defaults.name,
            version: defaults.version,
            content_src: defaults.content_src,
            author_name: defaults.author_name,
            author_email: defaults.author_email,
            author_href: defaults.author_href,
        }
    }
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            www: PathBuf::from("www"),
            state_file: PathBuf::from("platforms/userconf.json"),
        }
    }
}

impl Default for OrsaySection {
    fn default() -> Self {
        Self {
            platform_repo: PathBuf::from("platforms/orsay/repo"),
            dest: PathBuf::from("platforms/orsay/www"),
        }
    }
}

impl Default for WebOsSection {
    fn default() -> Self {
        Self {
            platform_repo: PathBuf::from("platforms/webos/repo"),
            dest: PathBuf::from("platforms/webos/www"),
            build_dest: PathBuf::from("platforms/webos/build"),
            profile_path: PathBuf::from("platforms/webos/profiles.xml"),
            profile_name: "tvpack".into(),
            sdk_command: "tizen".into(),
            scripts: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl From<&ProjectSection> for ProjectDefaults {
    fn from(p: &ProjectSection) -> Self {
        Self {
            name: p.name.clone(),
            version: p.version.clone(),
            content_src: p.content_src.clone(),
            author_name: p.author_name.clone(),
            author_email: p.author_email.clone(),
            author_href: p.author_href.clone(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to seed built-in defaults")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path(None).as_path()).required(false),
        };

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(Environment::with_prefix("TVPACK").separator("__"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path of the active configuration file.
    ///
    /// An explicit path wins; otherwise `./tvpack.toml` when present, then the
    /// per-user file from `directories::ProjectDirs`.
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        Self::user_config_path().unwrap_or(local)
    }

    /// Per-user configuration file, if the platform has a home directory.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "tvpack", "tvpack")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The platform repository configured for `platform`.
    pub fn platform_repo(&self, platform: Platform) -> &Path {
        match platform {
            Platform::Orsay => &self.orsay.platform_repo,
            Platform::WebOs => &self.webos.platform_repo,
        }
    }

    /// The prepared tree configured for `platform`.
    pub fn dest(&self, platform: Platform) -> &Path {
        match platform {
            Platform::Orsay => &self.orsay.dest,
            Platform::WebOs => &self.webos.dest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(ProjectDefaults::from(&cfg.project), ProjectDefaults::default());
        assert_eq!(cfg.paths.state_file, PathBuf::from("platforms/userconf.json"));
        assert_eq!(cfg.webos.sdk_command, "tizen");
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[project]
name = "Player"
content_src = "main.html"

[webos]
profile_name = "release"

[[webos.scripts]]
target = "webOSTV.js"
source = "lib/webOSTV.js"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.project.name, "Player");
        assert_eq!(cfg.project.content_src, "main.html");
        // untouched keys keep their defaults
        assert_eq!(cfg.project.version, "1.0.0");
        assert_eq!(cfg.webos.profile_name, "release");
        assert_eq!(cfg.webos.sdk_command, "tizen");
        assert_eq!(
            cfg.webos.scripts,
            [ScriptEntry {
                target: "webOSTV.js".into(),
                source: PathBuf::from("lib/webOSTV.js"),
            }]
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/here/tvpack.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn explicit_config_path_wins() {
        let p = Path::new("/etc/tvpack.toml");
        assert_eq!(AppConfig::config_path(Some(p)), p);
    }

    #[test]
    fn per_platform_paths() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.dest(Platform::Orsay), Path::new("platforms/orsay/www"));
        assert_eq!(
            cfg.platform_repo(Platform::WebOs),
            Path::new("platforms/webos/repo")
        );
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = AppConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}
