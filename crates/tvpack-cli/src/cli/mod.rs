//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tvpack_core::domain::Platform;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "tvpack",
    bin_name = "tvpack",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Package web applications for Samsung Orsay and LG webOS TVs",
    long_about = "tvpack prepares a web application for a TV platform: it asks for \
                  the platform metadata, composes the platform tree, expands its \
                  templates and, for webOS, drives the SDK to produce a signed package.",
    after_help = "EXAMPLES:\n\
        \x20 tvpack prepare --platform webos\n\
        \x20 tvpack build   --platform orsay --www app/www\n\
        \x20 tvpack package --platform webos --profile-name release\n\
        \x20 tvpack completions bash > /usr/share/bash-completion/completions/tvpack",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve metadata and compose the platform tree.
    #[command(
        about = "Prepare the platform tree",
        after_help = "EXAMPLES:\n\
            \x20 tvpack prepare --platform webos\n\
            \x20 tvpack prepare --platform orsay --dest build/orsay\n\
            \x20 tvpack -y prepare --platform webos   # accept stored/default answers"
    )]
    Prepare(PlatformArgs),

    /// Run the platform's full build.
    #[command(
        about = "Build for a platform",
        long_about = "Run the platform's full build. For Orsay this prepares the \
                      platform tree; for webOS it packages the already prepared tree.",
        after_help = "EXAMPLES:\n\
            \x20 tvpack build --platform orsay\n\
            \x20 tvpack build --platform webos --profile-name release"
    )]
    Build(PlatformArgs),

    /// Produce a signed installable artifact.
    #[command(
        about = "Package a prepared tree",
        after_help = "EXAMPLES:\n\
            \x20 tvpack package --platform webos\n\
            \x20 tvpack package --platform webos --profile-path ~/tizen/profiles.xml --profile-name dev"
    )]
    Package(PlatformArgs),

    /// Write a default `tvpack.toml`.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 tvpack init           # ./tvpack.toml\n\
            \x20 tvpack init --global  # per-user configuration"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tvpack completions bash > ~/.local/share/bash-completion/completions/tvpack\n\
            \x20 tvpack completions zsh  > ~/.zfunc/_tvpack\n\
            \x20 tvpack completions fish > ~/.config/fish/completions/tvpack.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 tvpack config get webos.sdk_command\n\
            \x20 tvpack config list\n\
            \x20 tvpack config path"
    )]
    Config(ConfigCommands),
}

// ── prepare / build / package ─────────────────────────────────────────────────

/// Arguments shared by the pipeline commands.
#[derive(Debug, Args)]
pub struct PlatformArgs {
    /// Target platform.
    #[arg(
        short = 'p',
        long = "platform",
        value_name = "PLATFORM",
        value_enum,
        help = "Target TV platform"
    )]
    pub platform: PlatformArg,

    #[command(flatten)]
    pub paths: PathOverrides,
}

/// Per-invocation overrides of the `[paths]`, `[orsay]` and `[webos]`
/// configuration sections.
#[derive(Debug, Default, Args)]
pub struct PathOverrides {
    /// Application source tree.
    #[arg(long = "www", value_name = "DIR", help = "Application source tree")]
    pub www: Option<PathBuf>,

    /// Platform tree produced by `prepare` and consumed by `package`.
    #[arg(long = "dest", value_name = "DIR", help = "Prepared platform tree")]
    pub dest: Option<PathBuf>,

    #[arg(
        long = "platform-repo",
        value_name = "DIR",
        help = "Platform repository whose www/ is overlaid onto the tree"
    )]
    pub platform_repo: Option<PathBuf>,

    #[arg(
        long = "state-file",
        value_name = "FILE",
        help = "JSON file remembering metadata between runs"
    )]
    pub state_file: Option<PathBuf>,

    #[arg(
        long = "build-dest",
        value_name = "DIR",
        help = "Directory receiving the signed package (webOS)"
    )]
    pub build_dest: Option<PathBuf>,

    #[arg(
        long = "profile-path",
        value_name = "PATH",
        help = "Signing profiles location (webOS)"
    )]
    pub profile_path: Option<PathBuf>,

    #[arg(
        long = "profile-name",
        value_name = "NAME",
        help = "Signing profile to package with (webOS)"
    )]
    pub profile_name: Option<String>,
}

/// Platforms accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    /// Samsung Orsay (legacy Smart TV).
    Orsay,
    /// LG webOS TV. Also accepted as `tv-webos`.
    #[value(name = "webos", alias = "tv-webos")]
    WebOs,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Orsay => Platform::Orsay,
            PlatformArg::WebOs => Platform::WebOs,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the per-user config location instead of `./tvpack.toml`.
    #[arg(long = "global", help = "Create per-user configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `webos.sdk_command`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_prepare_command() {
        let cli = Cli::parse_from(["tvpack", "prepare", "--platform", "orsay"]);
        match cli.command {
            Commands::Prepare(args) => assert_eq!(args.platform, PlatformArg::Orsay),
            other => panic!("expected Prepare, got {other:?}"),
        }
    }

    #[test]
    fn tv_webos_alias() {
        let cli = Cli::parse_from(["tvpack", "package", "-p", "tv-webos"]);
        let Commands::Package(args) = cli.command else {
            panic!("expected Package command");
        };
        assert_eq!(Platform::from(args.platform), Platform::WebOs);
    }

    #[test]
    fn overrides_are_optional() {
        let cli = Cli::parse_from([
            "tvpack",
            "build",
            "--platform",
            "webos",
            "--profile-name",
            "release",
        ]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.paths.profile_name.as_deref(), Some("release"));
        assert!(args.paths.www.is_none());
        assert!(args.paths.dest.is_none());
    }

    #[test]
    fn platform_is_required() {
        assert!(Cli::try_parse_from(["tvpack", "prepare"]).is_err());
        assert!(Cli::try_parse_from(["tvpack", "prepare", "-p", "tizen"]).is_err());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["tvpack", "prepare", "-p", "orsay", "-y", "-vv"]);
        assert!(cli.global.non_interactive);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["tvpack", "--quiet", "--verbose", "config", "path"]);
        assert!(result.is_err());
    }
}
