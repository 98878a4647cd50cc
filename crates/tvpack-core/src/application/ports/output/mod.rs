//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external systems.
//! The `tvpack-adapters` crate provides the filesystem, renderer and process
//! implementations; the CLI provides the input providers.

mod process;

pub use process::{CommandLine, CommandOutput};

use std::path::Path;

use crate::domain::{Answers, FieldDescriptor, RenderContext};
use crate::error::PackResult;

/// An entry returned by [`Filesystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    /// Leading-dot entries are skipped by shell globs.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `tvpack_adapters::filesystem::LocalFilesystem` (production)
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a single directory. The parent must exist.
    fn create_dir(&self, path: &Path) -> PackResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PackResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PackResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> PackResult<()>;

    /// Immediate entries of a directory, sorted by name.
    fn list_dir(&self, path: &Path) -> PackResult<Vec<DirEntry>>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> PackResult<String>;

    /// Read a file, replacing invalid UTF-8 sequences.
    fn read_lossy(&self, path: &Path) -> PackResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> PackResult<()>;

    /// Copy a single file, overwriting `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> PackResult<()>;

    /// Copy a file or a whole directory tree to `to`, merging into an existing
    /// directory and overwriting same-named files.
    fn copy_recursive(&self, from: &Path, to: &Path) -> PackResult<()>;

    /// Rename within a filesystem, replacing `to`.
    fn rename(&self, from: &Path, to: &Path) -> PackResult<()>;

    /// Move a file, falling back to copy + delete across filesystems.
    fn move_file(&self, from: &Path, to: &Path) -> PackResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `tvpack_adapters::renderer::SimpleRenderer` (mustache-style interpolation)
pub trait TemplateRenderer: Send + Sync {
    /// Expand `template` against `context`. Pure; no side effects.
    fn render(&self, template: &str, context: &RenderContext) -> PackResult<String>;
}

/// Port for obtaining metadata from the operator.
///
/// Implemented by the CLI (terminal prompts, defaults-only mode).
#[cfg_attr(test, mockall::automock)]
pub trait InputProvider: Send + Sync {
    /// Ask every field in order and return validated answers.
    ///
    /// Implementations must never return a value that fails the field's
    /// validator; interactive ones re-ask, others fail.
    fn ask(&self, fields: &[FieldDescriptor]) -> PackResult<Answers>;

    /// Ask a yes/no question.
    fn confirm(&self, message: &str, default: bool) -> PackResult<bool>;

    /// Show informational lines before a question.
    fn show(&self, lines: &[String]) -> PackResult<()>;
}

/// Port for running external commands.
///
/// Implemented by:
/// - `tvpack_adapters::process::SystemCommandExecutor` (std::process)
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor: Send + Sync {
    /// Run to completion and capture output. `Err` only when the process could
    /// not be started; a nonzero exit is reported through [`CommandOutput`].
    fn execute(&self, command: &CommandLine) -> PackResult<CommandOutput>;
}
