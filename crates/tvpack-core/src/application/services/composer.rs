//! File tree composition: clean, copy and overlay per platform layout.
//!
//! Every operation here is safe to repeat: running the same composition twice
//! against the same inputs yields the same destination tree.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    error::PackResult,
};

/// The file a TV runtime loads first.
pub const CANONICAL_ENTRY_FILE: &str = "index.html";

/// Directory inside a platform repository holding the overlay files.
pub const PLATFORM_WEB_DIR: &str = "www";

/// Builds destination trees from the application source and platform overlays.
pub struct FileTreeComposer {
    filesystem: Arc<dyn Filesystem>,
}

impl FileTreeComposer {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Remove `dest` and everything below it. Absent is fine.
    #[instrument(skip(self), fields(dest = %dest.display()))]
    pub fn clean(&self, dest: &Path) -> PackResult<()> {
        if self.filesystem.exists(dest) {
            self.filesystem.remove_dir_all(dest)?;
            debug!("Removed previous output");
        }
        Ok(())
    }

    /// Create every missing segment of `dest`, root to leaf.
    pub fn ensure_dir(&self, dest: &Path) -> PackResult<()> {
        let mut missing: Vec<&Path> = dest
            .ancestors()
            .take_while(|p| !p.as_os_str().is_empty() && !self.filesystem.exists(p))
            .collect();
        missing.reverse();

        for segment in missing {
            debug!(path = %segment.display(), "Creating directory");
            self.filesystem.create_dir(segment)?;
        }
        Ok(())
    }

    /// Copy the visible top-level entries of `www_src` into `dest`.
    ///
    /// Returns the number of entries copied.
    #[instrument(skip(self), fields(src = %www_src.display(), dest = %dest.display()))]
    pub fn copy_app_source(&self, www_src: &Path, dest: &Path) -> PackResult<usize> {
        let entries = self.filesystem.list_dir(www_src)?;
        let mut copied = 0;
        for entry in entries.iter().filter(|e| !e.is_hidden()) {
            self.filesystem
                .copy_recursive(&www_src.join(&entry.name), &dest.join(&entry.name))?;
            copied += 1;
        }
        debug!(copied, "Application source copied");
        Ok(copied)
    }

    /// Rename the declared entry file to `index.html`.
    ///
    /// Returns `true` when a rename happened.
    pub fn promote_entry_file(&self, dest: &Path, declared: &str) -> PackResult<bool> {
        if declared == CANONICAL_ENTRY_FILE {
            return Ok(false);
        }

        let canonical = dest.join(CANONICAL_ENTRY_FILE);
        if self.filesystem.exists(&canonical) {
            return Err(ApplicationError::ConflictingEntryFile {
                dest: dest.to_path_buf(),
                declared: declared.to_string(),
            }
            .into());
        }

        self.filesystem.rename(&dest.join(declared), &canonical)?;
        debug!(from = declared, "Promoted entry file to {}", CANONICAL_ENTRY_FILE);
        Ok(true)
    }

    /// Superimpose `<platform_repos>/www` onto `dest`; overlay files win.
    ///
    /// Visible entries are copied first, then dot-entries, so files such as
    /// `.htaccess` are never skipped.
    #[instrument(skip(self), fields(repo = %platform_repos.display(), dest = %dest.display()))]
    pub fn overlay_platform_files(&self, platform_repos: &Path, dest: &Path) -> PackResult<usize> {
        let overlay = platform_repos.join(PLATFORM_WEB_DIR);
        let entries = self.filesystem.list_dir(&overlay)?;

        let (hidden, visible): (Vec<_>, Vec<_>) = entries.iter().partition(|e| e.is_hidden());
        for entry in visible.iter().chain(hidden.iter()) {
            self.filesystem
                .copy_recursive(&overlay.join(&entry.name), &dest.join(&entry.name))?;
        }
        debug!(visible = visible.len(), hidden = hidden.len(), "Overlay applied");
        Ok(entries.len())
    }

    /// Copy single helper files into `dest`, keyed by their dest-relative name.
    pub fn copy_auxiliary_scripts(
        &self,
        scripts: &BTreeMap<String, PathBuf>,
        dest: &Path,
    ) -> PackResult<()> {
        for (name, source) in scripts {
            let target = dest.join(name);
            if let Some(parent) = target.parent() {
                if !self.filesystem.exists(parent) {
                    self.filesystem.create_dir_all(parent)?;
                }
            }
            debug!(script = %name, "Copying auxiliary script");
            self.filesystem.copy_file(source, &target)?;
        }
        Ok(())
    }
}
