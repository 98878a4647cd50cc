//! Local filesystem adapter using std::fs and walkdir.

use std::{fs, io, path::Path};

use tracing::debug;
use tvpack_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, Filesystem},
    },
    error::{PackError, PackResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir(&self, path: &Path) -> PackResult<()> {
        match fs::create_dir(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(e) => Err(map_io_error(path, e, "create directory")),
        }
    }

    fn create_dir_all(&self, path: &Path) -> PackResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> PackResult<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error(path, e, "remove directory")),
        }
    }

    fn remove_file(&self, path: &Path) -> PackResult<()> {
        fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn list_dir(&self, path: &Path) -> PackResult<Vec<DirEntry>> {
        let reader = fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                // follows symlinks, like a shell glob would
                is_dir: entry.path().is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> PackResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn read_lossy(&self, path: &Path) -> PackResult<String> {
        fs::read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PackResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> PackResult<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, &format!("copy to {}", to.display())))
    }

    fn copy_recursive(&self, from: &Path, to: &Path) -> PackResult<()> {
        if from.is_file() {
            return self.copy_file(from, to);
        }

        for entry in WalkDir::new(from).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(from).to_path_buf();
                let reason = e
                    .into_io_error()
                    .map_or_else(|| "filesystem loop".to_string(), |io| io.to_string());
                PackError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk directory: {reason}"),
                })
            })?;

            let relative = entry.path().strip_prefix(from).map_err(|e| PackError::Internal {
                message: format!("walked outside {}: {e}", from.display()),
            })?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)
                    .map_err(|e| map_io_error(&target, e, "create directory"))?;
            } else {
                fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(&target, e, "copy file"))?;
            }
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> PackResult<()> {
        fs::rename(from, to)
            .map_err(|e| map_io_error(from, e, &format!("rename to {}", to.display())))
    }

    fn move_file(&self, from: &Path, to: &Path) -> PackResult<()> {
        if let Err(e) = fs::rename(from, to) {
            // rename fails across mount points
            debug!(error = %e, "Rename failed, copying instead");
            self.copy_file(from, to)?;
            self.remove_file(from)?;
        }
        Ok(())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PackError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
