//! In-memory port implementations for service unit tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::{
    application::{
        ApplicationError,
        ports::{DirEntry, Filesystem, TemplateRenderer},
    },
    domain::RenderContext,
    error::PackResult,
};

#[derive(Debug, Default)]
struct Tree {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl Tree {
    fn is_dir(&self, path: &Path) -> bool {
        path.parent().is_none() || self.directories.contains(path)
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.is_dir(parent),
            _ => true,
        }
    }
}

fn missing(path: &Path, what: &str) -> crate::error::PackError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("{what} does not exist"),
    }
    .into()
}

/// Shared in-memory filesystem. Clones see the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<Mutex<Tree>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parents.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent).unwrap();
        }
        self.write_file(path, content).unwrap();
        self
    }

    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.create_dir_all(path.as_ref()).unwrap();
        self
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.inner.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn shared(&self) -> Arc<dyn Filesystem> {
        Arc::new(self.clone())
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let tree = self.inner.lock().unwrap();
        tree.files.contains_key(path) || tree.is_dir(path)
    }

    fn create_dir(&self, path: &Path) -> PackResult<()> {
        let mut tree = self.inner.lock().unwrap();
        if !tree.parent_exists(path) {
            return Err(missing(path, "parent directory"));
        }
        tree.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> PackResult<()> {
        let mut tree = self.inner.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.parent().is_some() {
                tree.directories.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> PackResult<()> {
        let mut tree = self.inner.lock().unwrap();
        tree.directories.retain(|d| !d.starts_with(path));
        tree.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> PackResult<()> {
        let mut tree = self.inner.lock().unwrap();
        tree.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| missing(path, "file"))
    }

    fn list_dir(&self, path: &Path) -> PackResult<Vec<DirEntry>> {
        let tree = self.inner.lock().unwrap();
        if !tree.is_dir(path) {
            return Err(missing(path, "directory"));
        }
        let child = |p: &PathBuf| {
            (p.parent() == Some(path))
                .then(|| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .flatten()
        };
        let mut entries: Vec<DirEntry> = tree
            .directories
            .iter()
            .filter_map(|d| child(d).map(|name| DirEntry { name, is_dir: true }))
            .chain(
                tree.files
                    .keys()
                    .filter_map(|f| child(f).map(|name| DirEntry { name, is_dir: false })),
            )
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> PackResult<String> {
        self.read(path).ok_or_else(|| missing(path, "file"))
    }

    fn read_lossy(&self, path: &Path) -> PackResult<String> {
        self.read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> PackResult<()> {
        let mut tree = self.inner.lock().unwrap();
        if !tree.parent_exists(path) {
            return Err(missing(path, "parent directory"));
        }
        tree.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> PackResult<()> {
        let content = self.read_to_string(from)?;
        self.write_file(to, &content)
    }

    fn copy_recursive(&self, from: &Path, to: &Path) -> PackResult<()> {
        if self.read(from).is_some() {
            return self.copy_file(from, to);
        }
        let (dirs, files) = {
            let tree = self.inner.lock().unwrap();
            if !tree.is_dir(from) {
                return Err(missing(from, "source"));
            }
            let dirs: Vec<PathBuf> = tree
                .directories
                .iter()
                .filter_map(|d| d.strip_prefix(from).ok().map(Path::to_path_buf))
                .filter(|r| !r.as_os_str().is_empty())
                .collect();
            let files: Vec<(PathBuf, String)> = tree
                .files
                .iter()
                .filter_map(|(f, c)| f.strip_prefix(from).ok().map(|r| (r.to_path_buf(), c.clone())))
                .collect();
            (dirs, files)
        };
        self.create_dir_all(to)?;
        for dir in dirs {
            self.create_dir_all(&to.join(dir))?;
        }
        for (relative, content) in files {
            self.write_file(&to.join(relative), &content)?;
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> PackResult<()> {
        let content = self.read_to_string(from)?;
        self.write_file(to, &content)?;
        self.remove_file(from)
    }

    fn move_file(&self, from: &Path, to: &Path) -> PackResult<()> {
        self.rename(from, to)
    }
}

/// Replaces `{{key}}` with the context value; nothing else.
#[derive(Debug, Default)]
pub struct PlainRenderer;

impl TemplateRenderer for PlainRenderer {
    fn render(&self, template: &str, context: &RenderContext) -> PackResult<String> {
        Ok(context.iter().fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{{{key}}}}}"), value)
        }))
    }
}
