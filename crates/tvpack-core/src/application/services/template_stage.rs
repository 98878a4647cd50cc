//! Template expansion over a composed destination tree.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

use regex::Regex;
use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
    },
    domain::RenderContext,
    error::PackResult,
};

/// Filename suffix marking a file for expansion.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

static CSP_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*http-equiv\s*=\s*["']Content-Security-Policy["']"#)
        .expect("CSP pattern is valid")
});

/// Expands template files in place.
pub struct TemplateStage {
    filesystem: Arc<dyn Filesystem>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl TemplateStage {
    pub fn new(filesystem: Arc<dyn Filesystem>, renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    /// Expand every `*.tmpl` file directly under `dest`.
    ///
    /// Each `name.tmpl` becomes `name` and the template is deleted, so a
    /// second run finds nothing to do. Returns the written paths in name order.
    #[instrument(skip(self, context), fields(dest = %dest.display()))]
    pub fn render_all(&self, dest: &Path, context: &RenderContext) -> PackResult<Vec<PathBuf>> {
        let mut rendered = Vec::new();

        for entry in self.filesystem.list_dir(dest)? {
            if entry.is_dir {
                continue;
            }
            let Some(stem) = entry.name.strip_suffix(TEMPLATE_SUFFIX) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }

            let template = dest.join(&entry.name);
            let output = dest.join(stem);
            let text = self.expand(&template, context)?;
            self.filesystem.write_file(&output, &text)?;
            self.filesystem.remove_file(&template)?;

            debug!(file = %output.display(), "Rendered template");
            rendered.push(output);
        }

        Ok(rendered)
    }

    /// Expand one template into `output` via a temporary sibling.
    ///
    /// `template` and `output` may be the same path.
    pub fn render_single(
        &self,
        template: &Path,
        output: &Path,
        context: &RenderContext,
    ) -> PackResult<()> {
        let text = self.expand(template, context)?;

        let mut temp = output.as_os_str().to_owned();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        self.filesystem.write_file(&temp, &text)?;
        self.filesystem.rename(&temp, output)?;
        debug!(file = %output.display(), "Rendered template");
        Ok(())
    }

    /// Look for a Content-Security-Policy `<meta>` tag in `entry`.
    ///
    /// Returns a warning message when one is present. A missing entry file
    /// yields no warning; an unreadable one yields a warning instead of an
    /// error. Non-UTF-8 bytes are replaced before matching.
    pub fn check_security_policy(&self, entry: &Path) -> Option<String> {
        if !self.filesystem.exists(entry) {
            return None;
        }
        let html = match self.filesystem.read_lossy(entry) {
            Ok(html) => html,
            Err(e) => {
                debug!(file = %entry.display(), error = %e, "Skipping security policy check");
                return Some(format!(
                    "Could not inspect {} for a Content-Security-Policy: {e}",
                    entry.display()
                ));
            }
        };
        CSP_META.is_match(&html).then(|| {
            format!(
                "{} declares a Content-Security-Policy meta tag; the TV runtime may block \
                 inline scripts or platform APIs",
                entry.display()
            )
        })
    }

    fn expand(&self, template: &Path, context: &RenderContext) -> PackResult<String> {
        let source = self.filesystem.read_to_string(template)?;
        self.renderer.render(&source, context).map_err(|e| {
            let reason = match e.as_application() {
                Some(ApplicationError::RenderingFailed { reason, .. }) => reason.clone(),
                _ => e.to_string(),
            };
            ApplicationError::RenderingFailed {
                path: template.to_path_buf(),
                reason,
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::{MemoryFilesystem, PlainRenderer};

    fn stage(fs: &MemoryFilesystem) -> TemplateStage {
        TemplateStage::new(fs.shared(), Arc::new(PlainRenderer))
    }

    fn context() -> RenderContext {
        RenderContext::new()
            .with_variable("name", "Demo")
            .with_variable("version", "1.2.3")
    }

    #[test]
    fn render_all_replaces_templates() {
        let fs = MemoryFilesystem::new()
            .with_file("/out/appinfo.json.tmpl", r#"{"title":"{{name}}","version":"{{version}}"}"#)
            .with_file("/out/index.html", "{{name}}")
            .with_file("/out/sub/nested.tmpl", "untouched");

        let rendered = stage(&fs).render_all(Path::new("/out"), &context()).unwrap();

        assert_eq!(rendered, vec![PathBuf::from("/out/appinfo.json")]);
        assert_eq!(
            fs.read("/out/appinfo.json").as_deref(),
            Some(r#"{"title":"Demo","version":"1.2.3"}"#)
        );
        assert!(!fs.exists(Path::new("/out/appinfo.json.tmpl")));
        // only direct children are templates
        assert!(fs.exists(Path::new("/out/sub/nested.tmpl")));
        assert_eq!(fs.read("/out/index.html").as_deref(), Some("{{name}}"));
    }

    #[test]
    fn render_all_twice_is_stable() {
        let fs = MemoryFilesystem::new().with_file("/out/a.tmpl", "{{name}}");
        let s = stage(&fs);
        s.render_all(Path::new("/out"), &context()).unwrap();
        let second = s.render_all(Path::new("/out"), &context()).unwrap();
        assert!(second.is_empty());
        assert_eq!(fs.read("/out/a").as_deref(), Some("Demo"));
    }

    #[test]
    fn render_single_in_place() {
        let fs = MemoryFilesystem::new().with_file("/out/config.xml", "<name>{{name}}</name>");
        let path = Path::new("/out/config.xml");
        stage(&fs).render_single(path, path, &context()).unwrap();

        assert_eq!(fs.read(path).as_deref(), Some("<name>Demo</name>"));
        assert!(!fs.exists(Path::new("/out/config.xml.tmp")));
    }

    #[test]
    fn security_policy_is_reported() {
        let fs = MemoryFilesystem::new().with_file(
            "/out/index.html",
            r#"<head><META HTTP-EQUIV="Content-Security-Policy" content="default-src 'self'"></head>"#,
        );
        let warning = stage(&fs).check_security_policy(Path::new("/out/index.html"));
        assert!(warning.unwrap().contains("Content-Security-Policy"));
    }

    #[test]
    fn security_policy_absent_or_missing_file() {
        let fs = MemoryFilesystem::new().with_file("/out/index.html", "<head></head>");
        let s = stage(&fs);
        assert_eq!(s.check_security_policy(Path::new("/out/index.html")), None);
        assert_eq!(s.check_security_policy(Path::new("/nope/index.html")), None);
    }

    #[test]
    fn unreadable_entry_is_a_warning() {
        let fs = MemoryFilesystem::new().with_dir("/out/index.html");
        let warning = stage(&fs).check_security_policy(Path::new("/out/index.html"));
        assert!(warning.unwrap().starts_with("Could not inspect"));
    }
}
