//! Project-local persistence of the last metadata used per platform.
//!
//! The state file is a JSON object keyed by platform name:
//!
//! ```json
//! {
//!   "orsay": { "name": "MyApp", "version": "1.0100", ... },
//!   "webos": { "name": "MyApp", "version": "1.0.0", "vendor": "My Company", ... }
//! }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, InputProvider},
    },
    domain::{Answers, ApplicationMetadata, OrsayMetadata, Platform, WebOsMetadata},
    error::{PackError, PackResult},
};

/// The parsed state document.
pub type PersistedConfig = Map<String, Value>;

/// Loads, validates and writes the state file.
pub struct ConfigurationStore {
    filesystem: Arc<dyn Filesystem>,
    path: PathBuf,
}

impl ConfigurationStore {
    pub fn new(filesystem: Arc<dyn Filesystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state file. `None` when it does not exist yet.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::CorruptState`] when the file is not a JSON object.
    pub fn load(&self) -> PackResult<Option<PersistedConfig>> {
        if !self.filesystem.exists(&self.path) {
            debug!(path = %self.path.display(), "No state file yet");
            return Ok(None);
        }

        let text = self.filesystem.read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(document)) => Ok(Some(document)),
            Ok(other) => Err(self.corrupt(format!("expected a JSON object, found {}", kind(&other)))),
            Err(e) => Err(self.corrupt(e.to_string())),
        }
    }

    /// Extract a usable entry for `platform` from `document`.
    ///
    /// Any missing, empty or malformed field makes the whole entry unusable.
    pub fn validate(platform: Platform, document: &PersistedConfig) -> Option<ApplicationMetadata> {
        let entry = document.get(platform.as_str())?.as_object()?;
        let answers: Answers = entry
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
            .collect();

        let metadata = match platform {
            Platform::Orsay => OrsayMetadata::from_answers(&answers).map(ApplicationMetadata::from),
            Platform::WebOs => WebOsMetadata::from_stored(&answers).map(ApplicationMetadata::from),
        };
        match metadata {
            Ok(m) => Some(m),
            Err(e) => {
                debug!(%platform, error = %e, "Ignoring stored entry");
                None
            }
        }
    }

    /// Show a summary of the stored entry and ask whether to reuse it.
    pub fn decide_reuse(
        &self,
        input: &dyn InputProvider,
        existing: &ApplicationMetadata,
    ) -> PackResult<bool> {
        input.show(&[
            format!("Stored {} configuration found:", existing.platform().display_name()),
            format!("  name:    {}", existing.name()),
            format!("  version: {}", existing.version()),
            format!("  vendor:  {}", existing.vendor()),
        ])?;
        input.confirm("Use the stored configuration?", true)
    }

    /// Overwrite the platform's entry, keeping every other key.
    #[instrument(skip_all, fields(platform = %metadata.platform(), path = %self.path.display()))]
    pub fn persist(&self, metadata: &ApplicationMetadata) -> PackResult<()> {
        let mut document = self.load()?.unwrap_or_default();
        let value = serde_json::to_value(metadata).map_err(|e| PackError::Internal {
            message: format!("metadata is not serialisable: {e}"),
        })?;
        document.insert(metadata.platform().as_str().to_string(), value);

        let text = serde_json::to_string_pretty(&Value::Object(document)).map_err(|e| {
            PackError::Internal {
                message: format!("state document is not serialisable: {e}"),
            }
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !self.filesystem.exists(parent) {
                self.filesystem.create_dir_all(parent)?;
            }
        }
        self.filesystem.write_file(&self.path, &format!("{text}\n"))?;
        info!("Configuration saved");
        Ok(())
    }

    fn corrupt(&self, reason: String) -> PackError {
        ApplicationError::CorruptState {
            path: self.path.clone(),
            reason,
        }
        .into()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
