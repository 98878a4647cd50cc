use std::collections::BTreeMap;

/// Context for template rendering.
///
/// A **Value Object** holding the key/value pairs a manifest template can
/// reference. Keys match the persisted metadata field names (`name`,
/// `version`, `authorName`, ...) plus derived values such as `resWidth`.
///
/// Immutable once built; `with_variable` consumes and returns a new context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, consuming self and returning a new context.
    ///
    /// ```rust
    /// use tvpack_core::domain::RenderContext;
    ///
    /// let ctx = RenderContext::new()
    ///     .with_variable("name", "MyApp")
    ///     .with_variable("version", "1.0.0");
    /// assert_eq!(ctx.get("name"), Some("MyApp"));
    /// ```
    pub fn with_variable(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.variables.insert(key.into(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
