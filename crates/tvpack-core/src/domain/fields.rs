//! Prompt field descriptors and the answers an input provider returns.
//!
//! The field sets for each platform live here so that the order, defaults
//! and validators of every question are defined in one place, independent of
//! how they are eventually asked (terminal, defaults-only, tests).

use std::collections::BTreeMap;

use crate::domain::{
    DomainValidator, OrsayMetadata, WebOsMetadata,
    error::DomainError,
    value_objects::{Category, Resolution},
    version,
};

/// A field validator. `Err` carries the message shown before re-prompting.
pub type Validator = fn(&str) -> Result<(), String>;

/// How a field is asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// One of a fixed list of choices.
    Choice(Vec<String>),
}

/// One question asked by an input provider.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub prompt: String,
    pub kind: FieldKind,
    pub default: Option<String>,
    pub validator: Validator,
}

impl FieldDescriptor {
    pub fn text(name: &'static str, prompt: impl Into<String>, validator: Validator) -> Self {
        Self {
            name,
            prompt: prompt.into(),
            kind: FieldKind::Text,
            default: None,
            validator,
        }
    }

    pub fn choice<I, S>(name: &'static str, prompt: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            prompt: prompt.into(),
            kind: FieldKind::Choice(choices.into_iter().map(Into::into).collect()),
            default: None,
            validator: DomainValidator::non_empty,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Run the validator, including the implicit "must be a listed choice"
    /// rule for [`FieldKind::Choice`].
    pub fn check(&self, value: &str) -> Result<(), DomainError> {
        if let FieldKind::Choice(choices) = &self.kind {
            if !choices.iter().any(|c| c == value) {
                return Err(DomainError::invalid(
                    self.name,
                    format!("'{}' is not one of: {}", value, choices.join(", ")),
                ));
            }
        }
        (self.validator)(value).map_err(|reason| DomainError::invalid(self.name, reason))
    }
}

/// Answers collected for a list of fields, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<String, String>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Get a value that the field set guarantees to be present.
    pub fn require(&self, name: &str) -> Result<&str, DomainError> {
        self.get(name)
            .ok_or_else(|| DomainError::MissingRequiredField { field: name.into() })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Answers {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Application-wide defaults offered in prompts.
///
/// Loaded from the `[project]` section of `tvpack.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDefaults {
    pub name: String,
    /// Canonical `MAJOR.MINOR.PATCH` version.
    pub version: String,
    /// The file the application declares as its entry point.
    pub content_src: String,
    pub author_name: String,
    pub author_email: String,
    pub author_href: String,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            name: "MyApp".into(),
            version: "1.0.0".into(),
            content_src: "index.html".into(),
            author_name: String::new(),
            author_email: String::new(),
            author_href: String::new(),
        }
    }
}

// ── Field sets ────────────────────────────────────────────────────────────────

/// The eight Orsay questions, seeded from a stored entry when one exists.
pub fn orsay_fields(defaults: &ProjectDefaults, stored: Option<&OrsayMetadata>) -> Vec<FieldDescriptor> {
    let pick = |from_store: Option<&str>, fallback: &str| {
        from_store.map_or_else(|| fallback.to_string(), str::to_string)
    };

    let version_default = match stored {
        Some(m) => m.version().to_string(),
        None => version::to_orsay_version(&defaults.version),
    };

    // a list prompt without a stored answer starts on its first entry
    let category = FieldDescriptor::choice(
        "category",
        "What's the application's category?",
        Category::ALL.iter().map(|c| c.as_str()),
    )
    .with_default(stored.map_or(Category::ALL[0], |m| m.category()).as_str());

    vec![
        FieldDescriptor::text(
            "name",
            "What's the application's name?",
            DomainValidator::non_empty,
        )
        .with_default(pick(stored.map(|m| m.name()), &defaults.name)),
        FieldDescriptor::choice(
            "resolution",
            "Which resolution is your application developed for?",
            Resolution::ALL.iter().map(|r| r.as_str()),
        )
        .with_default(
            stored
                .map_or(Resolution::default(), |m| m.resolution())
                .as_str(),
        ),
        category,
        FieldDescriptor::text(
            "version",
            r"Application Version (Valid RegExp: ^[0-9]+\.[0-9]+$)",
            DomainValidator::orsay_version,
        )
        .with_default(version_default),
        FieldDescriptor::text("description", "Application Description", DomainValidator::any)
            .with_default(pick(stored.map(|m| m.description()), "")),
        FieldDescriptor::text("authorName", "Author's name", DomainValidator::any)
            .with_default(pick(stored.map(|m| m.author_name()), &defaults.author_name)),
        FieldDescriptor::text("authorEmail", "Author's email", DomainValidator::any)
            .with_default(pick(stored.map(|m| m.author_email()), &defaults.author_email)),
        FieldDescriptor::text("authorHref", "Author's IRI (href)", DomainValidator::any)
            .with_default(pick(stored.map(|m| m.author_href()), &defaults.author_href)),
    ]
}

/// The five webOS questions asked when no stored entry is reused.
pub fn webos_fields(defaults: &ProjectDefaults) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text(
            "name",
            "What's the application's name?",
            DomainValidator::webos_name,
        )
        .with_default(&defaults.name),
        FieldDescriptor::text(
            "version",
            "Application Version (MAJOR.MINOR.PATCH)",
            DomainValidator::webos_version,
        )
        .with_default(&defaults.version),
        FieldDescriptor::text(
            "vendor",
            "Vendor (default is 'My Company')",
            DomainValidator::non_empty,
        )
        .with_default("My Company"),
        FieldDescriptor::text(
            "icon",
            "Icon path (default is 'img/logo.png')",
            DomainValidator::non_empty,
        )
        .with_default("img/logo.png"),
        FieldDescriptor::text(
            "largeicon",
            "Large icon path (default is 'img/logo.png')",
            DomainValidator::non_empty,
        )
        .with_default("img/logo.png"),
    ]
}

/// The single question asked when a stored webOS entry is reused.
pub fn webos_version_field(existing: &WebOsMetadata) -> FieldDescriptor {
    let field = FieldDescriptor::text(
        "version",
        format!(
            "Current version is {}. Application version:",
            existing.version()
        ),
        DomainValidator::webos_version,
    );
    match version::next_revision(existing.version()) {
        Some(next) => field.with_default(next),
        None => field,
    }
}
