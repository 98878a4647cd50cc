//! Application metadata aggregates and their builders.
//!
//! Metadata is assembled field by field through a builder; every setter runs
//! the same rule the corresponding prompt uses, and `build()` refuses to
//! produce a value until every required field is present. Once built, the
//! metadata is immutable for the rest of the run.

use std::fmt;

use serde::Serialize;

use crate::domain::{
    DomainValidator, RenderContext,
    error::DomainError,
    fields::Answers,
    value_objects::{Category, Platform, Resolution},
};

fn checked(field: &str, value: String, rule: fn(&str) -> Result<(), String>) -> Result<String, DomainError> {
    rule(&value).map_err(|reason| DomainError::invalid(field, reason))?;
    Ok(value)
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::MissingRequiredField { field: field.into() })
}

// ── Orsay ─────────────────────────────────────────────────────────────────────

/// Metadata rendered into an Orsay `config.xml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrsayMetadata {
    name: String,
    resolution: Resolution,
    category: Category,
    version: String,
    description: String,
    author_name: String,
    author_email: String,
    author_href: String,
}

impl OrsayMetadata {
    pub fn builder() -> OrsayMetadataBuilder {
        OrsayMetadataBuilder::default()
    }

    /// Build from the answers to [`orsay_fields`](crate::domain::orsay_fields).
    pub fn from_answers(answers: &Answers) -> Result<Self, DomainError> {
        Self::builder()
            .name(answers.require("name")?)?
            .resolution(answers.require("resolution")?.parse()?)
            .category(answers.require("category")?.parse()?)
            .version(answers.require("version")?)?
            .description(answers.get("description").unwrap_or_default())
            .author(
                answers.get("authorName").unwrap_or_default(),
                answers.get("authorEmail").unwrap_or_default(),
                answers.get("authorHref").unwrap_or_default(),
            )
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }
    pub const fn category(&self) -> Category {
        self.category
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn author_name(&self) -> &str {
        &self.author_name
    }
    pub fn author_email(&self) -> &str {
        &self.author_email
    }
    pub fn author_href(&self) -> &str {
        &self.author_href
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new()
            .with_variable("name", &self.name)
            .with_variable("resolution", self.resolution)
            .with_variable("resWidth", self.resolution.width())
            .with_variable("resHeight", self.resolution.height())
            .with_variable("category", self.category)
            .with_variable("version", &self.version)
            .with_variable("description", &self.description)
            .with_variable("authorName", &self.author_name)
            .with_variable("authorEmail", &self.author_email)
            .with_variable("authorHref", &self.author_href)
    }
}

/// Accumulates validated Orsay fields.
#[derive(Debug, Default)]
pub struct OrsayMetadataBuilder {
    name: Option<String>,
    resolution: Option<Resolution>,
    category: Option<Category>,
    version: Option<String>,
    description: String,
    author_name: String,
    author_email: String,
    author_href: String,
}

impl OrsayMetadataBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.name = Some(checked("name", name.into(), DomainValidator::non_empty)?);
        Ok(self)
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Orsay version in `MAJOR.MINOR` form (see [`to_orsay_version`](crate::domain::version::to_orsay_version)).
    pub fn version(mut self, version: impl Into<String>) -> Result<Self, DomainError> {
        let version = version.into();
        DomainValidator::orsay_version(&version).map_err(|reason| DomainError::InvalidVersion {
            version: version.clone(),
            reason,
        })?;
        self.version = Some(version);
        Ok(self)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn author(
        mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        self.author_name = name.into();
        self.author_email = email.into();
        self.author_href = href.into();
        self
    }

    pub fn build(self) -> Result<OrsayMetadata, DomainError> {
        Ok(OrsayMetadata {
            name: required("name", self.name)?,
            resolution: self.resolution.unwrap_or_default(),
            category: required("category", self.category)?,
            version: required("version", self.version)?,
            description: self.description,
            author_name: self.author_name,
            author_email: self.author_email,
            author_href: self.author_href,
        })
    }
}

// ── webOS ─────────────────────────────────────────────────────────────────────

/// Metadata rendered into the webOS `*.tmpl` files (e.g. `appinfo.json.tmpl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebOsMetadata {
    name: String,
    version: String,
    vendor: String,
    icon: String,
    #[serde(rename = "largeicon")]
    large_icon: String,
}

impl WebOsMetadata {
    pub fn builder() -> WebOsMetadataBuilder {
        WebOsMetadataBuilder::default()
    }

    /// Build from the answers to [`webos_fields`](crate::domain::webos_fields).
    pub fn from_answers(answers: &Answers) -> Result<Self, DomainError> {
        Self::builder()
            .name(answers.require("name")?)?
            .version(answers.require("version")?)?
            .vendor(answers.require("vendor")?)?
            .icon(answers.require("icon")?)?
            .large_icon(answers.require("largeicon")?)?
            .build()
    }

    /// Build from a persisted entry. Unlike [`from_answers`](Self::from_answers)
    /// the name only has to be non-empty.
    pub fn from_stored(answers: &Answers) -> Result<Self, DomainError> {
        let mut builder = Self::builder()
            .version(answers.require("version")?)?
            .vendor(answers.require("vendor")?)?
            .icon(answers.require("icon")?)?
            .large_icon(answers.require("largeicon")?)?;
        builder.name = Some(checked(
            "name",
            answers.require("name")?.to_string(),
            DomainValidator::non_empty,
        )?);
        builder.build()
    }

    /// Same metadata with a new version; used when a stored entry is reused.
    pub fn with_version(&self, version: impl Into<String>) -> Result<Self, DomainError> {
        let version = validated_webos_version(version.into())?;
        Ok(Self {
            version,
            ..self.clone()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn vendor(&self) -> &str {
        &self.vendor
    }
    pub fn icon(&self) -> &str {
        &self.icon
    }
    pub fn large_icon(&self) -> &str {
        &self.large_icon
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new()
            .with_variable("name", &self.name)
            .with_variable("version", &self.version)
            .with_variable("vendor", &self.vendor)
            .with_variable("icon", &self.icon)
            .with_variable("largeicon", &self.large_icon)
    }
}

fn validated_webos_version(version: String) -> Result<String, DomainError> {
    DomainValidator::webos_version(&version).map_err(|reason| DomainError::InvalidVersion {
        version: version.clone(),
        reason,
    })?;
    Ok(version)
}

/// Accumulates validated webOS fields.
#[derive(Debug, Default)]
pub struct WebOsMetadataBuilder {
    name: Option<String>,
    version: Option<String>,
    vendor: Option<String>,
    icon: Option<String>,
    large_icon: Option<String>,
}

impl WebOsMetadataBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.name = Some(checked("name", name.into(), DomainValidator::webos_name)?);
        Ok(self)
    }

    pub fn version(mut self, version: impl Into<String>) -> Result<Self, DomainError> {
        self.version = Some(validated_webos_version(version.into())?);
        Ok(self)
    }

    pub fn vendor(mut self, vendor: impl Into<String>) -> Result<Self, DomainError> {
        self.vendor = Some(checked("vendor", vendor.into(), DomainValidator::non_empty)?);
        Ok(self)
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Result<Self, DomainError> {
        self.icon = Some(checked("icon", icon.into(), DomainValidator::non_empty)?);
        Ok(self)
    }

    pub fn large_icon(mut self, icon: impl Into<String>) -> Result<Self, DomainError> {
        self.large_icon = Some(checked("largeicon", icon.into(), DomainValidator::non_empty)?);
        Ok(self)
    }

    pub fn build(self) -> Result<WebOsMetadata, DomainError> {
        Ok(WebOsMetadata {
            name: required("name", self.name)?,
            version: required("version", self.version)?,
            vendor: required("vendor", self.vendor)?,
            icon: required("icon", self.icon)?,
            large_icon: required("largeicon", self.large_icon)?,
        })
    }
}

// ── Platform-agnostic wrapper ─────────────────────────────────────────────────

/// Resolved metadata for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ApplicationMetadata {
    Orsay(OrsayMetadata),
    WebOs(WebOsMetadata),
}

impl ApplicationMetadata {
    pub const fn platform(&self) -> Platform {
        match self {
            Self::Orsay(_) => Platform::Orsay,
            Self::WebOs(_) => Platform::WebOs,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Orsay(m) => m.name(),
            Self::WebOs(m) => m.name(),
        }
    }

    pub fn version(&self) -> &str {
        match self {
            Self::Orsay(m) => m.version(),
            Self::WebOs(m) => m.version(),
        }
    }

    /// Vendor (webOS) or author name (Orsay).
    pub fn vendor(&self) -> &str {
        match self {
            Self::Orsay(m) => m.author_name(),
            Self::WebOs(m) => m.vendor(),
        }
    }

    pub fn render_context(&self) -> RenderContext {
        match self {
            Self::Orsay(m) => m.render_context(),
            Self::WebOs(m) => m.render_context(),
        }
    }
}

impl From<OrsayMetadata> for ApplicationMetadata {
    fn from(m: OrsayMetadata) -> Self {
        Self::Orsay(m)
    }
}

impl From<WebOsMetadata> for ApplicationMetadata {
    fn from(m: WebOsMetadata) -> Self {
        Self::WebOs(m)
    }
}

impl fmt::Display for ApplicationMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name(), self.version(), self.platform())
    }
}
