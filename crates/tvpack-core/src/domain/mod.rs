//! Core domain layer for tvpack.
//!
//! This module contains pure packaging rules with no I/O: platform value
//! objects, version conversion, field validation and the metadata aggregates.
//! Filesystem, rendering, prompting and process execution are reached through
//! the ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Observability belongs to the application and CLI layers
//! - **Immutable entities**: Metadata is built once and never mutated

pub mod error;
pub mod fields;
pub mod metadata;
pub mod render_context;
pub mod value_objects;
pub mod version;

mod validation;

pub use error::{DomainError, ErrorCategory};
pub use fields::{
    Answers, FieldDescriptor, FieldKind, ProjectDefaults, Validator, orsay_fields,
    webos_fields, webos_version_field,
};
pub use metadata::{
    ApplicationMetadata, OrsayMetadata, OrsayMetadataBuilder, WebOsMetadata,
    WebOsMetadataBuilder,
};
pub use render_context::RenderContext;
pub use validation::DomainValidator;
pub use value_objects::{Category, Platform, Resolution};
