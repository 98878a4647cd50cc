//! tvpack Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the tvpack
//! smart-TV packager, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            tvpack-cli (CLI)             │
//! │   (Prompts, config, logging, output)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (PackagingService, PlatformAdapter)    │
//! │   Composer · TemplateStage · Toolchain  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, Renderer, Input, Executor) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    tvpack-adapters (Infrastructure)     │
//! │ (LocalFilesystem, SimpleRenderer, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Metadata, version conversion, rules)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tvpack_core::{
//!     application::{PackagingService, PrepareRequest},
//!     domain::Platform,
//! };
//!
//! // `service` is built from the adapters in `tvpack-adapters`.
//! let outcome = service.prepare(Platform::WebOs, &request)?;
//! println!("prepared {}", outcome.dest.display());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AdapterSettings, BuildOutcome, PackageOutcome, PackageRequest, PackagingService,
        PlatformAdapter, Ports, PrepareOutcome, PrepareRequest,
        ports::{CommandExecutor, Filesystem, InputProvider, TemplateRenderer},
    };
    pub use crate::domain::{
        ApplicationMetadata, Category, OrsayMetadata, Platform, ProjectDefaults, RenderContext,
        Resolution, WebOsMetadata,
    };
    pub use crate::error::{PackError, PackResult, PipelineStage};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
