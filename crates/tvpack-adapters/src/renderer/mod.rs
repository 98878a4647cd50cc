//! Template renderer adapters.

mod simple;

pub use simple::{RenderError, SimpleRenderer};
