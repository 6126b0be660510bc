//! Data models
//!
//! Shared between the remote store client and the product manager.

pub mod draft;
pub mod product;

// Re-exports
pub use draft::*;
pub use product::*;
