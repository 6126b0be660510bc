//! Shared types for the catalog workspace
//!
//! Product data model, the draft form and its validation rules, and the
//! lenient wire helpers used by both the client and the manager.

pub mod error;
pub mod models;
pub mod serde_helpers;

// Re-exports
pub use error::{ValidationError, ValidationResult};
pub use models::{Category, Discount, DraftForm, Product, ProductDraft};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
