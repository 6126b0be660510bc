//! Catalog Client - Remote Product Store access
//!
//! The [`ProductStore`] trait is the seam between the product manager and
//! the REST resource. [`HttpProductStore`] talks to the real endpoint;
//! [`InMemoryProductStore`] stands in for it in tests and demos.

pub mod client;
pub mod config;
pub mod error;
pub mod store;

pub use client::{HttpClient, NetworkHttpClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use store::{HttpProductStore, InMemoryProductStore, ProductStore, StoreOperation};

// Re-export shared types for convenience
pub use shared::{Category, Discount, Product, ProductDraft};
