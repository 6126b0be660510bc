//! Remote Product Store
//!
//! Four operations over the `product` REST resource. Any transport or
//! status failure comes back as a [`ClientError`](crate::ClientError); the
//! manager does not distinguish between them.

mod http;
mod memory;

pub use http::HttpProductStore;
pub use memory::InMemoryProductStore;

use crate::ClientResult;
use async_trait::async_trait;
use shared::{Product, ProductDraft};
use std::fmt;

/// Product store trait
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// `GET /product` - every record, in store order
    async fn list(&self) -> ClientResult<Vec<Product>>;

    /// `POST /product` - the store assigns the id
    async fn create(&self, draft: &ProductDraft) -> ClientResult<Product>;

    /// `PUT /product/{id}` - full replacement of the record's fields
    async fn update(&self, id: &str, draft: &ProductDraft) -> ClientResult<Product>;

    /// `DELETE /product/{id}`
    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// Store operation, used for logging and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}
