// catalog-client/src/store/http.rs
// REST-backed product store

use super::ProductStore;
use crate::{ClientConfig, ClientResult, HttpClient, NetworkHttpClient};
use async_trait::async_trait;
use shared::{Product, ProductDraft};

/// Product store backed by the REST resource
#[derive(Debug, Clone)]
pub struct HttpProductStore {
    http: NetworkHttpClient,
    resource: String,
}

impl HttpProductStore {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpClient::new(config)?,
            resource: config.resource_path().to_string(),
        })
    }

    /// Collection URL, for diagnostics
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.http.base_url(), self.resource)
    }

    fn record_path(&self, id: &str) -> String {
        format!("{}/{}", self.resource, id)
    }
}

#[async_trait]
impl ProductStore for HttpProductStore {
    async fn list(&self) -> ClientResult<Vec<Product>> {
        self.http.get(&self.resource).await
    }

    async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
        self.http.post(&self.resource, draft).await
    }

    async fn update(&self, id: &str, draft: &ProductDraft) -> ClientResult<Product> {
        self.http.put(&self.record_path(id), draft).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&self.record_path(id)).await
    }
}
