//! Client configuration

/// Default mock endpoint the catalog was built against
pub const DEFAULT_BASE_URL: &str = "https://68c3e48081ff90c8e61a7736.mockapi.io";

/// Default REST resource name
pub const DEFAULT_RESOURCE: &str = "product";

/// Client configuration for connecting to the Remote Product Store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Resource path under the base URL (e.g., "product")
    pub resource: String,

    /// Request timeout in seconds; `None` waits for the transport to give up
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Create a new client configuration for the default resource
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            resource: DEFAULT_RESOURCE.to_string(),
            timeout: None,
        }
    }

    /// Set the resource path
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Resource path with surrounding slashes removed
    pub fn resource_path(&self) -> &str {
        self.resource.trim_matches('/')
    }

    /// Create an HTTP product store from this configuration
    pub fn build_store(&self) -> crate::ClientResult<crate::HttpProductStore> {
        crate::HttpProductStore::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.resource_path(), "product");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://localhost:3000")
            .with_resource("/items/")
            .with_timeout(5);
        assert_eq!(config.resource_path(), "items");
        assert_eq!(config.timeout, Some(5));
    }
}
