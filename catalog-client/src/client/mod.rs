//! Client module - transport used by the HTTP product store.

pub mod http;

pub use http::{HttpClient, NetworkHttpClient};
