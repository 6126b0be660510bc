//! Navigation
//!
//! Every known path shows the product manager; anything else is not found.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    ProductManager,
    NotFound,
}

impl Route {
    const MANAGER_PATHS: [&'static str; 2] = ["/", "/add"];

    /// Resolve a request path (query string and fragment ignored)
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        if Self::MANAGER_PATHS.contains(&normalized) {
            Self::ProductManager
        } else {
            Self::NotFound
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ProductManager => "Product manager",
            Self::NotFound => "Page not found",
        }
    }
}
