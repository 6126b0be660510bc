//! Catalog Manager
//!
//! Client-side product catalog management against a REST product store:
//! a synchronized product list, a single-record edit session, and a
//! filtered/sorted view for display.

pub mod config;
pub mod events;
pub mod logger;
pub mod manager;
pub mod route;
pub mod state;
pub mod view;

pub use config::{Config, ConfigError};
pub use events::{CatalogEvent, Notification, Severity};
pub use manager::ProductManager;
pub use route::Route;
pub use state::{EditSession, FormMode};
pub use view::{ProductCard, SortKey, ViewFilter, compute_view};

// Re-export the crates callers need to build a manager
pub use catalog_client;
pub use shared;
