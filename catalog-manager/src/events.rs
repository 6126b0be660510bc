//! Catalog events and user-facing notifications
//!
//! Every remote call ends in exactly one [`CatalogEvent`]. The notification
//! layer turns the user-visible ones into a toast with a fixed message,
//! severity and auto-dismiss interval.

use serde::Serialize;
use shared::Product;
use std::time::Duration;

/// Auto-dismiss interval for every toast
pub const AUTO_DISMISS: Duration = Duration::from_millis(2000);

/// Outcome of a remote call made by the product manager
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    /// List replaced from the store
    Loaded { count: usize },
    LoadFailed { reason: String },
    Created { product: Product },
    Updated { product: Product },
    SaveFailed { reason: String },
    /// Record removed from the store and the local list
    Deleted { id: String },
    DeleteFailed { id: String, reason: String },
}

impl CatalogEvent {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::LoadFailed { .. } | Self::SaveFailed { .. } | Self::DeleteFailed { .. }
        )
    }

    /// Toast for this event; a successful load is silent
    pub fn notification(&self) -> Option<Notification> {
        let (severity, message) = match self {
            Self::Loaded { .. } => return None,
            Self::LoadFailed { .. } => (Severity::Error, "Failed to load products!"),
            Self::Created { .. } => (Severity::Success, "Product added successfully!"),
            Self::Updated { .. } => (Severity::Success, "Product updated successfully!"),
            Self::SaveFailed { .. } => (Severity::Error, "Failed to save product!"),
            // Deletion is shown with error styling even though it succeeded
            Self::Deleted { .. } => (Severity::Error, "Product deleted!"),
            Self::DeleteFailed { .. } => (Severity::Error, "Failed to delete!"),
        };
        Some(Notification {
            severity,
            message,
            auto_dismiss: AUTO_DISMISS,
            placement: Placement::TopCenter,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    TopCenter,
}

/// Transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: &'static str,
    pub auto_dismiss: Duration,
    pub placement: Placement,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.severity {
            Severity::Success => "ok",
            Severity::Error => "!!",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}
