//! Product Manager
//!
//! Owns the product list, the edit session, the draft form and the view
//! filter, and keeps the list in step with the remote store:
//!
//! - `load_all` replaces the list from the store (once on activation).
//! - `submit` creates or updates, then reloads. No optimistic insert.
//! - `remove` deletes, then drops the entry locally. No reload.
//!
//! Remote failures never escape as errors. Each call ends in exactly one
//! [`CatalogEvent`], which is logged, broadcast to subscribers and returned.
//! Operations return `None` when nothing was applied: the manager was
//! disposed before the response arrived, or another save/delete was still
//! in flight.

use crate::events::CatalogEvent;
use crate::state::{CatalogState, EditSession, FormMode};
use crate::view::{SortKey, ViewCache, ViewFilter};
use catalog_client::ProductStore;
use parking_lot::{Mutex, RwLock};
use shared::{DraftForm, Product, ProductDraft, ValidationError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Clears the in-flight flag when the save/delete finishes
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ProductManager {
    store: Arc<dyn ProductStore>,
    state: RwLock<CatalogState>,
    view_cache: Mutex<ViewCache>,
    events: broadcast::Sender<CatalogEvent>,
    in_flight: AtomicBool,
    disposed: AtomicBool,
}

impl std::fmt::Debug for ProductManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ProductManager")
            .field("products_count", &state.products.len())
            .field("edit_session", &state.edit.id())
            .field("filter", &state.filter)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl ProductManager {
    /// Create a manager without loading anything
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            state: RwLock::new(CatalogState::default()),
            view_cache: Mutex::new(ViewCache::default()),
            events,
            in_flight: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
        }
    }

    /// Create a manager and run the initial load
    pub async fn activate(store: Arc<dyn ProductStore>) -> Self {
        let manager = Self::new(store);
        manager.load_all().await;
        manager
    }

    /// Receive every event emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Remote operations
    // =========================================================================

    /// Replace the local list with the store's
    pub async fn load_all(&self) -> Option<CatalogEvent> {
        if self.is_disposed() {
            return None;
        }

        let result = self.store.list().await;
        if self.is_disposed() {
            tracing::warn!("Manager disposed during load, ignoring response");
            return None;
        }

        let event = match result {
            Ok(products) => {
                let count = products.len();
                self.state.write().replace_products(products);
                tracing::info!(count, "Products loaded");
                CatalogEvent::Loaded { count }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load products");
                CatalogEvent::LoadFailed {
                    reason: e.to_string(),
                }
            }
        };
        Some(self.emit(event))
    }

    /// Create, or update the record in the edit session, then reload
    ///
    /// `draft` must already have passed form validation.
    pub async fn submit(&self, draft: ProductDraft) -> Option<CatalogEvent> {
        if self.is_disposed() {
            return None;
        }
        let _guard = self.try_begin("submit")?;

        let editing = self.state.read().edit.id().map(str::to_string);
        let result = match &editing {
            Some(id) => self.store.update(id, &draft).await,
            None => self.store.create(&draft).await,
        };
        if self.is_disposed() {
            tracing::warn!("Manager disposed during save, ignoring response");
            return None;
        }

        let event = match result {
            Ok(product) => {
                self.state.write().reset_form();
                if editing.is_some() {
                    tracing::info!(id = %product.id, "Product updated");
                    CatalogEvent::Updated { product }
                } else {
                    tracing::info!(id = %product.id, "Product created");
                    CatalogEvent::Created { product }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, editing = ?editing, "Failed to save product");
                return Some(self.emit(CatalogEvent::SaveFailed {
                    reason: e.to_string(),
                }));
            }
        };

        let event = self.emit(event);
        self.load_all().await;
        Some(event)
    }

    /// Validate the draft form and submit it
    ///
    /// A validation failure blocks the call before anything reaches the store.
    pub async fn submit_form(&self) -> Result<Option<CatalogEvent>, ValidationError> {
        let draft = self.state.read().form.validate()?;
        Ok(self.submit(draft).await)
    }

    /// Delete a record, then drop it from the local list
    pub async fn remove(&self, id: &str) -> Option<CatalogEvent> {
        if self.is_disposed() {
            return None;
        }
        let _guard = self.try_begin("remove")?;

        let result = self.store.delete(id).await;
        if self.is_disposed() {
            tracing::warn!(id, "Manager disposed during delete, ignoring response");
            return None;
        }

        let event = match result {
            Ok(()) => {
                let mut state = self.state.write();
                if !state.remove_product(id) {
                    tracing::debug!(id, "Deleted product was not in the local list");
                }
                if state.edit.id() == Some(id) {
                    state.reset_form();
                }
                tracing::info!(id, "Product deleted");
                CatalogEvent::Deleted { id: id.to_string() }
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Failed to delete product");
                CatalogEvent::DeleteFailed {
                    id: id.to_string(),
                    reason: e.to_string(),
                }
            }
        };
        Some(self.emit(event))
    }

    // =========================================================================
    // Local operations
    // =========================================================================

    /// Load a product into the form for editing; unknown ids are ignored
    pub fn begin_edit(&self, id: &str) -> bool {
        let mut state = self.state.write();
        let Some(form) = state.find(id).map(DraftForm::from_product) else {
            tracing::debug!(id, "begin_edit on unknown product");
            return false;
        };
        state.form = form;
        state.edit.begin(id);
        true
    }

    /// Leave edit mode and clear the form
    pub fn cancel_edit(&self) {
        self.state.write().reset_form();
    }

    /// Change form fields in place
    pub fn update_form(&self, f: impl FnOnce(&mut DraftForm)) {
        f(&mut self.state.write().form);
    }

    pub fn set_search(&self, text: impl Into<String>) {
        self.state.write().filter.search = text.into();
    }

    pub fn set_sort(&self, key: SortKey) {
        self.state.write().filter.sort = key;
    }

    /// Tear down; responses arriving afterwards are dropped
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            tracing::info!("Product manager disposed");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Filtered and sorted products for display
    pub fn view(&self) -> Arc<Vec<Product>> {
        let state = self.state.read();
        self.view_cache
            .lock()
            .get_or_compute(state.revision, &state.filter, &state.products)
    }

    /// Local list in store order
    pub fn products(&self) -> Vec<Product> {
        self.state.read().products.clone()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.state.read().find(id).cloned()
    }

    pub fn edit_session(&self) -> EditSession {
        self.state.read().edit.clone()
    }

    pub fn form(&self) -> DraftForm {
        self.state.read().form.clone()
    }

    pub fn form_mode(&self) -> FormMode {
        self.state.read().form_mode()
    }

    pub fn filter(&self) -> ViewFilter {
        self.state.read().filter.clone()
    }

    /// Whether a save or delete is waiting on the store
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn try_begin(&self, action: &'static str) -> Option<InFlight<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!(action, "Another save or delete is in flight, ignoring");
            return None;
        }
        Some(InFlight(&self.in_flight))
    }

    fn emit(&self, event: CatalogEvent) -> CatalogEvent {
        // No subscribers is fine
        let _ = self.events.send(event.clone());
        event
    }
}
