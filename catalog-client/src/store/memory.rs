// catalog-client/src/store/memory.rs
// In-memory product store - substitute for the REST resource

use super::{ProductStore, StoreOperation};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{Product, ProductDraft};
use std::collections::{HashMap, HashSet};
use tokio::sync::watch;

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    next_id: u64,
    failing: HashSet<StoreOperation>,
    calls: HashMap<StoreOperation, usize>,
}

/// In-memory product store
///
/// Assigns sequential string ids the way the mock endpoint does. Supports
/// failure injection per operation, call counting, and holding requests
/// open so tests can observe the caller while a call is in flight.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: Mutex<Inner>,
    held: watch::Sender<bool>,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        let (held, _) = watch::channel(false);
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Default::default()
            }),
            held,
        }
    }

    /// Store seeded with records; ids continue after the largest numeric id
    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock();
            inner.next_id = products
                .iter()
                .filter_map(|p| p.id.parse::<u64>().ok())
                .max()
                .map_or(1, |max| max + 1);
            inner.products = products;
        }
        store
    }

    /// Current records (bypasses call counting)
    pub fn snapshot(&self) -> Vec<Product> {
        self.inner.lock().products.clone()
    }

    /// Make every subsequent `op` fail until cleared
    pub fn set_failing(&self, op: StoreOperation, failing: bool) {
        let mut inner = self.inner.lock();
        if failing {
            inner.failing.insert(op);
        } else {
            inner.failing.remove(&op);
        }
    }

    /// Number of times `op` was called
    pub fn calls(&self, op: StoreOperation) -> usize {
        self.inner.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Park every subsequent call until [`release`](Self::release)
    pub fn hold(&self) {
        self.held.send_replace(true);
    }

    pub fn release(&self) {
        self.held.send_replace(false);
    }

    /// Count the call, wait while held, then report injected failures
    async fn enter(&self, op: StoreOperation) -> ClientResult<()> {
        *self.inner.lock().calls.entry(op).or_insert(0) += 1;

        let mut rx = self.held.subscribe();
        // Sender lives in self, so the channel cannot close here
        let _ = rx.wait_for(|held| !*held).await;

        if self.inner.lock().failing.contains(&op) {
            return Err(ClientError::Internal(format!("{} failed (injected)", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> ClientResult<Vec<Product>> {
        self.enter(StoreOperation::List).await?;
        Ok(self.inner.lock().products.clone())
    }

    async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
        self.enter(StoreOperation::Create).await?;
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let product = Product {
            id: id.to_string(),
            name: draft.name.clone(),
            price: draft.price,
            category: draft.category,
            discount: draft.discount,
            image: draft.image.clone(),
        };
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, draft: &ProductDraft) -> ClientResult<Product> {
        self.enter(StoreOperation::Update).await?;
        let mut inner = self.inner.lock();
        let product = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("product {}", id)))?;
        product.name = draft.name.clone();
        product.price = draft.price;
        product.category = draft.category;
        product.discount = draft.discount;
        product.image = draft.image.clone();
        Ok(product.clone())
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.enter(StoreOperation::Delete).await?;
        let mut inner = self.inner.lock();
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        if inner.products.len() == before {
            return Err(ClientError::NotFound(format!("product {}", id)));
        }
        Ok(())
    }
}
