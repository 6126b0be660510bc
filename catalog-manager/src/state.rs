//! Manager-owned state
//!
//! Only [`ProductManager`](crate::ProductManager) holds a `CatalogState`;
//! nothing here is reachable except through the manager's operations.

use crate::view::ViewFilter;
use serde::Serialize;
use shared::{DraftForm, Product};

/// Which record the form is editing, if any
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditSession {
    id: Option<String>,
}

impl EditSession {
    pub fn begin(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.id = None;
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }
}

/// Form mode, driving the heading and submit label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Add,
    Update,
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Add => "Add Product to Cart",
            Self::Update => "Update Product",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Add => "Add Product",
            Self::Update => "Update Product",
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct CatalogState {
    /// Store order from the last successful load
    pub products: Vec<Product>,
    /// Bumped on every change to `products`
    pub revision: u64,
    pub edit: EditSession,
    pub form: DraftForm,
    pub filter: ViewFilter,
}

impl CatalogState {
    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.revision += 1;
    }

    /// Drop the entry with `id`; absent ids are a no-op
    pub fn remove_product(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        let removed = self.products.len() != before;
        if removed {
            self.revision += 1;
        }
        removed
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn reset_form(&mut self) {
        self.form.clear();
        self.edit.clear();
    }

    pub fn form_mode(&self) -> FormMode {
        if self.edit.is_active() {
            FormMode::Update
        } else {
            FormMode::Add
        }
    }
}
