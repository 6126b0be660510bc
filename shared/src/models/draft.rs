//! Draft form
//!
//! Raw, string-valued form fields as the user typed them, plus the
//! required-field rules that gate submission.

use super::product::{Category, Discount, Product, ProductDraft, max_price};
use crate::error::{ValidationError, ValidationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Product form fields before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftForm {
    pub name: String,
    pub price: String,
    pub category: String,
    pub discount: String,
    pub image: String,
}

impl DraftForm {
    /// Form pre-populated with a product's current values
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.to_string(),
            discount: product
                .discount
                .map(|d| d.to_string())
                .unwrap_or_default(),
            image: product.image.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check every required field and build the record body
    ///
    /// All five fields are required, including the discount selection.
    pub fn validate(&self) -> ValidationResult<ProductDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let price = self.price.trim();
        if price.is_empty() {
            return Err(ValidationError::MissingPrice);
        }
        let price = Decimal::from_str(price)
            .or_else(|_| Decimal::from_scientific(price))
            .map_err(|_| ValidationError::InvalidPrice(price.to_string()))?;
        if price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice);
        }
        if price > max_price() {
            return Err(ValidationError::PriceTooLarge(max_price().to_string()));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let category = Category::from_str(category).map_err(ValidationError::InvalidCategory)?;

        let discount = self.discount.trim();
        if discount.is_empty() {
            return Err(ValidationError::MissingDiscount);
        }
        let discount = Discount::from_str(discount).map_err(ValidationError::InvalidDiscount)?;

        let image = self.image.trim();
        if image.is_empty() {
            return Err(ValidationError::MissingImage);
        }
        url::Url::parse(image).map_err(|e| ValidationError::InvalidImage(e.to_string()))?;

        Ok(ProductDraft {
            name: name.to_string(),
            price,
            category,
            discount: Some(discount),
            image: image.to_string(),
        })
    }
}
