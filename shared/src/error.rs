//! Validation errors for the product draft form

use thiserror::Error;

/// A form rule that blocked submission.
///
/// One variant per required field; the manager never sees a draft that
/// produced any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product name is required")]
    MissingName,

    #[error("Product price is required")]
    MissingPrice,

    #[error("Price must be a number: {0}")]
    InvalidPrice(String),

    #[error("Price cannot be negative")]
    NegativePrice,

    #[error("Price cannot exceed {0}")]
    PriceTooLarge(String),

    #[error("Category is required")]
    MissingCategory,

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Discount is required")]
    MissingDiscount,

    #[error("Discount must be one of 5, 10, 15, 25: {0}")]
    InvalidDiscount(String),

    #[error("Image URL is required")]
    MissingImage,

    #[error("Invalid image URL: {0}")]
    InvalidImage(String),
}

/// Result type for form validation
pub type ValidationResult<T> = Result<T, ValidationError>;
