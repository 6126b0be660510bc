//! Product Model

use crate::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product category (fixed set offered by the form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Grocery,
    Accessories,
    /// Also catches category strings the form does not offer
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::Grocery,
        Category::Accessories,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Grocery => "Grocery",
            Self::Accessories => "Accessories",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Percentage discount (fixed set offered by the form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discount {
    Five,
    Ten,
    Fifteen,
    TwentyFive,
}

impl Discount {
    pub const ALL: [Discount; 4] = [
        Discount::Five,
        Discount::Ten,
        Discount::Fifteen,
        Discount::TwentyFive,
    ];

    /// Percentage value (e.g. 10 = 10%)
    pub fn percent(&self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
            Self::TwentyFive => 25,
        }
    }

    pub fn from_percent(percent: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.percent() == percent)
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.percent())
    }
}

impl FromStr for Discount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('%');
        s.parse::<u32>()
            .ok()
            .and_then(Self::from_percent)
            .ok_or_else(|| s.to_string())
    }
}

/// Largest price the form accepts; store records above it are clamped
pub fn max_price() -> Decimal {
    Decimal::from(1_000_000_000_000_i64)
}

/// Apply a percentage discount: `price - price * discount / 100`
///
/// Never exceeds `price`. Negative prices are returned unchanged.
pub fn apply_discount(price: Decimal, discount: Option<Discount>) -> Decimal {
    let Some(d) = discount else {
        return price;
    };
    if price.is_sign_negative() {
        return price;
    }
    let percent = Decimal::from(d.percent());
    let cut = price
        .checked_mul(percent)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        // Near Decimal::MAX the product overflows; divide first instead
        .or_else(|| price.checked_div(Decimal::ONE_HUNDRED)?.checked_mul(percent));
    match cut {
        Some(cut) => price - cut,
        None => price,
    }
}

/// Product entity as returned by the remote store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned by the remote store, never by the client
    #[serde(deserialize_with = "serde_helpers::id::deserialize")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "serde_helpers::price::deserialize")]
    pub price: Decimal,
    pub category: Category,
    #[serde(default, with = "serde_helpers::discount")]
    pub discount: Option<Discount>,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Price after the discount, if any
    pub fn effective_price(&self) -> Decimal {
        apply_discount(self.price, self.discount)
    }

    pub fn has_discount(&self) -> bool {
        self.discount.is_some()
    }
}

/// Create/update payload (full record body, no id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(deserialize_with = "serde_helpers::price::deserialize")]
    pub price: Decimal,
    pub category: Category,
    #[serde(default, with = "serde_helpers::discount")]
    pub discount: Option<Discount>,
    pub image: String,
}

impl ProductDraft {
    /// Whether `product` carries exactly this draft's fields
    pub fn matches(&self, product: &Product) -> bool {
        self.name == product.name
            && self.price == product.price
            && self.category == product.category
            && self.discount == product.discount
            && self.image == product.image
    }
}
