//! Derived product view
//!
//! [`compute_view`] is a pure function of the product list, search text and
//! sort key. [`ViewCache`] remembers the last result so repeated reads with
//! unchanged inputs do not refilter.

use serde::{Deserialize, Serialize};
use shared::{Category, Decimal, Product};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Sort order for the product grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep store order
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "price-asc" | "price-ascending" | "lowtohigh" => Ok(Self::PriceAsc),
            "price-desc" | "price-descending" | "hightolow" => Ok(Self::PriceDesc),
            "name-asc" | "name-ascending" | "atoz" => Ok(Self::NameAsc),
            "name-desc" | "name-descending" | "ztoa" => Ok(Self::NameDesc),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Search text and sort key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewFilter {
    pub search: String,
    pub sort: SortKey,
}

/// Accent- and case-insensitive key: NFD with combining marks dropped
fn primary_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Name ordering used by the grid.
///
/// Base letters first, so `Éclair` sorts with the E's. Ties fall back to
/// accents (unaccented first), then case (lower case first).
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Filter by case-insensitive name substring, then stable-sort by `sort`.
///
/// Never mutates `products`.
pub fn compute_view(products: &[Product], search: &str, sort: SortKey) -> Vec<Product> {
    let needle = search.to_lowercase();
    let mut view: Vec<Product> = products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    // sort_by is stable: equal keys keep list order
    match sort {
        SortKey::None => {}
        SortKey::PriceAsc => view.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => view.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::NameAsc => view.sort_by(|a, b| collate(&a.name, &b.name)),
        SortKey::NameDesc => view.sort_by(|a, b| collate(&b.name, &a.name)),
    }
    view
}

/// Memo of the last computed view
///
/// Keyed on the list revision plus the filter, so any change to the source
/// list, the search text or the sort key recomputes.
#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<(u64, ViewFilter)>,
    view: Arc<Vec<Product>>,
}

impl ViewCache {
    pub fn get_or_compute(
        &mut self,
        revision: u64,
        filter: &ViewFilter,
        products: &[Product],
    ) -> Arc<Vec<Product>> {
        let hit = matches!(&self.key, Some((rev, f)) if *rev == revision && f == filter);
        if !hit {
            self.view = Arc::new(compute_view(products, &filter.search, filter.sort));
            self.key = Some((revision, filter.clone()));
        }
        self.view.clone()
    }
}

/// Format an amount with the rupee sign, trailing zeros dropped
pub fn format_price(amount: Decimal) -> String {
    format!("₹{}", amount.normalize())
}

/// How a card shows its price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceDisplay {
    Regular { price: Decimal },
    /// Original price struck through, effective price highlighted
    Discounted { original: Decimal, effective: Decimal },
}

/// Display model for one product in the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub image: String,
    pub category: Category,
    pub price: PriceDisplay,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        let price = if product.has_discount() {
            PriceDisplay::Discounted {
                original: product.price,
                effective: product.effective_price(),
            }
        } else {
            PriceDisplay::Regular {
                price: product.price,
            }
        };
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            category: product.category,
            price,
        }
    }
}

impl fmt::Display for ProductCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let price = match self.price {
            PriceDisplay::Regular { price } => format_price(price),
            PriceDisplay::Discounted { original, effective } => {
                format!("~{}~ {}", format_price(original), format_price(effective))
            }
        };
        write!(
            f,
            "#{:<6} {:<28} {:<20} [{}]  {}",
            self.id, self.name, price, self.category, self.image
        )
    }
}
