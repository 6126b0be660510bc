//! Lenient (de)serializers for product fields
//!
//! The mock store keeps whatever the form posted, so ids, prices and
//! discounts come back as JSON numbers or as numeric strings depending on
//! who wrote the record.

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

/// Record id: accepts `"7"` or `7`
pub mod id {
    use super::NumberOrString;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => s,
        })
    }
}

/// Price: accepts `40.5`, `"40.5"` or `"1e3"`
///
/// Values outside `0..=max_price()` are clamped with a warning so one bad
/// record cannot break the list or the effective-price math.
pub mod price {
    use super::NumberOrString;
    use crate::models::max_price;
    use rust_decimal::Decimal;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use std::str::FromStr;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => s.trim().to_string(),
        };
        let price = Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| D::Error::custom(format!("invalid price: {:?}", text)))?;

        if price < Decimal::ZERO {
            tracing::warn!(price = %price, "Clamping negative price to zero");
            return Ok(Decimal::ZERO);
        }
        if price > max_price() {
            tracing::warn!(price = %price, "Clamping out-of-range price");
            return Ok(max_price());
        }
        Ok(price)
    }
}

/// Optional percentage discount
///
/// Decodes `5`, `"5"`, `0`, `""`, `null` or a missing field. Zero and empty
/// mean no discount. Values outside the offered set are dropped with a
/// warning rather than failing the whole list. Encodes `None` as `0`.
pub mod discount {
    use super::NumberOrString;
    use crate::models::Discount;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Discount>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(value.map(|d| d.percent()).unwrap_or(0))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Discount>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<NumberOrString>::deserialize(deserializer)?;
        let percent = match raw {
            None => return Ok(None),
            Some(NumberOrString::Number(n)) => n.as_f64(),
            Some(NumberOrString::String(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<f64>().ok()
            }
        };

        match percent {
            Some(p) if p == 0.0 => Ok(None),
            Some(p) if p.fract() == 0.0 && p > 0.0 => {
                let found = Discount::from_percent(p as u32);
                if found.is_none() {
                    tracing::warn!(percent = p, "Ignoring unsupported discount value");
                }
                Ok(found)
            }
            other => {
                tracing::warn!(value = ?other, "Ignoring malformed discount value");
                Ok(None)
            }
        }
    }
}
