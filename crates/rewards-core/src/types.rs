//! # Domain Types
//!
//! The receipt shape exactly as it arrives over the wire.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐       │
//! │  │         Receipt          │        │           Item           │       │
//! │  │  ──────────────────────  │  1..*  │  ──────────────────────  │       │
//! │  │  retailer                │───────►│  shortDescription        │       │
//! │  │  purchaseDate  (Y-M-D)   │        │  price  ("6.49")         │       │
//! │  │  purchaseTime  (HH:MM)   │        └──────────────────────────┘       │
//! │  │  total  ("35.35")        │                                           │
//! │  └──────────────────────────┘                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Strings?
//! All fields stay as the strings the client sent. Validation and scoring
//! both work on the exact text (`"20.00"` ends in `.00`, `"Target"` has six
//! characters), so nothing is normalised on the way in. Missing and `null`
//! JSON fields decode to empty values and are reported by validation as
//! "required".

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Receipt
// =============================================================================

/// A submitted purchase receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    /// Store or retailer name.
    #[serde(deserialize_with = "null_as_default")]
    pub retailer: String,

    /// Calendar date of the purchase, `YYYY-MM-DD`.
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_date: String,

    /// 24-hour clock time of the purchase, `HH:MM`.
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_time: String,

    /// Purchased items, in receipt order.
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Item>,

    /// Total amount paid, two decimals.
    #[serde(deserialize_with = "null_as_default")]
    pub total: String,
}

// =============================================================================
// Item
// =============================================================================

/// A single line on a receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    /// Short product description for the item.
    #[serde(deserialize_with = "null_as_default")]
    pub short_description: String,

    /// Price paid for this item, two decimals.
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
}

impl Item {
    /// Convenience constructor.
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Item {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

/// Decodes JSON `null` as the type's empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_json_field_names() {
        let json = r#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [{ "shortDescription": "Mountain Dew 12PK", "price": "6.49" }],
            "total": "6.49"
        }"#;

        let receipt: Receipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.retailer, "Target");
        assert_eq!(receipt.purchase_date, "2022-01-01");
        assert_eq!(receipt.purchase_time, "13:01");
        assert_eq!(receipt.items, vec![Item::new("Mountain Dew 12PK", "6.49")]);
        assert_eq!(receipt.total, "6.49");

        let back = serde_json::to_value(&receipt).unwrap();
        assert_eq!(back["items"][0]["shortDescription"], "Mountain Dew 12PK");
    }

    #[test]
    fn test_missing_fields_decode_empty() {
        let receipt: Receipt = serde_json::from_str(r#"{ "retailer": "Target" }"#).unwrap();
        assert_eq!(receipt.retailer, "Target");
        assert!(receipt.purchase_date.is_empty());
        assert!(receipt.items.is_empty());
        assert!(receipt.total.is_empty());
    }

    #[test]
    fn test_null_fields_decode_empty() {
        let json = r#"{
            "retailer": null,
            "purchaseDate": "2022-01-01",
            "purchaseTime": null,
            "items": [{ "shortDescription": null, "price": "6.49" }],
            "total": null
        }"#;

        let receipt: Receipt = serde_json::from_str(json).unwrap();
        assert!(receipt.retailer.is_empty());
        assert_eq!(receipt.purchase_date, "2022-01-01");
        assert!(receipt.purchase_time.is_empty());
        assert_eq!(receipt.items, vec![Item::new("", "6.49")]);
        assert!(receipt.total.is_empty());

        let receipt: Receipt = serde_json::from_str(r#"{ "items": null }"#).unwrap();
        assert!(receipt.items.is_empty());
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let result = serde_json::from_str::<Receipt>(r#"{ "total": 35.35 }"#);
        assert!(result.is_err());
    }
}
