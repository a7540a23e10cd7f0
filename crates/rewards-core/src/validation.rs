//! # Validation Module
//!
//! Receipt validation for Receipt Rewards.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  validate_receipt (first failure wins)                  │
//! │                                                                         │
//! │  1. Required      retailer, purchaseDate, purchaseTime, total, items    │
//! │  2. Retailer      ^[\w\s-]+$                                            │
//! │  3. Date          YYYY-MM-DD, real calendar day                         │
//! │  4. Time          HH:MM, 24-hour clock                                  │
//! │  5. Total         ^\d+\.\d{2}$                                          │
//! │  6. Each item     description required, price required,                 │
//! │                   description ^[\w\s-]+$, price ^\d+\.\d{2}$            │
//! │  7. Sum           Σ item prices == total                                │
//! │                                                                         │
//! │  A receipt is either fully valid or rejected with ONE reason.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `\w` and `\s` are ASCII here: letters, digits and `_`; tab, newline,
//! form feed, carriage return and space.
//!
//! ## Usage
//! ```rust
//! use rewards_core::types::{Item, Receipt};
//! use rewards_core::validation::{validate_receipt, validate_receipt_id};
//!
//! let receipt = Receipt {
//!     retailer: "Walgreens".into(),
//!     purchase_date: "2022-01-02".into(),
//!     purchase_time: "08:13".into(),
//!     items: vec![Item::new("Pepsi - 12-oz", "1.25")],
//!     total: "1.25".into(),
//! };
//! assert!(validate_receipt(&receipt).is_ok());
//! assert!(validate_receipt_id("7fb1377b-b223-49d9-a31a-5a02701dd310").is_ok());
//! ```

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Item, Receipt};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Patterns (compiled once)
// =============================================================================

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z_\t\n\x0C\r \-]+$").expect("Invalid name regex")
});

static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("Invalid amount regex"));

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid date regex"));

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}$").expect("Invalid time regex"));

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+$").expect("Invalid id regex"));

// =============================================================================
// Shared Parsers
// =============================================================================
// Used by both validation and the points calculator so the two can never
// disagree on what a well-formed date or time is.

/// Parses `YYYY-MM-DD` into a calendar date.
pub(crate) fn parse_purchase_date(value: &str) -> Option<NaiveDate> {
    if !DATE_PATTERN.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parses `HH:MM` (hour may be a single digit) into a clock time.
pub(crate) fn parse_purchase_time(value: &str) -> Option<NaiveTime> {
    if !TIME_PATTERN.is_match(value) {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

// =============================================================================
// Receipt Validator
// =============================================================================

/// Validates a submitted receipt.
///
/// ## User Workflow
/// ```text
/// POST /receipts/process
///      │
///      ▼
/// validate_receipt(&receipt) ← THIS FUNCTION
///      │
///      ├── Err(reason) → 400 "Invalid receipt: <reason>"
///      │
///      └── Ok → assign ID, store, respond {"id": ...}
/// ```
pub fn validate_receipt(receipt: &Receipt) -> ValidationResult<()> {
    require("retailer", &receipt.retailer)?;
    require("purchaseDate", &receipt.purchase_date)?;
    require("purchaseTime", &receipt.purchase_time)?;
    require("total", &receipt.total)?;
    if receipt.items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    validate_name("retailer", &receipt.retailer)?;

    if parse_purchase_date(&receipt.purchase_date).is_none() {
        return Err(ValidationError::invalid_format(
            "purchaseDate",
            "expected a calendar date as YYYY-MM-DD",
        ));
    }

    if parse_purchase_time(&receipt.purchase_time).is_none() {
        return Err(ValidationError::invalid_format(
            "purchaseTime",
            "expected a 24-hour time as HH:MM",
        ));
    }

    let total = validate_amount("total", &receipt.total)?;

    let mut items_sum = Money::zero();
    for (index, item) in receipt.items.iter().enumerate() {
        let price = validate_item(index, item)?;
        items_sum = items_sum.checked_add(price).ok_or_else(|| {
            ValidationError::invalid_format("items", "sum of prices is too large")
        })?;
    }

    // Both sides are exact cents, so the 0.0001 tolerance collapses to equality
    if items_sum != total {
        return Err(ValidationError::TotalMismatch { total, items_sum });
    }

    Ok(())
}

/// Validates one item and returns its parsed price.
///
/// ## Rules
/// - shortDescription and price must not be empty
/// - shortDescription uses letters, digits, `_`, whitespace and `-` only
/// - price has exactly two decimals
pub fn validate_item(index: usize, item: &Item) -> ValidationResult<Money> {
    let description_field = format!("items[{index}].shortDescription");
    let price_field = format!("items[{index}].price");

    require(&description_field, &item.short_description)?;
    require(&price_field, &item.price)?;
    validate_name(&description_field, &item.short_description)?;
    validate_amount(&price_field, &item.price)
}

/// Validates a receipt identifier taken from a request path.
///
/// ## Rules
/// - Must not be empty
/// - Must not contain whitespace anywhere
///
/// The store is not consulted; an unknown but well-formed ID passes.
///
/// ## Example
/// ```rust
/// use rewards_core::validation::validate_receipt_id;
///
/// assert!(validate_receipt_id("abc-123").is_ok());
/// assert!(validate_receipt_id("").is_err());
/// assert!(validate_receipt_id("abc 123").is_err());
/// ```
pub fn validate_receipt_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::required("id"));
    }

    if !ID_PATTERN.is_match(id) {
        return Err(ValidationError::invalid_format(
            "id",
            "must not contain whitespace",
        ));
    }

    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Retailer names and item descriptions.
fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    if !NAME_PATTERN.is_match(value) {
        return Err(ValidationError::invalid_characters(field));
    }
    Ok(())
}

/// Totals and prices: `^\d+\.\d{2}$`.
fn validate_amount(field: &str, value: &str) -> ValidationResult<Money> {
    if !AMOUNT_PATTERN.is_match(value) {
        return Err(ValidationError::invalid_format(
            field,
            "expected digits followed by '.' and exactly two digits",
        ));
    }

    Money::parse(value).map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
