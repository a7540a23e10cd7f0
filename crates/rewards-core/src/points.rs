//! # Points Module
//!
//! The loyalty-points rule engine.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Points Rules (all summed)                        │
//! │                                                                         │
//! │  retailer_name       +1 per character of the retailer, spaces removed   │
//! │  round_dollar        +50 if total ends in ".00"                         │
//! │  quarter_multiple    +25 if total is a multiple of $0.25                │
//! │  item_pairs          +5 per two items                                   │
//! │  item_descriptions   +ceil(price × 0.2) per item whose trimmed          │
//! │                      description length is a multiple of 3              │
//! │  odd_day             +6 if the purchase day of month is odd             │
//! │  afternoon_window    +10 if 14:00 < purchase time < 16:00               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Every function here is pure: no locks, no shared state. Any number of
//! receipts can be scored in parallel.
//!
//! ## Example
//! ```rust
//! use rewards_core::points::calculate_points;
//! use rewards_core::types::{Item, Receipt};
//!
//! let receipt = Receipt {
//!     retailer: "Valid Retailer".into(),
//!     purchase_date: "2022-02-23".into(),
//!     purchase_time: "15:30".into(),
//!     items: vec![Item::new("Item 1", "10.00"), Item::new("Item 2", "10.00")],
//!     total: "20.00".into(),
//! };
//! assert_eq!(calculate_points(&receipt).unwrap(), 113);
//! ```

use chrono::{Datelike, Timelike};

use crate::error::CalculationError;
use crate::money::Money;
use crate::types::Receipt;
use crate::validation::{parse_purchase_date, parse_purchase_time};

// =============================================================================
// Rule Constants
// =============================================================================

/// Bonus for a total with no cents.
pub const ROUND_DOLLAR_BONUS: u64 = 50;

/// Bonus for a total that is a multiple of 25 cents.
pub const QUARTER_MULTIPLE_BONUS: u64 = 25;

/// Bonus per complete pair of items.
pub const ITEM_PAIR_BONUS: u64 = 5;

/// Percentage of an item's price awarded by the description rule.
pub const DESCRIPTION_PRICE_PERCENT: u32 = 20;

/// Bonus for an odd day of the month.
pub const ODD_DAY_BONUS: u64 = 6;

/// Bonus for a purchase strictly inside the afternoon window.
pub const AFTERNOON_BONUS: u64 = 10;

/// 14:00 as minutes after midnight (exclusive).
const AFTERNOON_START_MINUTE: u32 = 14 * 60;

/// 16:00 as minutes after midnight (exclusive).
const AFTERNOON_END_MINUTE: u32 = 16 * 60;

// =============================================================================
// Points Breakdown
// =============================================================================

/// Points awarded by each rule for one receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub retailer_name: u64,
    pub round_dollar: u64,
    pub quarter_multiple: u64,
    pub item_pairs: u64,
    pub item_descriptions: u64,
    pub odd_day: u64,
    pub afternoon_window: u64,
}

impl PointsBreakdown {
    /// Sum of all rules.
    pub fn total(&self) -> u64 {
        self.retailer_name
            + self.round_dollar
            + self.quarter_multiple
            + self.item_pairs
            + self.item_descriptions
            + self.odd_day
            + self.afternoon_window
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Scores a receipt and returns the total points.
///
/// ## User Workflow
/// ```text
/// GET /receipts/{id}/points
///      │
///      ▼
/// calculate_points(&receipt) ← THIS FUNCTION
///      │
///      ├── Err → 500 "Error calculating points"
///      │
///      └── Ok(points) → {"points": points}
/// ```
pub fn calculate_points(receipt: &Receipt) -> Result<u64, CalculationError> {
    calculate_breakdown(receipt).map(|b| b.total())
}

/// Scores a receipt rule by rule.
///
/// Fields are re-parsed here rather than trusted, so the calculator is safe
/// to call on a receipt that never went through validation. On any parse
/// failure no points are returned at all. Failures are reported in rule
/// order: item price, total, date, time.
pub fn calculate_breakdown(receipt: &Receipt) -> Result<PointsBreakdown, CalculationError> {
    let mut breakdown = PointsBreakdown {
        retailer_name: retailer_name_points(&receipt.retailer),
        item_pairs: (receipt.items.len() as u64 / 2) * ITEM_PAIR_BONUS,
        ..PointsBreakdown::default()
    };

    for (index, item) in receipt.items.iter().enumerate() {
        if item.short_description.trim().chars().count() % 3 != 0 {
            continue;
        }

        let price = Money::parse(&item.price).map_err(|source| CalculationError::InvalidPrice {
            index,
            value: item.price.clone(),
            source,
        })?;
        breakdown.item_descriptions += description_points(price);
    }

    let total = Money::parse(&receipt.total).map_err(|source| CalculationError::InvalidTotal {
        value: receipt.total.clone(),
        source,
    })?;
    if total.is_whole_dollars() {
        breakdown.round_dollar = ROUND_DOLLAR_BONUS;
    }
    if total.is_multiple_of(Money::QUARTER) {
        breakdown.quarter_multiple = QUARTER_MULTIPLE_BONUS;
    }

    let date = parse_purchase_date(&receipt.purchase_date)
        .ok_or_else(|| CalculationError::InvalidDate(receipt.purchase_date.clone()))?;
    if date.day() % 2 == 1 {
        breakdown.odd_day = ODD_DAY_BONUS;
    }

    let time = parse_purchase_time(&receipt.purchase_time)
        .ok_or_else(|| CalculationError::InvalidTime(receipt.purchase_time.clone()))?;
    let minute_of_day = time.hour() * 60 + time.minute();
    if minute_of_day > AFTERNOON_START_MINUTE && minute_of_day < AFTERNOON_END_MINUTE {
        breakdown.afternoon_window = AFTERNOON_BONUS;
    }

    Ok(breakdown)
}

/// Every character except the space counts, punctuation included.
fn retailer_name_points(retailer: &str) -> u64 {
    retailer.chars().filter(|c| *c != ' ').count() as u64
}

fn description_points(price: Money) -> u64 {
    price
        .ceil_percent_in_dollars(DESCRIPTION_PRICE_PERCENT)
        .max(0) as u64
}

// =============================================================================
// Unit Tests
// =============================================================================
