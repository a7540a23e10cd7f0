//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Receipts arrive as strings: "35.35", "1.25", "0.10"                    │
//! │                                                                         │
//! │  As f64:                                                                │
//! │    0.10 + 0.20 = 0.30000000000000004  ❌ sum check needs a tolerance    │
//! │    x % 0.25 == 0.0                    ❌ depends on binary rounding     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "0.10" → 10, "0.20" → 20, 10 + 20 == 30            ✅ exact          │
//! │    "1.25" → 125, 125 % 25 == 0                        ✅ exact          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rewards_core::money::Money;
//!
//! let total = Money::parse("35.35").unwrap();
//! assert_eq!(total.cents(), 3535);
//! assert!(!total.is_whole_dollars());
//! assert!(!total.is_multiple_of(Money::QUARTER));
//! ```

use std::fmt;

use crate::error::MoneyError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Matches arithmetic elsewhere; receipt amounts are never negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No float constructor**: amounts only enter through [`Money::parse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// 25 cents, the unit of the quarter-multiple rule.
    pub const QUARTER: Money = Money(25);

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rewards_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses the two-decimal receipt form: one or more ASCII digits, a
    /// dot, then exactly two ASCII digits.
    ///
    /// ## Example
    /// ```rust
    /// use rewards_core::money::Money;
    ///
    /// assert_eq!(Money::parse("6.49").unwrap().cents(), 649);
    /// assert_eq!(Money::parse("0.00").unwrap().cents(), 0);
    /// assert!(Money::parse("6.4").is_err());
    /// assert!(Money::parse("15.999").is_err());
    /// assert!(Money::parse(".99").is_err());
    /// assert!(Money::parse("-1.00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, MoneyError> {
        let (dollars, cents) = s.split_once('.').ok_or(MoneyError::Malformed)?;

        if dollars.is_empty() || !dollars.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyError::Malformed);
        }
        if cents.len() != 2 || !cents.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyError::Malformed);
        }

        let mut whole: i64 = 0;
        for b in dollars.bytes() {
            whole = whole
                .checked_mul(10)
                .and_then(|w| w.checked_add(i64::from(b - b'0')))
                .ok_or(MoneyError::Overflow)?;
        }
        let fraction = cents
            .bytes()
            .fold(0, |acc, b| acc * 10 + i64::from(b - b'0'));

        whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(fraction))
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// True when there are no cents, e.g. `$12.00`.
    #[inline]
    pub const fn is_whole_dollars(&self) -> bool {
        self.0 % 100 == 0
    }

    /// True when this amount is an exact multiple of `unit`.
    ///
    /// A zero unit divides nothing, so it always returns false.
    #[inline]
    pub const fn is_multiple_of(&self, unit: Money) -> bool {
        unit.0 != 0 && self.0 % unit.0 == 0
    }

    /// Returns `ceil(self × percent / 100)` in whole units of currency.
    ///
    /// ## Example
    /// ```rust
    /// use rewards_core::money::Money;
    ///
    /// // $12.25 × 20% = $2.45 → 3
    /// assert_eq!(Money::from_cents(1225).ceil_percent_in_dollars(20), 3);
    /// // $10.00 × 20% = $2.00 → 2
    /// assert_eq!(Money::from_cents(1000).ceil_percent_in_dollars(20), 2);
    /// ```
    pub fn ceil_percent_in_dollars(&self, percent: u32) -> i64 {
        // cents * percent / (100 cents * 100 %), rounded toward +inf
        let numerator = self.0 as i128 * percent as i128;
        let denominator: i128 = 100 * 100;
        let quotient = numerator.div_euclid(denominator);
        let rounded = if numerator.rem_euclid(denominator) == 0 {
            quotient
        } else {
            quotient + 1
        };
        rounded as i64
    }

    /// Checked addition; `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$12.34`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
