//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A wallet that accumulates float drift will eventually debit or         │
//! │  display the wrong amount.                                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹500.00 = 50000 paise, ₹150.00 = 15000 paise                         │
//! │    Every calculation stays exact from cost estimate to wallet debit     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vprint_core::money::Money;
//!
//! // Create from paise (preferred)
//! let cost = Money::from_paise(15000); // ₹150.00
//!
//! // Arithmetic operations
//! let doubled = cost * 2;                       // ₹300.00
//! let total = cost + Money::from_paise(500);    // ₹155.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(150.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (the smallest INR unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values (refund math)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Tariff ──► estimate_cost ──► PrintJob.cost_paise ──► wallet debit
///                                      │
///                                      └──► UPI link amount ("150.00")
/// ```
/// Every monetary value in the system flows through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vprint_core::money::Money;
    ///
    /// let cost = Money::from_paise(15000); // Represents ₹150.00
    /// assert_eq!(cost.paise(), 15000);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use vprint_core::money::Money;
    ///
    /// let starting_balance = Money::from_rupees(500); // ₹500.00
    /// assert_eq!(starting_balance.paise(), 50000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a count (pages, copies).
    ///
    /// ## Example
    /// ```rust
    /// use vprint_core::money::Money;
    ///
    /// let per_page = Money::from_paise(500); // ₹5.00
    /// let ten_pages = per_page.multiply_count(10);
    /// assert_eq!(ten_pages.paise(), 5000); // ₹50.00
    /// ```
    #[inline]
    pub const fn multiply_count(&self, count: i64) -> Self {
        Money(self.0 * count)
    }

    /// Formats the amount as a plain decimal string, e.g. `"150.00"`.
    ///
    /// This is the representation UPI deep links expect in their `am`
    /// parameter. Exact integer formatting, no float round-trip.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log lines. Use frontend formatting for actual
/// UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for page/copy counts).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i32) -> Self {
        Money(self.0 * count as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        Money(self.0 * count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(15099);
        assert_eq!(money.paise(), 15099);
        assert_eq!(money.rupees(), 150);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(500);
        assert_eq!(money.paise(), 50000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(15000)), "₹150.00");
        assert_eq!(format!("{}", Money::from_paise(505)), "₹5.05");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_paise(15000).to_decimal_string(), "150.00");
        assert_eq!(Money::from_paise(50).to_decimal_string(), "0.50");
        assert_eq!(Money::from_paise(20000).to_decimal_string(), "200.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        let result: Money = a * 3;
        assert_eq!(result.paise(), 3000);
    }

    #[test]
    fn test_multiply_count() {
        let per_page = Money::from_paise(500);
        assert_eq!(per_page.multiply_count(10).paise(), 5000);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_paise(100);
        assert!(positive.is_positive());

        let negative = Money::from_paise(-100);
        assert!(negative.is_negative());
    }

    /// The exact debits the payment engine performs must be representable
    /// without drift: ₹500.00 - ₹300.00 = ₹200.00, always.
    #[test]
    fn test_wallet_debit_is_exact() {
        let balance = Money::from_rupees(500);
        let cost = Money::from_rupees(300);
        assert_eq!((balance - cost).paise(), 20000);
        assert_eq!((balance - cost).to_decimal_string(), "200.00");
    }
}
