//! # Tariff Module
//!
//! Cost estimation for print jobs.
//!
//! ## The Tariff
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Print Cost Calculation                              │
//! │                                                                         │
//! │  cost = (base_rate + color_premium?) × pages × copies                   │
//! │                                                                         │
//! │  base_rate      = ₹5.00 per page                                        │
//! │  color_premium  = ₹10.00 per page (color jobs only)                     │
//! │                                                                         │
//! │  Examples:                                                              │
//! │    10 pages × 1 copy,  B&W   → ₹5  × 10 × 1 = ₹50.00                    │
//! │    10 pages × 1 copy,  color → ₹15 × 10 × 1 = ₹150.00                   │
//! │    10 pages × 2 copies, color → ₹15 × 10 × 2 = ₹300.00                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The estimate is recomputed server-side at job creation; a client-supplied
//! cost is never trusted.

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_copies, validate_pages};

// =============================================================================
// Tariff
// =============================================================================

/// Base rate per page in paise (₹5.00).
pub const BASE_RATE_PAISE: i64 = 500;

/// Extra per page for color printing in paise (₹10.00).
pub const COLOR_PREMIUM_PAISE: i64 = 1000;

/// The fixed print tariff.
///
/// A single tariff applies system-wide; per-campus tariffs would carry this
/// struct through configuration instead of the [`Tariff::default`] constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tariff {
    /// Charge per page, black & white.
    pub base_rate: Money,
    /// Additional charge per page when printing in color.
    pub color_premium: Money,
}

impl Default for Tariff {
    fn default() -> Self {
        Tariff {
            base_rate: Money::from_paise(BASE_RATE_PAISE),
            color_premium: Money::from_paise(COLOR_PREMIUM_PAISE),
        }
    }
}

impl Tariff {
    /// Returns the effective per-page rate for a job.
    #[inline]
    pub fn page_rate(&self, is_color: bool) -> Money {
        if is_color {
            self.base_rate + self.color_premium
        } else {
            self.base_rate
        }
    }

    /// Estimates the cost of a print job.
    ///
    /// ## Contract
    /// - `pages` must be in `1..=500`
    /// - `copies` must be in `1..=100`
    /// - Pure and deterministic; the only failure mode is input validation.
    ///
    /// ## Example
    /// ```rust
    /// use vprint_core::tariff::Tariff;
    ///
    /// let cost = Tariff::default().estimate_cost(10, 2, true).unwrap();
    /// assert_eq!(cost.paise(), 30000); // ₹300.00
    /// ```
    pub fn estimate_cost(
        &self,
        pages: i64,
        copies: i64,
        is_color: bool,
    ) -> Result<Money, ValidationError> {
        validate_pages(pages)?;
        validate_copies(copies)?;

        Ok(self
            .page_rate(is_color)
            .multiply_count(pages)
            .multiply_count(copies))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_and_white_cost() {
        // 10 pages, 1 copy, B&W → ₹50.00
        let cost = Tariff::default().estimate_cost(10, 1, false).unwrap();
        assert_eq!(cost.paise(), 5000);
    }

    #[test]
    fn test_color_cost() {
        // 10 pages, 1 copy, color → ₹150.00
        let cost = Tariff::default().estimate_cost(10, 1, true).unwrap();
        assert_eq!(cost.paise(), 15000);
    }

    #[test]
    fn test_copies_multiply() {
        // 10 pages, 2 copies, color → ₹300.00
        let cost = Tariff::default().estimate_cost(10, 2, true).unwrap();
        assert_eq!(cost.paise(), 30000);
        assert_eq!(cost.to_decimal_string(), "300.00");
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let tariff = Tariff::default();
        let a = tariff.estimate_cost(37, 3, true).unwrap();
        let b = tariff.estimate_cost(37, 3, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounds_rejected() {
        let tariff = Tariff::default();
        assert!(tariff.estimate_cost(0, 1, false).is_err());
        assert!(tariff.estimate_cost(501, 1, false).is_err());
        assert!(tariff.estimate_cost(10, 0, false).is_err());
        assert!(tariff.estimate_cost(10, 101, false).is_err());
    }

    #[test]
    fn test_max_job_has_no_overflow() {
        // 500 pages × 100 copies × ₹15.00 = ₹750,000.00
        let cost = Tariff::default().estimate_cost(500, 100, true).unwrap();
        assert_eq!(cost.paise(), 75_000_000);
    }
}
