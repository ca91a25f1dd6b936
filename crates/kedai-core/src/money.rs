//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, plus the
//! totals calculation used at checkout.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Rupiah                                           │
//! │    The Indonesian Rupiah has no sub-unit in practice, so every          │
//! │    amount in the system is a whole number of rupiah (i64).              │
//! │    Rp20.000 is stored as 20000 - nothing to round, nothing to lose.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kedai_core::money::{compute_totals, Money};
//!
//! let espresso = Money::from_rupiah(20_000);
//!
//! // Two espressos, 11% tax
//! let totals = compute_totals([(espresso, 2)]);
//! assert_eq!(totals.subtotal.rupiah(), 40_000);
//! assert_eq!(totals.tax.rupiah(), 4_400);
//! assert_eq!(totals.total.rupiah(), 44_400);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1100 bps = 11% (Indonesian PPN)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// The fixed 11% tax rate applied uniformly to every order.
///
/// There are no per-line tax overrides: the whole order subtotal is taxed
/// at this single rate.
pub const TAX_RATE: TaxRate = TaxRate::from_bps(1100);

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Indonesian Rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic intermediate values may go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No fractional unit**: Rupiah amounts are integers end to end
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use kedai_core::money::Money;
    ///
    /// let price = Money::from_rupiah(20_000);
    /// assert_eq!(price.rupiah(), 20_000);
    /// ```
    #[inline]
    pub const fn from_rupiah(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in whole rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax with half-up rounding to the nearest rupiah.
    ///
    /// ## Implementation
    /// Integer math only: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides the rounding (5000/10000 = 0.5), so
    /// Rp999 at 11% = Rp109.89 rounds to Rp110.
    ///
    /// ## Example
    /// ```rust
    /// use kedai_core::money::{Money, TAX_RATE};
    ///
    /// let subtotal = Money::from_rupiah(40_000);
    /// assert_eq!(subtotal.calculate_tax(TAX_RATE).rupiah(), 4_400);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 intermediate to prevent overflow on large amounts
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_rupiah(tax as i64)
    }

    /// Multiplies money by a quantity (line total calculation).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money the Indonesian way: `Rp44.400`.
///
/// This is for logs and debugging. The frontend owns actual display
/// formatting and localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        write!(f, "{}Rp{}", sign, grouped)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The three monetary figures of an order.
///
/// Invariant: `total == subtotal + tax`, always, by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Sum of unit_price × quantity over all lines.
    pub subtotal: Money,
    /// 11% of the subtotal, rounded half-up to the nearest rupiah.
    pub tax: Money,
    /// subtotal + tax.
    pub total: Money,
}

/// Computes subtotal, tax, and total from (unit price, quantity) pairs.
///
/// Pure and idempotent: calling twice with the same input yields identical
/// output. Tax is applied once to the whole subtotal, never per line.
///
/// ## User Workflow
/// ```text
/// Cart lines: (Rp20.000 × 2)
///      │
///      ▼
/// compute_totals() ← THIS FUNCTION
///      │
///      ▼
/// subtotal Rp40.000, tax Rp4.400, total Rp44.400
/// ```
pub fn compute_totals<I>(lines: I) -> OrderTotals
where
    I: IntoIterator<Item = (Money, i64)>,
{
    let subtotal = lines
        .into_iter()
        .map(|(unit_price, quantity)| unit_price.multiply_quantity(quantity))
        .fold(Money::zero(), |acc, line| acc + line);
    let tax = subtotal.calculate_tax(TAX_RATE);

    OrderTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
