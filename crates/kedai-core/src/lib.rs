//! # kedai-core: Pure Business Logic for Kedai POS
//!
//! This crate is the **heart** of the Kedai POS order engine. It contains
//! the cart arithmetic, the order domain types and lifecycle rules, and the
//! sales aggregation - all as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kedai POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Cashier UI / Admin Back-office (excluded)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kedai-service                                │   │
//! │  │    create_order, mark_paid, confirm_accepted, history, sales    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kedai-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  report   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ aggregate │  │   │
//! │  │   │   Order   │  │  TaxRate  │  │ CartLine  │  │  buckets  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kedai-db (Database Layer)                    │   │
//! │  │          SQLite repositories, OrderRepository contract          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderLine, enums)
//! - [`money`] - Money type and totals calculation (integer rupiah)
//! - [`cart`] - The cashier's cart aggregate
//! - [`report`] - Sales aggregation for the dashboard
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input,
//!    same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are whole rupiah (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kedai_core::money::{compute_totals, Money};
//!
//! // Two espressos at Rp20.000, taxed at the fixed 11% rate
//! let totals = compute_totals([(Money::from_rupiah(20_000), 2)]);
//! assert_eq!(totals.subtotal.rupiah(), 40_000);
//! assert_eq!(totals.tax.rupiah(), 4_400);
//! assert_eq!(totals.total.rupiah(), 44_400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kedai_core::Money` instead of
// `use kedai_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{compute_totals, Money, OrderTotals, TaxRate, TAX_RATE};
pub use report::{aggregate, BucketPeriod, ProductSales, SalesBucket, SalesReport};
pub use types::*;
