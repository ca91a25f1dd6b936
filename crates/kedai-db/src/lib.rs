//! # kedai-db: Persistence Layer for Kedai POS
//!
//! SQLite storage for orders and the product catalog, accessed through
//! sqlx with async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kedai POS Data Flow                              │
//! │                                                                         │
//! │  kedai-service (OrderService, HistoryService, DashboardService)        │
//! │       │                                                                 │
//! │       │  via the OrderRepository trait                                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kedai-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │ │   │
//! │  │   │               │    │ SqliteOrder    │    │              │ │   │
//! │  │   │ SqlitePool    │◄───│ SqliteProduct  │    │ 001_init.sql │ │   │
//! │  │   │ Management    │    │ MemoryOrder    │    │              │ │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL mode, foreign keys on)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The [`repository::OrderRepository`] contract and its
//!   SQLite and in-memory implementations, plus the product repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kedai_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/kedai.db")).await?;
//!
//! let order = db.orders().get_by_id("uuid-here").await?;
//! let menu = db.products().list_active().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::memory::MemoryOrderRepository;
pub use repository::order::SqliteOrderRepository;
pub use repository::product::SqliteProductRepository;
pub use repository::{OrderFilter, OrderRepository, Page, Pagination};
