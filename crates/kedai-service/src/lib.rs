//! # kedai-service: Operations Layer for Kedai POS
//!
//! The surface consumed by the UI layers: checkout and the payment
//! lifecycle for the cashier, history and dashboard queries for the
//! admin back-office.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kedai POS Architecture                           │
//! │                                                                         │
//! │  Cashier UI                        Admin UI                             │
//! │  ──────────                        ────────                             │
//! │  add to cart, checkout,            confirm payment received,            │
//! │  mark paid                         history, sales dashboard             │
//! │       │                                 │                               │
//! │  ┌────▼─────────────────────────────────▼────────────────────────────┐  │
//! │  │               ★ kedai-service (THIS CRATE) ★                      │  │
//! │  │                                                                   │  │
//! │  │   ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐     │  │
//! │  │   │ OrderService │  │ HistoryService │  │ DashboardService │     │  │
//! │  │   │ create_order │  │ list (filter + │  │ sales_report     │     │  │
//! │  │   │ mark_paid    │  │  pagination)   │  │ (time buckets)   │     │  │
//! │  │   │ confirm_...  │  └────────────────┘  └──────────────────┘     │  │
//! │  │   └──────────────┘                                               │  │
//! │  └──────────────────────────────┬────────────────────────────────────┘  │
//! │                                 │ OrderRepository trait                  │
//! │  ┌──────────────────────────────▼────────────────────────────────────┐  │
//! │  │                     kedai-db (SQLite / in-memory)                 │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`order`] - Checkout and the pending → paid → accepted lifecycle
//! - [`history`] - Filtered, paginated order history
//! - [`dashboard`] - Sales report aggregation
//! - [`error`] - The error taxonomy the UI maps to messages
//!
//! Every service is generic over [`kedai_db::OrderRepository`], so the
//! whole layer runs against SQLite in production and the in-memory
//! repository in tests.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dashboard;
pub mod error;
pub mod history;
pub mod order;

// =============================================================================
// Re-exports
// =============================================================================

pub use dashboard::DashboardService;
pub use error::{ServiceError, ServiceResult};
pub use history::{HistoryRequest, HistoryService, DEFAULT_PAGE_SIZE};
pub use order::{OrderService, Receipt, ReceiptItem};

// =============================================================================
// End-To-End Tests (SQLite-backed)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kedai_core::{BucketPeriod, Cart, Category, OrderStatus, PaymentMethod, Product};
    use kedai_db::{Database, DbConfig};

    fn espresso() -> Product {
        Product {
            id: "prod-espresso".to_string(),
            name: "Espresso".to_string(),
            description: None,
            category: Category::Coffee,
            price: 20_000,
            image_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_checkout_to_dashboard_on_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let orders = OrderService::new(db.orders());
        let history = HistoryService::new(db.orders());
        let dashboard = DashboardService::new(db.orders());

        // Cashier rings up two espressos
        let mut cart = Cart::new();
        let product = espresso();
        cart.add_item(&product);
        cart.add_item(&product);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);

        let order = orders.create_order("Ani", &mut cart).await.unwrap();
        assert_eq!(order.subtotal, 40_000);
        assert_eq!(order.tax, 4_400);
        assert_eq!(order.total, 44_400);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(cart.is_empty());

        // Pending orders are visible in history but not in revenue
        let page = history.list(&HistoryRequest::default()).await.unwrap();
        assert_eq!(page.total, 1);
        let report = dashboard
            .sales_report(BucketPeriod::Day, None, None)
            .await
            .unwrap();
        assert_eq!(report.total_sales, 0);

        // Payment and confirmation
        orders.mark_paid(&order.id, PaymentMethod::Cash).await.unwrap();
        let accepted = orders.confirm_accepted(&order.id).await.unwrap();
        assert_eq!(accepted.status, OrderStatus::Accepted);

        // Now the dashboard counts it
        let report = dashboard
            .sales_report(BucketPeriod::Day, None, None)
            .await
            .unwrap();
        assert_eq!(report.total_sales, 44_400);
        assert_eq!(report.total_items_sold, 2);
        assert_eq!(report.total_transactions, 1);
        assert_eq!(report.per_product[0].product, "Espresso");
        assert_eq!(report.series.len(), 1);
    }
}
