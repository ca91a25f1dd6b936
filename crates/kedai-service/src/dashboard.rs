//! # Sales Dashboard Service
//!
//! Feeds the cashier dashboard: picks the revenue-relevant orders and
//! runs the pure aggregator over them.
//!
//! The aggregator in kedai-core is deliberately agnostic of lifecycle
//! rules, so the status screening lives here: only `paid` and `accepted`
//! orders count as revenue, pending ones never reach the aggregation.

use chrono::{DateTime, Utc};
use tracing::debug;

use kedai_core::{aggregate, BucketPeriod, Order, OrderStatus, SalesReport};
use kedai_db::{OrderFilter, OrderRepository, Pagination};

use crate::error::ServiceResult;

/// Batch size when draining the repository for a report.
const REPORT_PAGE_SIZE: u32 = 500;

/// Sales reporting over an [`OrderRepository`].
#[derive(Debug, Clone)]
pub struct DashboardService<R> {
    repo: R,
}

impl<R: OrderRepository> DashboardService<R> {
    /// Creates a service over the given repository.
    pub fn new(repo: R) -> Self {
        DashboardService { repo }
    }

    /// Builds the sales report for an optional date range.
    ///
    /// Collects `paid` and `accepted` orders created within the inclusive
    /// `[from, to]` window (unbounded when `None`) and aggregates them
    /// into totals, per-product revenue, and a time-bucketed series.
    pub async fn sales_report(
        &self,
        period: BucketPeriod,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> ServiceResult<SalesReport> {
        let mut orders = self.collect_status(OrderStatus::Paid, from, to).await?;
        orders.extend(self.collect_status(OrderStatus::Accepted, from, to).await?);

        debug!(count = orders.len(), ?period, "Aggregating sales report");

        Ok(aggregate(&orders, period))
    }

    /// Drains every order with one status in the window, page by page.
    async fn collect_status(
        &self,
        status: OrderStatus,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> ServiceResult<Vec<Order>> {
        let filter = OrderFilter {
            status: Some(status),
            from,
            to,
            ..Default::default()
        };

        let mut orders = Vec::new();
        let mut page = 1;
        loop {
            let batch = self
                .repo
                .query(&filter, Pagination::new(page, REPORT_PAGE_SIZE))
                .await?;
            let last_page = batch.last_page;
            orders.extend(batch.items);

            if page >= last_page {
                break;
            }
            page += 1;
        }

        Ok(orders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kedai_core::{OrderLine, PaymentMethod};
    use kedai_db::MemoryOrderRepository;
    use uuid::Uuid;

    fn test_order(total: i64, status: OrderStatus, qty: i64) -> Order {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let subtotal = total * 10_000 / 11_100;
        Order {
            id: id.clone(),
            invoice_number: format!("INV-{}", &id[..8]),
            buyer_name: "Ani".to_string(),
            lines: vec![OrderLine {
                id: Uuid::new_v4().to_string(),
                order_id: id,
                product_id: "p1".to_string(),
                name_snapshot: "Espresso".to_string(),
                unit_price: 10_000,
                quantity: qty,
                line_total: 10_000 * qty,
            }],
            subtotal,
            tax: total - subtotal,
            total,
            status,
            payment_method: Some(PaymentMethod::Cash),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_pending_orders_excluded_from_revenue() {
        let repo = MemoryOrderRepository::new();
        repo.create(&test_order(50_000, OrderStatus::Paid, 2))
            .await
            .unwrap();
        repo.create(&test_order(30_000, OrderStatus::Accepted, 3))
            .await
            .unwrap();
        repo.create(&test_order(20_000, OrderStatus::Pending, 1))
            .await
            .unwrap();

        let svc = DashboardService::new(repo);
        let report = svc
            .sales_report(BucketPeriod::Day, None, None)
            .await
            .unwrap();

        assert_eq!(report.total_sales, 80_000);
        assert_eq!(report.total_transactions, 2);
        assert_eq!(report.total_items_sold, 5);
    }

    #[tokio::test]
    async fn test_per_product_rollup_across_orders() {
        let repo = MemoryOrderRepository::new();
        repo.create(&test_order(22_200, OrderStatus::Paid, 2))
            .await
            .unwrap();
        repo.create(&test_order(33_300, OrderStatus::Paid, 3))
            .await
            .unwrap();

        let svc = DashboardService::new(repo);
        let report = svc
            .sales_report(BucketPeriod::Day, None, None)
            .await
            .unwrap();

        assert_eq!(report.per_product.len(), 1);
        assert_eq!(report.per_product[0].units_sold, 5);
        assert_eq!(report.per_product[0].revenue, 50_000);
    }

    #[tokio::test]
    async fn test_date_window_applies() {
        let repo = MemoryOrderRepository::new();
        repo.create(&test_order(50_000, OrderStatus::Paid, 1))
            .await
            .unwrap();

        let svc = DashboardService::new(repo);

        // A window ending before any order was created is empty
        let past = Utc::now() - chrono::Duration::days(7);
        let report = svc
            .sales_report(BucketPeriod::Day, None, Some(past))
            .await
            .unwrap();

        assert_eq!(report.total_sales, 0);
        assert_eq!(report.total_transactions, 0);
        assert!(report.series.is_empty());
    }

    #[tokio::test]
    async fn test_empty_repository_reports_zeroes() {
        let svc = DashboardService::new(MemoryOrderRepository::new());
        let report = svc
            .sales_report(BucketPeriod::Month, None, None)
            .await
            .unwrap();

        assert_eq!(report.total_sales, 0);
        assert_eq!(report.total_items_sold, 0);
        assert!(report.per_product.is_empty());
    }
}
