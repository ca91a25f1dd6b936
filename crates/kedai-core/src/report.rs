//! # Sales Report Module
//!
//! Derives the cashier dashboard metrics from a set of orders: overall
//! totals, per-product revenue, and a time-bucketed sales series.
//!
//! ## Status-Agnostic By Design
//! The aggregator never inspects order status. Revenue reporting must
//! exclude pending orders, but that filtering is the caller's job (the
//! dashboard service does it) so that this module stays a deterministic,
//! pure transformation over whatever collection it is handed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Order;

// =============================================================================
// Bucket Period
// =============================================================================

/// Granularity used to group orders for the sales time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BucketPeriod {
    Day,
    Month,
    Year,
}

impl BucketPeriod {
    /// chrono format string producing the bucket label.
    ///
    /// Labels sort lexicographically in chronological order, which keeps
    /// the series ascending without a date re-parse.
    fn label_format(&self) -> &'static str {
        match self {
            BucketPeriod::Day => "%Y-%m-%d",
            BucketPeriod::Month => "%Y-%m",
            BucketPeriod::Year => "%Y",
        }
    }
}

// =============================================================================
// Report Shapes
// =============================================================================

/// Units and revenue for one product, grouped by product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    /// Product name (the snapshot on the order line).
    pub product: String,
    /// Total units sold across all orders.
    pub units_sold: i64,
    /// Σ(unit_price × quantity) in rupiah.
    pub revenue: i64,
}

/// One point of the time-bucketed sales series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesBucket {
    /// Bucket label, e.g. `2026-08-24`, `2026-08`, or `2026`.
    pub label: String,
    /// Σ order.total within the bucket, in rupiah.
    pub total: i64,
}

/// The full dashboard aggregation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    /// Σ order.total over the input set, in rupiah.
    pub total_sales: i64,
    /// Σ line.quantity over all lines of all orders.
    pub total_items_sold: i64,
    /// Number of orders in the input set.
    pub total_transactions: i64,
    /// Per-product breakdown, in stable first-seen order.
    pub per_product: Vec<ProductSales>,
    /// Sparse sales series, ascending by bucket. Buckets with zero orders
    /// are omitted; zero-fill belongs to the presentation layer.
    pub series: Vec<SalesBucket>,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Aggregates dashboard metrics from a set of orders.
///
/// Pure function: no persistent state, same input always yields the same
/// report.
///
/// ## Example
/// ```text
/// Orders: [Rp50.000 paid, Rp30.000 paid, Rp20.000 accepted]
///      │
///      ▼
/// aggregate(orders, BucketPeriod::Day)
///      │
///      ▼
/// total_sales = Rp100.000, series grouped by calendar day
/// ```
pub fn aggregate(orders: &[Order], period: BucketPeriod) -> SalesReport {
    let mut total_sales = 0i64;
    let mut total_items_sold = 0i64;
    let mut per_product: Vec<ProductSales> = Vec::new();
    // BTreeMap keeps buckets ascending by label
    let mut buckets = std::collections::BTreeMap::<String, i64>::new();

    for order in orders {
        total_sales += order.total;

        for line in &order.lines {
            total_items_sold += line.quantity;

            // Linear scan keeps first-seen ordering; dashboards group a
            // handful of menu items, not thousands
            match per_product
                .iter_mut()
                .find(|p| p.product == line.name_snapshot)
            {
                Some(entry) => {
                    entry.units_sold += line.quantity;
                    entry.revenue += line.line_total;
                }
                None => per_product.push(ProductSales {
                    product: line.name_snapshot.clone(),
                    units_sold: line.quantity,
                    revenue: line.line_total,
                }),
            }
        }

        let label = order.created_at.format(period.label_format()).to_string();
        *buckets.entry(label).or_insert(0) += order.total;
    }

    SalesReport {
        total_sales,
        total_items_sold,
        total_transactions: orders.len() as i64,
        per_product,
        series: buckets
            .into_iter()
            .map(|(label, total)| SalesBucket { label, total })
            .collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderLine, OrderStatus, PaymentMethod};
    use chrono::{TimeZone, Utc};

    fn test_order(id: &str, day: u32, lines: Vec<(&str, i64, i64)>) -> Order {
        let created_at = Utc.with_ymd_and_hms(2026, 8, day, 10, 0, 0).unwrap();
        let order_lines: Vec<OrderLine> = lines
            .iter()
            .enumerate()
            .map(|(i, (name, price, qty))| OrderLine {
                id: format!("{id}-l{i}"),
                order_id: id.to_string(),
                product_id: format!("prod-{name}"),
                name_snapshot: name.to_string(),
                unit_price: *price,
                quantity: *qty,
                line_total: price * qty,
            })
            .collect();

        let subtotal: i64 = order_lines.iter().map(|l| l.line_total).sum();
        let tax = (subtotal * 1100 + 5000) / 10000;

        Order {
            id: id.to_string(),
            invoice_number: format!("INV-{id}"),
            buyer_name: "Budi".to_string(),
            lines: order_lines,
            subtotal,
            tax,
            total: subtotal + tax,
            status: OrderStatus::Paid,
            payment_method: Some(PaymentMethod::Cash),
            created_at,
            updated_at: created_at,
        }
    }

    fn order_with_total(id: &str, day: u32, total: i64) -> Order {
        let mut order = test_order(id, day, vec![("Espresso", total, 1)]);
        // Force the exact total for sum assertions
        order.subtotal = total;
        order.tax = 0;
        order.total = total;
        order
    }

    #[test]
    fn test_total_sales_sums_order_totals() {
        let orders = vec![
            order_with_total("o1", 1, 50_000),
            order_with_total("o2", 1, 30_000),
            order_with_total("o3", 2, 20_000),
        ];

        let report = aggregate(&orders, BucketPeriod::Day);
        assert_eq!(report.total_sales, 100_000);
        assert_eq!(report.total_transactions, 3);
    }

    #[test]
    fn test_per_product_groups_across_orders() {
        // Same product in two orders: qty 2 and qty 3 at Rp10.000
        let orders = vec![
            test_order("o1", 1, vec![("Kopi Susu", 10_000, 2)]),
            test_order("o2", 2, vec![("Kopi Susu", 10_000, 3)]),
        ];

        let report = aggregate(&orders, BucketPeriod::Day);
        assert_eq!(report.per_product.len(), 1);
        assert_eq!(report.per_product[0].product, "Kopi Susu");
        assert_eq!(report.per_product[0].units_sold, 5);
        assert_eq!(report.per_product[0].revenue, 50_000);
        assert_eq!(report.total_items_sold, 5);
    }

    #[test]
    fn test_per_product_keeps_first_seen_order() {
        let orders = vec![
            test_order("o1", 1, vec![("Espresso", 20_000, 1), ("Croissant", 18_000, 1)]),
            test_order("o2", 1, vec![("Croissant", 18_000, 2), ("Latte", 25_000, 1)]),
        ];

        let report = aggregate(&orders, BucketPeriod::Day);
        let names: Vec<&str> = report.per_product.iter().map(|p| p.product.as_str()).collect();
        assert_eq!(names, vec!["Espresso", "Croissant", "Latte"]);
    }

    #[test]
    fn test_series_buckets_by_day_sparse_ascending() {
        let orders = vec![
            order_with_total("o1", 3, 10_000),
            order_with_total("o2", 1, 20_000),
            order_with_total("o3", 3, 5_000),
            // Nothing on Aug 2: that bucket must be absent, not zero
        ];

        let report = aggregate(&orders, BucketPeriod::Day);
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.series[0].label, "2026-08-01");
        assert_eq!(report.series[0].total, 20_000);
        assert_eq!(report.series[1].label, "2026-08-03");
        assert_eq!(report.series[1].total, 15_000);
    }

    #[test]
    fn test_series_buckets_by_month_and_year() {
        let mut o1 = order_with_total("o1", 1, 10_000);
        let mut o2 = order_with_total("o2", 2, 20_000);
        o1.created_at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
        o2.created_at = Utc.with_ymd_and_hms(2026, 8, 2, 9, 0, 0).unwrap();
        let orders = vec![o1, o2];

        let monthly = aggregate(&orders, BucketPeriod::Month);
        assert_eq!(monthly.series.len(), 2);
        assert_eq!(monthly.series[0].label, "2026-01");
        assert_eq!(monthly.series[1].label, "2026-08");

        let yearly = aggregate(&orders, BucketPeriod::Year);
        assert_eq!(yearly.series.len(), 1);
        assert_eq!(yearly.series[0].label, "2026");
        assert_eq!(yearly.series[0].total, 30_000);
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let report = aggregate(&[], BucketPeriod::Day);
        assert_eq!(report.total_sales, 0);
        assert_eq!(report.total_items_sold, 0);
        assert_eq!(report.total_transactions, 0);
        assert!(report.per_product.is_empty());
        assert!(report.series.is_empty());
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let orders = vec![
            test_order("o1", 1, vec![("Espresso", 20_000, 2)]),
            test_order("o2", 2, vec![("Latte", 25_000, 1)]),
        ];

        let a = aggregate(&orders, BucketPeriod::Day);
        let b = aggregate(&orders, BucketPeriod::Day);
        assert_eq!(a, b);
    }
}
