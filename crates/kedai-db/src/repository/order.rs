//! # SQLite Order Repository
//!
//! Database operations for orders and order lines.
//!
//! ## Order Lifecycle In Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CHECKOUT                                                           │
//! │     └── create() → orders row (status 'pending') + order_lines rows,   │
//! │                    inserted in one transaction                         │
//! │                                                                         │
//! │  2. PAYMENT                                                            │
//! │     └── update_status(pending → paid) records the payment method       │
//! │                                                                         │
//! │  3. CONFIRMATION                                                       │
//! │     └── update_status(paid → accepted)                                 │
//! │                                                                         │
//! │  Both transitions are a compare-and-swap:                              │
//! │     UPDATE orders SET status = new WHERE id = ? AND status = expected  │
//! │  Zero rows affected means the order vanished or someone else won the   │
//! │  race; the two cases are told apart with a follow-up read.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use kedai_core::{Order, OrderLine, OrderStatus, PaymentMethod};

use crate::error::{DbError, DbResult};
use crate::repository::{OrderFilter, OrderRepository, Page, Pagination};

/// SQLite-backed order repository.
#[derive(Debug, Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

/// Raw `orders` row; lines are attached after a second query.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    invoice_number: String,
    buyer_name: String,
    subtotal: i64,
    tax: i64,
    total: i64,
    status: OrderStatus,
    payment_method: Option<PaymentMethod>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLine>) -> Order {
        Order {
            id: self.id,
            invoice_number: self.invoice_number,
            buyer_name: self.buyer_name,
            lines,
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
            status: self.status,
            payment_method: self.payment_method,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const ORDER_COLUMNS: &str = "id, invoice_number, buyer_name, subtotal, tax, total, \
                             status, payment_method, created_at, updated_at";

impl SqliteOrderRepository {
    /// Creates a new SqliteOrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteOrderRepository { pool }
    }

    /// Fetches the lines of one order, in insertion order.
    async fn get_lines(&self, order_id: &str) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            "SELECT id, order_id, product_id, name_snapshot, unit_price, quantity, line_total \
             FROM order_lines WHERE order_id = ?1 ORDER BY rowid",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Appends the filter's WHERE clauses to a query builder.
    ///
    /// Mirrors `OrderFilter::matches` exactly; the in-memory repository is
    /// the executable reference for these semantics.
    fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &OrderFilter) {
        qb.push(" WHERE 1 = 1");

        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(method) = filter.payment_method {
            qb.push(" AND payment_method = ").push_bind(method);
        }
        if let Some(from) = filter.from {
            qb.push(" AND created_at >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            qb.push(" AND created_at <= ").push_bind(to);
        }
        if let Some(search) = &filter.search {
            // SQLite's LOWER() folds ASCII only; fold the needle the
            // same way so both repository implementations agree
            let pattern = format!("%{}%", search.to_ascii_lowercase());
            qb.push(" AND (LOWER(invoice_number) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(buyer_name) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create(&self, order: &Order) -> DbResult<Order> {
        debug!(id = %order.id, invoice = %order.invoice_number, "Inserting order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, invoice_number, buyer_name, subtotal, tax, total, \
                                 status, payment_method, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&order.id)
        .bind(&order.invoice_number)
        .bind(&order.buyer_name)
        .bind(order.subtotal)
        .bind(order.tax)
        .bind(order.total)
        .bind(order.status)
        .bind(order.payment_method)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for line in &order.lines {
            sqlx::query(
                "INSERT INTO order_lines (id, order_id, product_id, name_snapshot, \
                                          unit_price, quantity, line_total) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(&line.id)
            .bind(&line.order_id)
            .bind(&line.product_id)
            .bind(&line.name_snapshot)
            .bind(line.unit_price)
            .bind(line.quantity)
            .bind(line.line_total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order.clone())
    }

    async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let lines = self.get_lines(&row.id).await?;
                Ok(Some(row.into_order(lines)))
            }
            None => Ok(None),
        }
    }

    async fn update_status(
        &self,
        id: &str,
        expected: OrderStatus,
        new_status: OrderStatus,
        payment_method: Option<PaymentMethod>,
    ) -> DbResult<Order> {
        debug!(id = %id, %expected, %new_status, "Conditional status update");

        let now = Utc::now();

        // The WHERE clause on the current status makes this a
        // compare-and-swap: concurrent transitions on the same order
        // resolve to exactly one winner.
        let result = sqlx::query(
            "UPDATE orders SET status = ?1, \
                               payment_method = COALESCE(?2, payment_method), \
                               updated_at = ?3 \
             WHERE id = ?4 AND status = ?5",
        )
        .bind(new_status)
        .bind(payment_method)
        .bind(now)
        .bind(id)
        .bind(expected)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Missing order or lost race: a follow-up read tells which
            return match self.get_by_id(id).await? {
                None => Err(DbError::not_found("Order", id)),
                Some(order) => Err(DbError::StatusConflict {
                    id: id.to_string(),
                    current: order.status,
                    expected,
                }),
            };
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    async fn query(&self, filter: &OrderFilter, pagination: Pagination) -> DbResult<Page<Order>> {
        // Total count with the same filter
        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM orders");
        Self::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        // Page of rows, newest first
        let mut qb =
            QueryBuilder::<Sqlite>::new(format!("SELECT {ORDER_COLUMNS} FROM orders"));
        Self::push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(pagination.per_page as i64)
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<OrderRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let lines = self.get_lines(&row.id).await?;
            items.push(row.into_order(lines));
        }

        debug!(total, page = pagination.page, returned = items.len(), "Order query");

        Ok(Page::new(items, total, &pagination))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
