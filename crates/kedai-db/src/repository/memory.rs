//! # In-Memory Order Repository
//!
//! A `HashMap`-backed implementation of [`OrderRepository`] used by the
//! service-layer tests, and the executable reference for the repository
//! contract - in particular the compare-and-swap semantics of
//! `update_status`.
//!
//! The whole store sits behind one `RwLock`; `update_status` takes the
//! write lock for its read-check-write sequence, which is exactly the
//! atomicity the contract demands.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use kedai_core::{Order, OrderStatus, PaymentMethod};

use crate::error::{DbError, DbResult};
use crate::repository::{OrderFilter, OrderRepository, Page, Pagination};

/// In-process order store.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderRepository {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl MemoryOrderRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn create(&self, order: &Order) -> DbResult<Order> {
        let mut orders = self.orders.write().await;

        if orders
            .values()
            .any(|o| o.invoice_number == order.invoice_number)
        {
            return Err(DbError::UniqueViolation {
                field: "orders.invoice_number".to_string(),
                value: order.invoice_number.clone(),
            });
        }

        orders.insert(order.id.clone(), order.clone());
        Ok(order.clone())
    }

    async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn update_status(
        &self,
        id: &str,
        expected: OrderStatus,
        new_status: OrderStatus,
        payment_method: Option<PaymentMethod>,
    ) -> DbResult<Order> {
        // Write lock held across read-check-write: the CAS is atomic
        let mut orders = self.orders.write().await;

        let order = orders
            .get_mut(id)
            .ok_or_else(|| DbError::not_found("Order", id))?;

        if order.status != expected {
            return Err(DbError::StatusConflict {
                id: id.to_string(),
                current: order.status,
                expected,
            });
        }

        order.status = new_status;
        if payment_method.is_some() {
            order.payment_method = payment_method;
        }
        order.updated_at = Utc::now();

        Ok(order.clone())
    }

    async fn query(&self, filter: &OrderFilter, pagination: Pagination) -> DbResult<Page<Order>> {
        let orders = self.orders.read().await;

        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();

        // Newest first, id as tiebreaker for a stable order
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as i64;
        let start = (pagination.offset() as usize).min(matching.len());
        let end = (start + pagination.per_page as usize).min(matching.len());
        let items = matching[start..end].to_vec();

        Ok(Page::new(items, total, &pagination))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
