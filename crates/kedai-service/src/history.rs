//! # Order History Service
//!
//! The admin back-office history screen: filtered, paginated order lists.
//!
//! The UI sends loosely-typed filter values (select boxes with an "all"
//! option, free-text search, optional date pickers). This module
//! normalizes them into a strict [`OrderFilter`] before the repository
//! ever sees them, so "all", an empty string, and an absent field all
//! mean the same thing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use kedai_core::{Order, OrderStatus, PaymentMethod, ValidationError};
use kedai_db::{OrderFilter, OrderRepository, Page, Pagination};

use crate::error::ServiceResult;

/// Rows per history page when the UI doesn't ask for a size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// =============================================================================
// Request Shape
// =============================================================================

/// Raw history query as sent by the UI.
///
/// String fields accept `"all"` or `""` as "no filter", matching the
/// select-box defaults on the history screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryRequest {
    /// `"pending"`, `"paid"`, `"accepted"`, or `"all"`/empty for no filter.
    pub status: Option<String>,
    /// `"cash"`, `"qris"`, `"debit"`, or `"all"`/empty for no filter.
    pub payment_method: Option<String>,
    /// Inclusive lower bound on checkout time.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on checkout time.
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring over invoice number and buyer name.
    pub search: Option<String>,
    /// 1-based page number. Defaults to 1.
    pub page: Option<u32>,
    /// Page size. Defaults to [`DEFAULT_PAGE_SIZE`].
    pub per_page: Option<u32>,
}

fn parse_status(raw: &str) -> ServiceResult<Option<OrderStatus>> {
    match raw.trim() {
        "" | "all" => Ok(None),
        "pending" => Ok(Some(OrderStatus::Pending)),
        "paid" => Ok(Some(OrderStatus::Paid)),
        "accepted" => Ok(Some(OrderStatus::Accepted)),
        other => Err(ValidationError::InvalidValue {
            field: "status".to_string(),
            value: other.to_string(),
        }
        .into()),
    }
}

fn parse_payment_method(raw: &str) -> ServiceResult<Option<PaymentMethod>> {
    match raw.trim() {
        "" | "all" => Ok(None),
        "cash" => Ok(Some(PaymentMethod::Cash)),
        "qris" => Ok(Some(PaymentMethod::Qris)),
        "debit" => Ok(Some(PaymentMethod::Debit)),
        other => Err(ValidationError::InvalidValue {
            field: "payment_method".to_string(),
            value: other.to_string(),
        }
        .into()),
    }
}

impl HistoryRequest {
    /// Normalizes the raw request into a strict filter.
    fn to_filter(&self) -> ServiceResult<OrderFilter> {
        let status = match &self.status {
            Some(raw) => parse_status(raw)?,
            None => None,
        };
        let payment_method = match &self.payment_method {
            Some(raw) => parse_payment_method(raw)?,
            None => None,
        };
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(OrderFilter {
            status,
            payment_method,
            from: self.from,
            to: self.to,
            search,
        })
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

// =============================================================================
// History Service
// =============================================================================

/// Read-only history queries over an [`OrderRepository`].
#[derive(Debug, Clone)]
pub struct HistoryService<R> {
    repo: R,
}

impl<R: OrderRepository> HistoryService<R> {
    /// Creates a service over the given repository.
    pub fn new(repo: R) -> Self {
        HistoryService { repo }
    }

    /// Lists orders matching the request, newest first.
    ///
    /// ## Errors
    /// - `ServiceError::Validation` - unrecognized status or payment method
    /// - `ServiceError::Repository` - query failure
    pub async fn list(&self, request: &HistoryRequest) -> ServiceResult<Page<Order>> {
        let filter = request.to_filter()?;
        let pagination = request.pagination();

        debug!(
            page = pagination.page,
            per_page = pagination.per_page,
            "History query"
        );

        Ok(self.repo.query(&filter, pagination).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use chrono::Utc;
    use kedai_core::OrderLine;
    use kedai_db::MemoryOrderRepository;
    use uuid::Uuid;

    fn test_order(invoice: &str, buyer: &str, status: OrderStatus) -> Order {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        Order {
            id: id.clone(),
            invoice_number: invoice.to_string(),
            buyer_name: buyer.to_string(),
            lines: vec![OrderLine {
                id: Uuid::new_v4().to_string(),
                order_id: id,
                product_id: "p1".to_string(),
                name_snapshot: "Espresso".to_string(),
                unit_price: 20_000,
                quantity: 1,
                line_total: 20_000,
            }],
            subtotal: 20_000,
            tax: 2_200,
            total: 22_200,
            status,
            payment_method: None,
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded_service() -> HistoryService<MemoryOrderRepository> {
        let repo = MemoryOrderRepository::new();
        for i in 0..12 {
            let status = if i < 5 {
                OrderStatus::Paid
            } else {
                OrderStatus::Pending
            };
            repo.create(&test_order(&format!("INV-{i:02}"), "Ani", status))
                .await
                .unwrap();
        }
        HistoryService::new(repo)
    }

    #[tokio::test]
    async fn test_defaults_page_one_size_ten() {
        let svc = seeded_service().await;
        let page = svc.list(&HistoryRequest::default()).await.unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.last_page, 2);
    }

    #[tokio::test]
    async fn test_all_sentinel_means_no_filter() {
        let svc = seeded_service().await;

        let request = HistoryRequest {
            status: Some("all".to_string()),
            payment_method: Some(String::new()),
            ..Default::default()
        };
        let page = svc.list(&request).await.unwrap();
        assert_eq!(page.total, 12);
    }

    #[tokio::test]
    async fn test_status_filter_applied() {
        let svc = seeded_service().await;

        let request = HistoryRequest {
            status: Some("paid".to_string()),
            ..Default::default()
        };
        let page = svc.list(&request).await.unwrap();
        assert_eq!(page.total, 5);
        assert!(page.items.iter().all(|o| o.status == OrderStatus::Paid));
    }

    #[tokio::test]
    async fn test_unknown_status_is_validation_error() {
        let svc = seeded_service().await;

        let request = HistoryRequest {
            status: Some("shipped".to_string()),
            ..Default::default()
        };
        let err = svc.list(&request).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: status has unrecognized value 'shipped'"
        );
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let svc = seeded_service().await;

        let request = HistoryRequest {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let page = svc.list(&request).await.unwrap();
        assert_eq!(page.total, 12);
    }

    #[tokio::test]
    async fn test_second_page() {
        let svc = seeded_service().await;

        let request = HistoryRequest {
            page: Some(2),
            ..Default::default()
        };
        let page = svc.list(&request).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page, 2);
    }
}
