//! Order repository trait.

use crate::error::MetadataResult;
use crate::models::{CustomerSummaryRow, OrderItemRow, OrderRow};
use async_trait::async_trait;
use uuid::Uuid;

/// Aggregate sales figures for the admin dashboard. Cancelled orders are
/// excluded from revenue.
#[derive(Debug, Clone, Default)]
pub struct SalesSummary {
    pub orders_count: u64,
    pub revenue_total: f64,
    pub pending_count: u64,
    pub delivered_count: u64,
}

/// Repository for orders and their line items.
#[async_trait]
pub trait OrderRepo: Send + Sync {
    /// Insert an order with its items atomically.
    ///
    /// Within the same transaction, stock is decremented for every line item
    /// (on the variant when one is referenced, otherwise on the product) and
    /// the product's `sales_count` is bumped. Fails with `InsufficientStock`
    /// when any decrement would go negative, leaving nothing applied.
    async fn create_order(&self, order: &OrderRow, items: &[OrderItemRow]) -> MetadataResult<()>;

    /// Get an order by ID.
    async fn get_order(&self, order_id: Uuid) -> MetadataResult<Option<OrderRow>>;

    /// Get an order by customer-facing order number.
    async fn get_order_by_number(&self, order_number: &str) -> MetadataResult<Option<OrderRow>>;

    /// List an order's line items.
    async fn list_order_items(&self, order_id: Uuid) -> MetadataResult<Vec<OrderItemRow>>;

    /// List orders newest first, optionally restricted to one status.
    async fn list_orders(
        &self,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> MetadataResult<Vec<OrderRow>>;

    /// Transition an order's status, guarded by the expected current status.
    ///
    /// When `restock` is set (cancellation), line-item quantities are returned
    /// to variant/product stock and `sales_count` is rolled back in the same
    /// transaction. Fails with `InvalidStatusTransition` if the order is no
    /// longer in `expected`.
    async fn set_order_status(
        &self,
        order_id: Uuid,
        expected: &str,
        new_status: &str,
        restock: bool,
    ) -> MetadataResult<()>;

    /// Aggregate customers from order history, most recent first.
    async fn list_customers(&self) -> MetadataResult<Vec<CustomerSummaryRow>>;

    /// Aggregate sales figures.
    async fn sales_summary(&self) -> MetadataResult<SalesSummary>;
}
