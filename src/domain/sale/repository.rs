use async_trait::async_trait;

use super::{Sale, SaleWithSpare};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait SaleRepositoryInterface: Send + Sync {
    /// Record a sale against a spare.
    ///
    /// The stock decrement and the sale insertion commit as a single
    /// transaction: a sale row without the matching decrement (or the
    /// reverse) must be impossible, and two concurrent sales must never
    /// oversubscribe the stock.
    async fn record_sale(&self, spare_id: i32, quantity_sold: i32) -> DomainResult<Sale>;

    /// Sales ordered by `sold_at` descending (most recent first).
    async fn list_sales(&self, page: u32, limit: u32) -> DomainResult<PaginatedResult<SaleWithSpare>>;

    /// Number of sales recorded against a spare.
    async fn count_for_spare(&self, spare_id: i32) -> DomainResult<u64>;
}
