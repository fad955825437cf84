use async_trait::async_trait;

use super::{Spare, SpareFields};
use crate::domain::DomainResult;

#[async_trait]
pub trait SpareRepositoryInterface: Send + Sync {
    async fn create_spare(&self, fields: SpareFields) -> DomainResult<Spare>;

    /// All spares in insertion order.
    async fn list_spares(&self) -> DomainResult<Vec<Spare>>;
    async fn get_spare(&self, id: i32) -> DomainResult<Option<Spare>>;

    /// Full overwrite of the writable fields. `Ok(None)` when absent.
    async fn update_spare(&self, id: i32, fields: SpareFields) -> DomainResult<Option<Spare>>;

    async fn delete_spare(&self, id: i32) -> DomainResult<()>;
}
