//! Inventory service — spare-part CRUD with stock invariants

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, SaleRepositoryInterface, Spare, SpareFields,
    SpareRepositoryInterface,
};

pub struct InventoryService<S, L>
where
    S: SpareRepositoryInterface,
    L: SaleRepositoryInterface,
{
    spares: Arc<S>,
    sales: Arc<L>,
}

impl<S, L> InventoryService<S, L>
where
    S: SpareRepositoryInterface,
    L: SaleRepositoryInterface,
{
    pub fn new(spares: Arc<S>, sales: Arc<L>) -> Self {
        Self { spares, sales }
    }

    pub async fn add_spare(&self, fields: SpareFields) -> DomainResult<Spare> {
        let fields = validate_fields(fields)?;
        let spare = self.spares.create_spare(fields).await?;
        info!(spare_id = spare.id, name = %spare.name, "Spare added");
        Ok(spare)
    }

    pub async fn list_spares(&self) -> DomainResult<Vec<Spare>> {
        self.spares.list_spares().await
    }

    pub async fn get_spare(&self, id: i32) -> DomainResult<Option<Spare>> {
        self.spares.get_spare(id).await
    }

    /// Full overwrite of the writable fields; also the path for direct
    /// inventory corrections, which must keep the quantity non-negative.
    pub async fn update_spare(&self, id: i32, fields: SpareFields) -> DomainResult<Option<Spare>> {
        let fields = validate_fields(fields)?;
        let updated = self.spares.update_spare(id, fields).await?;
        if let Some(ref spare) = updated {
            info!(spare_id = spare.id, name = %spare.name, "Spare updated");
        }
        Ok(updated)
    }

    /// Delete a spare. Blocked while sales reference it: sales are the only
    /// history the system keeps, and they are immutable.
    pub async fn delete_spare(&self, id: i32) -> DomainResult<()> {
        let recorded = self.sales.count_for_spare(id).await?;
        if recorded > 0 {
            return Err(DomainError::Conflict(format!(
                "Spare has {} recorded sale(s) and cannot be deleted",
                recorded
            )));
        }

        self.spares.delete_spare(id).await?;
        info!(spare_id = id, "Spare deleted");
        Ok(())
    }
}

fn validate_fields(mut fields: SpareFields) -> DomainResult<SpareFields> {
    fields.name = fields.name.trim().to_string();
    if fields.name.is_empty() {
        return Err(DomainError::Validation("Name must not be empty".into()));
    }
    if fields.quantity < 0 {
        return Err(DomainError::Validation(
            "Quantity must be non-negative".into(),
        ));
    }
    if fields.price < Decimal::ZERO {
        return Err(DomainError::Validation("Price must be non-negative".into()));
    }

    fields.company = fields
        .company
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::setup_db;
    use crate::infrastructure::database::repositories::{SaleRepository, SpareRepository};

    async fn service() -> (
        InventoryService<SpareRepository, SaleRepository>,
        Arc<SaleRepository>,
    ) {
        let db = setup_db().await;
        let sales = Arc::new(SaleRepository::new(db.clone()));
        let svc = InventoryService::new(Arc::new(SpareRepository::new(db)), Arc::clone(&sales));
        (svc, sales)
    }

    fn fields(quantity: i32, price: Decimal) -> SpareFields {
        SpareFields {
            name: "Brake Pad".to_string(),
            company: Some("Bosch".to_string()),
            quantity,
            price,
        }
    }

    #[tokio::test]
    async fn negative_quantity_and_price_are_rejected() {
        let (svc, _) = service().await;

        let err = svc
            .add_spare(fields(-1, Decimal::new(100, 2)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc
            .add_spare(fields(1, Decimal::new(-100, 2)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert!(svc.list_spares().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (svc, _) = service().await;
        let mut f = fields(1, Decimal::ONE);
        f.name = "   ".to_string();

        let err = svc.add_spare(f).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn blank_company_becomes_none() {
        let (svc, _) = service().await;
        let mut f = fields(1, Decimal::ONE);
        f.company = Some("  ".to_string());

        let spare = svc.add_spare(f).await.unwrap();
        assert_eq!(spare.company, None);
    }

    #[tokio::test]
    async fn delete_is_blocked_while_sales_exist() {
        let (svc, sales) = service().await;
        let spare = svc.add_spare(fields(10, Decimal::ONE)).await.unwrap();

        sales.record_sale(spare.id, 2).await.unwrap();

        let err = svc.delete_spare(spare.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(svc.get_spare(spare.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_without_sales_succeeds() {
        let (svc, _) = service().await;
        let spare = svc.add_spare(fields(10, Decimal::ONE)).await.unwrap();

        svc.delete_spare(spare.id).await.unwrap();
        assert!(svc.get_spare(spare.id).await.unwrap().is_none());
    }
}
