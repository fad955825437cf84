//! Sales service — records sales against stock

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, Sale, SaleRepositoryInterface, SaleWithSpare};
use crate::shared::PaginatedResult;

pub struct SalesService<L: SaleRepositoryInterface> {
    sales: Arc<L>,
}

impl<L: SaleRepositoryInterface> SalesService<L> {
    pub fn new(sales: Arc<L>) -> Self {
        Self { sales }
    }

    /// Record a sale. The repository commits the stock decrement and the
    /// sale row as one transaction; this layer only validates the request
    /// shape before anything touches the database.
    pub async fn record_sale(&self, spare_id: i32, quantity_sold: i32) -> DomainResult<Sale> {
        if quantity_sold <= 0 {
            return Err(DomainError::Validation(
                "Quantity sold must be positive".into(),
            ));
        }

        let sale = self.sales.record_sale(spare_id, quantity_sold).await?;

        info!(
            sale_id = sale.id,
            spare_id = sale.spare_id,
            quantity_sold = sale.quantity_sold,
            "Sale recorded"
        );
        metrics::counter!("sales_recorded_total").increment(1);
        metrics::counter!("units_sold_total").increment(quantity_sold as u64);

        Ok(sale)
    }

    /// Sales history, most recent first.
    pub async fn list_sales(
        &self,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<SaleWithSpare>> {
        self.sales.list_sales(page, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SpareFields, SpareRepositoryInterface};
    use crate::infrastructure::database::repositories::test_support::setup_db;
    use crate::infrastructure::database::repositories::{SaleRepository, SpareRepository};
    use rust_decimal::Decimal;

    async fn setup() -> (SalesService<SaleRepository>, SpareRepository, i32) {
        let db = setup_db().await;
        let spares = SpareRepository::new(db.clone());
        let spare = spares
            .create_spare(SpareFields {
                name: "Brake Pad".to_string(),
                company: None,
                quantity: 10,
                price: Decimal::new(2550, 2),
            })
            .await
            .unwrap();

        let svc = SalesService::new(Arc::new(SaleRepository::new(db)));
        (svc, spares, spare.id)
    }

    #[tokio::test]
    async fn zero_and_negative_quantities_are_rejected_before_any_mutation() {
        let (svc, spares, spare_id) = setup().await;

        for q in [0, -3] {
            let err = svc.record_sale(spare_id, q).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }

        assert_eq!(spares.get_spare(spare_id).await.unwrap().unwrap().quantity, 10);
        assert_eq!(svc.list_sales(1, 50).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn recorded_sale_appears_at_head_of_history() {
        let (svc, spares, spare_id) = setup().await;

        svc.record_sale(spare_id, 3).await.unwrap();

        let spare = spares.get_spare(spare_id).await.unwrap().unwrap();
        assert_eq!(spare.quantity, 7);

        let history = svc.list_sales(1, 50).await.unwrap();
        assert_eq!(history.items[0].sale.quantity_sold, 3);
        assert_eq!(history.items[0].spare_name, "Brake Pad");
    }
}
