use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, Sale, SaleRepositoryInterface, SaleWithSpare};
use crate::infrastructure::database::entities::{sale, spare};
use crate::shared::PaginatedResult;

pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sale_model_to_domain(model: sale::Model) -> Sale {
    Sale {
        id: model.id,
        spare_id: model.spare_id,
        quantity_sold: model.quantity_sold,
        sold_at: model.sold_at,
    }
}

#[async_trait]
impl SaleRepositoryInterface for SaleRepository {
    async fn record_sale(&self, spare_id: i32, quantity_sold: i32) -> DomainResult<Sale> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let spare = spare::Entity::find_by_id(spare_id)
            .one(&txn)
            .await
            .map_err(db_err)?;

        let Some(spare) = spare else {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::NotFound {
                entity: "Spare",
                field: "id",
                value: spare_id.to_string(),
            });
        };

        // Guarded decrement: the stock check and the decrement are one
        // statement, so a concurrent sale that raced past the read above
        // still cannot drive the quantity below zero.
        let updated = spare::Entity::update_many()
            .col_expr(
                spare::Column::Quantity,
                Expr::col(spare::Column::Quantity).sub(quantity_sold),
            )
            .col_expr(spare::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(spare::Column::Id.eq(spare_id))
            .filter(spare::Column::Quantity.gte(quantity_sold))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if updated.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::InsufficientStock {
                spare_id,
                requested: quantity_sold,
                available: spare.quantity,
            });
        }

        let new_sale = sale::ActiveModel {
            spare_id: Set(spare_id),
            quantity_sold: Set(quantity_sold),
            sold_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = new_sale.insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(sale_model_to_domain(model))
    }

    async fn list_sales(
        &self,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<SaleWithSpare>> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let total = sale::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let offset = ((page - 1) * limit) as u64;
        let rows = sale::Entity::find()
            .find_also_related(spare::Entity)
            .order_by_desc(sale::Column::SoldAt)
            .order_by_desc(sale::Column::Id)
            .offset(offset)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = rows
            .into_iter()
            .map(|(sale_model, spare_model)| SaleWithSpare {
                sale: sale_model_to_domain(sale_model),
                spare_name: spare_model.map(|s| s.name).unwrap_or_default(),
            })
            .collect();

        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn count_for_spare(&self, spare_id: i32) -> DomainResult<u64> {
        sale::Entity::find()
            .filter(sale::Column::SpareId.eq(spare_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{SpareFields, SpareRepositoryInterface};
    use crate::infrastructure::database::repositories::test_support::setup_db;
    use crate::infrastructure::database::repositories::SpareRepository;
    use rust_decimal::Decimal;

    async fn seed_spare(db: &DatabaseConnection, quantity: i32) -> i32 {
        let repo = SpareRepository::new(db.clone());
        let spare = repo
            .create_spare(SpareFields {
                name: "Brake Pad".to_string(),
                company: None,
                quantity,
                price: Decimal::new(2550, 2),
            })
            .await
            .unwrap();
        spare.id
    }

    #[tokio::test]
    async fn sale_decrements_stock_and_appends_record() {
        let db = setup_db().await;
        let spare_id = seed_spare(&db, 10).await;

        let repo = SaleRepository::new(db.clone());
        let sale = repo.record_sale(spare_id, 3).await.unwrap();
        assert_eq!(sale.quantity_sold, 3);

        let spares = SpareRepository::new(db.clone());
        let spare = spares.get_spare(spare_id).await.unwrap().unwrap();
        assert_eq!(spare.quantity, 7);

        let listed = repo.list_sales(1, 50).await.unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.items[0].sale.quantity_sold, 3);
        assert_eq!(listed.items[0].spare_name, "Brake Pad");
    }

    #[tokio::test]
    async fn repeated_sales_accumulate() {
        let db = setup_db().await;
        let spare_id = seed_spare(&db, 10).await;
        let repo = SaleRepository::new(db.clone());

        repo.record_sale(spare_id, 3).await.unwrap();
        repo.record_sale(spare_id, 3).await.unwrap();

        let spare = SpareRepository::new(db.clone())
            .get_spare(spare_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(spare.quantity, 4);

        assert_eq!(repo.count_for_spare(spare_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn oversell_mutates_nothing() {
        let db = setup_db().await;
        let spare_id = seed_spare(&db, 5).await;
        let repo = SaleRepository::new(db.clone());

        let err = repo.record_sale(spare_id, 6).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientStock {
                requested: 6,
                available: 5,
                ..
            }
        ));

        let spare = SpareRepository::new(db.clone())
            .get_spare(spare_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(spare.quantity, 5);
        assert_eq!(repo.list_sales(1, 50).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn missing_spare_is_not_found() {
        let db = setup_db().await;
        let repo = SaleRepository::new(db);

        let err = repo.record_sale(42, 1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn concurrent_sales_never_oversubscribe() {
        let db = setup_db().await;
        let spare_id = seed_spare(&db, 5).await;
        let repo = Arc::new(SaleRepository::new(db.clone()));

        let a = {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.record_sale(spare_id, 5).await })
        };
        let b = {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.record_sale(spare_id, 5).await })
        };

        let (ra, rb) = (a.await.unwrap(), b.await.unwrap());
        let successes = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one of two racing sales may succeed");

        let loser = if ra.is_ok() { rb } else { ra };
        assert!(matches!(
            loser.unwrap_err(),
            DomainError::InsufficientStock { .. }
        ));

        let spare = SpareRepository::new(db.clone())
            .get_spare(spare_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(spare.quantity, 0);
    }

    #[tokio::test]
    async fn sales_list_is_most_recent_first() {
        let db = setup_db().await;
        let spare_id = seed_spare(&db, 10).await;
        let repo = SaleRepository::new(db);

        repo.record_sale(spare_id, 1).await.unwrap();
        repo.record_sale(spare_id, 2).await.unwrap();
        repo.record_sale(spare_id, 3).await.unwrap();

        let quantities: Vec<i32> = repo
            .list_sales(1, 50)
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|s| s.sale.quantity_sold)
            .collect();
        assert_eq!(quantities, [3, 2, 1]);
    }
}
