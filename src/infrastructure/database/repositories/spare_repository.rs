use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, Spare, SpareFields, SpareRepositoryInterface};
use crate::infrastructure::database::entities::spare;

pub struct SpareRepository {
    db: DatabaseConnection,
}

impl SpareRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn spare_model_to_domain(model: spare::Model) -> Spare {
    Spare {
        id: model.id,
        name: model.name,
        company: model.company,
        quantity: model.quantity,
        price: model.price,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl SpareRepositoryInterface for SpareRepository {
    async fn create_spare(&self, fields: SpareFields) -> DomainResult<Spare> {
        let now = Utc::now();

        let new_spare = spare::ActiveModel {
            name: Set(fields.name),
            company: Set(fields.company),
            quantity: Set(fields.quantity),
            price: Set(fields.price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = new_spare.insert(&self.db).await.map_err(db_err)?;
        Ok(spare_model_to_domain(model))
    }

    async fn list_spares(&self) -> DomainResult<Vec<Spare>> {
        let models = spare::Entity::find()
            .order_by_asc(spare::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(spare_model_to_domain).collect())
    }

    async fn get_spare(&self, id: i32) -> DomainResult<Option<Spare>> {
        let model = spare::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(spare_model_to_domain))
    }

    async fn update_spare(&self, id: i32, fields: SpareFields) -> DomainResult<Option<Spare>> {
        let existing = spare::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: spare::ActiveModel = existing.into();
        active.name = Set(fields.name);
        active.company = Set(fields.company);
        active.quantity = Set(fields.quantity);
        active.price = Set(fields.price);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(spare_model_to_domain(updated)))
    }

    async fn delete_spare(&self, id: i32) -> DomainResult<()> {
        let result = spare::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Spare",
                field: "id",
                value: id.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::setup_db;
    use rust_decimal::Decimal;

    fn brake_pad() -> SpareFields {
        SpareFields {
            name: "Brake Pad".to_string(),
            company: Some("Bosch".to_string()),
            quantity: 10,
            price: Decimal::new(2550, 2), // 25.50
        }
    }

    #[tokio::test]
    async fn add_then_list_contains_exact_fields() {
        let repo = SpareRepository::new(setup_db().await);

        let created = repo.create_spare(brake_pad()).await.unwrap();
        let listed = repo.list_spares().await.unwrap();

        assert_eq!(listed.len(), 1);
        let spare = &listed[0];
        assert_eq!(spare.id, created.id);
        assert_eq!(spare.name, "Brake Pad");
        assert_eq!(spare.company.as_deref(), Some("Bosch"));
        assert_eq!(spare.quantity, 10);
        assert_eq!(spare.price, Decimal::new(2550, 2));
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = SpareRepository::new(setup_db().await);

        for name in ["Oil Filter", "Air Filter", "Spark Plug"] {
            let mut fields = brake_pad();
            fields.name = name.to_string();
            repo.create_spare(fields).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_spares()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Oil Filter", "Air Filter", "Spark Plug"]);
    }

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let repo = SpareRepository::new(setup_db().await);
        let created = repo.create_spare(brake_pad()).await.unwrap();

        let updated = repo
            .update_spare(
                created.id,
                SpareFields {
                    name: "Brake Pad XL".to_string(),
                    company: None,
                    quantity: 4,
                    price: Decimal::new(3000, 2),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Brake Pad XL");
        assert_eq!(updated.company, None);
        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.price, Decimal::new(3000, 2));
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let repo = SpareRepository::new(setup_db().await);
        let result = repo.update_spare(99, brake_pad()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = SpareRepository::new(setup_db().await);
        let err = repo.delete_spare(99).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
