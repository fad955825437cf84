//! Sale entity
//!
//! Rows are append-only: no update path exists in the repositories and the
//! API exposes no edit or delete operation.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub spare_id: i32,

    pub quantity_sold: i32,

    pub sold_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spare::Entity",
        from = "Column::SpareId",
        to = "super::spare::Column::Id"
    )]
    Spare,
}

impl Related<super::spare::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spare.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
