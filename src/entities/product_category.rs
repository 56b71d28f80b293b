//! Junction table for the product/category many-to-many relation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One product/category pairing
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_categories")]
pub struct Model {
    /// The product side of the pairing
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// The category side of the pairing
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: i64,
}

/// Both ends of the junction
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each row points at one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each row points at one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
