//! Product entity - Items sold under a brand.
//!
//! `slug` is derived from `name` and unique across all products. `discount_amount` is a
//! denormalized value computed in the edit form from `amount` and `discount` before save;
//! it is stored as submitted and never recomputed by the database layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the brand that owns this product
    pub brand_id: i64,
    /// Name of the product (e.g., "Red Shirt")
    pub name: String,
    /// URL-friendly form of the name (e.g., "red-shirt")
    #[sea_orm(unique)]
    pub slug: String,
    /// Rich text description (HTML)
    pub description: String,
    /// Reference to the stored product image
    pub image: String,
    /// Base price
    pub amount: f64,
    /// Discount percentage
    pub discount: f64,
    /// Price after discount, as computed by the form
    pub discount_amount: f64,
    /// Whether the product is exposed on sales channels
    pub is_visible: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one brand
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id"
    )]
    Brand,
    /// Category links through the junction table
    #[sea_orm(has_many = "super::product_category::Entity")]
    ProductCategories,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductCategories.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_category::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
