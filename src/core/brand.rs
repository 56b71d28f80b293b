//! Brand lookups and select options.
//!
//! Brands are the parent records of the product relation manager. This module creates
//! them and resolves `brand_id` references to names for the select and the listing.

use crate::{
    core::form::{SelectOption, ValidationErrors},
    entities::{Brand, brand},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use std::collections::BTreeSet;

/// Creates a brand. The name is trimmed and must not be blank.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The database insert operation fails
pub async fn create_brand(db: &DatabaseConnection, name: String) -> Result<brand::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        let mut errors = ValidationErrors::default();
        errors.add("name", "The Name field is required.");
        return Err(Error::Validation(errors));
    }

    let now = chrono::Utc::now().naive_utc();
    let brand = brand::ActiveModel {
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let brand = brand.insert(db).await?;
    tracing::info!(brand_id = brand.id, name = %brand.name, "Brand created");
    Ok(brand)
}

/// Finds a brand by its unique ID.
pub async fn get_brand_by_id<C>(db: &C, brand_id: i64) -> Result<Option<brand::Model>>
where
    C: ConnectionTrait,
{
    Brand::find_by_id(brand_id).one(db).await.map_err(Into::into)
}

/// IDs from `ids` that do not name an existing brand, in input order.
pub async fn missing_brands<C>(db: &C, ids: &[i64]) -> Result<Vec<i64>>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found: BTreeSet<i64> = Brand::find()
        .filter(brand::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|brand| brand.id)
        .collect();

    Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}

/// All brands, ordered alphabetically by name.
pub async fn get_all_brands(db: &DatabaseConnection) -> Result<Vec<brand::Model>> {
    Brand::find()
        .order_by_asc(brand::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Choices for the single brand select, labelled by name.
pub async fn brand_options(db: &DatabaseConnection) -> Result<Vec<SelectOption>> {
    Ok(get_all_brands(db)
        .await?
        .into_iter()
        .map(|brand| SelectOption {
            id: brand.id,
            label: brand.name,
        })
        .collect())
}
