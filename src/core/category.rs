//! Category lookups, select options and product links.

use crate::{
    core::form::{SelectOption, ValidationErrors},
    entities::{Category, ProductCategory, category, product_category},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use std::collections::BTreeSet;

/// Creates a category. The name is trimmed and must not be blank.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The database insert operation fails
pub async fn create_category(db: &DatabaseConnection, name: String) -> Result<category::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        let mut errors = ValidationErrors::default();
        errors.add("name", "The Name field is required.");
        return Err(Error::Validation(errors));
    }

    let category = category::ActiveModel {
        name: Set(name),
        ..Default::default()
    };

    let category = category.insert(db).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok(category)
}

/// Choices for the category multi-select, ordered and labelled by name.
pub async fn category_options(db: &DatabaseConnection) -> Result<Vec<SelectOption>> {
    let categories = Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;

    Ok(categories
        .into_iter()
        .map(|category| SelectOption {
            id: category.id,
            label: category.name,
        })
        .collect())
}

/// IDs from `ids` that do not name an existing category, in input order.
pub async fn missing_categories<C>(db: &C, ids: &[i64]) -> Result<Vec<i64>>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found: BTreeSet<i64> = Category::find()
        .filter(category::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|category| category.id)
        .collect();

    Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}

/// IDs of the categories a product is filed under, ascending.
pub async fn category_ids_for_product<C>(db: &C, product_id: i64) -> Result<Vec<i64>>
where
    C: ConnectionTrait,
{
    let links = ProductCategory::find()
        .filter(product_category::Column::ProductId.eq(product_id))
        .order_by_asc(product_category::Column::CategoryId)
        .all(db)
        .await?;

    Ok(links.into_iter().map(|link| link.category_id).collect())
}

/// Replaces a product's category links with exactly `ids` (duplicates ignored).
pub async fn sync_product_categories<C>(db: &C, product_id: i64, ids: &[i64]) -> Result<()>
where
    C: ConnectionTrait,
{
    ProductCategory::delete_many()
        .filter(product_category::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    let unique: BTreeSet<i64> = ids.iter().copied().collect();
    if unique.is_empty() {
        return Ok(());
    }

    let links = unique.into_iter().map(|category_id| product_category::ActiveModel {
        product_id: Set(product_id),
        category_id: Set(category_id),
    });

    ProductCategory::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(())
}
