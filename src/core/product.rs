//! Product persistence, always scoped to one parent brand.
//!
//! Every function takes the owning `brand_id` and refuses to read or touch products of
//! other brands. Category links are written in the same transaction as the product
//! row so a failed save never leaves a half-linked record behind.

use crate::{
    core::{category, table::TableFilter},
    entities::{Brand, Product, ProductCategory, brand, product, product_category},
    errors::{Error, Result},
};
use sea_orm::{
    ConnectionTrait, Order, PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*,
};
use tracing::info;

/// Values of a product as submitted from the form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    /// Product name
    pub name: String,
    /// Slug derived from the name
    pub slug: String,
    /// Rich text description
    pub description: String,
    /// Stored image reference
    pub image: String,
    /// Base price
    pub amount: f64,
    /// Discount percentage
    pub discount: f64,
    /// Price after discount, as computed by the form
    pub discount_amount: f64,
    /// Brand chosen in the form; only honoured when editing
    pub brand_id: Option<i64>,
    /// Linked categories
    pub categories: Vec<i64>,
    /// Sales channel visibility
    pub is_visible: bool,
}

/// A listing row: the product and its resolved brand.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    /// The product
    pub product: product::Model,
    /// Its brand, if the reference resolves
    pub brand: Option<brand::Model>,
}

/// Finds a product by ID, but only if it belongs to `brand_id`.
pub async fn get_brand_product<C>(
    db: &C,
    brand_id: i64,
    product_id: i64,
) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .filter(product::Column::BrandId.eq(brand_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the products of a brand joined with their brand, filtered and sorted.
///
/// Ties on the sort column are broken by newest ID first.
pub async fn list_brand_products(
    db: &DatabaseConnection,
    brand_id: i64,
    sort: (product::Column, Order),
    filters: &[TableFilter],
) -> Result<Vec<ProductRow>> {
    let mut query = Product::find().filter(product::Column::BrandId.eq(brand_id));
    for filter in filters {
        query = (filter.apply)(query);
    }

    let rows = query
        .order_by(sort.0, sort.1)
        .order_by_desc(product::Column::Id)
        .find_also_related(Brand)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(product, brand)| ProductRow { product, brand })
        .collect())
}

/// Whether any product other than `ignore_id` already holds `value` in `column`.
pub async fn value_taken<C>(
    db: &C,
    column: product::Column,
    value: &str,
    ignore_id: Option<i64>,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let mut query = Product::find().filter(column.eq(value));
    if let Some(id) = ignore_id {
        query = query.filter(product::Column::Id.ne(id));
    }

    Ok(query.count(db).await? > 0)
}

/// Creates a product under `brand_id` and links its categories.
///
/// The owning brand always wins over `input.brand_id`.
///
/// # Errors
/// Returns an error if any insert fails (e.g. a duplicate slug slipping past
/// validation); nothing is written in that case.
pub async fn create_product(
    db: &DatabaseConnection,
    brand_id: i64,
    input: ProductInput,
) -> Result<product::Model> {
    let txn = db.begin().await?;
    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        brand_id: Set(brand_id),
        name: Set(input.name),
        slug: Set(input.slug),
        description: Set(input.description),
        image: Set(input.image),
        amount: Set(input.amount),
        discount: Set(input.discount),
        discount_amount: Set(input.discount_amount),
        is_visible: Set(input.is_visible),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    category::sync_product_categories(&txn, product.id, &input.categories).await?;
    txn.commit().await?;

    info!(brand_id, product_id = product.id, slug = %product.slug, "Product created");
    Ok(product)
}

/// Updates a product of `brand_id` and re-links its categories.
///
/// `input.brand_id` moves the product to another brand when set.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist under `brand_id`
/// - The database update fails
pub async fn update_product(
    db: &DatabaseConnection,
    brand_id: i64,
    product_id: i64,
    input: ProductInput,
) -> Result<product::Model> {
    let txn = db.begin().await?;

    let mut product: product::ActiveModel = get_brand_product(&txn, brand_id, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    product.brand_id = Set(input.brand_id.unwrap_or(brand_id));
    product.name = Set(input.name);
    product.slug = Set(input.slug);
    product.description = Set(input.description);
    product.image = Set(input.image);
    product.amount = Set(input.amount);
    product.discount = Set(input.discount);
    product.discount_amount = Set(input.discount_amount);
    product.is_visible = Set(input.is_visible);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    let product = product.update(&txn).await?;
    category::sync_product_categories(&txn, product.id, &input.categories).await?;
    txn.commit().await?;

    info!(brand_id, product_id, "Product updated");
    Ok(product)
}

/// Deletes one product of `brand_id` together with its category links.
///
/// Returns the deleted record.
///
/// # Errors
/// Returns an error if the product does not exist under `brand_id` or a delete fails.
pub async fn delete_product(
    db: &DatabaseConnection,
    brand_id: i64,
    product_id: i64,
) -> Result<product::Model> {
    let txn = db.begin().await?;

    let product = get_brand_product(&txn, brand_id, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    ProductCategory::delete_many()
        .filter(product_category::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    Product::delete_by_id(product_id).exec(&txn).await?;
    txn.commit().await?;

    info!(brand_id, product_id, "Product deleted");
    Ok(product)
}

/// Deletes every product in `product_ids` that belongs to `brand_id`.
///
/// IDs of other brands or unknown IDs are skipped. Returns the deleted records.
pub async fn delete_products(
    db: &DatabaseConnection,
    brand_id: i64,
    product_ids: &[i64],
) -> Result<Vec<product::Model>> {
    if product_ids.is_empty() {
        return Ok(Vec::new());
    }

    let txn = db.begin().await?;

    let products = Product::find()
        .filter(product::Column::BrandId.eq(brand_id))
        .filter(product::Column::Id.is_in(product_ids.iter().copied()))
        .all(&txn)
        .await?;
    let ids: Vec<i64> = products.iter().map(|product| product.id).collect();

    if !ids.is_empty() {
        ProductCategory::delete_many()
            .filter(product_category::Column::ProductId.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;
        Product::delete_many()
            .filter(product::Column::Id.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    info!(brand_id, requested = product_ids.len(), deleted = ids.len(), "Products deleted");
    Ok(products)
}
