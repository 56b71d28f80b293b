//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{brand, category, product, slug::slugify, storage::ImageStore},
    entities::{self, Product},
    errors::Result,
};
use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test brand.
pub async fn create_test_brand(db: &DatabaseConnection, name: &str) -> Result<entities::BrandModel> {
    brand::create_brand(db, name.to_string()).await
}

/// Creates a test category.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::CategoryModel> {
    category::create_category(db, name.to_string()).await
}

/// Product input with sensible defaults.
///
/// # Defaults
/// * `slug`: slug of `name`
/// * `amount`: 100.0, no discount
/// * `image`: "test.png"
/// * `is_visible`: true
pub fn test_input(name: &str) -> product::ProductInput {
    product::ProductInput {
        name: name.to_string(),
        slug: slugify(name),
        description: "<p>Test product</p>".to_string(),
        image: "test.png".to_string(),
        amount: 100.0,
        discount: 0.0,
        discount_amount: 0.0,
        brand_id: None,
        categories: Vec::new(),
        is_visible: true,
    }
}

/// Creates a test product under `brand_id` with [`test_input`] defaults.
pub async fn create_test_product(
    db: &DatabaseConnection,
    brand_id: i64,
    name: &str,
) -> Result<entities::ProductModel> {
    product::create_product(db, brand_id, test_input(name)).await
}

/// Overwrites a product's creation time, for ordering tests.
pub async fn set_created_at(
    db: &DatabaseConnection,
    product_id: i64,
    created_at: NaiveDateTime,
) -> Result<entities::ProductModel> {
    let mut product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(crate::errors::Error::ProductNotFound { id: product_id })?
        .into_active_model();
    product.created_at = Set(created_at);
    product.update(db).await.map_err(Into::into)
}

/// Sets up a complete test environment with a brand.
/// Returns (db, brand) for common test scenarios.
pub async fn setup_with_brand() -> Result<(DatabaseConnection, entities::BrandModel)> {
    let db = setup_test_db().await?;
    let brand = create_test_brand(&db, "Test Brand").await?;
    Ok((db, brand))
}

/// Image store keeping uploads in memory.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    /// Whether `reference` is currently stored.
    pub fn contains(&self, reference: &str) -> bool {
        self.files
            .lock()
            .is_ok_and(|files| files.contains_key(reference))
    }
}

impl ImageStore for MemoryImageStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let mut files = self
            .files
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let reference = format!("{}-{original_name}", files.len() + 1);
        files.insert(reference.clone(), bytes.to_vec());
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        let mut files = self
            .files
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        files.remove(reference);
        Ok(())
    }

    fn url(&self, reference: &str) -> String {
        format!("/storage/{reference}")
    }
}
