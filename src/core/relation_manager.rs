//! Product relation manager: the products of one brand, as a form and a listing.
//!
//! [`product_form`] and [`product_table`] declare the two schemas. A mounted manager binds
//! them to one brand plus the database and image store, and carries out what the user
//! does on the screen: opening forms, uploading the image, submitting, listing and the
//! table actions.

use crate::{
    config::settings::DisplaySettings,
    core::{
        brand, category,
        form::{
            Field, FieldKind, FieldValue, FormSchema, FormSession, FormState, Relationship,
            SelectOption, Timestamp, ValidationErrors,
        },
        pricing::discounted_amount,
        product::{self, ProductInput, ProductRow},
        slug::slugify,
        storage::ImageStore,
        table::{ActionScope, SortDirection, TableAction, TableColumn, TableSchema},
    },
    entities::{self, ProductColumn},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, warn};

/// The products of one brand, editable through a form and listed in a table.
#[derive(Debug)]
pub struct ProductRelationManager<S> {
    db: DatabaseConnection,
    store: S,
    brand: entities::BrandModel,
    form: Arc<FormSchema>,
    table: TableSchema,
}

/// Rule for `slug`: always the slug of the current name.
fn slug_from_name(state: &FormState) -> FieldValue {
    FieldValue::Text(slugify(state.get("name").as_text().unwrap_or_default()))
}

/// Rule for `discount_amount`: price after discount, zero unless both inputs are set.
fn discount_amount_from_pricing(state: &FormState) -> FieldValue {
    FieldValue::Number(discounted_amount(
        state.get("amount").as_number(),
        state.get("discount").as_number(),
    ))
}

/// Declares the product form.
#[must_use]
pub fn product_form() -> FormSchema {
    FormSchema::new()
        .section(
            None,
            [
                Field::new("name", FieldKind::Text)
                    .label("Product Name")
                    .required()
                    .unique(ProductColumn::Slug),
                Field::new("slug", FieldKind::Text)
                    .unique(ProductColumn::Slug)
                    .required()
                    .disabled(),
                Field::new("description", FieldKind::RichText).required(),
            ],
        )
        .section(
            Some("Image"),
            [Field::new("image", FieldKind::File).required()],
        )
        .section(
            Some("Pricing"),
            [
                Field::new("amount", FieldKind::Numeric)
                    .label("Product Amount")
                    .required()
                    .default(0.0),
                Field::new("discount_amount", FieldKind::Numeric)
                    .label("Discounted Amount")
                    .default(0.0)
                    .disabled(),
                Field::new("discount", FieldKind::Numeric)
                    .label("Discounted")
                    .default(0.0),
            ],
        )
        .section(
            Some("Association"),
            [
                Field::new("brand_id", FieldKind::Select(Relationship::Brand)),
                Field::new("category", FieldKind::MultiSelect(Relationship::Category)),
            ],
        )
        .section(
            Some("Status"),
            [
                Field::new("is_visible", FieldKind::Toggle)
                    .default(false)
                    .helper_text("This product will be hidden from all sales channels"),
                Field::new("created_at", FieldKind::Placeholder(Timestamp::CreatedAt)),
                Field::new("updated_at", FieldKind::Placeholder(Timestamp::UpdatedAt)),
            ],
        )
        .derive("slug", &["name"], slug_from_name)
        .derive(
            "discount_amount",
            &["amount", "discount"],
            discount_amount_from_pricing,
        )
}

/// Declares the product listing; prices are prefixed with `currency_symbol`.
#[must_use]
pub fn product_table(currency_symbol: &str) -> TableSchema {
    TableSchema::new()
        .columns([
            TableColumn::image("image", |row| row.product.image.clone()),
            TableColumn::text("name", |row| row.product.name.clone()),
            TableColumn::text("amount", |row| row.product.amount.to_string())
                .prefix(currency_symbol),
            TableColumn::text("discount_amount", |row| {
                row.product.discount_amount.to_string()
            })
            .prefix(currency_symbol),
            TableColumn::text("discount", |row| row.product.discount.to_string())
                .suffix("%"),
            TableColumn::text("brand.name", |row| {
                row.brand
                    .as_ref()
                    .map(|brand| brand.name.clone())
                    .unwrap_or_default()
            }),
        ])
        .default_sort(ProductColumn::CreatedAt, SortDirection::Desc)
        .filters([])
        .header_actions([TableAction::Create])
        .actions([TableAction::Edit, TableAction::Delete])
        .bulk_actions([TableAction::DeleteBulk])
}

impl<S: ImageStore> ProductRelationManager<S> {
    /// Binds the manager to the brand `brand_id`.
    ///
    /// # Errors
    /// Returns [`Error::BrandNotFound`] if the brand does not exist.
    pub async fn mount(
        db: DatabaseConnection,
        store: S,
        brand_id: i64,
        display: &DisplaySettings,
    ) -> Result<Self> {
        let brand = brand::get_brand_by_id(&db, brand_id)
            .await?
            .ok_or(Error::BrandNotFound { id: brand_id })?;

        Ok(Self {
            db,
            store,
            brand,
            form: Arc::new(product_form()),
            table: product_table(&display.currency_symbol),
        })
    }

    /// The owning brand.
    #[must_use]
    pub const fn brand(&self) -> &entities::BrandModel {
        &self.brand
    }

    /// The image store in use.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The mounted form declaration.
    #[must_use]
    pub fn form_schema(&self) -> &FormSchema {
        &self.form
    }

    /// The mounted table declaration.
    #[must_use]
    pub const fn table_schema(&self) -> &TableSchema {
        &self.table
    }

    fn ensure_allowed(&self, action: TableAction, scope: ActionScope) -> Result<()> {
        if self.table.allows(action, scope) {
            Ok(())
        } else {
            Err(Error::ActionUnavailable {
                action: action.to_string(),
            })
        }
    }

    /// Opens a form for a new product of this brand.
    pub fn create_form(&self) -> Result<FormSession> {
        self.ensure_allowed(TableAction::Create, ActionScope::Header)?;

        let mut session = FormSession::create(Arc::clone(&self.form));
        session.set("brand_id", Some(self.brand.id))?;
        Ok(session)
    }

    /// Opens a form for an existing product of this brand.
    ///
    /// # Errors
    /// Returns [`Error::ProductNotFound`] if the product does not belong to this brand.
    pub async fn edit_form(&self, product_id: i64) -> Result<FormSession> {
        self.ensure_allowed(TableAction::Edit, ActionScope::Row)?;

        let record = product::get_brand_product(&self.db, self.brand.id, product_id)
            .await?
            .ok_or(Error::ProductNotFound { id: product_id })?;
        let categories = category::category_ids_for_product(&self.db, record.id).await?;

        let mut state = FormState::default();
        state.insert("name", record.name.clone().into());
        state.insert("slug", record.slug.clone().into());
        state.insert("description", record.description.clone().into());
        state.insert("image", record.image.clone().into());
        state.insert("amount", record.amount.into());
        state.insert("discount_amount", record.discount_amount.into());
        state.insert("discount", record.discount.into());
        state.insert("brand_id", FieldValue::Reference(record.brand_id));
        state.insert("category", categories.into());
        state.insert("is_visible", record.is_visible.into());

        Ok(FormSession::edit(Arc::clone(&self.form), record, state))
    }

    /// Choices for a relationship select, labelled by name.
    pub async fn options(&self, relationship: Relationship) -> Result<Vec<SelectOption>> {
        match relationship {
            Relationship::Brand => brand::brand_options(&self.db).await,
            Relationship::Category => category::category_options(&self.db).await,
        }
    }

    async fn missing_references(
        &self,
        relationship: Relationship,
        ids: &[i64],
    ) -> Result<Vec<i64>> {
        match relationship {
            Relationship::Brand => brand::missing_brands(&self.db, ids).await,
            Relationship::Category => category::missing_categories(&self.db, ids).await,
        }
    }

    /// Stores an uploaded image and puts its reference into the form's `image` field.
    ///
    /// Replacing the image of an existing product only swaps the reference; the old
    /// file is removed once the edit is saved. An earlier upload of the same session
    /// that gets replaced is removed right away.
    pub async fn upload_image(
        &self,
        session: &mut FormSession,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String> {
        let reference = self.store.store(file_name, bytes).await?;
        let previous = session.get("image").as_text().map(str::to_string);
        session.set("image", reference.as_str())?;

        let persisted = session.record().map(|record| record.image.as_str());
        let superseded = previous.filter(|p| !p.is_empty() && Some(p.as_str()) != persisted);
        if let Some(previous) = superseded {
            if let Err(e) = self.store.delete(&previous).await {
                warn!(image = %previous, "Failed to remove superseded upload: {e}");
            }
        }

        Ok(reference)
    }

    /// Runs every submission rule: the form's own checks plus the ones needing the
    /// database (existing references, uniqueness).
    pub async fn validate(&self, session: &FormSession) -> Result<ValidationErrors> {
        let mut errors = session.validate();
        let ignore_id = session.record().map(|record| record.id);

        for field in session.visible_fields() {
            let value = session.get(field.name);

            if let FieldKind::Select(relationship) | FieldKind::MultiSelect(relationship) =
                field.kind
            {
                let missing = self
                    .missing_references(relationship, &value.as_references())
                    .await?;
                if !missing.is_empty() {
                    errors.add(
                        field.name,
                        format!("The selected {} is invalid.", field.label),
                    );
                }
            }

            let Some(column) = field.unique else {
                continue;
            };
            let text = value.as_text().unwrap_or_default().trim();
            if !text.is_empty() && product::value_taken(&self.db, column, text, ignore_id).await? {
                errors.add(
                    field.name,
                    format!("The {} has already been taken.", field.label),
                );
            }
        }

        Ok(errors)
    }

    /// Validates and saves the form: creates a product in create sessions, updates the
    /// record in edit sessions.
    ///
    /// # Errors
    /// - [`Error::Validation`] if any rule fails; nothing is written
    /// - [`Error::ProductNotFound`] if the edited record is gone
    /// - database errors from the save itself
    pub async fn submit(&self, session: &FormSession) -> Result<entities::ProductModel> {
        self.validate(session).await?.into_result()?;
        let input = input_from_state(session.state());

        let Some(record) = session.record() else {
            self.ensure_allowed(TableAction::Create, ActionScope::Header)?;
            return product::create_product(&self.db, self.brand.id, input).await;
        };

        self.ensure_allowed(TableAction::Edit, ActionScope::Row)?;
        let saved = product::update_product(&self.db, self.brand.id, record.id, input).await?;

        if saved.image != record.image {
            if let Err(e) = self.store.delete(&record.image).await {
                warn!(product_id = saved.id, image = %record.image, "Failed to remove replaced image: {e}");
            }
        }

        Ok(saved)
    }

    /// The brand's products in the table's default order.
    pub async fn list(&self) -> Result<Vec<ProductRow>> {
        product::list_brand_products(
            &self.db,
            self.brand.id,
            self.table.sort(),
            self.table.filter_list(),
        )
        .await
    }

    /// The listing rendered to cell texts, one `Vec` per row.
    pub async fn rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self
            .list()
            .await?
            .iter()
            .map(|row| self.table.render_row(row, &self.store))
            .collect())
    }

    /// Row action: deletes one product of this brand.
    pub async fn delete(&self, product_id: i64) -> Result<entities::ProductModel> {
        self.ensure_allowed(TableAction::Delete, ActionScope::Row)?;
        product::delete_product(&self.db, self.brand.id, product_id).await
    }

    /// Bulk action: deletes the selected products of this brand.
    pub async fn delete_bulk(&self, product_ids: &[i64]) -> Result<Vec<entities::ProductModel>> {
        self.ensure_allowed(TableAction::DeleteBulk, ActionScope::Bulk)?;
        let deleted = product::delete_products(&self.db, self.brand.id, product_ids).await?;
        info!(brand_id = self.brand.id, count = deleted.len(), "Bulk delete finished");
        Ok(deleted)
    }
}

/// Converts validated form state into persistence input. Empty numbers become zero.
fn input_from_state(state: &FormState) -> ProductInput {
    let text = |name: &str| state.get(name).as_text().unwrap_or_default().to_string();
    let number = |name: &str| state.get(name).as_number().unwrap_or_default();

    ProductInput {
        name: text("name"),
        slug: text("slug"),
        description: text("description"),
        image: text("image"),
        amount: number("amount"),
        discount: number("discount"),
        discount_amount: number("discount_amount"),
        brand_id: state.get("brand_id").as_reference(),
        categories: state.get("category").as_references(),
        is_visible: state.get("is_visible").as_bool(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{config::settings::DisplaySettings, test_utils::*};
    use chrono::TimeDelta;

    async fn mounted() -> Result<ProductRelationManager<MemoryImageStore>> {
        let (db, brand) = setup_with_brand().await?;
        ProductRelationManager::mount(
            db,
            MemoryImageStore::default(),
            brand.id,
            &DisplaySettings::default(),
        )
        .await
    }

    async fn filled_form(
        manager: &ProductRelationManager<MemoryImageStore>,
        name: &str,
    ) -> Result<FormSession> {
        let mut session = manager.create_form()?;
        session.set("name", name)?;
        session.set("description", "<p>Soft cotton</p>")?;
        session.set("amount", "1000")?;
        manager.upload_image(&mut session, "shirt.png", b"png").await?;
        Ok(session)
    }

    #[test]
    fn test_name_change_derives_slug() {
        let mut session = FormSession::create(Arc::new(product_form()));
        session.set("name", "Red Shirt").unwrap();
        assert_eq!(session.get("slug"), &FieldValue::from("red-shirt"));

        session.set("name", "Red Shirt").unwrap();
        assert_eq!(session.get("slug"), &FieldValue::from("red-shirt"));

        session.set("name", "Blue  Shirt!").unwrap();
        assert_eq!(session.get("slug"), &FieldValue::from("blue-shirt"));
    }

    #[test]
    fn test_discount_amount_follows_amount_and_discount() {
        let mut session = FormSession::create(Arc::new(product_form()));
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(0.0));

        session.set("amount", "1000").unwrap();
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(0.0));

        session.set("discount", "10").unwrap();
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(900.0));

        session.set("discount", "0").unwrap();
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(0.0));

        session.set("discount", "25").unwrap();
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(750.0));

        session.set("amount", "").unwrap();
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(0.0));

        session.set("amount", 200.0).unwrap();
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(150.0));
    }

    #[test]
    fn test_negative_discount_is_not_rejected() {
        let mut session = FormSession::create(Arc::new(product_form()));
        session.set("amount", 100.0).unwrap();
        session.set("discount", -10.0).unwrap();
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(110.0));
        assert!(!session.validate().has("discount"));
    }

    #[test]
    fn test_derived_fields_not_user_editable() {
        let mut session = FormSession::create(Arc::new(product_form()));
        assert!(matches!(
            session.set("slug", "custom"),
            Err(Error::FieldDisabled { .. })
        ));
        assert!(matches!(
            session.set("discount_amount", 5.0),
            Err(Error::FieldDisabled { .. })
        ));
    }

    #[test]
    fn test_table_declaration() {
        let table = product_table("₹");
        let names: Vec<_> = table.column_list().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["image", "name", "amount", "discount_amount", "discount", "brand.name"]
        );
        assert!(matches!(
            table.sort_declaration(),
            (ProductColumn::CreatedAt, SortDirection::Desc)
        ));
        assert!(table.filter_list().is_empty());

        assert_eq!(table.actions_in(ActionScope::Header), [TableAction::Create]);
        assert_eq!(
            table.actions_in(ActionScope::Row),
            [TableAction::Edit, TableAction::Delete]
        );
        assert_eq!(table.actions_in(ActionScope::Bulk), [TableAction::DeleteBulk]);
        assert!(!table.allows(TableAction::Create, ActionScope::Row));
    }

    #[tokio::test]
    async fn test_mount_unknown_brand() -> Result<()> {
        let db = setup_test_db().await?;
        let result = ProductRelationManager::mount(
            db,
            MemoryImageStore::default(),
            42,
            &DisplaySettings::default(),
        )
        .await;
        assert!(matches!(result, Err(Error::BrandNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_form_defaults() -> Result<()> {
        let manager = mounted().await?;
        let session = manager.create_form()?;

        assert_eq!(session.get("amount"), &FieldValue::Number(0.0));
        assert_eq!(session.get("discount"), &FieldValue::Number(0.0));
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(0.0));
        assert_eq!(session.get("brand_id"), &FieldValue::Reference(manager.brand().id));
        assert_eq!(session.get("is_visible"), &FieldValue::Bool(false));
        assert!(session.placeholders(chrono::Utc::now().naive_utc()).is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_required_fields_block_submission() -> Result<()> {
        let manager = mounted().await?;
        let mut session = manager.create_form()?;
        session.set("amount", "")?;

        let result = manager.submit(&session).await;
        let Err(Error::Validation(errors)) = &result else {
            panic!("expected validation failure, got {result:?}");
        };
        for field in ["name", "slug", "description", "image", "amount"] {
            assert!(errors.has(field), "{field} should be required");
        }
        assert!(manager.list().await?.is_empty(), "nothing may be persisted");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_through_form() -> Result<()> {
        let manager = mounted().await?;
        let hats = create_test_category(&manager.db, "Hats").await?;

        let mut session = filled_form(&manager, "Red Shirt").await?;
        session.set("discount", "10")?;
        session.set("category", vec![hats.id])?;
        session.set("is_visible", true)?;
        let product = manager.submit(&session).await?;

        assert_eq!(product.slug, "red-shirt");
        assert_eq!(product.amount, 1000.0);
        assert_eq!(product.discount, 10.0);
        assert_eq!(product.discount_amount, 900.0);
        assert_eq!(product.brand_id, manager.brand().id);
        assert!(product.is_visible);
        assert!(manager.store().contains(&product.image));
        assert_eq!(
            category::category_ids_for_product(&manager.db, product.id).await?,
            [hats.id]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() -> Result<()> {
        let manager = mounted().await?;
        manager.submit(&filled_form(&manager, "Red Shirt").await?).await?;

        let second = filled_form(&manager, "Red Shirt").await?;
        let result = manager.submit(&second).await;
        assert!(
            matches!(&result, Err(Error::Validation(errors)) if errors.has("slug")),
            "got {result:?}"
        );
        assert_eq!(manager.list().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_references_rejected() -> Result<()> {
        let manager = mounted().await?;
        let mut session = filled_form(&manager, "Boots").await?;
        session.set("brand_id", Some(999_i64))?;
        session.set("category", vec![998_i64, 999])?;

        let Err(Error::Validation(errors)) = manager.submit(&session).await else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.messages_for("brand_id").collect::<Vec<_>>(),
            ["The selected Brand is invalid."]
        );
        assert!(errors.has("category"));

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_keeps_own_slug_and_replaces_image() -> Result<()> {
        let manager = mounted().await?;
        let created = manager.submit(&filled_form(&manager, "Red Shirt").await?).await?;
        let old_image = created.image.clone();

        let mut session = manager.edit_form(created.id).await?;
        assert!(session.is_editing());
        assert_eq!(session.get("slug"), &FieldValue::from("red-shirt"));
        assert_eq!(session.get("discount_amount"), &FieldValue::Number(0.0));

        session.set("discount", 25.0)?;
        let new_image = manager.upload_image(&mut session, "new.png", b"new").await?;
        let updated = manager.submit(&session).await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.slug, "red-shirt");
        assert_eq!(updated.discount_amount, 750.0);
        assert_eq!(updated.image, new_image);
        assert!(manager.store().contains(&new_image));
        assert!(!manager.store().contains(&old_image));

        Ok(())
    }

    #[tokio::test]
    async fn test_repeated_uploads_keep_only_latest() -> Result<()> {
        let manager = mounted().await?;
        let created = manager.submit(&filled_form(&manager, "Red Shirt").await?).await?;

        let mut session = manager.edit_form(created.id).await?;
        let first = manager.upload_image(&mut session, "a.png", b"a").await?;
        let second = manager.upload_image(&mut session, "b.png", b"b").await?;
        assert!(!manager.store().contains(&first), "superseded upload removed");
        assert!(manager.store().contains(&second));
        assert!(
            manager.store().contains(&created.image),
            "saved image stays until the edit is submitted"
        );

        let updated = manager.submit(&session).await?;
        assert_eq!(updated.image, second);
        assert!(!manager.store().contains(&created.image));

        let mut create = filled_form(&manager, "Blue Shirt").await?;
        let uploaded = create.get("image").as_text().unwrap().to_string();
        manager.upload_image(&mut create, "c.png", b"c").await?;
        assert!(!manager.store().contains(&uploaded));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_finite_pricing_rejected_per_field() -> Result<()> {
        for (field, raw) in [
            ("amount", "NaN"),
            ("amount", "inf"),
            ("discount", "NaN"),
            ("discount", "inf"),
        ] {
            let manager = mounted().await?;
            let mut session = filled_form(&manager, "Red Shirt").await?;
            session.set("discount", "10")?;
            session.set(field, raw)?;
            assert!(
                matches!(session.get("discount_amount"), FieldValue::Number(n) if n.is_finite()),
                "{field}={raw} gave {:?}",
                session.get("discount_amount")
            );

            let result = manager.submit(&session).await;
            let Err(Error::Validation(errors)) = &result else {
                panic!("{field}={raw}: expected validation failure, got {result:?}");
            };
            let label = if field == "amount" { "Product Amount" } else { "Discounted" };
            assert_eq!(
                errors.messages_for(field).collect::<Vec<_>>(),
                [format!("The {label} must be a number.")]
            );
            assert!(manager.list().await?.is_empty());
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_rename_to_taken_slug_rejected() -> Result<()> {
        let manager = mounted().await?;
        manager.submit(&filled_form(&manager, "Red Shirt").await?).await?;
        let blue = manager.submit(&filled_form(&manager, "Blue Shirt").await?).await?;

        let mut session = manager.edit_form(blue.id).await?;
        session.set("name", "Red Shirt")?;
        let result = manager.submit(&session).await;
        assert!(matches!(&result, Err(Error::Validation(errors)) if errors.has("slug")));

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_form_placeholders() -> Result<()> {
        let manager = mounted().await?;
        let product = manager.submit(&filled_form(&manager, "Lamp").await?).await?;

        let session = manager.edit_form(product.id).await?;
        let placeholders = session.placeholders(product.created_at + TimeDelta::hours(3));
        let names: Vec<_> = placeholders.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["created_at", "updated_at"]);
        assert_eq!(placeholders[0].1, "3 hours ago");

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_form_other_brand_not_found() -> Result<()> {
        let manager = mounted().await?;
        let other = create_test_brand(&manager.db, "Other").await?;
        let theirs = create_test_product(&manager.db, other.id, "Theirs").await?;

        let result = manager.edit_form(theirs.id).await;
        assert!(matches!(result, Err(Error::ProductNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_listing_newest_first_and_rendered() -> Result<()> {
        let manager = mounted().await?;
        let brand_id = manager.brand().id;
        let first = create_test_product(&manager.db, brand_id, "First").await?;
        let second = create_test_product(&manager.db, brand_id, "Second").await?;
        let third = create_test_product(&manager.db, brand_id, "Third").await?;
        let base = first.created_at;
        set_created_at(&manager.db, first.id, base).await?;
        set_created_at(&manager.db, second.id, base + TimeDelta::minutes(1)).await?;
        set_created_at(&manager.db, third.id, base + TimeDelta::minutes(2)).await?;

        let ids: Vec<_> = manager.list().await?.iter().map(|row| row.product.id).collect();
        assert_eq!(ids, [third.id, second.id, first.id]);

        let rows = manager.rows().await?;
        assert_eq!(
            rows[0],
            [
                "/storage/test.png",
                "Third",
                "₹100",
                "₹0",
                "0%",
                "Test Brand",
            ]
        );
        assert_eq!(
            manager.table_schema().headers(),
            ["Image", "Name", "Amount", "Discount amount", "Discount", "Brand"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_row_and_bulk_delete() -> Result<()> {
        let manager = mounted().await?;
        let brand_id = manager.brand().id;
        let a = create_test_product(&manager.db, brand_id, "A").await?;
        let b = create_test_product(&manager.db, brand_id, "B").await?;
        let c = create_test_product(&manager.db, brand_id, "C").await?;

        let deleted = manager.delete(a.id).await?;
        assert_eq!(deleted.id, a.id);

        let deleted = manager.delete_bulk(&[b.id, c.id]).await?;
        assert_eq!(deleted.len(), 2);
        assert!(manager.list().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_select_options() -> Result<()> {
        let manager = mounted().await?;
        create_test_category(&manager.db, "Shoes").await?;

        let brands = manager.options(Relationship::Brand).await?;
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].label, "Test Brand");

        let categories = manager.options(Relationship::Category).await?;
        assert_eq!(categories[0].label, "Shoes");

        Ok(())
    }
}
