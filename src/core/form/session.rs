//! An open create or edit form.
//!
//! The session owns the live field values for its whole lifetime. Every user change goes
//! through [`FormSession::set`], which stores the value and then synchronously reruns
//! each derivation that lists the changed field as a source.

use super::field::{Field, FieldKind, FieldValue};
use super::schema::{FormSchema, FormState};
use super::validation::ValidationErrors;
use crate::{
    core::humanize::diff_for_humans,
    entities::product,
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{debug, trace};

/// Live state of one form, for a new record or an existing one.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: Arc<FormSchema>,
    record: Option<product::Model>,
    state: FormState,
}

impl FormSession {
    /// Opens a form for a new record, starting from the schema defaults.
    #[must_use]
    pub fn create(schema: Arc<FormSchema>) -> Self {
        let state = schema.defaults();
        Self {
            schema,
            record: None,
            state,
        }
    }

    /// Opens a form for an existing record with its current values.
    ///
    /// No derivation runs on load; derived fields keep their persisted values until a
    /// source field changes.
    #[must_use]
    pub const fn edit(schema: Arc<FormSchema>, record: product::Model, state: FormState) -> Self {
        Self {
            schema,
            record: Some(record),
            state,
        }
    }

    /// The form's declaration.
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Record being edited, `None` while creating.
    #[must_use]
    pub const fn record(&self) -> Option<&product::Model> {
        self.record.as_ref()
    }

    /// Whether this form edits an existing record.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.record.is_some()
    }

    /// All current values.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Current value of one field.
    #[must_use]
    pub fn get(&self, name: &str) -> &FieldValue {
        self.state.get(name)
    }

    /// Applies a user change to `name` and recomputes the fields derived from it.
    ///
    /// # Errors
    /// - [`Error::UnknownField`] if the schema has no such field
    /// - [`Error::FieldDisabled`] for derived or display-only fields
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| Error::UnknownField {
                name: name.to_string(),
            })?;

        if field.disabled {
            return Err(Error::FieldDisabled {
                name: name.to_string(),
            });
        }

        let field_name = field.name;
        let value = field.coerce(value.into());
        debug!(field = field_name, ?value, "Form field updated");

        self.state.insert(field_name, value);
        self.recompute(field_name);
        Ok(())
    }

    fn recompute(&mut self, source: &str) {
        for derivation in self.schema.dependents_of(source) {
            let value = (derivation.compute)(&self.state);
            trace!(source, derived = derivation.target, ?value, "Derived field recomputed");
            self.state.insert(derivation.target, value);
        }
    }

    /// Fields to render; placeholders only appear once the record exists.
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        let editing = self.is_editing();
        self.schema
            .fields()
            .filter(move |field| editing || !field.is_placeholder())
    }

    /// Rendered placeholder texts (`created_at`, `updated_at`) relative to `now`.
    ///
    /// Empty while creating.
    #[must_use]
    pub fn placeholders(&self, now: NaiveDateTime) -> Vec<(&'static str, String)> {
        let Some(record) = &self.record else {
            return Vec::new();
        };

        self.schema
            .fields()
            .filter_map(|field| match field.kind {
                FieldKind::Placeholder(timestamp) => Some((
                    field.name,
                    diff_for_humans(timestamp.read(record), now),
                )),
                _ => None,
            })
            .collect()
    }

    /// Checks the rules that need no database: required fields and numeric input.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        for field in self.visible_fields().filter(|field| !field.is_placeholder()) {
            let value = self.get(field.name);

            if field.required && !value.is_filled() {
                errors.add(field.name, format!("The {} field is required.", field.label));
                continue;
            }

            if field.kind == FieldKind::Numeric && matches!(value, FieldValue::Text(_)) {
                errors.add(field.name, format!("The {} must be a number.", field.label));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::form::field::Timestamp;
    use chrono::{NaiveDate, TimeDelta};

    fn total(state: &FormState) -> FieldValue {
        let a = state.get("a").as_number().unwrap_or_default();
        let b = state.get("b").as_number().unwrap_or_default();
        FieldValue::Number(a + b)
    }

    fn schema() -> Arc<FormSchema> {
        Arc::new(
            FormSchema::new()
                .section(
                    None,
                    [
                        Field::new("title", FieldKind::Text).required(),
                        Field::new("a", FieldKind::Numeric).required().default(0.0),
                        Field::new("b", FieldKind::Numeric).default(0.0),
                        Field::new("total", FieldKind::Numeric).disabled().default(0.0),
                    ],
                )
                .section(
                    Some("Status"),
                    [
                        Field::new("created_at", FieldKind::Placeholder(Timestamp::CreatedAt)),
                        Field::new("updated_at", FieldKind::Placeholder(Timestamp::UpdatedAt)),
                    ],
                )
                .derive("total", &["a", "b"], total),
        )
    }

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn record() -> product::Model {
        product::Model {
            id: 7,
            brand_id: 1,
            name: "Lamp".to_string(),
            slug: "lamp".to_string(),
            description: "<p>Bright</p>".to_string(),
            image: "lamp.png".to_string(),
            amount: 40.0,
            discount: 0.0,
            discount_amount: 0.0,
            is_visible: true,
            created_at: at(8),
            updated_at: at(10),
        }
    }

    #[test]
    fn test_derivation_reads_live_values() {
        let mut session = FormSession::create(schema());
        session.set("a", "2").unwrap();
        assert_eq!(session.get("total"), &FieldValue::Number(2.0));

        session.set("b", 3.0).unwrap();
        assert_eq!(session.get("total"), &FieldValue::Number(5.0));

        session.set("a", 10.0).unwrap();
        assert_eq!(session.get("total"), &FieldValue::Number(13.0));
    }

    #[test]
    fn test_unrelated_change_leaves_derived_value() {
        let mut session = FormSession::create(schema());
        session.set("a", 4.0).unwrap();
        session.set("title", "changed").unwrap();
        assert_eq!(session.get("total"), &FieldValue::Number(4.0));
    }

    #[test]
    fn test_disabled_and_unknown_fields_rejected() {
        let mut session = FormSession::create(schema());
        assert!(matches!(
            session.set("total", 1.0),
            Err(Error::FieldDisabled { name }) if name == "total"
        ));
        assert!(matches!(
            session.set("created_at", "now"),
            Err(Error::FieldDisabled { .. })
        ));
        assert!(matches!(
            session.set("missing", 1.0),
            Err(Error::UnknownField { name }) if name == "missing"
        ));
    }

    #[test]
    fn test_placeholders_hidden_while_creating() {
        let session = FormSession::create(schema());
        assert!(!session.is_editing());
        assert!(session.placeholders(at(12)).is_empty());
        assert!(session.visible_fields().all(|field| !field.is_placeholder()));
    }

    #[test]
    fn test_placeholders_shown_while_editing() {
        let session = FormSession::edit(schema(), record(), FormState::default());
        assert!(session.is_editing());
        assert_eq!(
            session.placeholders(at(12)),
            [
                ("created_at", "4 hours ago".to_string()),
                ("updated_at", "2 hours ago".to_string()),
            ]
        );
        assert_eq!(
            session
                .visible_fields()
                .filter(|field| field.is_placeholder())
                .count(),
            2
        );

        let later = at(12) + TimeDelta::days(3);
        assert_eq!(session.placeholders(later)[0].1, "3 days ago");
    }

    #[test]
    fn test_validate_required_and_numeric() {
        let mut session = FormSession::create(schema());
        session.set("b", "lots").unwrap();

        let errors = session.validate();
        assert!(errors.has("title"));
        assert!(!errors.has("a"), "zero satisfies required");
        assert_eq!(
            errors.messages_for("b").collect::<Vec<_>>(),
            ["The B must be a number."]
        );

        session.set("a", "").unwrap();
        assert_eq!(
            session.validate().messages_for("a").collect::<Vec<_>>(),
            ["The A field is required."]
        );
    }
}
