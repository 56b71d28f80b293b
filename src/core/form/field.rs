//! Field declarations and live field values.

use crate::entities::product;
use chrono::NaiveDateTime;

/// Entity set a select field resolves its options against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Single brand, shown by name
    Brand,
    /// Categories, shown by name
    Category,
}

/// One choice offered by a relationship select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Identity stored in the field
    pub id: i64,
    /// Human-readable name shown to the user
    pub label: String,
}

/// Record timestamp shown by a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// `created_at`
    CreatedAt,
    /// `updated_at`
    UpdatedAt,
}

impl Timestamp {
    /// Reads the timestamp from a persisted product.
    #[must_use]
    pub const fn read(self, record: &product::Model) -> NaiveDateTime {
        match self {
            Self::CreatedAt => record.created_at,
            Self::UpdatedAt => record.updated_at,
        }
    }
}

/// Widget type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// Rich text editor producing HTML
    RichText,
    /// File upload; the value is the stored file reference
    File,
    /// Text input restricted to numbers
    Numeric,
    /// Single-choice select bound to a relationship
    Select(Relationship),
    /// Multi-choice select bound to a relationship
    MultiSelect(Relationship),
    /// On/off switch
    Toggle,
    /// Read-only text only shown for persisted records
    Placeholder(Timestamp),
}

/// Current value of a field in an open form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Nothing entered
    Empty,
    /// Text, HTML or a file reference; also unparseable numeric input
    Text(String),
    /// A parsed number
    Number(f64),
    /// Toggle state
    Bool(bool),
    /// One selected identity
    Reference(i64),
    /// Several selected identities
    References(Vec<i64>),
}

impl FieldValue {
    /// Whether the value satisfies a "required" rule.
    ///
    /// Zero counts as filled; blank text and an empty selection do not.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(text) => !text.trim().is_empty(),
            Self::References(ids) => !ids.is_empty(),
            Self::Number(_) | Self::Bool(_) | Self::Reference(_) => true,
        }
    }

    /// The value as a number, if it holds one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The value as text, if it holds text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Toggle state; anything but `Bool(true)` is off.
    #[must_use]
    pub const fn as_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// The single selected identity, if any.
    #[must_use]
    pub const fn as_reference(&self) -> Option<i64> {
        match self {
            Self::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// All selected identities (a single reference counts as one).
    #[must_use]
    pub fn as_references(&self) -> Vec<i64> {
        match self {
            Self::References(ids) => ids.clone(),
            Self::Reference(id) => vec![*id],
            _ => Vec::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Empty, Self::Reference)
    }
}

impl From<Vec<i64>> for FieldValue {
    fn from(value: Vec<i64>) -> Self {
        Self::References(value)
    }
}

/// Declaration of one form field.
#[derive(Debug, Clone)]
pub struct Field {
    /// State key, equal to the record attribute it edits
    pub name: &'static str,
    /// Human label, also used in validation messages
    pub label: String,
    /// Widget type
    pub kind: FieldKind,
    /// Must be filled before submission
    pub required: bool,
    /// Not editable by the user (derived or display-only)
    pub disabled: bool,
    /// Value a new form starts with
    pub default: Option<FieldValue>,
    /// Product column that must not already hold this field's value
    pub unique: Option<product::Column>,
    /// Hint shown under the widget
    pub helper_text: Option<&'static str>,
}

impl Field {
    /// Declares a field with a label derived from its name (`is_visible` → "Is visible").
    #[must_use]
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label: default_label(name),
            kind,
            required: false,
            disabled: matches!(kind, FieldKind::Placeholder(_)),
            default: None,
            unique: None,
            helper_text: None,
        }
    }

    /// Overrides the label.
    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as not editable by the user.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Sets the value new forms start with.
    #[must_use]
    pub fn default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Requires the value to be unused in `column`, ignoring the record being edited.
    #[must_use]
    pub fn unique(mut self, column: product::Column) -> Self {
        self.unique = Some(column);
        self
    }

    /// Sets the hint shown under the widget.
    #[must_use]
    pub fn helper_text(mut self, text: &'static str) -> Self {
        self.helper_text = Some(text);
        self
    }

    /// Whether the field only renders once the record exists.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self.kind, FieldKind::Placeholder(_))
    }

    /// Normalizes raw input for this field's widget.
    ///
    /// Numeric fields parse text (blank becomes empty; garbage, `NaN` and infinities stay
    /// text so validation can report them); single selects treat a one-element list as a reference.
    #[must_use]
    pub fn coerce(&self, value: FieldValue) -> FieldValue {
        match (self.kind, value) {
            (FieldKind::Numeric, FieldValue::Text(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    FieldValue::Empty
                } else {
                    match trimmed.parse::<f64>() {
                        Ok(number) if number.is_finite() => FieldValue::Number(number),
                        _ => FieldValue::Text(text),
                    }
                }
            }
            (FieldKind::Numeric, FieldValue::Number(number)) if !number.is_finite() => {
                FieldValue::Text(number.to_string())
            }
            (FieldKind::Select(_), FieldValue::References(ids)) if ids.len() <= 1 => {
                ids.first().copied().into()
            }
            (FieldKind::MultiSelect(_), FieldValue::Reference(id)) => {
                FieldValue::References(vec![id])
            }
            (_, value) => value,
        }
    }
}

/// "brand_id" → "Brand", "is_visible" → "Is visible".
fn default_label(name: &str) -> String {
    let base = name.strip_suffix("_id").unwrap_or(name);
    let spaced = base.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
