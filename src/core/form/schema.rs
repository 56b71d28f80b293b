//! Form schema: ordered sections of fields plus a static derivation graph.
//!
//! A derivation names a target field, the source fields it reads and a pure function
//! computing the target from the live form state. The graph is declared once when the
//! schema is built; sessions only look it up.

use super::field::{Field, FieldValue};
use std::collections::BTreeMap;
use std::fmt;

/// Pure recomputation of a derived field from the live form state.
pub type ComputeFn = fn(&FormState) -> FieldValue;

/// A derived field and the fields it depends on.
#[derive(Clone, Copy)]
pub struct Derivation {
    /// Field overwritten by `compute`
    pub target: &'static str,
    /// Fields whose changes trigger `compute`
    pub sources: &'static [&'static str],
    /// Recomputation, given the state after the source change
    pub compute: ComputeFn,
}

impl fmt::Debug for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derivation")
            .field("target", &self.target)
            .field("sources", &self.sources)
            .finish_non_exhaustive()
    }
}

/// A titled group of fields.
#[derive(Debug, Clone)]
pub struct Section {
    /// Heading shown above the group, if any
    pub heading: Option<&'static str>,
    /// Fields in display order
    pub fields: Vec<Field>,
}

/// Complete declaration of a form.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    sections: Vec<Section>,
    derivations: Vec<Derivation>,
}

impl FormSchema {
    /// An empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group of fields.
    #[must_use]
    pub fn section(
        mut self,
        heading: Option<&'static str>,
        fields: impl IntoIterator<Item = Field>,
    ) -> Self {
        self.sections.push(Section {
            heading,
            fields: fields.into_iter().collect(),
        });
        self
    }

    /// Registers a derived field.
    ///
    /// Derivations do not chain: changing a target never triggers other derivations.
    #[must_use]
    pub fn derive(
        mut self,
        target: &'static str,
        sources: &'static [&'static str],
        compute: ComputeFn,
    ) -> Self {
        self.derivations.push(Derivation {
            target,
            sources,
            compute,
        });
        self
    }

    /// Sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All fields in display order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|field| field.name == name)
    }

    /// All registered derivations.
    #[must_use]
    pub fn derivations(&self) -> &[Derivation] {
        &self.derivations
    }

    /// Derivations that must run when `source` changes.
    pub fn dependents_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Derivation> {
        self.derivations
            .iter()
            .filter(move |derivation| derivation.sources.iter().any(|name| *name == source))
    }

    /// State of a fresh form: every declared default, nothing else.
    #[must_use]
    pub fn defaults(&self) -> FormState {
        let mut state = FormState::default();
        for field in self.fields() {
            if let Some(default) = &field.default {
                state.insert(field.name, default.clone());
            }
        }
        state
    }
}

/// Live values of an open form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<&'static str, FieldValue>,
}

static EMPTY: FieldValue = FieldValue::Empty;

impl FormState {
    /// Current value of `name`; unset fields read as empty.
    #[must_use]
    pub fn get(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&EMPTY)
    }

    /// Stores a value without running derivations.
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.values.insert(name, value);
    }

    /// Iterates over every set value.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}
