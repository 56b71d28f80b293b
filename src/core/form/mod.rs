//! Form declaration and live form state.

/// Field declarations and values
pub mod field;
/// Form schema and derivation graph
pub mod schema;
/// Open form sessions
pub mod session;
/// Validation error collection
pub mod validation;

pub use field::{Field, FieldKind, FieldValue, Relationship, SelectOption, Timestamp};
pub use schema::{Derivation, FormSchema, FormState, Section};
pub use session::FormSession;
pub use validation::{FieldError, ValidationErrors};
