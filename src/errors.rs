//! Unified error type for the catalog.
//!
//! Database, storage and configuration failures are wrapped here together with the
//! form-level failures (unknown or disabled fields, validation) so every operation
//! can return the same `Result` alias.

use crate::core::form::ValidationErrors;
use thiserror::Error;

/// Errors produced by the catalog.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Failure reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Failure while reading or writing stored files
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The parent brand does not exist
    #[error("Brand not found: {id}")]
    BrandNotFound {
        /// Identity that was looked up
        id: i64,
    },

    /// The product does not exist under the current brand
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Identity that was looked up
        id: i64,
    },

    /// A field name that the form does not declare
    #[error("Unknown form field: {name}")]
    UnknownField {
        /// Name that was addressed
        name: String,
    },

    /// A field the user is not allowed to edit (derived or display-only)
    #[error("Field '{name}' cannot be edited directly")]
    FieldDisabled {
        /// Name that was addressed
        name: String,
    },

    /// The table does not offer this action in this place
    #[error("Action '{action}' is not available")]
    ActionUnavailable {
        /// Action that was requested
        action: String,
    },

    /// Submission rejected before reaching persistence
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
