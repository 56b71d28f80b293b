//! Core business logic - framework-agnostic form, listing and persistence operations
//! for the products of a brand.

/// Brand lookups and select options
pub mod brand;
/// Category lookups, select options and product links
pub mod category;
/// Form declaration and live form state
pub mod form;
/// Relative time formatting
pub mod humanize;
/// Discount arithmetic
pub mod pricing;
/// Brand-scoped product persistence
pub mod product;
/// The product relation manager of a brand
pub mod relation_manager;
/// Slug generation
pub mod slug;
/// Uploaded image storage
pub mod storage;
/// Listing table declaration
pub mod table;
