/// Database configuration and connection management
pub mod database;

/// Application settings loading from catalog.toml
pub mod settings;
