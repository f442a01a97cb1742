/// Database configuration and connection management
pub mod database;

/// Seed data (plants, windows, companions) from garden.toml
pub mod seeds;
