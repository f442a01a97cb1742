//! Seed data loading from garden.toml.
//!
//! The seed file carries the starter plant catalog for the user's hardiness
//! zone - plants, their planting windows, and the companion relationship
//! table. Seeding is idempotent: entries already present in the database are
//! left untouched, so the file can be reloaded on every startup.

use crate::{
    core::{companion, plant},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire garden.toml file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// Plants to seed, with their planting windows
    #[serde(default)]
    pub plants: Vec<PlantSeed>,
    /// Companion relationships to seed
    #[serde(default)]
    pub companions: Vec<CompanionSeed>,
}

/// Seed entry for a single plant
#[derive(Debug, Deserialize, Clone)]
pub struct PlantSeed {
    /// Generic species name
    pub name: String,
    /// Optional cultivar
    pub variety: Option<String>,
    /// Category: vegetable, herb, fruit, flower, cover_crop
    pub category: String,
    /// Days from planting to harvest
    pub days_to_maturity: Option<i32>,
    /// Recommended spacing in inches
    pub spacing_inches: Option<i32>,
    /// Sun requirement
    pub sun_requirement: Option<String>,
    /// Water needs bucket: low, medium, high
    pub water_needs: Option<String>,
    /// Frost tolerance
    #[serde(default)]
    pub frost_tolerant: bool,
    /// Start on the personal planting calendar
    #[serde(default)]
    pub watched: bool,
    /// Planting windows for this plant
    #[serde(default)]
    pub windows: Vec<WindowSeed>,
}

/// Seed entry for one planting window
#[derive(Debug, Deserialize, Clone)]
pub struct WindowSeed {
    /// Window kind: indoor_start, transplant, direct_sow
    pub window_type: String,
    /// Start month (1-12)
    pub start_month: i32,
    /// Start day of month
    #[serde(default = "default_start_day")]
    pub start_day: i32,
    /// End month (1-12)
    pub end_month: i32,
    /// End day of month
    #[serde(default = "default_end_day")]
    pub end_day: i32,
}

const fn default_start_day() -> i32 {
    1
}

const fn default_end_day() -> i32 {
    28
}

/// Seed entry for one companion relationship
#[derive(Debug, Deserialize, Clone)]
pub struct CompanionSeed {
    /// First generic plant name
    pub plant_a: String,
    /// Second generic plant name
    pub plant_b: String,
    /// Relationship tag: good, bad, neutral
    pub relationship: String,
    /// Free-text explanation
    pub notes: Option<String>,
}

/// Counts of what a seeding pass actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Plants inserted (existing ones are skipped)
    pub plants_added: usize,
    /// Companion relationships inserted
    pub companions_added: usize,
}

/// Loads seed configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read seed file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse garden.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./garden.toml)
pub fn load_default_config() -> Result<SeedConfig> {
    load_config("garden.toml")
}

/// Applies a seed configuration to the database, skipping entries that
/// already exist. Returns how many rows were actually inserted.
pub async fn seed_database(db: &DatabaseConnection, config: &SeedConfig) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for seed in &config.plants {
        let existing =
            plant::get_plant_by_name_and_variety(db, &seed.name, seed.variety.as_deref()).await?;
        if existing.is_some() {
            continue;
        }

        let created = plant::create_plant(
            db,
            plant::PlantSpec {
                name: seed.name.clone(),
                variety: seed.variety.clone(),
                category: seed.category.clone(),
                days_to_maturity: seed.days_to_maturity,
                spacing_inches: seed.spacing_inches,
                sun_requirement: seed.sun_requirement.clone(),
                water_needs: seed.water_needs.clone(),
                frost_tolerant: seed.frost_tolerant,
            },
        )
        .await?;

        if seed.watched {
            plant::set_watched(db, created.id, true).await?;
        }

        for window in &seed.windows {
            plant::set_planting_window(
                db,
                created.id,
                &window.window_type,
                window.start_month,
                window.start_day,
                window.end_month,
                window.end_day,
            )
            .await?;
        }

        summary.plants_added += 1;
    }

    for seed in &config.companions {
        let existing = companion::lookup_relationship(db, &seed.plant_a, &seed.plant_b).await?;
        if existing.is_some() {
            continue;
        }

        companion::create_relationship(
            db,
            seed.plant_a.clone(),
            seed.plant_b.clone(),
            seed.relationship.clone(),
            seed.notes.clone(),
        )
        .await?;
        summary.companions_added += 1;
    }

    info!(
        "Seeded {} plants and {} companion relationships",
        summary.plants_added, summary.companions_added
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    const SEED_TOML: &str = r#"
        [[plants]]
        name = "Tomato"
        category = "vegetable"
        days_to_maturity = 75
        water_needs = "high"
        watched = true

        [[plants.windows]]
        window_type = "transplant"
        start_month = 5
        end_month = 6
        end_day = 15

        [[plants]]
        name = "Garlic"
        category = "vegetable"
        water_needs = "low"
        frost_tolerant = true

        [[plants.windows]]
        window_type = "direct_sow"
        start_month = 10
        end_month = 2

        [[companions]]
        plant_a = "Tomato"
        plant_b = "Basil"
        relationship = "good"
        notes = "Basil improves tomato flavor"
    "#;

    #[test]
    fn test_parse_seed_config() {
        let config: SeedConfig = toml::from_str(SEED_TOML).unwrap();
        assert_eq!(config.plants.len(), 2);
        assert_eq!(config.companions.len(), 1);

        let tomato = &config.plants[0];
        assert_eq!(tomato.name, "Tomato");
        assert!(tomato.watched);
        assert_eq!(tomato.windows.len(), 1);
        // Defaulted start_day
        assert_eq!(tomato.windows[0].start_day, 1);
        assert_eq!(tomato.windows[0].end_day, 15);

        let garlic = &config.plants[1];
        assert!(garlic.frost_tolerant);
        assert!(!garlic.watched);
        // Wrapping window survives parsing
        assert_eq!(garlic.windows[0].start_month, 10);
        assert_eq!(garlic.windows[0].end_month, 2);
    }

    #[tokio::test]
    async fn test_seed_database_inserts_everything() -> Result<()> {
        let db = setup_test_db().await?;
        let config: SeedConfig = toml::from_str(SEED_TOML).unwrap();

        let summary = seed_database(&db, &config).await?;
        assert_eq!(summary.plants_added, 2);
        assert_eq!(summary.companions_added, 1);

        let tomato = plant::get_plant_by_name_and_variety(&db, "Tomato", None)
            .await?
            .unwrap();
        assert!(tomato.watched);
        assert_eq!(tomato.days_to_maturity, Some(75));

        let windows = plant::list_windows_for_plant(&db, tomato.id).await?;
        assert_eq!(windows.len(), 1);

        let rel = companion::lookup_relationship(&db, "Basil", "Tomato").await?;
        assert!(rel.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_database_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config: SeedConfig = toml::from_str(SEED_TOML).unwrap();

        seed_database(&db, &config).await?;
        let second = seed_database(&db, &config).await?;
        assert_eq!(second, SeedSummary::default());

        let plants = plant::get_all_plants(&db).await?;
        assert_eq!(plants.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/garden.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
