//! Shared test utilities for `GardenBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults, plus plain in-memory
//! fixtures for the pure analysis functions.

use crate::{
    core::{bed, plant},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test plant with sensible defaults.
///
/// # Defaults
/// * `variety`: None
/// * `category`: "vegetable"
/// * `water_needs`: None
/// * `watched`: false
pub async fn create_test_plant(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::plant::Model> {
    plant::create_plant(
        db,
        plant::PlantSpec {
            name: name.to_string(),
            category: "vegetable".to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Creates a test plant with custom parameters.
/// Use this when a test needs specific variety/category/water settings.
pub async fn create_custom_plant(
    db: &DatabaseConnection,
    name: &str,
    variety: Option<&str>,
    category: &str,
    water_needs: Option<&str>,
    watched: bool,
) -> Result<entities::plant::Model> {
    let created = plant::create_plant(
        db,
        plant::PlantSpec {
            name: name.to_string(),
            variety: variety.map(ToString::to_string),
            category: category.to_string(),
            water_needs: water_needs.map(ToString::to_string),
            ..Default::default()
        },
    )
    .await?;

    if watched {
        return plant::set_watched(db, created.id, true).await;
    }
    Ok(created)
}

/// Creates a 4x4 test bed.
pub async fn create_test_bed(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::bed::Model> {
    bed::create_bed(db, name.to_string(), 4, 4, None, None).await
}

/// Creates a planting window with day-of-month defaults (1 through 28).
pub async fn set_test_window(
    db: &DatabaseConnection,
    plant_id: i64,
    window_type: &str,
    start_month: i32,
    end_month: i32,
) -> Result<entities::planting_window::Model> {
    plant::set_planting_window(db, plant_id, window_type, start_month, 1, end_month, 28).await
}

/// Sets up a complete test environment with a 4x4 bed and a "Tomato" plant.
/// Returns (db, bed, plant) for placement-related tests.
pub async fn setup_with_bed_and_plant() -> Result<(
    DatabaseConnection,
    entities::bed::Model,
    entities::plant::Model,
)> {
    let db = setup_test_db().await?;
    let bed = create_test_bed(&db, "Test Bed").await?;
    let plant = create_test_plant(&db, "Tomato").await?;
    Ok((db, bed, plant))
}

/// In-memory plant model for pure-function tests, no database involved.
#[must_use]
pub fn plant_fixture(
    id: i64,
    name: &str,
    variety: Option<&str>,
    category: &str,
) -> entities::plant::Model {
    entities::plant::Model {
        id,
        name: name.to_string(),
        variety: variety.map(ToString::to_string),
        category: category.to_string(),
        days_to_maturity: None,
        spacing_inches: None,
        sun_requirement: None,
        water_needs: None,
        frost_tolerant: false,
        watched: false,
    }
}

/// In-memory planting window model for pure-function tests.
#[must_use]
pub fn window_fixture(
    id: i64,
    plant_id: i64,
    window_type: &str,
    start_month: i32,
    end_month: i32,
) -> entities::planting_window::Model {
    entities::planting_window::Model {
        id,
        plant_id,
        window_type: window_type.to_string(),
        start_month,
        start_day: 1,
        end_month,
        end_day: 28,
    }
}

/// In-memory companion relationship model for pure-function tests.
#[must_use]
pub fn relationship_fixture(
    id: i64,
    name_a: &str,
    name_b: &str,
    relationship: &str,
    notes: Option<&str>,
) -> entities::companion_relationship::Model {
    entities::companion_relationship::Model {
        id,
        plant_name_a: name_a.to_string(),
        plant_name_b: name_b.to_string(),
        relationship: relationship.to_string(),
        notes: notes.map(ToString::to_string),
    }
}

/// In-memory bed model for pure-function tests.
#[must_use]
pub fn bed_fixture(id: i64, rows: i32, cols: i32) -> entities::bed::Model {
    entities::bed::Model {
        id,
        name: format!("Bed {id}"),
        rows,
        cols,
        sensor_id: None,
        temp_sensor_id: None,
    }
}

/// In-memory joined placement for analyzer tests.
#[must_use]
pub fn placement_info_fixture(
    placement_id: i64,
    plant_id: i64,
    plant_name: &str,
    variety: Option<&str>,
    row: i32,
    col: i32,
    water_needs: Option<&str>,
) -> crate::core::placement::PlacementInfo {
    crate::core::placement::PlacementInfo {
        placement_id,
        plant_id,
        plant_name: plant_name.to_string(),
        variety: variety.map(ToString::to_string),
        category: "vegetable".to_string(),
        water_needs: water_needs.map(ToString::to_string),
        days_to_maturity: None,
        spacing_inches: None,
        row,
        col,
        planted_date: None,
    }
}
