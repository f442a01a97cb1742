//! Database configuration module for `GardenBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database schema always matches the
//! Rust struct definitions without manual SQL. The one piece `DeriveEntityModel`
//! cannot express - the composite unique index guarding bed cells - is created
//! with a raw statement right after the tables.

use crate::entities::{Bed, BedPlacement, CompanionRelationship, Plant, PlantingWindow};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
pub fn get_database_url() -> Result<String> {
    Ok(std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/garden_buddy.sqlite".to_string()))
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a default local `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions, plus the unique cell index on bed placements.
///
/// The `(bed_id, row, col)` unique index is what makes two concurrent
/// placements into the same empty cell resolve deterministically: the losing
/// insert fails with a uniqueness violation instead of silently overwriting.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let plant_table = schema.create_table_from_entity(Plant);
    let planting_window_table = schema.create_table_from_entity(PlantingWindow);
    let companion_table = schema.create_table_from_entity(CompanionRelationship);
    let bed_table = schema.create_table_from_entity(Bed);
    let bed_placement_table = schema.create_table_from_entity(BedPlacement);

    db.execute(builder.build(&plant_table)).await?;
    db.execute(builder.build(&planting_window_table)).await?;
    db.execute(builder.build(&companion_table)).await?;
    db.execute(builder.build(&bed_table)).await?;
    db.execute(builder.build(&bed_placement_table)).await?;

    // One plant per cell, enforced at the data layer
    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_bed_placements_cell \
         ON bed_placements (bed_id, row, col)",
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        bed::Model as BedModel, bed_placement::Model as BedPlacementModel,
        companion_relationship::Model as CompanionModel, plant::Model as PlantModel,
        planting_window::Model as PlantingWindowModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        // Use in-memory database for testing to avoid schema conflicts with existing database
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that we can execute a query to verify the connection is working
        let _: Vec<PlantModel> = Plant::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<PlantModel> = Plant::find().limit(1).all(&db).await?;
        let _: Vec<PlantingWindowModel> = PlantingWindow::find().limit(1).all(&db).await?;
        let _: Vec<CompanionModel> = CompanionRelationship::find().limit(1).all(&db).await?;
        let _: Vec<BedModel> = Bed::find().limit(1).all(&db).await?;
        let _: Vec<BedPlacementModel> = BedPlacement::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent_for_index() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Re-running the index statement must not fail (IF NOT EXISTS)
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_bed_placements_cell \
             ON bed_placements (bed_id, row, col)",
        )
        .await?;

        Ok(())
    }
}
