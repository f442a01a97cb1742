//! Bed entity - A raised bed laid out as a rows x cols grid of plantable
//! cells, optionally linked to moisture and temperature sensors.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bed database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "beds")]
pub struct Model {
    /// Unique identifier for the bed
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the bed (e.g., "South Bed")
    pub name: String,
    /// Number of grid rows (>= 1)
    pub rows: i32,
    /// Number of grid columns (>= 1)
    pub cols: i32,
    /// Linked soil-moisture sensor id, if any
    pub sensor_id: Option<String>,
    /// Linked soil-temperature sensor id, if any
    pub temp_sensor_id: Option<String>,
}

/// Defines relationships between Bed and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One bed has many placements
    #[sea_orm(has_many = "super::bed_placement::Entity")]
    BedPlacements,
}

impl Related<super::bed_placement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BedPlacements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Total number of cells in the grid.
    #[must_use]
    pub const fn total_cells(&self) -> i32 {
        self.rows * self.cols
    }

    /// Whether `(row, col)` falls inside the grid.
    #[must_use]
    pub const fn contains_cell(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }
}
