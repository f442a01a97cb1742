//! Bed placement entity - One plant occupying one cell of a bed grid.
//!
//! A cell holds at most one plant. On top of the core layer's occupancy
//! check, table creation adds a unique index over `(bed_id, row, col)` so a
//! concurrent double-placement loses deterministically at the data layer.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bed placement database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bed_placements")]
pub struct Model {
    /// Unique identifier for the placement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning bed id
    pub bed_id: i64,
    /// Id of the plant occupying the cell
    pub plant_id: i64,
    /// Grid row (0-indexed)
    pub row: i32,
    /// Grid column (0-indexed)
    pub col: i32,
    /// Date the plant went into the ground, if recorded
    pub planted_date: Option<NaiveDate>,
}

/// Defines relationships between `BedPlacement` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each placement belongs to exactly one bed
    #[sea_orm(
        belongs_to = "super::bed::Entity",
        from = "Column::BedId",
        to = "super::bed::Column::Id"
    )]
    Bed,
    /// Each placement references exactly one plant
    #[sea_orm(
        belongs_to = "super::plant::Entity",
        from = "Column::PlantId",
        to = "super::plant::Column::Id"
    )]
    Plant,
}

impl Related<super::bed::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bed.def()
    }
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
