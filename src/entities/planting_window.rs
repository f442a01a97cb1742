//! Planting window entity - A named month/day range in which a plant should
//! be started indoors, transplanted, or direct sown.
//!
//! A window is a closed interval over the calendar wheel and may wrap across
//! year-end (e.g., Oct through Feb). At most one window exists per
//! `(plant_id, window_type)`; that rule is enforced by the core layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Planting window database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "planting_windows")]
pub struct Model {
    /// Unique identifier for the window
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning plant id
    pub plant_id: i64,
    /// Window kind: indoor_start, transplant, or direct_sow
    pub window_type: String,
    /// Start month (1-12)
    pub start_month: i32,
    /// Start day of month (1-31), informational only
    pub start_day: i32,
    /// End month (1-12); less than `start_month` when the window wraps
    pub end_month: i32,
    /// End day of month (1-31), informational only
    pub end_day: i32,
}

/// Defines relationships between `PlantingWindow` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each window belongs to exactly one plant
    #[sea_orm(
        belongs_to = "super::plant::Entity",
        from = "Column::PlantId",
        to = "super::plant::Column::Id"
    )]
    Plant,
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
