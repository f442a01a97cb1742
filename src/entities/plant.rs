//! Plant entity - Represents a plant species/cultivar the gardener tracks.
//!
//! Each plant has a generic name, an optional variety, a category, growing
//! attributes, and a `watched` flag marking it as part of the personal
//! planting calendar. The `(name, variety)` pair is unique.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plants")]
pub struct Model {
    /// Unique identifier for the plant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Generic species name (e.g., "Tomato")
    pub name: String,
    /// Optional cultivar (e.g., "Cherokee Purple"), None for the generic entry
    pub variety: Option<String>,
    /// Category for organization: vegetable, herb, fruit, flower, cover_crop
    pub category: String,
    /// Days from planting to harvest, if known
    pub days_to_maturity: Option<i32>,
    /// Recommended in-bed spacing in inches
    pub spacing_inches: Option<i32>,
    /// Sun requirement (e.g., "full_sun", "partial_shade")
    pub sun_requirement: Option<String>,
    /// Water needs bucket: low, medium, or high
    pub water_needs: Option<String>,
    /// Whether the plant tolerates frost
    pub frost_tolerant: bool,
    /// User interest flag - watched plants feed the planting calendar
    pub watched: bool,
}

/// Defines relationships between Plant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One plant has many planting windows
    #[sea_orm(has_many = "super::planting_window::Entity")]
    PlantingWindows,
    /// One plant has many bed placements
    #[sea_orm(has_many = "super::bed_placement::Entity")]
    BedPlacements,
}

impl Related<super::planting_window::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlantingWindows.def()
    }
}

impl Related<super::bed_placement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BedPlacements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Display name: `"Tomato"` or `"Tomato (Cherokee Purple)"` with a variety.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.variety {
            Some(variety) => format!("{} ({variety})", self.name),
            None => self.name.clone(),
        }
    }
}
