//! Companion relationship entity - An unordered pair of generic plant names
//! tagged good, bad, or neutral.
//!
//! The pair is stored once in insertion order; lookups must treat
//! `(a, b)` and `(b, a)` as the same pair. Matching is by generic name only,
//! never by variety.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Companion relationship database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companion_relationships")]
pub struct Model {
    /// Unique identifier for the relationship
    #[sea_orm(primary_key)]
    pub id: i64,
    /// First generic plant name of the pair
    pub plant_name_a: String,
    /// Second generic plant name of the pair
    pub plant_name_b: String,
    /// Relationship tag: good, bad, or neutral
    pub relationship: String,
    /// Free-text explanation shown with companion warnings
    pub notes: Option<String>,
}

/// Companion relationships reference plants by name, not by foreign key
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
