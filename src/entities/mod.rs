//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod bed;
pub mod bed_placement;
pub mod companion_relationship;
pub mod plant;
pub mod planting_window;

// Re-export specific types to avoid conflicts
pub use bed::{Column as BedColumn, Entity as Bed, Model as BedModel};
pub use bed_placement::{
    Column as BedPlacementColumn, Entity as BedPlacement, Model as BedPlacementModel,
};
pub use companion_relationship::{
    Column as CompanionRelationshipColumn, Entity as CompanionRelationship,
    Model as CompanionRelationshipModel,
};
pub use plant::{Column as PlantColumn, Entity as Plant, Model as PlantModel};
pub use planting_window::{
    Column as PlantingWindowColumn, Entity as PlantingWindow, Model as PlantingWindowModel,
};
