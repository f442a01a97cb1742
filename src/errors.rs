//! Unified error types for `GardenBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`]. Domain rule
//! violations (bounds, occupancy, bad intervals) get their own variants so
//! callers can match on them instead of parsing strings.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Referenced plant does not exist
    #[error("Plant not found: {name}")]
    PlantNotFound {
        /// Plant name or id used for the lookup
        name: String,
    },

    /// Referenced bed does not exist
    #[error("Bed not found: {id}")]
    BedNotFound {
        /// Bed id used for the lookup
        id: i64,
    },

    /// Referenced placement does not exist
    #[error("Placement not found: {id}")]
    PlacementNotFound {
        /// Placement id used for the lookup
        id: i64,
    },

    /// Referenced companion relationship does not exist
    #[error("No companion relationship between '{name_a}' and '{name_b}'")]
    RelationshipNotFound {
        /// First plant name of the pair
        name_a: String,
        /// Second plant name of the pair
        name_b: String,
    },

    /// A plant with the same `(name, variety)` already exists
    #[error("Plant already exists: {name} ({variety:?})")]
    DuplicatePlant {
        /// Generic plant name
        name: String,
        /// Optional cultivar
        variety: Option<String>,
    },

    /// A relationship for this pair (in either order) already exists
    #[error("Companion relationship already exists for '{name_a}' / '{name_b}'")]
    DuplicateRelationship {
        /// First plant name of the pair
        name_a: String,
        /// Second plant name of the pair
        name_b: String,
    },

    /// Placement target outside the bed grid
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} bed grid")]
    OutOfBounds {
        /// Requested row (0-indexed)
        row: i32,
        /// Requested column (0-indexed)
        col: i32,
        /// Bed row count
        rows: i32,
        /// Bed column count
        cols: i32,
    },

    /// Placement target already holds a plant
    #[error("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Requested row (0-indexed)
        row: i32,
        /// Requested column (0-indexed)
        col: i32,
    },

    /// A planting window month outside 1-12
    #[error("Invalid calendar month: {month} (expected 1-12)")]
    InvalidInterval {
        /// The offending month value
        month: i32,
    },

    /// Database error from the ORM layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Integer conversion error
    #[error("Conversion error: {0}")]
    Conversion(#[from] std::num::TryFromIntError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
