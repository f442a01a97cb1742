//! Core business logic - framework-agnostic garden operations.
//!
//! Everything here is either a pure function over already-loaded data (bed
//! analysis, calendar math, watering advice) or an async CRUD/mutation over
//! the entity layer. Nothing in this module performs network I/O or reads
//! the system clock.

/// Alert threshold classification
pub mod alerts;
/// Bed CRUD and grid/companion analysis
pub mod bed;
/// Planting calendar: month-wrap windows, plantable-now, yearly agenda
pub mod calendar;
/// Companion relationship CRUD and symmetric lookup
pub mod companion;
/// Placement mutations: place, move, remove
pub mod placement;
/// Plant CRUD, watched flag, and planting windows
pub mod plant;
/// Watering advice from forecast and moisture readings
pub mod watering;
