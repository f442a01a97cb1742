//! Bed business logic - bed CRUD and grid analysis.
//!
//! The analyzer is a pure function over already-loaded placements: it tallies
//! water needs, flags low/high conflicts, and reports adjacent placement
//! pairs with a recorded bad companion relationship. Adjacency is the
//! 8-directional Chebyshev distance-1 relation between grid cells.

use crate::{
    core::companion::{CompanionIndex, RELATIONSHIP_BAD, RELATIONSHIP_GOOD},
    core::placement::PlacementInfo,
    entities::{Bed, BedPlacement, bed, bed_placement},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;

/// Water needs bucket name for low-water plants.
pub const WATER_LOW: &str = "low";
/// Water needs bucket name for medium-water plants.
pub const WATER_MEDIUM: &str = "medium";
/// Water needs bucket name for high-water plants.
pub const WATER_HIGH: &str = "high";

/// Whether two cells are neighbors (Chebyshev distance exactly 1).
#[must_use]
pub const fn is_adjacent(row_a: i32, col_a: i32, row_b: i32, col_b: i32) -> bool {
    let dr = (row_a - row_b).abs();
    let dc = (col_a - col_b).abs();
    let chebyshev = if dr > dc { dr } else { dc };
    chebyshev == 1
}

/// Placement counts per water-needs bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WaterNeedsSummary {
    /// Plants with low water needs
    pub low: usize,
    /// Plants with medium water needs
    pub medium: usize,
    /// Plants with high water needs
    pub high: usize,
}

/// One side of a companion issue or neighbor assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementRef {
    /// Placement id
    pub placement_id: i64,
    /// Plant id
    pub plant_id: i64,
    /// Generic plant name
    pub plant_name: String,
    /// Optional cultivar
    pub variety: Option<String>,
    /// Grid row
    pub row: i32,
    /// Grid column
    pub col: i32,
}

impl PlacementRef {
    fn from_info(info: &PlacementInfo) -> Self {
        Self {
            placement_id: info.placement_id,
            plant_id: info.plant_id,
            plant_name: info.plant_name.clone(),
            variety: info.variety.clone(),
            row: info.row,
            col: info.col,
        }
    }
}

/// An adjacent pair of placements whose species have a bad relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanionIssue {
    /// First placement of the pair
    pub plant_a: PlacementRef,
    /// Second placement of the pair
    pub plant_b: PlacementRef,
    /// Notes from the stored relationship
    pub notes: Option<String>,
}

/// Full analysis of a bed's current layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BedAnalysis {
    /// Counts per water-needs bucket
    pub water_needs: WaterNeedsSummary,
    /// True when the bed mixes low-water and high-water plants
    pub has_water_conflict: bool,
    /// Adjacent bad-companion pairs, each reported once
    pub companion_issues: Vec<CompanionIssue>,
    /// Number of placements in the bed
    pub total_plants: usize,
    /// rows * cols
    pub total_cells: i32,
}

/// One existing neighbor of a prospective placement, with the relationship
/// notes when one is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborAssessment {
    /// The neighboring placement
    pub placement: PlacementRef,
    /// Notes from the stored relationship, if any
    pub notes: Option<String>,
}

/// Advisory result of checking a candidate plant against a target cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdjacentAnalysis {
    /// Neighbors with a good relationship to the candidate
    pub good: Vec<NeighborAssessment>,
    /// Neighbors with a bad relationship to the candidate
    pub bad: Vec<NeighborAssessment>,
    /// Neighbors with a neutral or unrecorded relationship
    pub neutral: Vec<NeighborAssessment>,
    /// All good companions of the candidate, irrespective of adjacency
    pub good_companions: Vec<String>,
    /// All bad companions of the candidate, irrespective of adjacency
    pub bad_companions: Vec<String>,
}

/// Analyzes a bed's layout: water-needs tally, conflict flag, and adjacent
/// bad-companion pairs.
///
/// Pure function over already-loaded data; calling it twice on the same
/// inputs yields identical output. Placements with unset or unrecognized
/// `water_needs` are skipped by the tally without erroring. Each unordered
/// adjacent pair is considered once (i < j), and only a stored `bad`
/// relationship between the generic names produces an issue.
#[must_use]
pub fn analyze(
    bed: &bed::Model,
    placements: &[PlacementInfo],
    companions: &CompanionIndex,
) -> BedAnalysis {
    let mut water_needs = WaterNeedsSummary::default();
    for placement in placements {
        match placement.water_needs.as_deref() {
            Some(WATER_LOW) => water_needs.low += 1,
            Some(WATER_MEDIUM) => water_needs.medium += 1,
            Some(WATER_HIGH) => water_needs.high += 1,
            _ => {}
        }
    }

    let has_water_conflict = water_needs.low > 0 && water_needs.high > 0;

    let mut companion_issues = Vec::new();
    for (i, a) in placements.iter().enumerate() {
        for b in placements.iter().skip(i + 1) {
            if !is_adjacent(a.row, a.col, b.row, b.col) {
                continue;
            }
            let Some(relationship) = companions.lookup(&a.plant_name, &b.plant_name) else {
                continue;
            };
            if relationship.relationship == RELATIONSHIP_BAD {
                companion_issues.push(CompanionIssue {
                    plant_a: PlacementRef::from_info(a),
                    plant_b: PlacementRef::from_info(b),
                    notes: relationship.notes.clone(),
                });
            }
        }
    }

    BedAnalysis {
        water_needs,
        has_water_conflict,
        companion_issues,
        total_plants: placements.len(),
        total_cells: bed.total_cells(),
    }
}

/// Checks how a candidate plant would get along at `(row, col)`.
///
/// Classifies every placement adjacent to the target cell into good, bad, or
/// neutral buckets by symmetric name lookup (no recorded relationship means
/// neutral), and attaches the candidate's full good/bad companion lists as
/// general information. Advisory only: occupancy and bounds of the target
/// cell are validated by the mutation layer, not here.
#[must_use]
pub fn check_companions_at(
    placements: &[PlacementInfo],
    candidate_name: &str,
    row: i32,
    col: i32,
    companions: &CompanionIndex,
) -> AdjacentAnalysis {
    let mut result = AdjacentAnalysis::default();

    for placement in placements {
        if !is_adjacent(placement.row, placement.col, row, col) {
            continue;
        }
        let relationship = companions.lookup(candidate_name, &placement.plant_name);
        let assessment = NeighborAssessment {
            placement: PlacementRef::from_info(placement),
            notes: relationship.and_then(|r| r.notes.clone()),
        };
        match relationship.map(|r| r.relationship.as_str()) {
            Some(RELATIONSHIP_GOOD) => result.good.push(assessment),
            Some(RELATIONSHIP_BAD) => result.bad.push(assessment),
            _ => result.neutral.push(assessment),
        }
    }

    let (good_companions, bad_companions) = companions.companions_of(candidate_name);
    result.good_companions = good_companions;
    result.bad_companions = bad_companions;

    result
}

/// Retrieves all beds, ordered alphabetically by name.
pub async fn get_all_beds(db: &DatabaseConnection) -> Result<Vec<bed::Model>> {
    Bed::find()
        .order_by_asc(bed::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a bed by its id.
pub async fn get_bed_by_id(db: &DatabaseConnection, bed_id: i64) -> Result<Option<bed::Model>> {
    Bed::find_by_id(bed_id).one(db).await.map_err(Into::into)
}

/// Creates a new bed, validating the name and grid dimensions.
pub async fn create_bed(
    db: &DatabaseConnection,
    name: String,
    rows: i32,
    cols: i32,
    sensor_id: Option<String>,
    temp_sensor_id: Option<String>,
) -> Result<bed::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Bed name cannot be empty".to_string(),
        });
    }

    if rows < 1 || cols < 1 {
        return Err(Error::Config {
            message: format!("Bed dimensions must be at least 1x1, got {rows}x{cols}"),
        });
    }

    let model = bed::ActiveModel {
        name: Set(name.trim().to_string()),
        rows: Set(rows),
        cols: Set(cols),
        sensor_id: Set(sensor_id),
        temp_sensor_id: Set(temp_sensor_id),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Deletes a bed and all of its placements in one transaction.
pub async fn delete_bed(db: &DatabaseConnection, bed_id: i64) -> Result<()> {
    let _bed = get_bed_by_id(db, bed_id)
        .await?
        .ok_or(Error::BedNotFound { id: bed_id })?;

    let txn = db.begin().await?;

    BedPlacement::delete_many()
        .filter(bed_placement::Column::BedId.eq(bed_id))
        .exec(&txn)
        .await?;
    Bed::delete_by_id(bed_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}
