//! Placement business logic - putting plants into bed cells.
//!
//! Mutations enforce the grid rules: the target cell must be inside the bed
//! and unoccupied. The occupancy pre-check runs inside a transaction, and the
//! `(bed_id, row, col)` unique index backs it up, so two concurrent requests
//! for the same empty cell cannot both succeed - the loser gets
//! `CellOccupied` instead of silently overwriting.

use crate::{
    core::bed::{AdjacentAnalysis, check_companions_at},
    core::companion::CompanionIndex,
    entities::{Bed, BedPlacement, Plant, bed_placement, plant},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{Set, SqlErr, TransactionTrait, prelude::*};
use serde::Serialize;

/// A placement joined with the plant fields the analyzer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementInfo {
    /// Placement id
    pub placement_id: i64,
    /// Plant id
    pub plant_id: i64,
    /// Generic plant name
    pub plant_name: String,
    /// Optional cultivar
    pub variety: Option<String>,
    /// Plant category
    pub category: String,
    /// Water needs bucket, if set
    pub water_needs: Option<String>,
    /// Days to maturity, if known
    pub days_to_maturity: Option<i32>,
    /// Recommended spacing in inches, if known
    pub spacing_inches: Option<i32>,
    /// Grid row (0-indexed)
    pub row: i32,
    /// Grid column (0-indexed)
    pub col: i32,
    /// Date planted, if recorded
    pub planted_date: Option<NaiveDate>,
}

impl PlacementInfo {
    fn from_join(placement: bed_placement::Model, plant: plant::Model) -> Self {
        Self {
            placement_id: placement.id,
            plant_id: plant.id,
            plant_name: plant.name,
            variety: plant.variety,
            category: plant.category,
            water_needs: plant.water_needs,
            days_to_maturity: plant.days_to_maturity,
            spacing_inches: plant.spacing_inches,
            row: placement.row,
            col: placement.col,
            planted_date: placement.planted_date,
        }
    }
}

/// Loads all placements of a bed joined with their plants.
pub async fn list_placements(db: &DatabaseConnection, bed_id: i64) -> Result<Vec<PlacementInfo>> {
    let rows = BedPlacement::find()
        .filter(bed_placement::Column::BedId.eq(bed_id))
        .find_also_related(Plant)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(placement, plant)| {
            let plant_id = placement.plant_id;
            plant
                .map(|p| PlacementInfo::from_join(placement, p))
                .ok_or_else(|| Error::PlantNotFound {
                    name: plant_id.to_string(),
                })
        })
        .collect()
}

/// Places a plant into a bed cell.
///
/// Fails with `BedNotFound`/`PlantNotFound` for dangling references,
/// `OutOfBounds` for a cell outside the grid, and `CellOccupied` when the
/// cell already holds a plant - whether detected by the pre-check or by the
/// unique index when a concurrent writer got there first.
///
/// On success returns the new placement together with the advisory companion
/// check for the cell (computed against the neighbors that were already
/// there). The placement is committed regardless of bad companions; whether
/// to warn the user is the caller's decision.
pub async fn place_plant(
    db: &DatabaseConnection,
    bed_id: i64,
    plant_id: i64,
    row: i32,
    col: i32,
    planted_date: Option<NaiveDate>,
) -> Result<(bed_placement::Model, AdjacentAnalysis)> {
    let bed = Bed::find_by_id(bed_id)
        .one(db)
        .await?
        .ok_or(Error::BedNotFound { id: bed_id })?;

    let plant = Plant::find_by_id(plant_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::PlantNotFound {
            name: plant_id.to_string(),
        })?;

    if !bed.contains_cell(row, col) {
        return Err(Error::OutOfBounds {
            row,
            col,
            rows: bed.rows,
            cols: bed.cols,
        });
    }

    // Neighbors as they were before this placement, for the advisory check
    let existing = list_placements(db, bed_id).await?;

    let txn = db.begin().await?;

    let occupied = BedPlacement::find()
        .filter(bed_placement::Column::BedId.eq(bed_id))
        .filter(bed_placement::Column::Row.eq(row))
        .filter(bed_placement::Column::Col.eq(col))
        .one(&txn)
        .await?;
    if occupied.is_some() {
        return Err(Error::CellOccupied { row, col });
    }

    let model = bed_placement::ActiveModel {
        bed_id: Set(bed_id),
        plant_id: Set(plant_id),
        row: Set(row),
        col: Set(col),
        planted_date: Set(planted_date),
        ..Default::default()
    };

    let placement = match model.insert(&txn).await {
        Ok(placement) => placement,
        Err(err) => {
            return Err(match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Error::CellOccupied { row, col },
                _ => err.into(),
            });
        }
    };

    txn.commit().await?;

    let companions = CompanionIndex::load(db).await?;
    let analysis = check_companions_at(&existing, &plant.name, row, col, &companions);

    Ok((placement, analysis))
}

/// Moves a placement to a new cell within its bed.
///
/// Runs the same bounds and occupancy checks against the target cell,
/// excluding the placement's own current cell from the occupancy check.
/// Companion compatibility is not re-validated; callers may re-run
/// [`check_companions_at`] themselves.
pub async fn move_placement(
    db: &DatabaseConnection,
    placement_id: i64,
    row: i32,
    col: i32,
) -> Result<bed_placement::Model> {
    let placement = BedPlacement::find_by_id(placement_id)
        .one(db)
        .await?
        .ok_or(Error::PlacementNotFound { id: placement_id })?;

    let bed = Bed::find_by_id(placement.bed_id)
        .one(db)
        .await?
        .ok_or(Error::BedNotFound {
            id: placement.bed_id,
        })?;

    if !bed.contains_cell(row, col) {
        return Err(Error::OutOfBounds {
            row,
            col,
            rows: bed.rows,
            cols: bed.cols,
        });
    }

    let txn = db.begin().await?;

    let occupied = BedPlacement::find()
        .filter(bed_placement::Column::BedId.eq(placement.bed_id))
        .filter(bed_placement::Column::Row.eq(row))
        .filter(bed_placement::Column::Col.eq(col))
        .filter(bed_placement::Column::Id.ne(placement_id))
        .one(&txn)
        .await?;
    if occupied.is_some() {
        return Err(Error::CellOccupied { row, col });
    }

    let mut active: bed_placement::ActiveModel = placement.into();
    active.row = Set(row);
    active.col = Set(col);

    let updated = match active.update(&txn).await {
        Ok(updated) => updated,
        Err(err) => {
            return Err(match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Error::CellOccupied { row, col },
                _ => err.into(),
            });
        }
    };

    txn.commit().await?;
    Ok(updated)
}

/// Removes a placement by id.
pub async fn remove_placement(db: &DatabaseConnection, placement_id: i64) -> Result<()> {
    let result = BedPlacement::delete_by_id(placement_id).exec(db).await?;

    if result.rows_affected == 0 {
        return Err(Error::PlacementNotFound { id: placement_id });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::companion::{RELATIONSHIP_BAD, create_relationship};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_place_plant_success() -> Result<()> {
        let (db, bed, plant) = setup_with_bed_and_plant().await?;

        let (placement, analysis) = place_plant(&db, bed.id, plant.id, 1, 2, None).await?;
        assert_eq!(placement.bed_id, bed.id);
        assert_eq!(placement.plant_id, plant.id);
        assert_eq!(placement.row, 1);
        assert_eq!(placement.col, 2);
        assert!(analysis.good.is_empty());
        assert!(analysis.bad.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_place_plant_records_date() -> Result<()> {
        let (db, bed, plant) = setup_with_bed_and_plant().await?;

        let date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let (placement, _) = place_plant(&db, bed.id, plant.id, 0, 0, Some(date)).await?;
        assert_eq!(placement.planted_date, Some(date));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_plant_bed_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let plant = create_test_plant(&db, "Tomato").await?;

        let result = place_plant(&db, 999, plant.id, 0, 0, None).await;
        assert!(matches!(result, Err(Error::BedNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_plant_plant_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let bed = create_test_bed(&db, "Bed").await?;

        let result = place_plant(&db, bed.id, 999, 0, 0, None).await;
        assert!(matches!(result, Err(Error::PlantNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_plant_out_of_bounds() -> Result<()> {
        let (db, bed, plant) = setup_with_bed_and_plant().await?;

        // Test bed is 4x4
        for (row, col) in [(4, 0), (0, 4), (-1, 0), (0, -1)] {
            let result = place_plant(&db, bed.id, plant.id, row, col, None).await;
            assert!(
                matches!(result, Err(Error::OutOfBounds { .. })),
                "({row},{col}) should be out of bounds"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_place_plant_cell_occupied() -> Result<()> {
        let (db, bed, plant) = setup_with_bed_and_plant().await?;
        let other = create_test_plant(&db, "Basil").await?;

        place_plant(&db, bed.id, plant.id, 1, 1, None).await?;

        let result = place_plant(&db, bed.id, other.id, 1, 1, None).await;
        assert!(matches!(
            result,
            Err(Error::CellOccupied { row: 1, col: 1 })
        ));

        // The original occupant is untouched
        let placements = list_placements(&db, bed.id).await?;
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].plant_name, "Tomato");

        Ok(())
    }

    #[tokio::test]
    async fn test_unique_index_rejects_direct_double_insert() -> Result<()> {
        // Bypass the pre-check to prove the data layer holds the line
        let (db, bed, plant) = setup_with_bed_and_plant().await?;
        place_plant(&db, bed.id, plant.id, 0, 0, None).await?;

        let rogue = bed_placement::ActiveModel {
            bed_id: Set(bed.id),
            plant_id: Set(plant.id),
            row: Set(0),
            col: Set(0),
            planted_date: Set(None),
            ..Default::default()
        };
        let err = rogue.insert(&db).await.unwrap_err();
        assert!(matches!(
            err.sql_err(),
            Some(SqlErr::UniqueConstraintViolation(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_plant_returns_companion_advisory() -> Result<()> {
        let (db, bed, tomato) = setup_with_bed_and_plant().await?;
        let fennel = create_test_plant(&db, "Fennel").await?;
        create_relationship(
            &db,
            "Tomato".to_string(),
            "Fennel".to_string(),
            RELATIONSHIP_BAD.to_string(),
            Some("keep apart".to_string()),
        )
        .await?;

        place_plant(&db, bed.id, tomato.id, 1, 1, None).await?;

        // Fennel next to Tomato: commit still happens, advisory flags it
        let (placement, analysis) = place_plant(&db, bed.id, fennel.id, 1, 2, None).await?;
        assert_eq!(placement.row, 1);
        assert_eq!(analysis.bad.len(), 1);
        assert_eq!(analysis.bad[0].placement.plant_name, "Tomato");
        assert_eq!(analysis.bad_companions, vec!["Tomato".to_string()]);

        let placements = list_placements(&db, bed.id).await?;
        assert_eq!(placements.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_move_placement_success() -> Result<()> {
        let (db, bed, plant) = setup_with_bed_and_plant().await?;
        let (placement, _) = place_plant(&db, bed.id, plant.id, 0, 0, None).await?;

        let moved = move_placement(&db, placement.id, 2, 3).await?;
        assert_eq!(moved.id, placement.id);
        assert_eq!(moved.row, 2);
        assert_eq!(moved.col, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_move_placement_own_cell_allowed() -> Result<()> {
        // Moving onto its own current cell is not an occupancy conflict
        let (db, bed, plant) = setup_with_bed_and_plant().await?;
        let (placement, _) = place_plant(&db, bed.id, plant.id, 1, 1, None).await?;

        let moved = move_placement(&db, placement.id, 1, 1).await?;
        assert_eq!(moved.row, 1);
        assert_eq!(moved.col, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_move_placement_target_occupied() -> Result<()> {
        let (db, bed, plant) = setup_with_bed_and_plant().await?;
        let other = create_test_plant(&db, "Basil").await?;
        let (placement, _) = place_plant(&db, bed.id, plant.id, 0, 0, None).await?;
        place_plant(&db, bed.id, other.id, 2, 2, None).await?;

        let result = move_placement(&db, placement.id, 2, 2).await;
        assert!(matches!(
            result,
            Err(Error::CellOccupied { row: 2, col: 2 })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_move_placement_out_of_bounds() -> Result<()> {
        let (db, bed, plant) = setup_with_bed_and_plant().await?;
        let (placement, _) = place_plant(&db, bed.id, plant.id, 0, 0, None).await?;

        let result = move_placement(&db, placement.id, 9, 0).await;
        assert!(matches!(result, Err(Error::OutOfBounds { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_move_placement_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = move_placement(&db, 42, 0, 0).await;
        assert!(matches!(result, Err(Error::PlacementNotFound { id: 42 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_placement() -> Result<()> {
        let (db, bed, plant) = setup_with_bed_and_plant().await?;
        let (placement, _) = place_plant(&db, bed.id, plant.id, 0, 0, None).await?;

        remove_placement(&db, placement.id).await?;
        assert!(list_placements(&db, bed.id).await?.is_empty());

        let result = remove_placement(&db, placement.id).await;
        assert!(matches!(result, Err(Error::PlacementNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_placements_joins_plant_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let bed = create_test_bed(&db, "Bed").await?;
        let plant = create_custom_plant(
            &db,
            "Tomato",
            Some("Cherokee Purple"),
            "vegetable",
            Some("high"),
            false,
        )
        .await?;

        place_plant(&db, bed.id, plant.id, 3, 1, None).await?;

        let placements = list_placements(&db, bed.id).await?;
        assert_eq!(placements.len(), 1);
        let info = &placements[0];
        assert_eq!(info.plant_name, "Tomato");
        assert_eq!(info.variety.as_deref(), Some("Cherokee Purple"));
        assert_eq!(info.category, "vegetable");
        assert_eq!(info.water_needs.as_deref(), Some("high"));
        assert_eq!((info.row, info.col), (3, 1));

        Ok(())
    }
}
