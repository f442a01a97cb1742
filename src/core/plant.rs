//! Plant business logic - CRUD, watched flag, and planting window upkeep.
//!
//! Plants are unique by `(name, variety)`, with a missing variety acting as
//! its own value. Deleting a plant cascades to its planting windows and bed
//! placements in a single transaction.

use crate::{
    core::calendar::{MonthRange, category_rank},
    entities::{BedPlacement, Plant, PlantingWindow, bed_placement, plant, planting_window},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Parameters for creating a plant.
#[derive(Debug, Clone, Default)]
pub struct PlantSpec {
    /// Generic species name
    pub name: String,
    /// Optional cultivar
    pub variety: Option<String>,
    /// Category: vegetable, herb, fruit, flower, cover_crop
    pub category: String,
    /// Days from planting to harvest
    pub days_to_maturity: Option<i32>,
    /// Recommended spacing in inches
    pub spacing_inches: Option<i32>,
    /// Sun requirement
    pub sun_requirement: Option<String>,
    /// Water needs bucket: low, medium, high
    pub water_needs: Option<String>,
    /// Frost tolerance
    pub frost_tolerant: bool,
}

/// Retrieves all plants ordered by category (fixed display sequence) then name.
pub async fn get_all_plants(db: &DatabaseConnection) -> Result<Vec<plant::Model>> {
    let mut plants = Plant::find()
        .order_by_asc(plant::Column::Name)
        .all(db)
        .await?;

    // Category follows the fixed display sequence, which SQL cannot order by
    plants.sort_by(|a, b| {
        category_rank(&a.category)
            .cmp(&category_rank(&b.category))
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(plants)
}

/// Finds a plant by its id.
pub async fn get_plant_by_id(
    db: &DatabaseConnection,
    plant_id: i64,
) -> Result<Option<plant::Model>> {
    Plant::find_by_id(plant_id).one(db).await.map_err(Into::into)
}

/// Finds a plant by `(name, variety)`, treating a missing variety as its own value.
pub async fn get_plant_by_name_and_variety(
    db: &DatabaseConnection,
    name: &str,
    variety: Option<&str>,
) -> Result<Option<plant::Model>> {
    let mut query = Plant::find().filter(plant::Column::Name.eq(name.trim()));

    query = match variety {
        Some(variety) => query.filter(plant::Column::Variety.eq(variety.trim())),
        None => query.filter(plant::Column::Variety.is_null()),
    };

    query.one(db).await.map_err(Into::into)
}

/// Creates a new plant, enforcing `(name, variety)` uniqueness.
pub async fn create_plant(db: &DatabaseConnection, spec: PlantSpec) -> Result<plant::Model> {
    let name = spec.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Plant name cannot be empty".to_string(),
        });
    }

    let variety = spec
        .variety
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string);

    if get_plant_by_name_and_variety(db, &name, variety.as_deref())
        .await?
        .is_some()
    {
        return Err(Error::DuplicatePlant { name, variety });
    }

    let model = plant::ActiveModel {
        name: Set(name),
        variety: Set(variety),
        category: Set(spec.category),
        days_to_maturity: Set(spec.days_to_maturity),
        spacing_inches: Set(spec.spacing_inches),
        sun_requirement: Set(spec.sun_requirement),
        water_needs: Set(spec.water_needs),
        frost_tolerant: Set(spec.frost_tolerant),
        watched: Set(false),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Sets the watched flag on a plant, returning the updated model.
pub async fn set_watched(
    db: &DatabaseConnection,
    plant_id: i64,
    watched: bool,
) -> Result<plant::Model> {
    let plant = get_plant_by_id(db, plant_id)
        .await?
        .ok_or_else(|| Error::PlantNotFound {
            name: plant_id.to_string(),
        })?;

    let mut active: plant::ActiveModel = plant.into();
    active.watched = Set(watched);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a plant, cascading to its planting windows and bed placements.
pub async fn delete_plant(db: &DatabaseConnection, plant_id: i64) -> Result<()> {
    let _plant = get_plant_by_id(db, plant_id)
        .await?
        .ok_or_else(|| Error::PlantNotFound {
            name: plant_id.to_string(),
        })?;

    let txn = db.begin().await?;

    PlantingWindow::delete_many()
        .filter(planting_window::Column::PlantId.eq(plant_id))
        .exec(&txn)
        .await?;
    BedPlacement::delete_many()
        .filter(bed_placement::Column::PlantId.eq(plant_id))
        .exec(&txn)
        .await?;
    Plant::delete_by_id(plant_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Lists a plant's planting windows.
pub async fn list_windows_for_plant(
    db: &DatabaseConnection,
    plant_id: i64,
) -> Result<Vec<planting_window::Model>> {
    PlantingWindow::find()
        .filter(planting_window::Column::PlantId.eq(plant_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates or replaces the planting window for `(plant_id, window_type)`.
///
/// At most one window exists per plant and window type; setting an existing
/// type overwrites its range. Months are validated 1-12, days 1-31.
pub async fn set_planting_window(
    db: &DatabaseConnection,
    plant_id: i64,
    window_type: &str,
    start_month: i32,
    start_day: i32,
    end_month: i32,
    end_day: i32,
) -> Result<planting_window::Model> {
    let _plant = get_plant_by_id(db, plant_id)
        .await?
        .ok_or_else(|| Error::PlantNotFound {
            name: plant_id.to_string(),
        })?;

    // Month validation shares the calendar's rules
    let _range = MonthRange::new(start_month, end_month)?;

    for day in [start_day, end_day] {
        if !(1..=31).contains(&day) {
            return Err(Error::Config {
                message: format!("Invalid day of month: {day} (expected 1-31)"),
            });
        }
    }

    let existing = PlantingWindow::find()
        .filter(planting_window::Column::PlantId.eq(plant_id))
        .filter(planting_window::Column::WindowType.eq(window_type))
        .one(db)
        .await?;

    if let Some(window) = existing {
        let mut active: planting_window::ActiveModel = window.into();
        active.start_month = Set(start_month);
        active.start_day = Set(start_day);
        active.end_month = Set(end_month);
        active.end_day = Set(end_day);
        active.update(db).await.map_err(Into::into)
    } else {
        let model = planting_window::ActiveModel {
            plant_id: Set(plant_id),
            window_type: Set(window_type.to_string()),
            start_month: Set(start_month),
            start_day: Set(start_day),
            end_month: Set(end_month),
            end_day: Set(end_day),
            ..Default::default()
        };
        model.insert(db).await.map_err(Into::into)
    }
}
