//! Planting calendar business logic.
//!
//! Decides what is plantable in the current month and builds the yearly
//! agenda for watched plants. All date math runs at month resolution over a
//! cyclic 1-12 wheel: a window whose start month is later than its end month
//! wraps across year-end (Oct through Feb, say). Day-of-month fields are
//! carried for display but never influence membership.
//!
//! "Today" is always an explicit parameter so the calendar stays a pure
//! function of its inputs and tests never have to mock the system clock.

use crate::{
    entities::{Plant, PlantingWindow, plant, planting_window},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{DatabaseConnection, prelude::*};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Fixed display order for window types; unknown types sort after these.
pub const WINDOW_TYPE_ORDER: [&str; 3] = ["indoor_start", "transplant", "direct_sow"];

/// Fixed display order for plant categories; unknown categories sort after these.
pub const CATEGORY_ORDER: [&str; 5] = ["vegetable", "herb", "fruit", "flower", "cover_crop"];

/// Sort rank for a window type per [`WINDOW_TYPE_ORDER`].
#[must_use]
pub fn window_type_rank(window_type: &str) -> usize {
    WINDOW_TYPE_ORDER
        .iter()
        .position(|t| *t == window_type)
        .unwrap_or(WINDOW_TYPE_ORDER.len())
}

/// Sort rank for a category per [`CATEGORY_ORDER`].
#[must_use]
pub fn category_rank(category: &str) -> usize {
    CATEGORY_ORDER
        .iter()
        .position(|c| *c == category)
        .unwrap_or(CATEGORY_ORDER.len())
}

/// A closed month interval on the cyclic 1-12 wheel.
///
/// Implements the single wrap-aware containment test used everywhere month
/// membership matters, so the `start <= end` branch never gets duplicated at
/// call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    start: i32,
    end: i32,
}

impl MonthRange {
    /// Builds a range, rejecting months outside 1-12.
    pub fn new(start: i32, end: i32) -> Result<Self> {
        for month in [start, end] {
            if !(1..=12).contains(&month) {
                return Err(Error::InvalidInterval { month });
            }
        }
        Ok(Self { start, end })
    }

    /// Whether the range crosses year-end.
    #[must_use]
    pub const fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Wrap-aware closed-interval membership.
    #[must_use]
    pub const fn contains(&self, month: i32) -> bool {
        if self.wraps() {
            month >= self.start || month <= self.end
        } else {
            month >= self.start && month <= self.end
        }
    }
}

/// Whether `month` falls inside a planting window (month resolution only).
pub fn is_in_window(window: &planting_window::Model, month: i32) -> Result<bool> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidInterval { month });
    }
    Ok(MonthRange::new(window.start_month, window.end_month)?.contains(month))
}

/// A plant paired with one of its currently-active planting windows.
#[derive(Debug, Clone, Serialize)]
pub struct PlantWithWindow {
    /// The plant
    pub plant: plant::Model,
    /// The qualifying window
    pub window: planting_window::Model,
}

/// One entry of the yearly planting agenda.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    /// Id of the plant this event belongs to
    pub plant_id: i64,
    /// `"Name"` or `"Name (Variety)"`
    pub display_name: String,
    /// Plant category
    pub category: String,
    /// Window kind: indoor_start, transplant, or direct_sow
    pub window_type: String,
    /// Window start month (1-12)
    pub start_month: i32,
    /// Window start day (informational)
    pub start_day: i32,
    /// Window end month (1-12)
    pub end_month: i32,
    /// Window end day (informational)
    pub end_day: i32,
    /// True when the window crosses year-end
    pub wraps_year: bool,
    /// Days to maturity, if known
    pub days_to_maturity: Option<i32>,
    /// Composed label for timeline rendering
    pub label: String,
}

/// The full yearly agenda for watched plants.
#[derive(Debug, Clone, Serialize)]
pub struct YearAgenda {
    /// Year the agenda was built for
    pub year: i32,
    /// Every event, one per `(plant, window)` pair
    pub events: Vec<CalendarEvent>,
    /// Month (1-12) to the events active in that month; always 12 entries
    pub agenda: BTreeMap<u32, Vec<CalendarEvent>>,
    /// Number of distinct plants contributing at least one window
    pub watched_count: usize,
}

/// Loads every plant together with its planting windows.
pub async fn list_plants_with_windows(
    db: &DatabaseConnection,
) -> Result<Vec<(plant::Model, Vec<planting_window::Model>)>> {
    Plant::find()
        .find_with_related(PlantingWindow)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads watched plants together with their planting windows.
pub async fn list_watched_plants_with_windows(
    db: &DatabaseConnection,
) -> Result<Vec<(plant::Model, Vec<planting_window::Model>)>> {
    Plant::find()
        .filter(plant::Column::Watched.eq(true))
        .find_with_related(PlantingWindow)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns every `(plant, window)` pair active in `today`'s month.
///
/// A plant with two qualifying windows appears once per window. Only exact
/// `(plant_id, window_type)` repeats are deduplicated; the same plant under
/// different window types is intentionally listed more than once. Output is
/// stably sorted by window type, then category, then name, using the fixed
/// sequences in [`WINDOW_TYPE_ORDER`] and [`CATEGORY_ORDER`].
pub fn plantable_now(
    plants_with_windows: &[(plant::Model, Vec<planting_window::Model>)],
    today: NaiveDate,
) -> Result<Vec<PlantWithWindow>> {
    let month = i32::try_from(today.month())?;

    let mut seen: HashSet<(i64, String)> = HashSet::new();
    let mut results = Vec::new();

    for (plant, windows) in plants_with_windows {
        for window in windows {
            if !is_in_window(window, month)? {
                continue;
            }
            if !seen.insert((plant.id, window.window_type.clone())) {
                continue;
            }
            results.push(PlantWithWindow {
                plant: plant.clone(),
                window: window.clone(),
            });
        }
    }

    results.sort_by(|a, b| {
        window_type_rank(&a.window.window_type)
            .cmp(&window_type_rank(&b.window.window_type))
            .then_with(|| category_rank(&a.plant.category).cmp(&category_rank(&b.plant.category)))
            .then_with(|| a.plant.name.cmp(&b.plant.name))
    });

    Ok(results)
}

/// Builds the yearly agenda for the watched plant set.
///
/// Each `(plant, window)` pair becomes one [`CalendarEvent`]; month `m`'s
/// agenda entry lists every event whose window contains `m`, so a wrapping
/// Nov-Jan window shows up under 11, 12, and 1. The timeline view relies on
/// events appearing in every month they span, not just the start month.
/// `watched_count` counts distinct plants, not windows.
pub fn build_year_agenda(
    watched_plants: &[(plant::Model, Vec<planting_window::Model>)],
    year: i32,
) -> Result<YearAgenda> {
    let mut events = Vec::new();
    let mut contributing: HashSet<i64> = HashSet::new();
    let mut seen: HashSet<(i64, String)> = HashSet::new();

    for (plant, windows) in watched_plants {
        if !plant.watched {
            continue;
        }
        for window in windows {
            let range = MonthRange::new(window.start_month, window.end_month)?;
            if !seen.insert((plant.id, window.window_type.clone())) {
                continue;
            }
            let display_name = plant.display_name();
            let label = format!(
                "{display_name}: {} {}/{} - {}/{}",
                window.window_type,
                window.start_month,
                window.start_day,
                window.end_month,
                window.end_day
            );
            events.push(CalendarEvent {
                plant_id: plant.id,
                display_name,
                category: plant.category.clone(),
                window_type: window.window_type.clone(),
                start_month: window.start_month,
                start_day: window.start_day,
                end_month: window.end_month,
                end_day: window.end_day,
                wraps_year: range.wraps(),
                days_to_maturity: plant.days_to_maturity,
                label,
            });
            contributing.insert(plant.id);
        }
    }

    let mut agenda: BTreeMap<u32, Vec<CalendarEvent>> = BTreeMap::new();
    for month in 1..=12u32 {
        let month_i32 = i32::try_from(month)?;
        let active: Vec<CalendarEvent> = events
            .iter()
            .filter(|event| {
                MonthRange {
                    start: event.start_month,
                    end: event.end_month,
                }
                .contains(month_i32)
            })
            .cloned()
            .collect();
        agenda.insert(month, active);
    }

    Ok(YearAgenda {
        year,
        events,
        agenda,
        watched_count: contributing.len(),
    })
}
