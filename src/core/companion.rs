//! Companion relationship business logic.
//!
//! Relationships are unordered pairs of generic plant names tagged good, bad,
//! or neutral. The pair is stored once but every lookup is symmetric, and
//! variety never participates in matching. Names are trimmed at the insert
//! and lookup boundaries; matching stays case-sensitive.

use crate::{
    entities::{CompanionRelationship, companion_relationship},
    errors::{Error, Result},
};
use sea_orm::{Condition, Set, prelude::*};
use std::collections::HashMap;

/// Relationship tag for a pair that grows well together.
pub const RELATIONSHIP_GOOD: &str = "good";
/// Relationship tag for a pair that should be kept apart.
pub const RELATIONSHIP_BAD: &str = "bad";
/// Relationship tag for a pair with no recorded effect.
pub const RELATIONSHIP_NEUTRAL: &str = "neutral";

/// Retrieves all stored companion relationships.
pub async fn get_all_relationships(
    db: &DatabaseConnection,
) -> Result<Vec<companion_relationship::Model>> {
    CompanionRelationship::find()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds the relationship between two generic plant names, trying both
/// stored orders. Returns None when no relationship is recorded.
pub async fn lookup_relationship(
    db: &DatabaseConnection,
    name_a: &str,
    name_b: &str,
) -> Result<Option<companion_relationship::Model>> {
    let a = name_a.trim();
    let b = name_b.trim();

    CompanionRelationship::find()
        .filter(
            Condition::any()
                .add(
                    Condition::all()
                        .add(companion_relationship::Column::PlantNameA.eq(a))
                        .add(companion_relationship::Column::PlantNameB.eq(b)),
                )
                .add(
                    Condition::all()
                        .add(companion_relationship::Column::PlantNameA.eq(b))
                        .add(companion_relationship::Column::PlantNameB.eq(a)),
                ),
        )
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a companion relationship, rejecting duplicates in either order.
pub async fn create_relationship(
    db: &DatabaseConnection,
    name_a: String,
    name_b: String,
    relationship: String,
    notes: Option<String>,
) -> Result<companion_relationship::Model> {
    let a = name_a.trim().to_string();
    let b = name_b.trim().to_string();

    if a.is_empty() || b.is_empty() {
        return Err(Error::Config {
            message: "Companion plant names cannot be empty".to_string(),
        });
    }

    if lookup_relationship(db, &a, &b).await?.is_some() {
        return Err(Error::DuplicateRelationship {
            name_a: a,
            name_b: b,
        });
    }

    let model = companion_relationship::ActiveModel {
        plant_name_a: Set(a),
        plant_name_b: Set(b),
        relationship: Set(relationship),
        notes: Set(notes),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Deletes a relationship by id.
pub async fn delete_relationship(db: &DatabaseConnection, relationship_id: i64) -> Result<()> {
    let result = CompanionRelationship::delete_by_id(relationship_id)
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::RelationshipNotFound {
            name_a: relationship_id.to_string(),
            name_b: String::new(),
        });
    }

    Ok(())
}

/// Preloaded, symmetric, read-only view of the relationship table.
///
/// The bed analyzer takes this instead of a live connection so its pairwise
/// scan stays a pure function. Both orders of every pair are indexed, so
/// `lookup` is a single map probe.
#[derive(Debug, Clone, Default)]
pub struct CompanionIndex {
    by_pair: HashMap<(String, String), companion_relationship::Model>,
    by_name: HashMap<String, Vec<companion_relationship::Model>>,
}

impl CompanionIndex {
    /// Builds the index from relationship rows.
    #[must_use]
    pub fn from_models(models: Vec<companion_relationship::Model>) -> Self {
        let mut by_pair = HashMap::new();
        let mut by_name: HashMap<String, Vec<companion_relationship::Model>> = HashMap::new();

        for model in models {
            let a = model.plant_name_a.trim().to_string();
            let b = model.plant_name_b.trim().to_string();

            by_pair.insert((a.clone(), b.clone()), model.clone());
            by_pair.insert((b.clone(), a.clone()), model.clone());

            by_name.entry(a).or_default().push(model.clone());
            by_name.entry(b).or_default().push(model);
        }

        Self { by_pair, by_name }
    }

    /// Loads the whole relationship table into an index.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        Ok(Self::from_models(get_all_relationships(db).await?))
    }

    /// Symmetric lookup by generic name.
    #[must_use]
    pub fn lookup(&self, name_a: &str, name_b: &str) -> Option<&companion_relationship::Model> {
        self.by_pair
            .get(&(name_a.trim().to_string(), name_b.trim().to_string()))
    }

    /// All good and bad companion names for a plant, scanning the whole
    /// table irrespective of bed adjacency. Used for the general-info
    /// sidebar next to the placement check.
    #[must_use]
    pub fn companions_of(&self, name: &str) -> (Vec<String>, Vec<String>) {
        let name = name.trim();
        let mut good = Vec::new();
        let mut bad = Vec::new();

        if let Some(models) = self.by_name.get(name) {
            for model in models {
                let other = if model.plant_name_a.trim() == name {
                    model.plant_name_b.trim().to_string()
                } else {
                    model.plant_name_a.trim().to_string()
                };
                match model.relationship.as_str() {
                    RELATIONSHIP_GOOD => good.push(other),
                    RELATIONSHIP_BAD => bad.push(other),
                    _ => {}
                }
            }
        }

        (good, bad)
    }
}
