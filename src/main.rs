//! `GardenBuddy` bootstrap binary.
//!
//! Initializes logging, connects to the database, applies the seed catalog,
//! and logs a startup summary of what is plantable this month. Request
//! handling (HTTP or otherwise) is layered on top of the library by the
//! embedding application.

use chrono::Utc;
use dotenvy::dotenv;
use garden_buddy::config::{database, seeds};
use garden_buddy::core::calendar;
use garden_buddy::errors::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// Requests are handled to completion one at a time; a single-threaded
// runtime is all the core needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (env vars can also be set externally)
    dotenv().ok();

    // 3. Initialize database
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;
    info!("Database initialized at {}", database::get_database_url()?);

    // 4. Seed the plant catalog if a seed file is present
    match seeds::load_default_config() {
        Ok(config) => {
            let summary = seeds::seed_database(&db, &config).await?;
            info!(
                "Seed pass complete: {} plants, {} relationships added",
                summary.plants_added, summary.companions_added
            );
        }
        Err(e) => warn!("No seed data applied: {e}"),
    }

    // 5. Startup summary: what can go in the ground this month
    let today = Utc::now().date_naive();
    let plants = calendar::list_plants_with_windows(&db).await?;
    let plantable = calendar::plantable_now(&plants, today)?;
    info!("{} plantings are in window right now", plantable.len());
    for entry in &plantable {
        info!(
            "  {} ({})",
            entry.plant.display_name(),
            entry.window.window_type
        );
    }

    Ok(())
}
