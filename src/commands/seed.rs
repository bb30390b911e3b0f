//! Seed command - Inserts reference benefits and sample employees.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{self, Database, Persistence};

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let report = infra::seed(&Persistence::new(db.get_connection())).await?;
    println!(
        "Inserted {} benefits and {} employees",
        report.benefits, report.employees
    );

    Ok(())
}
