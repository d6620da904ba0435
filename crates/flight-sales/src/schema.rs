//! Definition of the `flight_sales` table.
//!
//! The table shape lives in `migrations/`; applied versions are tracked by
//! sqlx in `_sqlx_migrations`, so running [`create_schema`] twice is a no-op.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use crate::errors::AppError;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies every pending migration.
pub async fn create_schema(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying {} migrations", MIGRATOR.iter().count());
    MIGRATOR.run(pool).await?;
    info!("Schema is up to date");
    Ok(())
}
