//! Database seeding utilities.

use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

use flight_sales::{AppError, Database, NewFlightSale};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Storage error: {0}")]
    App(#[from] AppError),
    #[error("Invalid seed configuration: {0}")]
    InvalidConfig(String),
}

/// Destination for batches of generated flight sales.
pub trait FlightSaleSink {
    /// Writes `batch` as a single storage operation, returning the rows written.
    fn insert_batch(
        &self,
        batch: &[NewFlightSale],
    ) -> impl Future<Output = Result<u64, SeedError>> + Send;
}

/// Database seeder for inserting generated flight sales.
pub struct Seeder {
    db: Database,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            db: Database::new(pool),
        }
    }

    /// Number of flight sales currently stored.
    pub async fn count(&self) -> Result<i64, SeedError> {
        Ok(self.db.count_flight_sales().await?)
    }

    /// Clears all seeded flight sales.
    ///
    /// **WARNING**: This deletes every row of `flight_sales`. Use with caution.
    pub async fn clear_all(&self) -> Result<(), SeedError> {
        info!("Clearing all seeded data...");
        let removed = self.db.clear_flight_sales().await?;
        info!("Removed {} flight sales", removed);
        Ok(())
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}

impl FlightSaleSink for Seeder {
    async fn insert_batch(&self, batch: &[NewFlightSale]) -> Result<u64, SeedError> {
        let inserted = self.db.insert_flight_sales(batch).await?;
        debug!("Inserted {} flight sales", inserted);
        Ok(inserted)
    }
}
