//! Configuration types for seed data loading.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::db::SeedError;

/// Configuration for seeding operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of flight sales to insert.
    pub total_records: usize,

    /// Number of records generated and inserted per bulk insert.
    pub batch_size: usize,

    /// Seed for the random source. `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            total_records: 3_000_000,
            batch_size: 10_000,
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    pub fn with_total_records(mut self, total: usize) -> Self {
        self.total_records = total;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Sets the random seed for reproducible data.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Random source for a load: seeded from `rng_seed`, or from OS entropy when unset.
    ///
    /// Identical seeds only reproduce records when the generator anchor is fixed too.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Rejects configurations the loader cannot make progress on.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.batch_size == 0 {
            return Err(SeedError::InvalidConfig(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of bulk inserts needed to write `total_records`.
    ///
    /// A total that is not a multiple of the batch size gets one shorter final batch.
    pub fn batch_count(&self) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        self.total_records.div_ceil(self.batch_size)
    }

    /// Number of records in the zero-based batch `index`.
    pub fn batch_len(&self, index: usize) -> usize {
        let start = index.saturating_mul(self.batch_size);
        self.total_records.saturating_sub(start).min(self.batch_size)
    }
}
