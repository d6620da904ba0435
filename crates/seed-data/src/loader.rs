//! Batched loading of generated flight sales.
//!
//! Batches are generated in memory and written one after another, each with a
//! single bulk insert. The first failing insert aborts the run; batches written
//! before it stay in place.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use crate::config::SeedConfig;
use crate::db::{FlightSaleSink, SeedError};
use crate::generators::FlightSaleGenerator;

/// Progress callback for long-running operations, called with
/// `(completed_batches, total_batches)`.
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Progress line reported after batch `batch` of `total` is written.
pub fn progress_line(batch: usize, total: usize) -> String {
    format!("Inserted batch {batch} of {total}")
}

/// Progress reporter printing [`progress_line`] to standard output.
pub fn stdout_progress() -> ProgressCallback {
    Box::new(|batch, total| println!("{}", progress_line(batch, total)))
}

/// Outcome of a completed load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    /// Number of bulk inserts issued.
    pub batches: usize,
    /// Number of rows written.
    pub records: u64,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

/// Generates `config.total_records` flight sales and writes them to `sink`
/// in batches of `config.batch_size`.
pub async fn load_flight_sales<S, R>(
    sink: &S,
    generator: &FlightSaleGenerator,
    config: &SeedConfig,
    rng: &mut R,
    progress: &ProgressCallback,
) -> Result<LoadSummary, SeedError>
where
    S: FlightSaleSink,
    R: Rng,
{
    config.validate()?;

    let start = Instant::now();
    let batch_count = config.batch_count();
    let mut records = 0;

    info!(
        "Seeding {} flight sales in {} batches...",
        config.total_records, batch_count
    );

    for index in 0..batch_count {
        let batch = generator.generate_batch(config.batch_len(index), rng);
        debug!("Generated batch {} ({} records)", index + 1, batch.len());

        records += sink.insert_batch(&batch).await?;
        progress(index + 1, batch_count);
    }

    let elapsed = start.elapsed();
    info!(
        "Seeded {} flight sales in {:.1}s",
        records,
        elapsed.as_secs_f64()
    );

    Ok(LoadSummary {
        batches: batch_count,
        records,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use flight_sales::NewFlightSale;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::datetime;

    /// Sink recording every insert call and the records it received.
    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<usize>>,
        records: Mutex<Vec<NewFlightSale>>,
        fail_on_call: Option<usize>,
    }

    impl RecordingSink {
        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<usize> {
            self.calls.lock().unwrap().clone()
        }

        fn records(&self) -> Vec<NewFlightSale> {
            self.records.lock().unwrap().clone()
        }
    }

    impl FlightSaleSink for RecordingSink {
        async fn insert_batch(&self, batch: &[NewFlightSale]) -> Result<u64, SeedError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(batch.len());
            if self.fail_on_call == Some(calls.len()) {
                return Err(SeedError::Database(sqlx::Error::PoolClosed));
            }
            assert!(batch.iter().all(|sale| sale.departs_after_purchase()));
            self.records.lock().unwrap().extend_from_slice(batch);
            Ok(batch.len() as u64)
        }
    }

    fn recording_progress() -> (ProgressCallback, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&lines);
        let progress: ProgressCallback = Box::new(move |batch, total| {
            captured
                .lock()
                .unwrap()
                .push(progress_line(batch, total));
        });
        (progress, lines)
    }

    #[test]
    fn test_progress_line() {
        assert_eq!(progress_line(1, 2), "Inserted batch 1 of 2");
        assert_eq!(progress_line(300, 300), "Inserted batch 300 of 300");
    }

    #[tokio::test]
    async fn test_same_seed_and_anchor_load_same_records() {
        let config = SeedConfig::default()
            .with_total_records(30)
            .with_batch_size(10)
            .with_rng_seed(12345);
        let anchor = datetime!(2024-07-09 15:28:03 UTC);
        let (progress, _lines) = recording_progress();

        let first = RecordingSink::default();
        let second = RecordingSink::default();
        for sink in [&first, &second] {
            load_flight_sales(
                sink,
                &FlightSaleGenerator::new().anchored_at(anchor),
                &config,
                &mut config.rng(),
                &progress,
            )
            .await
            .unwrap();
        }

        assert_eq!(first.records().len(), 30);
        assert_eq!(first.records(), second.records());
    }

    #[tokio::test]
    async fn test_two_batches() {
        let sink = RecordingSink::default();
        let config = SeedConfig::default()
            .with_total_records(20_000)
            .with_batch_size(10_000);
        let (progress, lines) = recording_progress();
        let mut rng = StdRng::seed_from_u64(12345);

        let summary = load_flight_sales(
            &sink,
            &FlightSaleGenerator::new(),
            &config,
            &mut rng,
            &progress,
        )
        .await
        .unwrap();

        assert_eq!(sink.calls(), vec![10_000, 10_000]);
        assert_eq!(summary.batches, 2);
        assert_eq!(summary.records, 20_000);
        assert_eq!(
            *lines.lock().unwrap(),
            vec!["Inserted batch 1 of 2", "Inserted batch 2 of 2"]
        );
    }

    #[tokio::test]
    async fn test_call_count_matches_batches() {
        let sink = RecordingSink::default();
        let config = SeedConfig::default()
            .with_total_records(3_000)
            .with_batch_size(10);
        let (progress, lines) = recording_progress();
        let mut rng = StdRng::seed_from_u64(1);

        let summary = load_flight_sales(
            &sink,
            &FlightSaleGenerator::new(),
            &config,
            &mut rng,
            &progress,
        )
        .await
        .unwrap();

        assert_eq!(sink.calls().len(), 300);
        assert!(sink.calls().iter().all(|&len| len == 10));
        assert_eq!(summary.records, 3_000);
        assert_eq!(lines.lock().unwrap().last().unwrap(), "Inserted batch 300 of 300");
    }

    #[tokio::test]
    async fn test_remainder_goes_into_last_batch() {
        let sink = RecordingSink::default();
        let config = SeedConfig::default()
            .with_total_records(25)
            .with_batch_size(10);
        let (progress, _lines) = recording_progress();
        let mut rng = StdRng::seed_from_u64(2);

        let summary = load_flight_sales(
            &sink,
            &FlightSaleGenerator::new(),
            &config,
            &mut rng,
            &progress,
        )
        .await
        .unwrap();

        assert_eq!(sink.calls(), vec![10, 10, 5]);
        assert_eq!(summary.records, 25);
    }

    #[tokio::test]
    async fn test_failed_insert_aborts_run() {
        let sink = RecordingSink::failing_on(2);
        let config = SeedConfig::default()
            .with_total_records(50)
            .with_batch_size(10);
        let (progress, lines) = recording_progress();
        let mut rng = StdRng::seed_from_u64(3);

        let result = load_flight_sales(
            &sink,
            &FlightSaleGenerator::new(),
            &config,
            &mut rng,
            &progress,
        )
        .await;

        assert!(matches!(result, Err(SeedError::Database(_))));
        // No batch is attempted after the failure
        assert_eq!(sink.calls(), vec![10, 10]);
        assert_eq!(*lines.lock().unwrap(), vec!["Inserted batch 1 of 5"]);
    }

    #[tokio::test]
    async fn test_zero_batch_size_inserts_nothing() {
        let sink = RecordingSink::default();
        let config = SeedConfig::default().with_batch_size(0);
        let (progress, _lines) = recording_progress();
        let mut rng = StdRng::seed_from_u64(4);

        let result = load_flight_sales(
            &sink,
            &FlightSaleGenerator::new(),
            &config,
            &mut rng,
            &progress,
        )
        .await;

        assert!(matches!(result, Err(SeedError::InvalidConfig(_))));
        assert!(sink.calls().is_empty());
    }
}
