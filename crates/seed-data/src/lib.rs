//! Seed data generation for flight-sales.
//!
//! This crate generates synthetic flight sales and bulk-loads them into the
//! `flight_sales` table in fixed-size batches.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let seeder = Seeder::new(pool);
//! let config = SeedConfig::default().with_rng_seed(12345);
//!
//! let summary = load_flight_sales(
//!     &seeder,
//!     &FlightSaleGenerator::new(),
//!     &config,
//!     &mut config.rng(),
//!     &stdout_progress(),
//! )
//! .await?;
//! ```

pub mod config;
pub mod db;
pub mod generators;
pub mod loader;

pub use flight_sales::NewFlightSale;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::NewFlightSale;
    pub use crate::config::SeedConfig;
    pub use crate::db::{FlightSaleSink, SeedError, Seeder};
    pub use crate::generators::{FlightSaleGenConfig, FlightSaleGenerator};
    pub use crate::loader::{
        LoadSummary, ProgressCallback, load_flight_sales, progress_line, stdout_progress,
    };
}
