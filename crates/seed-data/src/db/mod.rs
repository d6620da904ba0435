//! Database integration for seeding flight sales.
//!
//! The [`Seeder`] writes generated records through the bulk-insert primitive of
//! [`flight_sales::Database`]. Loaders talk to it through [`FlightSaleSink`].

mod seeder;

pub use seeder::{FlightSaleSink, SeedError, Seeder};
