//! Entity generators for seed data.
//!
//! - [`FlightSaleGenerator`]: generate flight sales with purchase and departure times

pub mod flight_sale;

pub use flight_sale::{FlightSaleGenConfig, FlightSaleGenerator};
