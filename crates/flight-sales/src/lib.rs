pub mod database;
pub mod errors;
pub mod models;
pub mod schema;

pub use database::Database;
pub use errors::AppError;
pub use models::{FlightSale, NewFlightSale};
pub use schema::{MIGRATOR, create_schema};
